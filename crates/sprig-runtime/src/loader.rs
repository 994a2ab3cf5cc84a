// Copyright 2025 eraflo
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! The one-time loading task.
//!
//! The task runs `init_game`, brings up audio, hands the assets to the frame
//! loop over a one-shot channel and then parks on its cancellation token.
//! The loop never blocks on it: it polls [`LoadingTask::try_take`] once per
//! frame.

use crate::game::{Game, LoadContext};
use crate::load_state::LoadState;
use crossbeam_channel::{Receiver, Sender, TryRecvError};
use sprig_core::audio::AudioDevice;
use std::io;
use std::sync::Arc;
use std::thread;

/// Releases a parked loading task.
#[derive(Debug)]
pub struct CancelToken {
    tx: Sender<()>,
}

impl CancelToken {
    /// Wakes the task; it exits without further callbacks.
    pub fn cancel(self) {
        let _ = self.tx.try_send(());
    }
}

/// The loop's end of a running loading task.
#[derive(Debug)]
pub struct LoadingTask<A> {
    ready_rx: Receiver<A>,
    cancel: CancelToken,
    state: Arc<LoadState>,
}

impl<A> LoadingTask<A> {
    /// Takes the assets if they have arrived.
    ///
    /// `Disconnected` means the task ended without delivering anything.
    pub fn try_take(&self) -> Result<A, TryRecvError> {
        self.ready_rx.try_recv()
    }

    /// The flags the task publishes.
    pub fn state(&self) -> &Arc<LoadState> {
        &self.state
    }

    /// Releases the task.
    pub fn cancel(self) {
        self.cancel.cancel();
    }
}

/// Spawns loading tasks.
pub struct LoadingCoordinator;

impl LoadingCoordinator {
    /// Starts the loading task for `G` on its own thread.
    ///
    /// The thread is detached; shutdown only releases it through the
    /// cancellation token.
    pub fn spawn<G: Game>(
        ctx: LoadContext,
        audio: Arc<dyn AudioDevice>,
        state: Arc<LoadState>,
    ) -> io::Result<LoadingTask<G::Assets>> {
        let (ready_tx, ready_rx) = crossbeam_channel::bounded(1);
        let (cancel_tx, cancel_rx) = crossbeam_channel::bounded(1);
        let task_state = Arc::clone(&state);

        thread::Builder::new()
            .name("sprig-loader".into())
            .spawn(move || load::<G>(ctx, audio, task_state, ready_tx, cancel_rx))?;

        Ok(LoadingTask {
            ready_rx,
            cancel: CancelToken { tx: cancel_tx },
            state,
        })
    }
}

fn load<G: Game>(
    ctx: LoadContext,
    audio: Arc<dyn AudioDevice>,
    state: Arc<LoadState>,
    ready_tx: Sender<G::Assets>,
    cancel_rx: Receiver<()>,
) {
    log::info!("Loading started (base path: {})", ctx.base_path().display());
    let assets = G::init_game(&ctx);

    if cancel_rx.try_recv() != Err(TryRecvError::Empty) {
        log::info!("Loading cancelled before audio initialization");
        return;
    }

    let sound = match audio.init() {
        Ok(()) => true,
        Err(e) => {
            log::warn!("Audio unavailable, running silent: {e:#}");
            false
        }
    };
    if cancel_rx.try_recv() != Err(TryRecvError::Empty) {
        // The loop already ran its `stop_all`; silence what init opened.
        audio.stop_all();
        log::info!("Loading cancelled during audio initialization");
        return;
    }
    state.set_sound_available(sound);

    if ready_tx.send(assets).is_err() {
        log::debug!("Frame loop gone before loading finished");
        return;
    }
    drop(ready_tx);
    state.mark_loaded();
    log::info!("Loading finished (sound: {sound})");

    // Parked until shutdown.
    let _ = cancel_rx.recv();
    log::debug!("Loading task released");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::GameContext;
    use sprig_core::audio::NullAudio;
    use sprig_core::{Canvas, DisplayGeometry};
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    struct Counter;

    impl Game for Counter {
        type Assets = u32;

        fn init_game(ctx: &LoadContext) -> u32 {
            ctx.geometry().width()
        }

        fn finish_loading(&mut self, _: u32, _: &mut GameContext<'_>) {}
        fn update_game(&mut self, _: &mut GameContext<'_>) {}
        fn render_game(&mut self, _: &mut Canvas, _: &GameContext<'_>) {}
    }

    fn ctx() -> LoadContext {
        LoadContext::new(".", DisplayGeometry::new(64, 48, false))
    }

    #[test]
    fn assets_arrive_and_state_is_published() {
        let state = Arc::new(LoadState::new());
        let task =
            LoadingCoordinator::spawn::<Counter>(ctx(), Arc::new(NullAudio), state.clone()).unwrap();

        let assets = task.ready_rx.recv_timeout(Duration::from_secs(5)).unwrap();
        assert_eq!(assets, 64);

        // `loaded` is stored right after the hand-off.
        let deadline = std::time::Instant::now() + Duration::from_secs(5);
        while !state.is_loaded() && std::time::Instant::now() < deadline {
            thread::sleep(Duration::from_millis(1));
        }
        assert!(state.is_loaded());
        assert!(!state.has_sound(), "NullAudio never provides sound");
        task.cancel();
    }

    struct GatedAudio {
        entered: crossbeam_channel::Sender<()>,
        gate: crossbeam_channel::Receiver<()>,
        stops: AtomicUsize,
    }

    impl AudioDevice for GatedAudio {
        fn init(&self) -> anyhow::Result<()> {
            let _ = self.entered.send(());
            let _ = self.gate.recv();
            Ok(())
        }

        fn pause_all(&self, _: bool) {}

        fn stop_all(&self) {
            self.stops.fetch_add(1, Ordering::SeqCst);
        }
    }

    #[test]
    fn cancel_during_audio_init_silences_the_device() {
        let (entered_tx, entered_rx) = crossbeam_channel::bounded(1);
        let (gate_tx, gate_rx) = crossbeam_channel::bounded(1);
        let audio = Arc::new(GatedAudio {
            entered: entered_tx,
            gate: gate_rx,
            stops: AtomicUsize::new(0),
        });
        let state = Arc::new(LoadState::new());
        let task = LoadingCoordinator::spawn::<Counter>(ctx(), audio.clone(), state.clone()).unwrap();

        entered_rx.recv_timeout(Duration::from_secs(5)).unwrap();
        task.cancel();
        gate_tx.send(()).unwrap();

        let deadline = std::time::Instant::now() + Duration::from_secs(5);
        while audio.stops.load(Ordering::SeqCst) == 0 && std::time::Instant::now() < deadline {
            thread::sleep(Duration::from_millis(1));
        }
        assert_eq!(audio.stops.load(Ordering::SeqCst), 1);
        assert!(!state.has_sound());
        assert!(!state.is_loaded());
    }

    #[test]
    fn cancelled_task_delivers_nothing_more() {
        let state = Arc::new(LoadState::new());
        let task =
            LoadingCoordinator::spawn::<Counter>(ctx(), Arc::new(NullAudio), state).unwrap();
        let _ = task.ready_rx.recv_timeout(Duration::from_secs(5));
        let rx = task.ready_rx.clone();
        task.cancel();
        assert!(rx.recv_timeout(Duration::from_secs(5)).is_err());
    }
}
