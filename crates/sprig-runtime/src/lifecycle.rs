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

//! Startup and shutdown of a session.
//!
//! [`LifecycleController::start`] resolves the geometry, picks the save
//! storage for the hosting mode and starts the frame loop thread. The loop
//! thread creates its presenter, runs `init_loading` and starts the loading
//! task before the first frame. Shutdown is cooperative: the host calls
//! [`LifecycleHandle::request_stop`] and the loop thread runs the shutdown
//! sequence itself.

use crate::clock::FrameClock;
use crate::context::LoopState;
use crate::game::{Game, HostCommand, LoadContext};
use crate::host::HostBinding;
use crate::load_state::LoadState;
use crate::loader::LoadingCoordinator;
use crate::scheduler::FrameScheduler;
use crate::stop::StopSignal;
use crate::telemetry::{FrameStats, FrameStatsSnapshot};
use sprig_core::audio::AudioDevice;
use sprig_core::event::EventBus;
use sprig_core::persistence::{CookieStorage, FileStorage, SaveStorage};
use sprig_core::{DisplayGeometry, GameConfig, InputSampler, InputSink, SurfaceProvider};
use std::io;
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use thiserror::Error;

/// Why a session could not start or did not end cleanly.
#[derive(Debug, Error)]
pub enum LifecycleError {
    /// The resolved logical size has a zero dimension.
    #[error("display geometry {width}x{height} is empty")]
    EmptyGeometry {
        /// Logical width.
        width: u32,
        /// Logical height.
        height: u32,
    },
    /// The host surface could not be bound.
    #[error("failed to create the presentation surface: {0}")]
    Surface(String),
    /// A session thread could not be spawned.
    #[error("failed to spawn the {name} thread")]
    Spawn {
        /// Thread role.
        name: &'static str,
        /// OS error.
        #[source]
        source: io::Error,
    },
    /// The loop thread ended before reporting startup.
    #[error("the frame loop exited during startup")]
    StartupAborted,
    /// The loop thread panicked.
    #[error("the frame loop panicked")]
    LoopPanicked,
}

/// Starts sessions.
pub struct LifecycleController;

impl LifecycleController {
    /// Starts `game` on `binding`.
    ///
    /// Returns once the presenter exists and the loading task is running.
    pub fn start<G: Game>(
        config: &GameConfig,
        binding: HostBinding,
        game: G,
        audio: Arc<dyn AudioDevice>,
    ) -> Result<LifecycleHandle, LifecycleError> {
        let mode = binding.mode();
        let base_path = game.base_path();
        let (geometry, provider, storage) = match binding {
            HostBinding::Windowed { provider } => (
                DisplayGeometry::new(config.width, config.height, config.scaled),
                provider,
                Arc::new(FileStorage::new(base_path.clone())) as Arc<dyn SaveStorage>,
            ),
            HostBinding::Embedded {
                provider,
                host_size: (host_width, host_height),
                cookies,
            } => (
                DisplayGeometry::from_host_size(host_width, host_height, config.scaled),
                provider,
                Arc::new(CookieStorage::new(cookies)) as Arc<dyn SaveStorage>,
            ),
        };
        if geometry.is_empty() {
            return Err(LifecycleError::EmptyGeometry {
                width: geometry.width(),
                height: geometry.height(),
            });
        }
        log::info!(
            "Starting '{}' ({mode}, {}x{} logical, scale {}, {} fps cap)",
            config.title,
            geometry.width(),
            geometry.height(),
            geometry.scale(),
            config.max_fps
        );

        let stop = StopSignal::new();
        let stats = Arc::new(FrameStats::default());
        let load_state = Arc::new(LoadState::new());
        let input = InputSampler::new(geometry, config.pause_on_focus);
        let sink = input.sink();
        let commands = EventBus::new();
        let command_tx = commands.sender();

        let state = LoopState {
            clock: FrameClock::new(config.max_fps),
            input,
            geometry,
            stop: stop.clone(),
            audio,
            load_state: Arc::clone(&load_state),
            storage,
            stats: Arc::clone(&stats),
            ready: false,
        };

        let (startup_tx, startup_rx) = crossbeam_channel::bounded(1);
        let load_ctx = LoadContext::new(base_path, geometry);
        let thread = thread::Builder::new()
            .name("sprig-frame-loop".into())
            .spawn(move || {
                let scheduler = match boot(game, state, provider, commands, load_ctx) {
                    Ok(scheduler) => scheduler,
                    Err(e) => {
                        let _ = startup_tx.send(Err(e));
                        return;
                    }
                };
                let _ = startup_tx.send(Ok(()));
                drop(startup_tx);
                scheduler.run();
            })
            .map_err(|source| LifecycleError::Spawn {
                name: "frame loop",
                source,
            })?;

        match startup_rx.recv() {
            Ok(Ok(())) => {}
            Ok(Err(e)) => {
                let _ = thread.join();
                return Err(e);
            }
            Err(_) => {
                let _ = thread.join();
                return Err(LifecycleError::StartupAborted);
            }
        }

        Ok(LifecycleHandle {
            stop,
            input: sink,
            commands: command_tx,
            stats,
            load_state,
            geometry,
            thread: Some(thread),
        })
    }
}

/// Runs on the loop thread before the first frame.
fn boot<G: Game>(
    game: G,
    state: LoopState,
    mut provider: Box<dyn SurfaceProvider>,
    commands: EventBus<HostCommand>,
    load_ctx: LoadContext,
) -> Result<FrameScheduler<G>, LifecycleError> {
    let presenter = match provider.create_presenter(state.geometry) {
        Ok(presenter) => presenter,
        Err(e) => {
            provider.release();
            return Err(LifecycleError::Surface(format!("{e:#}")));
        }
    };

    let audio = Arc::clone(&state.audio);
    let load_state = Arc::clone(&state.load_state);
    let mut scheduler = FrameScheduler::new(game, state, presenter, provider, commands);
    scheduler.init_loading();

    match LoadingCoordinator::spawn::<G>(load_ctx, audio, load_state) {
        Ok(task) => {
            scheduler.attach_loader(task);
            Ok(scheduler)
        }
        Err(source) => {
            scheduler.shutdown();
            Err(LifecycleError::Spawn {
                name: "loader",
                source,
            })
        }
    }
}

/// Host-side handle to a running session.
///
/// Dropping the handle stops the session and waits for the loop thread.
pub struct LifecycleHandle {
    stop: StopSignal,
    input: InputSink,
    commands: flume::Sender<HostCommand>,
    stats: Arc<FrameStats>,
    load_state: Arc<LoadState>,
    geometry: DisplayGeometry,
    thread: Option<JoinHandle<()>>,
}

impl LifecycleHandle {
    /// The sink host input callbacks deliver events to.
    pub fn input_sink(&self) -> InputSink {
        self.input.clone()
    }

    /// Asks the loop to stop; it shuts down on its own thread.
    pub fn request_stop(&self) {
        if self.stop.request_stop() {
            log::info!("Stop requested by the host");
        }
    }

    /// `false` once a stop was requested by anyone.
    pub fn is_running(&self) -> bool {
        self.stop.is_running()
    }

    /// `true` once the loop thread has returned.
    pub fn is_finished(&self) -> bool {
        self.thread.as_ref().map_or(true, JoinHandle::is_finished)
    }

    pub fn stats(&self) -> FrameStatsSnapshot {
        self.stats.snapshot()
    }

    /// Whether the loading task has delivered the game.
    pub fn is_loaded(&self) -> bool {
        self.load_state.is_loaded()
    }

    pub fn has_sound(&self) -> bool {
        self.load_state.has_sound()
    }

    pub fn geometry(&self) -> DisplayGeometry {
        self.geometry
    }

    /// Reports a menu action; delivered to `on_menu` at the next frame.
    pub fn dispatch_menu(&self, id: impl Into<String>) {
        if self.commands.send(HostCommand::Menu(id.into())).is_err() {
            log::debug!("Menu action dropped, the frame loop is gone");
        }
    }

    /// A sender hosts can keep to dispatch menu actions from other threads.
    pub fn menu_sender(&self) -> flume::Sender<HostCommand> {
        self.commands.clone()
    }

    /// Waits for the loop thread to finish its shutdown sequence.
    ///
    /// Does not request a stop by itself.
    pub fn join(mut self) -> Result<(), LifecycleError> {
        self.join_thread()
    }

    fn join_thread(&mut self) -> Result<(), LifecycleError> {
        match self.thread.take() {
            Some(thread) => thread.join().map_err(|_| LifecycleError::LoopPanicked),
            None => Ok(()),
        }
    }
}

impl Drop for LifecycleHandle {
    fn drop(&mut self) {
        self.stop.request_stop();
        if let Err(e) = self.join_thread() {
            log::error!("{e}");
        }
    }
}
