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

//! The frame loop.
//!
//! One pass: deliver finished loading and host commands, fold queued input,
//! toggle pause on `P`, update, clear input edges, render and present with
//! retry, then sleep to hold the frame rate. The loop runs until the stop
//! signal is observed and then performs the shutdown sequence itself.

use crate::context::{GameContext, LoopState};
use crate::game::{Game, HostCommand};
use crate::loader::LoadingTask;
use crossbeam_channel::TryRecvError;
use sprig_core::event::EventBus;
use sprig_core::{Canvas, Key, Presenter, Stopwatch, SurfaceProvider};
use std::time::Duration;

/// Poll interval while paused.
pub const PAUSE_POLL_INTERVAL: Duration = Duration::from_millis(100);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum PassOutcome {
    Presented,
    /// The surface could not be acquired; nothing was drawn.
    Skipped,
    Stopped,
}

/// Drives a [`Game`] on the current thread.
pub struct FrameScheduler<G: Game> {
    game: G,
    state: LoopState,
    canvas: Canvas,
    presenter: Box<dyn Presenter>,
    provider: Box<dyn SurfaceProvider>,
    loading: Option<LoadingTask<G::Assets>>,
    commands: EventBus<HostCommand>,
}

impl<G: Game> FrameScheduler<G> {
    pub(crate) fn new(
        game: G,
        state: LoopState,
        presenter: Box<dyn Presenter>,
        provider: Box<dyn SurfaceProvider>,
        commands: EventBus<HostCommand>,
    ) -> Self {
        let canvas = Canvas::new(state.geometry.width(), state.geometry.height());
        Self {
            game,
            state,
            canvas,
            presenter,
            provider,
            loading: None,
            commands,
        }
    }

    /// Runs the game's `init_loading` hook.
    pub(crate) fn init_loading(&mut self) {
        self.game.init_loading(&mut GameContext::new(&mut self.state));
    }

    pub(crate) fn attach_loader(&mut self, task: LoadingTask<G::Assets>) {
        self.loading = Some(task);
    }

    /// Loops until stopped, then shuts down.
    pub fn run(mut self) {
        log::info!(
            "Frame loop started ({}x{} x{}, {:?} per frame)",
            self.state.geometry.width(),
            self.state.geometry.height(),
            self.state.geometry.scale(),
            self.state.clock.target_interval()
        );

        let mut watch = Stopwatch::new();
        while self.state.stop.is_running() {
            watch.restart();
            self.poll_loading();
            self.dispatch_commands();

            if let Some(request) = self.state.input.pump() {
                self.state.apply_focus(request);
            }
            if self.state.input.key_pressed(&Key::P) {
                let paused = !self.state.clock.is_paused();
                self.state.pause(paused, false);
            }

            if !self.state.clock.is_paused() && self.state.ready {
                let mut ctx = GameContext::new(&mut self.state);
                self.game.update_game(&mut ctx);
                self.game.update_animations(&ctx);
            }
            self.state.input.clear_keys();
            self.state.input.clear_mouse();

            let outcome = self.present_pass();
            match outcome {
                PassOutcome::Stopped => break,
                PassOutcome::Presented => self.state.stats.count_frame(),
                PassOutcome::Skipped => log::trace!("Surface unavailable, frame skipped"),
            }

            if self.state.clock.is_paused() {
                if self.state.stop.sleep(PAUSE_POLL_INTERVAL) {
                    break;
                }
            } else {
                let delay = self.state.clock.pacing_delay(watch.elapsed());
                if self.state.stop.sleep(delay) {
                    break;
                }
                if outcome == PassOutcome::Presented {
                    let ready = self.state.ready;
                    if self.state.clock.record_frame(watch.elapsed(), ready) {
                        log::trace!("{} fps", self.state.clock.measured_fps());
                    }
                }
            }
            self.state.stats.publish(&self.state.clock, self.state.ready);
        }

        self.shutdown();
    }

    /// Hands finished assets to the game.
    fn poll_loading(&mut self) {
        if self.state.ready {
            return;
        }
        let Some(task) = &self.loading else {
            return;
        };
        match task.try_take() {
            Ok(assets) => {
                self.game
                    .finish_loading(assets, &mut GameContext::new(&mut self.state));
                self.state.ready = true;
                log::info!("Game loaded");
            }
            Err(TryRecvError::Empty) => {}
            Err(TryRecvError::Disconnected) => {
                log::error!("Loading task ended without delivering the game, stopping");
                self.state.stop.request_stop();
            }
        }
    }

    fn dispatch_commands(&mut self) {
        let commands: Vec<HostCommand> = self.commands.drain().collect();
        for command in commands {
            match command {
                HostCommand::Menu(id) => {
                    log::debug!("Menu action '{id}'");
                    self.game.on_menu(&id, &mut GameContext::new(&mut self.state));
                }
            }
        }
    }

    /// Renders and presents one frame, redrawing whenever presentation loses
    /// the contents.
    fn present_pass(&mut self) -> PassOutcome {
        let scale = self.state.geometry.scale();
        loop {
            if let Err(e) = self.presenter.acquire() {
                log::trace!("Acquire failed: {e}");
                return if self.state.stop.is_running() {
                    PassOutcome::Skipped
                } else {
                    PassOutcome::Stopped
                };
            }
            if !self.state.stop.is_running() {
                return PassOutcome::Stopped;
            }

            let ctx = GameContext::new(&mut self.state);
            if ctx.is_loaded() {
                self.game.render_game(&mut self.canvas, &ctx);
            } else {
                self.game.render_loading(&mut self.canvas, &ctx);
            }

            match self.presenter.present(&self.canvas, scale) {
                Ok(()) => {
                    return if self.state.stop.is_running() {
                        PassOutcome::Presented
                    } else {
                        PassOutcome::Stopped
                    };
                }
                Err(e) => log::trace!("Present failed ({e}), redrawing"),
            }
        }
    }

    /// Cancels loading, finishes the game, stops audio and releases the surface.
    pub(crate) fn shutdown(self) {
        let Self {
            mut game,
            mut state,
            presenter,
            mut provider,
            loading,
            ..
        } = self;

        state.stop.request_stop();
        if let Some(task) = loading {
            task.cancel();
        }
        game.finish_game(&mut GameContext::new(&mut state));
        state.audio.stop_all();
        drop(presenter);
        provider.release();
        state.stats.publish(&state.clock, state.ready);
        log::info!("Frame loop stopped");
    }
}
