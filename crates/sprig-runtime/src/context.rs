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

//! The view of the running session handed to [`Game`](crate::Game) callbacks.

use crate::clock::FrameClock;
use crate::load_state::LoadState;
use crate::stop::StopSignal;
use crate::telemetry::FrameStats;
use sprig_core::audio::AudioDevice;
use sprig_core::input::FocusRequest;
use sprig_core::persistence::{self, Persist, SaveSlot, SaveStorage};
use sprig_core::{DisplayGeometry, InputSampler};
use std::sync::Arc;

/// Loop-thread state shared between the scheduler and game callbacks.
pub(crate) struct LoopState {
    pub(crate) clock: FrameClock,
    pub(crate) input: InputSampler,
    pub(crate) geometry: DisplayGeometry,
    pub(crate) stop: StopSignal,
    pub(crate) audio: Arc<dyn AudioDevice>,
    pub(crate) load_state: Arc<LoadState>,
    pub(crate) storage: Arc<dyn SaveStorage>,
    pub(crate) stats: Arc<FrameStats>,
    pub(crate) ready: bool,
}

impl LoopState {
    /// Every pause change goes through here so audio follows.
    pub(crate) fn pause(&mut self, paused: bool, by_focus_loss: bool) {
        if self.clock.set_paused(paused, by_focus_loss) {
            self.audio.pause_all(paused);
            log::debug!(
                "{}{}",
                if paused { "Paused" } else { "Resumed" },
                if by_focus_loss { " (focus)" } else { "" }
            );
        }
    }

    pub(crate) fn apply_focus(&mut self, request: FocusRequest) {
        match request {
            FocusRequest::Pause => self.pause(true, true),
            FocusRequest::Resume => self.pause(false, true),
        }
    }
}

/// Session access for game callbacks.
pub struct GameContext<'a> {
    state: &'a mut LoopState,
}

impl<'a> GameContext<'a> {
    pub(crate) fn new(state: &'a mut LoopState) -> Self {
        Self { state }
    }

    /// The input state of this frame.
    pub fn input(&self) -> &InputSampler {
        &self.state.input
    }

    /// Turns pause-on-focus on or off.
    pub fn set_pause_on_focus(&mut self, enabled: bool) {
        self.state.input.set_pause_on_focus(enabled);
    }

    /// Logical width.
    pub fn width(&self) -> u32 {
        self.state.geometry.width()
    }

    /// Logical height.
    pub fn height(&self) -> u32 {
        self.state.geometry.height()
    }

    /// Integer magnification onto the physical surface.
    pub fn scale(&self) -> u32 {
        self.state.geometry.scale()
    }

    pub fn geometry(&self) -> DisplayGeometry {
        self.state.geometry
    }

    /// Frames presented in the last completed second.
    pub fn fps(&self) -> u32 {
        self.state.clock.measured_fps()
    }

    /// Simulation time in milliseconds; frozen while paused.
    pub fn time_ms(&self) -> u64 {
        self.state.clock.sim_time_ms()
    }

    pub fn is_paused(&self) -> bool {
        self.state.clock.is_paused()
    }

    /// Pauses or resumes the game and its audio.
    pub fn pause(&mut self, paused: bool) {
        self.state.pause(paused, false);
    }

    pub fn is_focused(&self) -> bool {
        self.state.input.is_focused()
    }

    /// Whether the audio device came up during loading.
    pub fn has_sound(&self) -> bool {
        self.state.load_state.has_sound()
    }

    pub fn is_loaded(&self) -> bool {
        self.state.ready
    }

    /// Stops the session at the next check; the loop then shuts down.
    pub fn exit_game(&mut self) {
        if self.state.stop.request_stop() {
            log::info!("Exit requested by the game");
        }
    }

    pub fn is_running(&self) -> bool {
        self.state.stop.is_running()
    }

    /// Changes the frame-rate cap.
    pub fn set_fps(&mut self, max_fps: u32) {
        self.state.clock.set_max_fps(max_fps);
    }

    /// Saves `game` to `slot`. Returns `false` on any failure.
    pub fn save_game<P: Persist + ?Sized>(&self, game: &P, slot: &SaveSlot) -> bool {
        persistence::save_game(self.state.storage.as_ref(), game, slot)
    }

    /// Restores `game` from `slot`. Returns `false` if nothing usable was
    /// stored.
    pub fn load_game<P: Persist + ?Sized>(&self, game: &mut P, slot: &SaveSlot) -> bool {
        persistence::load_game(self.state.storage.as_ref(), game, slot)
    }
}
