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

use std::sync::atomic::{AtomicBool, Ordering};

/// Flags written once by the loading task and read by everyone else.
///
/// `sound_available` is published before `loaded`, so a reader that sees
/// `loaded` also sees the final sound flag. Neither flag ever reverts.
#[derive(Debug, Default)]
pub struct LoadState {
    loaded: AtomicBool,
    sound_available: AtomicBool,
}

impl LoadState {
    /// Creates the not-yet-loaded state.
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether the loading task has delivered the game.
    pub fn is_loaded(&self) -> bool {
        self.loaded.load(Ordering::Acquire)
    }

    /// Whether the audio device came up.
    pub fn has_sound(&self) -> bool {
        self.sound_available.load(Ordering::Acquire)
    }

    pub(crate) fn set_sound_available(&self, available: bool) {
        self.sound_available.store(available, Ordering::Release);
    }

    pub(crate) fn mark_loaded(&self) {
        self.loaded.store(true, Ordering::Release);
    }
}
