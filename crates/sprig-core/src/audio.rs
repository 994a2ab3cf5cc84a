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

//! Defines the abstract `AudioDevice` trait.

use anyhow::{anyhow, Result};

/// The audio subsystem as seen by the frame loop.
///
/// `init` runs once on the loading task and may block for a long time;
/// `pause_all` and `stop_all` are called from the frame loop thread.
pub trait AudioDevice: Send + Sync {
    /// Opens the output device. An error means the session runs silent.
    fn init(&self) -> Result<()>;

    /// Pauses (`true`) or resumes (`false`) every playing sound.
    fn pause_all(&self, paused: bool);

    /// Stops every sound. Called once during shutdown.
    fn stop_all(&self);
}

/// An audio device that never produces sound.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullAudio;

impl AudioDevice for NullAudio {
    fn init(&self) -> Result<()> {
        Err(anyhow!("audio is disabled"))
    }

    fn pause_all(&self, _paused: bool) {}

    fn stop_all(&self) {}
}
