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

//! Frame statistics readable from any thread.

use crate::clock::FrameClock;
use std::sync::atomic::{AtomicBool, AtomicU32, AtomicU64, Ordering};

/// Counters the frame loop publishes after every pass.
#[derive(Debug, Default)]
pub struct FrameStats {
    fps: AtomicU32,
    sim_time_ms: AtomicU64,
    frames: AtomicU64,
    paused: AtomicBool,
    loaded: AtomicBool,
}

/// A point-in-time copy of [`FrameStats`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FrameStatsSnapshot {
    /// Frames presented in the last completed one-second window.
    pub fps: u32,
    /// Accumulated simulation time.
    pub sim_time_ms: u64,
    /// Frames presented since startup.
    pub frames: u64,
    /// Whether the loop is paused.
    pub paused: bool,
    /// Whether loading has completed.
    pub loaded: bool,
}

impl FrameStats {
    pub(crate) fn publish(&self, clock: &FrameClock, loaded: bool) {
        self.fps.store(clock.measured_fps(), Ordering::Relaxed);
        self.sim_time_ms.store(clock.sim_time_ms(), Ordering::Relaxed);
        self.paused.store(clock.is_paused(), Ordering::Relaxed);
        self.loaded.store(loaded, Ordering::Relaxed);
    }

    pub(crate) fn count_frame(&self) {
        self.frames.fetch_add(1, Ordering::Relaxed);
    }

    /// Reads all counters.
    pub fn snapshot(&self) -> FrameStatsSnapshot {
        FrameStatsSnapshot {
            fps: self.fps.load(Ordering::Relaxed),
            sim_time_ms: self.sim_time_ms.load(Ordering::Relaxed),
            frames: self.frames.load(Ordering::Relaxed),
            paused: self.paused.load(Ordering::Relaxed),
            loaded: self.loaded.load(Ordering::Relaxed),
        }
    }
}
