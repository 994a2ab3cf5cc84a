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

//! Monotonic wall-clock measurement for frame pacing.

use std::time::{Duration, Instant};

/// Measures time from a restartable origin.
///
/// The frame loop keeps one per pass: [`lap`](Self::lap) returns the time
/// spent since the previous lap and starts the next one.
#[derive(Debug, Clone, Copy)]
pub struct Stopwatch {
    origin: Instant,
}

impl Stopwatch {
    /// Creates a stopwatch started now.
    #[inline]
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
        }
    }

    /// Time since the stopwatch was started or last restarted.
    #[inline]
    pub fn elapsed(&self) -> Duration {
        self.origin.elapsed()
    }

    /// [`elapsed`](Self::elapsed) in whole milliseconds.
    #[inline]
    pub fn elapsed_ms(&self) -> u64 {
        self.elapsed().as_millis() as u64
    }

    /// Moves the origin to now.
    #[inline]
    pub fn restart(&mut self) {
        self.origin = Instant::now();
    }

    /// Returns the elapsed time and restarts.
    #[inline]
    pub fn lap(&mut self) -> Duration {
        let now = Instant::now();
        let lap = now.saturating_duration_since(self.origin);
        self.origin = now;
        lap
    }
}

impl Default for Stopwatch {
    fn default() -> Self {
        Self::new()
    }
}
