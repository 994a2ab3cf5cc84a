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

//! Frame pacing and frame-rate measurement.

use sprig_core::config::frame_interval;
use std::time::Duration;

const ONE_SECOND: Duration = Duration::from_secs(1);

/// Timing state of the frame loop.
///
/// Owned by the loop thread; telemetry is published separately through
/// [`FrameStats`](crate::telemetry::FrameStats).
#[derive(Debug, Clone)]
pub struct FrameClock {
    target: Duration,
    measured_fps: u32,
    sim_time: Duration,
    paused: bool,
    paused_by_focus_loss: bool,
    window_frames: u32,
    window_time: Duration,
}

impl FrameClock {
    /// Creates a clock capped at `max_fps` (zero counts as one).
    pub fn new(max_fps: u32) -> Self {
        Self {
            target: frame_interval(max_fps),
            measured_fps: 0,
            sim_time: Duration::ZERO,
            paused: false,
            paused_by_focus_loss: false,
            window_frames: 0,
            window_time: Duration::ZERO,
        }
    }

    /// Changes the cap; takes effect on the next pacing sleep.
    pub fn set_max_fps(&mut self, max_fps: u32) {
        self.target = frame_interval(max_fps);
        log::debug!("Frame interval set to {:?}", self.target);
    }

    /// Time budget of one frame.
    pub fn target_interval(&self) -> Duration {
        self.target
    }

    /// How long to sleep after spending `spent` on a frame.
    pub fn pacing_delay(&self, spent: Duration) -> Duration {
        self.target.saturating_sub(spent)
    }

    /// Accounts one presented frame that took `frame_time` including its
    /// pacing sleep.
    ///
    /// Simulation time only advances once loading is done. Returns `true`
    /// when the frame closed a measurement window.
    pub fn record_frame(&mut self, frame_time: Duration, loaded: bool) -> bool {
        if loaded {
            self.sim_time += frame_time;
        }
        self.window_time += truncate_to_millis(frame_time);
        self.window_frames += 1;

        if self.window_time > ONE_SECOND.saturating_sub(self.target) {
            self.measured_fps = self.window_frames;
            self.window_frames = 0;
            self.window_time = Duration::ZERO;
            return true;
        }
        false
    }

    /// Frames presented in the last completed window.
    pub fn measured_fps(&self) -> u32 {
        self.measured_fps
    }

    /// Accumulated simulation time.
    pub fn sim_time(&self) -> Duration {
        self.sim_time
    }

    /// [`sim_time`](Self::sim_time) in milliseconds.
    pub fn sim_time_ms(&self) -> u64 {
        self.sim_time.as_millis() as u64
    }

    /// Whether the loop is paused.
    pub fn is_paused(&self) -> bool {
        self.paused
    }

    /// Whether the current pause was caused by a focus loss.
    pub fn paused_by_focus_loss(&self) -> bool {
        self.paused_by_focus_loss
    }

    /// Sets the pause flag. Returns `true` if it changed.
    pub fn set_paused(&mut self, paused: bool, by_focus_loss: bool) -> bool {
        let changed = self.paused != paused;
        self.paused = paused;
        self.paused_by_focus_loss = paused && by_focus_loss;
        changed
    }
}

// The FPS window counts whole milliseconds, like the frame interval itself.
fn truncate_to_millis(d: Duration) -> Duration {
    Duration::from_millis(d.as_millis() as u64)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    #[test]
    fn target_is_integer_milliseconds() {
        assert_eq!(FrameClock::new(30).target_interval(), ms(33));
        assert_eq!(FrameClock::new(0).target_interval(), ms(1000));
    }

    #[test]
    fn pacing_never_goes_negative() {
        let clock = FrameClock::new(30);
        assert_eq!(clock.pacing_delay(ms(10)), ms(23));
        assert_eq!(clock.pacing_delay(ms(50)), Duration::ZERO);
    }

    #[test]
    fn window_closes_after_one_second_minus_target() {
        let mut clock = FrameClock::new(30);
        let mut closed_at = None;
        for frame in 1..=40 {
            if clock.record_frame(ms(33), true) {
                closed_at = Some(frame);
                break;
            }
        }
        // 30 * 33 = 990 > 967
        assert_eq!(closed_at, Some(30));
        assert_eq!(clock.measured_fps(), 30);
    }

    #[test]
    fn sim_time_waits_for_loading() {
        let mut clock = FrameClock::new(30);
        clock.record_frame(ms(33), false);
        assert_eq!(clock.sim_time(), Duration::ZERO);
        clock.record_frame(ms(33), true);
        assert_eq!(clock.sim_time_ms(), 33);
    }

    #[test]
    fn sim_time_keeps_sub_millisecond_remainders() {
        let mut clock = FrameClock::new(30);
        for _ in 0..90 {
            clock.record_frame(Duration::from_micros(33_400), true);
        }
        // 90 * 33.4 ms, not 90 * 33 ms.
        assert_eq!(clock.sim_time_ms(), 3006);
        assert_eq!(clock.measured_fps(), 30);
    }

    #[test]
    fn set_max_fps_changes_the_budget() {
        let mut clock = FrameClock::new(30);
        clock.set_max_fps(60);
        assert_eq!(clock.target_interval(), ms(16));
    }

    #[test]
    fn focus_flag_only_sticks_while_paused() {
        let mut clock = FrameClock::new(30);
        assert!(clock.set_paused(true, true));
        assert!(clock.paused_by_focus_loss());
        assert!(!clock.set_paused(true, true));
        assert!(clock.set_paused(false, true));
        assert!(!clock.paused_by_focus_loss());
    }
}
