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

//! A small software mixer for one-shot sound clips.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

/// Mono PCM samples in `[-1.0, 1.0]` at a fixed sample rate.
#[derive(Debug, Clone)]
pub struct SoundClip {
    samples: Arc<[f32]>,
    sample_rate: u32,
}

impl SoundClip {
    /// Wraps decoded mono samples.
    pub fn new(samples: Vec<f32>, sample_rate: u32) -> Self {
        Self {
            samples: samples.into(),
            sample_rate: sample_rate.max(1),
        }
    }

    /// A sine tone, mostly useful for bleeps and tests.
    pub fn tone(frequency: f32, duration: Duration, sample_rate: u32, amplitude: f32) -> Self {
        let count = (duration.as_secs_f32() * sample_rate as f32) as usize;
        let step = std::f32::consts::TAU * frequency / sample_rate.max(1) as f32;
        let samples = (0..count)
            .map(|i| (i as f32 * step).sin() * amplitude)
            .collect();
        Self::new(samples, sample_rate)
    }

    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Playback length at the clip's own rate.
    pub fn duration(&self) -> Duration {
        Duration::from_secs_f64(self.samples.len() as f64 / self.sample_rate as f64)
    }
}

struct Voice {
    clip: SoundClip,
    cursor: f64,
}

/// Mixes every playing clip into interleaved output frames.
///
/// The audio callback only ever `try_lock`s the voice list; a contended
/// callback outputs silence rather than blocking the device thread.
#[derive(Default)]
pub struct Mixer {
    voices: Mutex<Vec<Voice>>,
    paused: AtomicBool,
    stopped: AtomicBool,
}

impl Mixer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts playing `clip`. Ignored once the mixer is stopped.
    pub fn play(&self, clip: SoundClip) {
        if self.stopped.load(Ordering::Acquire) || clip.is_empty() {
            return;
        }
        let mut voices = self.voices.lock().unwrap_or_else(|e| e.into_inner());
        voices.push(Voice { clip, cursor: 0.0 });
    }

    /// Freezes (`true`) or resumes (`false`) every voice where it is.
    pub fn set_paused(&self, paused: bool) {
        self.paused.store(paused, Ordering::Release);
    }

    pub fn is_paused(&self) -> bool {
        self.paused.load(Ordering::Acquire)
    }

    /// Drops every voice and refuses new ones.
    pub fn stop_all(&self) {
        self.stopped.store(true, Ordering::Release);
        self.voices.lock().unwrap_or_else(|e| e.into_inner()).clear();
    }

    pub fn active_voices(&self) -> usize {
        self.voices.lock().unwrap_or_else(|e| e.into_inner()).len()
    }

    /// Fills `output` (interleaved, `channels` wide) at `sample_rate`.
    pub fn mix(&self, output: &mut [f32], channels: u16, sample_rate: u32) {
        output.fill(0.0);
        if self.is_paused() {
            return;
        }
        let Ok(mut voices) = self.voices.try_lock() else {
            return;
        };
        let channels = channels.max(1) as usize;
        let sample_rate = sample_rate.max(1) as f64;

        for voice in voices.iter_mut() {
            let step = voice.clip.sample_rate as f64 / sample_rate;
            for frame in output.chunks_mut(channels) {
                let Some(&sample) = voice.clip.samples.get(voice.cursor as usize) else {
                    break;
                };
                for slot in frame.iter_mut() {
                    *slot += sample;
                }
                voice.cursor += step;
            }
        }
        voices.retain(|voice| (voice.cursor as usize) < voice.clip.len());

        for slot in output.iter_mut() {
            *slot = slot.clamp(-1.0, 1.0);
        }
    }
}
