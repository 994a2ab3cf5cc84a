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

//! Contains the `CpalAudioDevice` struct.

use super::mixer::{Mixer, SoundClip};
use anyhow::{anyhow, Result};
use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};
use sprig_core::audio::AudioDevice;
use std::sync::atomic::{AtomicBool, AtomicU32, Ordering};
use std::sync::Arc;

/// An `AudioDevice` that plays through the host's default output device via CPAL.
///
/// Clones share one mixer, so a game can keep a handle for `play` while the
/// session owns another.
#[derive(Clone, Default)]
pub struct CpalAudioDevice {
    mixer: Arc<Mixer>,
    started: Arc<AtomicBool>,
    sample_rate: Arc<AtomicU32>,
}

impl CpalAudioDevice {
    /// Creates a new, not yet opened, CPAL audio device.
    pub fn new() -> Self {
        Self::default()
    }

    /// Queues `clip` on the shared mixer.
    pub fn play(&self, clip: SoundClip) {
        self.mixer.play(clip);
    }

    /// Output rate of the opened stream, `None` before `init` succeeded.
    pub fn sample_rate(&self) -> Option<u32> {
        match self.sample_rate.load(Ordering::Acquire) {
            0 => None,
            rate => Some(rate),
        }
    }

    pub fn mixer(&self) -> &Arc<Mixer> {
        &self.mixer
    }
}

impl AudioDevice for CpalAudioDevice {
    fn init(&self) -> Result<()> {
        if self.started.swap(true, Ordering::AcqRel) {
            return Ok(());
        }
        let opened = open_stream(&self.mixer);
        match opened {
            Ok(rate) => {
                self.sample_rate.store(rate, Ordering::Release);
                log::info!("Audio output opened at {rate} Hz");
                Ok(())
            }
            Err(e) => {
                self.started.store(false, Ordering::Release);
                Err(e)
            }
        }
    }

    fn pause_all(&self, paused: bool) {
        self.mixer.set_paused(paused);
    }

    fn stop_all(&self) {
        self.mixer.stop_all();
    }
}

fn open_stream(mixer: &Arc<Mixer>) -> Result<u32> {
    let host = cpal::default_host();
    let device = host
        .default_output_device()
        .ok_or_else(|| anyhow!("No default output device available"))?;
    let config = device.default_output_config()?;

    let channels = config.channels();
    let sample_rate = config.sample_rate();

    let mixer = Arc::clone(mixer);
    let audio_callback = move |output_buffer: &mut [f32], _: &cpal::OutputCallbackInfo| {
        mixer.mix(output_buffer, channels, sample_rate);
    };

    let error_callback = |err| {
        log::error!("An error occurred on the audio stream: {}", err);
    };

    let stream = match config.sample_format() {
        cpal::SampleFormat::F32 => {
            device.build_output_stream(&config.into(), audio_callback, error_callback, None)?
        }
        format => return Err(anyhow!("Unsupported sample format: {}", format)),
    };

    stream.play()?;

    // The stream lives for the rest of the process; the mixer is silenced
    // by `stop_all` at shutdown.
    std::mem::forget(stream);

    Ok(sample_rate)
}
