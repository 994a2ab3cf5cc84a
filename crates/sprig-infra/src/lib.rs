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

//! # Sprig Infra
//!
//! Concrete implementations of the `sprig-core` contracts backed by external
//! crates: `winit` windows and input, `softbuffer` presentation and `cpal`
//! audio output.

pub mod audio;
pub mod platform;

pub use audio::{CpalAudioDevice, Mixer, SoundClip};
pub use platform::{
    translate_winit_input, WindowSurfaceProvider, WinitWindow, WinitWindowBuilder,
};
