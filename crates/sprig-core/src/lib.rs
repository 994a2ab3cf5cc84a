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

//! # Sprig Core
//!
//! Foundational crate containing the input sampler, the off-screen canvas and
//! presentation contracts, persistence, configuration and the other
//! interface contracts the frame loop is built on. Nothing in here knows
//! about a concrete windowing toolkit.

#![warn(missing_docs)]

pub mod audio;
pub mod config;
pub mod event;
pub mod geometry;
pub mod input;
pub mod persistence;
pub mod surface;
pub mod utils;

pub use config::GameConfig;
pub use geometry::DisplayGeometry;
pub use input::{Button, EventSink, InputEvent, InputSampler, InputSink, Key, MouseButton};
pub use surface::{Canvas, PresentError, Presenter, SurfaceProvider};
pub use utils::timer::Stopwatch;
