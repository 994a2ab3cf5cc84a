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

//! Input events and the per-frame input sampler.
//!
//! Host bindings push raw events through an [`EventSink`]; the frame loop
//! owns the [`InputSampler`] and folds those events into edge (`pressed`)
//! and level (`down`) state once per frame.

pub mod event;
pub mod sampler;
pub mod sink;

pub use event::{Button, InputEvent, Key, MouseButton};
pub use sampler::{FocusRequest, InputSampler, InputSnapshot};
pub use sink::{EventSink, InputSink};
