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

//! The double-buffer pair: an off-screen [`Canvas`] the game draws into and
//! a [`Presenter`] that shows it.

pub mod canvas;
pub mod presenter;

pub use canvas::{rgb, Canvas};
pub use presenter::{blit_scaled, PresentError, Presenter, SurfaceProvider};
