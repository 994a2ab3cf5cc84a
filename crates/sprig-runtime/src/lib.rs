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

//! # Sprig Runtime
//!
//! The frame loop and everything that runs it: pacing and FPS measurement,
//! the concurrent loading task, and session startup and shutdown for
//! windowed and embedded hosts.

pub mod clock;
pub mod context;
pub mod embedded;
pub mod game;
pub mod host;
pub mod lifecycle;
pub mod load_state;
pub mod loader;
pub mod scheduler;
pub mod stop;
pub mod telemetry;

pub use clock::FrameClock;
pub use context::GameContext;
pub use embedded::{EmbeddedSurface, SharedFramebuffer};
pub use game::{Game, HostCommand, LoadContext};
pub use host::HostBinding;
pub use lifecycle::{LifecycleController, LifecycleError, LifecycleHandle};
pub use load_state::LoadState;
pub use loader::{CancelToken, LoadingCoordinator, LoadingTask};
pub use scheduler::FrameScheduler;
pub use stop::StopSignal;
pub use telemetry::{FrameStats, FrameStatsSnapshot};
