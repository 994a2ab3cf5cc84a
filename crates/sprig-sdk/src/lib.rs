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

//! The public-facing SDK for Sprig.
//!
//! A game implements [`Game`](prelude::Game) and hands it to [`run_windowed`]
//! for a desktop window, or to [`run_embedded`] when another host owns the
//! display and feeds input in.

mod app;

pub use app::{run_embedded, run_windowed, run_windowed_with};

pub mod prelude {
    pub use sprig_core::persistence::{CookieJar, MemoryCookieJar, Persist, SaveSlot};
    pub use sprig_core::surface::rgb;
    pub use sprig_core::{
        Button, Canvas, DisplayGeometry, EventSink, GameConfig, InputSink, Key, MouseButton,
    };
    pub use sprig_infra::{CpalAudioDevice, SoundClip};
    pub use sprig_runtime::{
        FrameStatsSnapshot, Game, GameContext, LifecycleHandle, LoadContext, SharedFramebuffer,
    };
}
