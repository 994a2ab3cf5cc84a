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

//! The contract between the frame loop and the program it drives.

use crate::context::GameContext;
use sprig_core::utils::path::executable_dir;
use sprig_core::{Canvas, DisplayGeometry};
use std::path::{Path, PathBuf};

/// What the loading task is given to work with.
#[derive(Debug, Clone)]
pub struct LoadContext {
    base_path: PathBuf,
    geometry: DisplayGeometry,
}

impl LoadContext {
    /// Creates a loading context.
    pub fn new(base_path: impl Into<PathBuf>, geometry: DisplayGeometry) -> Self {
        Self {
            base_path: base_path.into(),
            geometry,
        }
    }

    /// Resource root reported by [`Game::base_path`].
    pub fn base_path(&self) -> &Path {
        &self.base_path
    }

    /// The session's logical resolution.
    pub fn geometry(&self) -> DisplayGeometry {
        self.geometry
    }
}

/// Commands a host pushes to the frame loop.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HostCommand {
    /// A menu entry was activated.
    Menu(String),
}

/// A program driven by the frame loop.
///
/// Everything except [`init_game`](Game::init_game) runs on the frame loop
/// thread. `init_game` runs once on the loading task, concurrently with the
/// first frames; its result is handed to
/// [`finish_loading`](Game::finish_loading) on the loop thread.
pub trait Game: Send + 'static {
    /// The heavy state produced by the loading task.
    type Assets: Send + 'static;

    /// One-time heavy initialization. Runs off the loop thread.
    fn init_game(ctx: &LoadContext) -> Self::Assets;

    /// Called once before the first frame.
    fn init_loading(&mut self, _ctx: &mut GameContext<'_>) {}

    /// Draws the loading screen. Called every frame until loading finishes.
    fn render_loading(&mut self, canvas: &mut Canvas, _ctx: &GameContext<'_>) {
        canvas.clear(0);
    }

    /// Receives the loaded assets. Called once; the game counts as loaded
    /// from the next update on.
    fn finish_loading(&mut self, assets: Self::Assets, ctx: &mut GameContext<'_>);

    /// Advances the simulation. Called every unpaused frame after loading.
    fn update_game(&mut self, ctx: &mut GameContext<'_>);

    /// Advances time-based animations, right after `update_game`.
    fn update_animations(&mut self, _ctx: &GameContext<'_>) {}

    /// Draws a frame of the loaded game.
    fn render_game(&mut self, canvas: &mut Canvas, ctx: &GameContext<'_>);

    /// Called once when the loop shuts down.
    fn finish_game(&mut self, _ctx: &mut GameContext<'_>) {}

    /// Resource root, also the root for file saves.
    fn base_path(&self) -> PathBuf {
        executable_dir()
    }

    /// A menu entry `id` was activated by the host.
    fn on_menu(&mut self, id: &str, _ctx: &mut GameContext<'_>) {
        log::debug!("Unhandled menu action '{id}'");
    }
}
