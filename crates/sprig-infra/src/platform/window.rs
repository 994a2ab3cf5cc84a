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

//! The `winit` game window.

use sprig_core::{DisplayGeometry, GameConfig};
use std::sync::Arc;
use winit::dpi::PhysicalSize;
use winit::error::OsError;
use winit::event_loop::ActiveEventLoop;
use winit::window::{Window, WindowId};

/// A shared handle to a `winit` window.
///
/// Cloning is cheap; the window closes when the last clone is dropped.
#[derive(Debug, Clone)]
pub struct WinitWindow {
    inner: Arc<Window>,
}

impl WinitWindow {
    /// The underlying window.
    pub fn handle(&self) -> Arc<Window> {
        Arc::clone(&self.inner)
    }

    /// Physical size of the drawable area.
    pub fn inner_size(&self) -> (u32, u32) {
        let size = self.inner.inner_size();
        (size.width, size.height)
    }

    pub fn id(&self) -> WindowId {
        self.inner.id()
    }
}

/// Builds the fixed-size game window.
pub struct WinitWindowBuilder {
    title: String,
    width: u32,
    height: u32,
}

impl WinitWindowBuilder {
    /// Creates a builder with default settings.
    pub fn new() -> Self {
        Self {
            title: "Sprig".to_string(),
            width: 320,
            height: 240,
        }
    }

    /// Takes the title from `config` and the physical size from `geometry`.
    pub fn from_config(config: &GameConfig, geometry: DisplayGeometry) -> Self {
        let (width, height) = geometry.physical_size();
        Self::new()
            .with_title(config.title.clone())
            .with_dimensions(width, height)
    }

    /// Sets the window title.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    /// Sets the physical size of the drawable area.
    pub fn with_dimensions(mut self, width: u32, height: u32) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    /// Builds the window on `event_loop`.
    ///
    /// # Errors
    /// Returns an `OsError` if the underlying `winit` window creation fails.
    pub fn build(self, event_loop: &ActiveEventLoop) -> Result<WinitWindow, OsError> {
        log::info!(
            "Building window '{}' ({}x{})",
            self.title,
            self.width,
            self.height
        );

        let attributes = Window::default_attributes()
            .with_title(self.title)
            .with_inner_size(PhysicalSize::new(self.width, self.height))
            .with_resizable(false)
            .with_visible(true);

        let window = event_loop.create_window(attributes)?;
        log::info!("Winit window created (id: {:?})", window.id());
        Ok(WinitWindow {
            inner: Arc::new(window),
        })
    }
}

impl Default for WinitWindowBuilder {
    fn default() -> Self {
        Self::new()
    }
}
