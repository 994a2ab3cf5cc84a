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

//! CPU presentation onto a `winit` window through `softbuffer`.

use super::window::WinitWindow;
use anyhow::anyhow;
use softbuffer::{Context, Surface};
use sprig_core::surface::blit_scaled;
use sprig_core::{Canvas, DisplayGeometry, PresentError, Presenter, SurfaceProvider};
use std::num::NonZeroU32;
use std::sync::Arc;
use winit::window::Window;

/// Presents the canvas into a window's softbuffer surface.
pub struct SoftbufferPresenter {
    window: Arc<Window>,
    surface: Surface<Arc<Window>, Arc<Window>>,
    size: Option<(NonZeroU32, NonZeroU32)>,
}

impl SoftbufferPresenter {
    /// Binds a softbuffer surface to `window`.
    pub fn new(window: Arc<Window>) -> anyhow::Result<Self> {
        // SoftBufferError is not Send on every platform; flatten it.
        let context = Context::new(Arc::clone(&window)).map_err(|e| anyhow!("{e}"))?;
        let surface = Surface::new(&context, Arc::clone(&window)).map_err(|e| anyhow!("{e}"))?;
        Ok(Self {
            window,
            surface,
            size: None,
        })
    }
}

impl Presenter for SoftbufferPresenter {
    /// Tracks the window size; a zero-sized (minimized) window is unavailable.
    fn acquire(&mut self) -> Result<(), PresentError> {
        let inner = self.window.inner_size();
        let (Some(width), Some(height)) = (NonZeroU32::new(inner.width), NonZeroU32::new(inner.height))
        else {
            return Err(PresentError::Unavailable);
        };
        if self.size != Some((width, height)) {
            self.surface.resize(width, height).map_err(|e| {
                log::warn!("Resizing the window surface failed: {e}");
                PresentError::Unavailable
            })?;
            self.size = Some((width, height));
        }
        Ok(())
    }

    fn present(&mut self, canvas: &Canvas, scale: u32) -> Result<(), PresentError> {
        let Some((width, height)) = self.size else {
            return Err(PresentError::Unavailable);
        };
        let mut buffer = self.surface.buffer_mut().map_err(|e| {
            log::debug!("Window buffer lost: {e}");
            PresentError::ContentsLost
        })?;

        if canvas.width() * scale != width.get() || canvas.height() * scale != height.get() {
            buffer.fill(0);
        }
        blit_scaled(canvas, scale, &mut buffer, width.get());
        buffer.present().map_err(|e| {
            log::debug!("Window present failed: {e}");
            PresentError::ContentsLost
        })
    }
}

/// The [`SurfaceProvider`] of a windowed session.
///
/// Releasing drops the provider's window handle and runs the release hook,
/// which the host uses to close the window on its own thread.
pub struct WindowSurfaceProvider {
    window: Option<WinitWindow>,
    on_release: Option<Box<dyn FnOnce() + Send>>,
}

impl WindowSurfaceProvider {
    /// Presents into `window`.
    pub fn new(window: WinitWindow) -> Self {
        Self {
            window: Some(window),
            on_release: None,
        }
    }

    /// Runs `hook` once when the session releases the window.
    pub fn on_release(mut self, hook: impl FnOnce() + Send + 'static) -> Self {
        self.on_release = Some(Box::new(hook));
        self
    }
}

impl SurfaceProvider for WindowSurfaceProvider {
    fn create_presenter(&mut self, geometry: DisplayGeometry) -> anyhow::Result<Box<dyn Presenter>> {
        let window = self
            .window
            .as_ref()
            .ok_or_else(|| anyhow!("the window was already released"))?;
        let (width, height) = geometry.physical_size();
        log::debug!(
            "Binding softbuffer surface ({width}x{height} requested, window {:?})",
            window.inner_size()
        );
        Ok(Box::new(SoftbufferPresenter::new(window.handle())?))
    }

    fn release(&mut self) {
        self.window = None;
        if let Some(hook) = self.on_release.take() {
            hook();
        }
        log::debug!("Window surface released");
    }
}
