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

//! A surface owned by an embedding host.
//!
//! The frame loop presents into a [`SharedFramebuffer`]; the host keeps a
//! clone and reads the pixels whenever it repaints.

use sprig_core::surface::blit_scaled;
use sprig_core::{Canvas, DisplayGeometry, PresentError, Presenter, SurfaceProvider};
use std::sync::{Arc, Mutex, MutexGuard};

#[derive(Debug, Default)]
struct Frame {
    width: u32,
    height: u32,
    pixels: Vec<u32>,
    presented: u64,
    attached: bool,
}

/// Physical-resolution pixels shared with the embedding host.
#[derive(Debug, Clone, Default)]
pub struct SharedFramebuffer {
    frame: Arc<Mutex<Frame>>,
}

impl SharedFramebuffer {
    /// Creates a detached, empty framebuffer.
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, Frame> {
        self.frame.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Physical size, `(0, 0)` while detached.
    pub fn size(&self) -> (u32, u32) {
        let frame = self.lock();
        (frame.width, frame.height)
    }

    /// Whether a session is presenting into this buffer.
    pub fn is_attached(&self) -> bool {
        self.lock().attached
    }

    /// Number of frames presented so far.
    pub fn presented_frames(&self) -> u64 {
        self.lock().presented
    }

    /// Runs `f` with the current pixels and physical size.
    pub fn with_pixels<R>(&self, f: impl FnOnce(&[u32], u32, u32) -> R) -> R {
        let frame = self.lock();
        f(&frame.pixels, frame.width, frame.height)
    }

    fn attach(&self, width: u32, height: u32) {
        let mut frame = self.lock();
        frame.width = width;
        frame.height = height;
        frame.pixels = vec![0; width as usize * height as usize];
        frame.attached = true;
    }

    fn detach(&self) {
        let mut frame = self.lock();
        frame.attached = false;
        frame.width = 0;
        frame.height = 0;
        frame.pixels = Vec::new();
    }
}

/// The [`SurfaceProvider`] of an embedded session.
#[derive(Debug, Clone)]
pub struct EmbeddedSurface {
    framebuffer: SharedFramebuffer,
}

impl EmbeddedSurface {
    /// Presents into `framebuffer`.
    pub fn new(framebuffer: SharedFramebuffer) -> Self {
        Self { framebuffer }
    }
}

impl SurfaceProvider for EmbeddedSurface {
    fn create_presenter(&mut self, geometry: DisplayGeometry) -> anyhow::Result<Box<dyn Presenter>> {
        let (width, height) = geometry.physical_size();
        self.framebuffer.attach(width, height);
        log::debug!("Embedded surface attached at {width}x{height}");
        Ok(Box::new(FramebufferPresenter {
            framebuffer: self.framebuffer.clone(),
        }))
    }

    fn release(&mut self) {
        self.framebuffer.detach();
        log::debug!("Embedded surface detached");
    }
}

struct FramebufferPresenter {
    framebuffer: SharedFramebuffer,
}

impl Presenter for FramebufferPresenter {
    fn acquire(&mut self) -> Result<(), PresentError> {
        if self.framebuffer.is_attached() {
            Ok(())
        } else {
            Err(PresentError::Unavailable)
        }
    }

    fn present(&mut self, canvas: &Canvas, scale: u32) -> Result<(), PresentError> {
        let mut frame = self.framebuffer.lock();
        if !frame.attached {
            return Err(PresentError::ContentsLost);
        }
        let width = frame.width;
        blit_scaled(canvas, scale, &mut frame.pixels, width);
        frame.presented += 1;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn presents_scaled_pixels() {
        let framebuffer = SharedFramebuffer::new();
        let mut surface = EmbeddedSurface::new(framebuffer.clone());
        let mut presenter = surface
            .create_presenter(DisplayGeometry::new(2, 1, true))
            .unwrap();
        assert_eq!(framebuffer.size(), (4, 2));

        let mut canvas = Canvas::new(2, 1);
        canvas.set_pixel(1, 0, 5);
        presenter.acquire().unwrap();
        presenter.present(&canvas, 2).unwrap();

        framebuffer.with_pixels(|pixels, _, _| {
            assert_eq!(pixels, &[0, 0, 5, 5, 0, 0, 5, 5]);
        });
        assert_eq!(framebuffer.presented_frames(), 1);
    }

    #[test]
    fn released_surface_is_unavailable() {
        let framebuffer = SharedFramebuffer::new();
        let mut surface = EmbeddedSurface::new(framebuffer.clone());
        let mut presenter = surface
            .create_presenter(DisplayGeometry::new(2, 2, false))
            .unwrap();
        surface.release();

        assert!(!framebuffer.is_attached());
        assert_eq!(presenter.acquire(), Err(PresentError::Unavailable));
    }
}
