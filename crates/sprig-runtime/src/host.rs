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

use crate::embedded::{EmbeddedSurface, SharedFramebuffer};
use sprig_core::persistence::CookieJar;
use sprig_core::SurfaceProvider;
use std::sync::Arc;

/// How a session is hosted.
///
/// Both variants supply a [`SurfaceProvider`]; they differ in where the
/// geometry comes from and where saves go.
pub enum HostBinding {
    /// A window owned by the session. Geometry comes from the
    /// configuration, saves go to files under the game's base path.
    Windowed {
        /// Creates the window's presenter and disposes the window.
        provider: Box<dyn SurfaceProvider>,
    },
    /// A surface owned by an embedding host. Geometry comes from the host
    /// size, saves go to the host's cookies.
    Embedded {
        /// Presents into the host's surface and detaches from it.
        provider: Box<dyn SurfaceProvider>,
        /// Physical size imposed by the host.
        host_size: (u32, u32),
        /// The host's cookie string.
        cookies: Arc<dyn CookieJar>,
    },
}

impl HostBinding {
    /// A windowed binding.
    pub fn windowed(provider: impl SurfaceProvider + 'static) -> Self {
        Self::Windowed {
            provider: Box::new(provider),
        }
    }

    /// An embedded binding presenting into `framebuffer`.
    pub fn embedded(
        framebuffer: SharedFramebuffer,
        host_size: (u32, u32),
        cookies: Arc<dyn CookieJar>,
    ) -> Self {
        Self::Embedded {
            provider: Box::new(EmbeddedSurface::new(framebuffer)),
            host_size,
            cookies,
        }
    }

    /// `"windowed"` or `"embedded"`, for logs.
    pub fn mode(&self) -> &'static str {
        match self {
            Self::Windowed { .. } => "windowed",
            Self::Embedded { .. } => "embedded",
        }
    }
}
