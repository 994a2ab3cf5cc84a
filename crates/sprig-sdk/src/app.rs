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

//! Host entry points.

use anyhow::{anyhow, Result};
use sprig_core::persistence::CookieJar;
use sprig_core::{DisplayGeometry, EventSink, GameConfig};
use sprig_infra::{
    translate_winit_input, CpalAudioDevice, WindowSurfaceProvider, WinitWindow, WinitWindowBuilder,
};
use sprig_runtime::{Game, HostBinding, LifecycleController, LifecycleHandle, SharedFramebuffer};
use std::sync::Arc;
use winit::application::ApplicationHandler;
use winit::event::WindowEvent;
use winit::event_loop::{ActiveEventLoop, EventLoop, EventLoopProxy};
use winit::window::WindowId;

/// Events the frame loop sends back to the winit thread.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum HostEvent {
    /// The loop finished its shutdown and released the window.
    Released,
}

type OnStart = Box<dyn FnOnce(&LifecycleHandle)>;

/// The winit side of a windowed session.
///
/// The window lives on the event-loop thread; the frame loop runs on its own
/// thread and only reaches back through the [`EventLoopProxy`].
struct WindowedHost<G: Game> {
    config: GameConfig,
    game: Option<G>,
    audio: Arc<CpalAudioDevice>,
    proxy: EventLoopProxy<HostEvent>,
    on_start: Option<OnStart>,
    window: Option<WinitWindow>,
    session: Option<LifecycleHandle>,
    error: Option<anyhow::Error>,
}

impl<G: Game> WindowedHost<G> {
    fn start(&mut self, event_loop: &ActiveEventLoop, game: G) -> Result<()> {
        let geometry = DisplayGeometry::new(self.config.width, self.config.height, self.config.scaled);
        let window = WinitWindowBuilder::from_config(&self.config, geometry).build(event_loop)?;

        if self.config.menu {
            log::warn!(
                "This host has no native menu bar; dispatch menu actions through the session handle"
            );
        }

        let proxy = self.proxy.clone();
        let provider = WindowSurfaceProvider::new(window.clone()).on_release(move || {
            if proxy.send_event(HostEvent::Released).is_err() {
                log::debug!("Event loop already closed");
            }
        });

        let session = LifecycleController::start(
            &self.config,
            HostBinding::windowed(provider),
            game,
            self.audio.clone(),
        )?;
        if let Some(on_start) = self.on_start.take() {
            on_start(&session);
        }

        self.window = Some(window);
        self.session = Some(session);
        Ok(())
    }
}

impl<G: Game> ApplicationHandler<HostEvent> for WindowedHost<G> {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        let Some(game) = self.game.take() else {
            return; // Already running.
        };
        log::info!("Application resumed. Starting '{}'...", self.config.title);
        if let Err(e) = self.start(event_loop, game) {
            log::error!("Failed to start the session: {e:#}");
            self.error = Some(e);
            event_loop.exit();
        }
    }

    fn window_event(&mut self, _event_loop: &ActiveEventLoop, id: WindowId, event: WindowEvent) {
        let (Some(window), Some(session)) = (self.window.as_ref(), self.session.as_ref()) else {
            return;
        };
        if window.id() != id {
            return;
        }
        match event {
            WindowEvent::CloseRequested => {
                log::info!("Close requested, stopping the frame loop...");
                session.request_stop();
            }
            event => {
                if let Some(input_event) = translate_winit_input(&event) {
                    log::trace!("Input event: {:?}", input_event);
                    session.input_sink().dispatch(input_event);
                }
            }
        }
    }

    fn user_event(&mut self, event_loop: &ActiveEventLoop, event: HostEvent) {
        match event {
            HostEvent::Released => {
                log::info!("Window released, exiting event loop...");
                self.window = None;
                event_loop.exit();
            }
        }
    }
}

/// Runs `game` in a desktop window until it exits or the window is closed.
///
/// Blocks the calling thread, which must be the main thread on platforms
/// where winit requires it.
pub fn run_windowed<G: Game>(config: GameConfig, game: G) -> Result<()> {
    run_windowed_with(config, game, CpalAudioDevice::new(), |_| {})
}

/// Like [`run_windowed`], with a caller-owned audio device and a hook called
/// with the session handle once the frame loop is up.
///
/// The game keeps a clone of `audio` to play clips. Hosts use `on_start` to
/// keep an input sink or a menu sender.
pub fn run_windowed_with<G: Game>(
    config: GameConfig,
    game: G,
    audio: CpalAudioDevice,
    on_start: impl FnOnce(&LifecycleHandle) + 'static,
) -> Result<()> {
    log::info!("Sprig SDK: Starting '{}' (windowed)...", config.title);
    let event_loop = EventLoop::<HostEvent>::with_user_event().build()?;

    let mut host = WindowedHost {
        config,
        game: Some(game),
        audio: Arc::new(audio),
        proxy: event_loop.create_proxy(),
        on_start: Some(Box::new(on_start)),
        window: None,
        session: None,
        error: None,
    };

    event_loop.run_app(&mut host)?;

    if let Some(e) = host.error.take() {
        return Err(e);
    }
    match host.session.take() {
        Some(session) => {
            // The event loop can also end without a close request.
            session.request_stop();
            session.join()?;
            log::info!("Sprig SDK: Session finished.");
            Ok(())
        }
        None => Err(anyhow!("the event loop ended before the session started")),
    }
}

/// Starts `game` inside an embedding host.
///
/// The game presents into `framebuffer`, persists through `cookies`, and
/// sizes its display from `host_size`. The host feeds input through
/// [`LifecycleHandle::input_sink`] and stops the session with
/// [`LifecycleHandle::request_stop`].
pub fn run_embedded<G: Game>(
    config: GameConfig,
    game: G,
    host_size: (u32, u32),
    framebuffer: SharedFramebuffer,
    cookies: Arc<dyn CookieJar>,
) -> Result<LifecycleHandle> {
    log::info!("Sprig SDK: Starting '{}' (embedded)...", config.title);
    let session = LifecycleController::start(
        &config,
        HostBinding::embedded(framebuffer, host_size, cookies),
        game,
        Arc::new(CpalAudioDevice::new()),
    )?;
    Ok(session)
}
