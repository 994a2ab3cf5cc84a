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

use sprig_sdk::prelude::*;
use sprig_sdk::run_embedded;
use std::sync::Arc;
use std::time::{Duration, Instant};

struct Fill {
    color: u32,
}

impl Game for Fill {
    type Assets = u32;

    fn init_game(_ctx: &LoadContext) -> u32 {
        rgb(10, 200, 30)
    }

    fn finish_loading(&mut self, assets: u32, _ctx: &mut GameContext<'_>) {
        self.color = assets;
    }

    fn update_game(&mut self, ctx: &mut GameContext<'_>) {
        if ctx.input().key_pressed(&Key::ESCAPE) {
            ctx.exit_game();
        }
    }

    fn render_game(&mut self, canvas: &mut Canvas, _ctx: &GameContext<'_>) {
        canvas.clear(self.color);
    }
}

fn wait_until(timeout: Duration, mut cond: impl FnMut() -> bool) -> bool {
    let deadline = Instant::now() + timeout;
    while Instant::now() < deadline {
        if cond() {
            return true;
        }
        std::thread::sleep(Duration::from_millis(5));
    }
    cond()
}

#[test]
fn test_embedded_session_presents_into_the_host_framebuffer() {
    // --- 1. ARRANGE ---
    let framebuffer = SharedFramebuffer::new();
    let config = GameConfig::default().with_max_fps(100);

    // --- 2. ACT ---
    let session = run_embedded(
        config,
        Fill { color: 0 },
        (100, 50),
        framebuffer.clone(),
        Arc::new(MemoryCookieJar::new()),
    )
    .unwrap();
    assert!(wait_until(Duration::from_secs(5), || session.is_loaded()));
    assert!(wait_until(Duration::from_secs(5), || {
        framebuffer.with_pixels(|pixels, _, _| pixels.iter().all(|&p| p == rgb(10, 200, 30)))
    }));

    // Escape goes through the host's sink like any embedded input.
    session.input_sink().on_button_down(Button::Key(Key::ESCAPE));

    // --- 3. ASSERT ---
    assert!(wait_until(Duration::from_secs(5), || session.is_finished()));
    assert_eq!(session.geometry().width(), 100);
    assert_eq!(framebuffer.size(), (100, 50));
    session.join().unwrap();
    assert!(!framebuffer.is_attached());
}
