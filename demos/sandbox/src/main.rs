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

use anyhow::Result;
use sprig_sdk::prelude::*;
use std::io::{self, Read, Write};
use std::time::Duration;

const BOX_SIZE: u32 = 16;
const PALETTE: [u32; 4] = [
    rgb(230, 90, 70),
    rgb(90, 200, 120),
    rgb(80, 140, 240),
    rgb(240, 210, 80),
];

/// Produced by the loading task.
struct Assets {
    background: Vec<u32>,
    bleep: SoundClip,
}

struct SandboxGame {
    audio: CpalAudioDevice,
    slot: SaveSlot,
    background: Vec<u32>,
    bleep: Option<SoundClip>,
    loading_frames: u32,
    x: i32,
    y: i32,
    dx: i32,
    dy: i32,
    color: usize,
    bounces: u32,
}

impl SandboxGame {
    fn new(audio: CpalAudioDevice) -> Self {
        Self {
            audio,
            slot: SaveSlot::new("sandbox.sav", "sandbox"),
            background: Vec::new(),
            bleep: None,
            loading_frames: 0,
            x: 8,
            y: 8,
            dx: 2,
            dy: 1,
            color: 0,
            bounces: 0,
        }
    }

    fn bounce(&mut self, ctx: &GameContext<'_>) {
        self.bounces += 1;
        if let (true, Some(bleep)) = (ctx.has_sound(), &self.bleep) {
            self.audio.play(bleep.clone());
        }
    }

    fn steer(&mut self, ctx: &GameContext<'_>) {
        let input = ctx.input();
        if input.key_pressed(&Key::LEFT) {
            self.dx = -self.dx.abs().max(1);
        }
        if input.key_pressed(&Key::RIGHT) {
            self.dx = self.dx.abs().max(1);
        }
        if input.key_pressed(&Key::UP) {
            self.dy = -self.dy.abs().max(1);
        }
        if input.key_pressed(&Key::DOWN) {
            self.dy = self.dy.abs().max(1);
        }
        if input.key_pressed(&Key::SPACE) {
            self.color = (self.color + 1) % PALETTE.len();
        }
        if input.mouse_pressed(MouseButton::Left) {
            self.x = input.mouse_x() - BOX_SIZE as i32 / 2;
            self.y = input.mouse_y() - BOX_SIZE as i32 / 2;
        }
    }
}

impl Persist for SandboxGame {
    fn write_save(&self, stream: &mut dyn Write) -> io::Result<()> {
        for value in [self.x, self.y, self.dx, self.dy] {
            stream.write_all(&value.to_le_bytes())?;
        }
        stream.write_all(&(self.color as u32).to_le_bytes())?;
        stream.write_all(&self.bounces.to_le_bytes())
    }

    fn read_save(&mut self, stream: &mut dyn Read) -> io::Result<()> {
        let mut words = [0u32; 6];
        for word in words.iter_mut() {
            let mut bytes = [0u8; 4];
            stream.read_exact(&mut bytes)?;
            *word = u32::from_le_bytes(bytes);
        }
        let [x, y, dx, dy, color, bounces] = words;
        self.x = x as i32;
        self.y = y as i32;
        self.dx = dx as i32;
        self.dy = dy as i32;
        self.color = color as usize % PALETTE.len();
        self.bounces = bounces;
        Ok(())
    }
}

impl Game for SandboxGame {
    type Assets = Assets;

    fn init_game(ctx: &LoadContext) -> Assets {
        let geometry = ctx.geometry();
        let (width, height) = (geometry.width(), geometry.height());
        let mut background = Vec::with_capacity((width * height) as usize);
        for y in 0..height {
            for x in 0..width {
                let shade = ((x + y) % 32) as u8;
                background.push(rgb(20 + shade, 24 + shade, 40 + shade));
            }
        }
        // Stand-in for real asset decoding.
        std::thread::sleep(Duration::from_millis(750));
        Assets {
            background,
            bleep: SoundClip::tone(660.0, Duration::from_millis(60), 44_100, 0.2),
        }
    }

    fn render_loading(&mut self, canvas: &mut Canvas, ctx: &GameContext<'_>) {
        self.loading_frames += 1;
        canvas.clear(rgb(0, 0, 0));
        let width = ctx.width().saturating_sub(40);
        let filled = (self.loading_frames * 2).min(width);
        let y = ctx.height() as i32 / 2;
        canvas.fill_rect(20, y - 2, width, 4, rgb(60, 60, 60));
        canvas.fill_rect(20, y - 2, filled, 4, PALETTE[2]);
    }

    fn finish_loading(&mut self, assets: Assets, _ctx: &mut GameContext<'_>) {
        log::info!("Sandbox assets ready after {} frames", self.loading_frames);
        self.background = assets.background;
        self.bleep = Some(assets.bleep);
    }

    fn update_game(&mut self, ctx: &mut GameContext<'_>) {
        if ctx.input().key_pressed(&Key::ESCAPE) {
            ctx.exit_game();
            return;
        }
        if ctx.input().key_pressed(&Key::named("KeyS")) {
            let saved = ctx.save_game(&*self, &self.slot);
            log::info!("Save {}", if saved { "written" } else { "failed" });
        }
        if ctx.input().key_pressed(&Key::named("KeyL")) {
            let slot = self.slot.clone();
            let loaded = ctx.load_game(self, &slot);
            log::info!("Load {}", if loaded { "restored" } else { "found nothing" });
        }
        self.steer(ctx);

        let max_x = ctx.width() as i32 - BOX_SIZE as i32;
        let max_y = ctx.height() as i32 - BOX_SIZE as i32;
        self.x += self.dx;
        self.y += self.dy;
        if self.x <= 0 || self.x >= max_x {
            self.dx = -self.dx;
            self.x = self.x.clamp(0, max_x.max(0));
            self.bounce(ctx);
        }
        if self.y <= 0 || self.y >= max_y {
            self.dy = -self.dy;
            self.y = self.y.clamp(0, max_y.max(0));
            self.bounce(ctx);
        }
    }

    fn render_game(&mut self, canvas: &mut Canvas, ctx: &GameContext<'_>) {
        if self.background.len() == canvas.pixels().len() {
            canvas.pixels_mut().copy_from_slice(&self.background);
        } else {
            canvas.clear(rgb(20, 24, 40));
        }
        canvas.fill_rect(self.x, self.y, BOX_SIZE, BOX_SIZE, PALETTE[self.color]);

        // A tick per bounce along the top edge.
        for i in 0..self.bounces.min(ctx.width() / 3) {
            canvas.set_pixel(i as i32 * 3 + 1, 1, rgb(255, 255, 255));
        }
        if ctx.is_paused() {
            canvas.fill_rect(4, 4, 3, 10, rgb(255, 255, 255));
            canvas.fill_rect(9, 4, 3, 10, rgb(255, 255, 255));
        }
    }

    fn finish_game(&mut self, ctx: &mut GameContext<'_>) {
        log::info!(
            "Sandbox closing after {} bounces ({} ms of play)",
            self.bounces,
            ctx.time_ms()
        );
    }

    fn on_menu(&mut self, id: &str, ctx: &mut GameContext<'_>) {
        match id {
            "save" => {
                ctx.save_game(&*self, &self.slot);
            }
            "pause" => {
                let paused = ctx.is_paused();
                ctx.pause(!paused);
            }
            other => log::debug!("Unknown menu action '{other}'"),
        }
    }
}

fn main() -> Result<()> {
    use env_logger::{Builder, Env};

    Builder::from_env(Env::default().default_filter_or("info")).init();

    let config = GameConfig::default()
        .with_title("Sprig Sandbox")
        .with_size(320, 240)
        .with_scaled(true)
        .with_pause_on_focus(true)
        .with_max_fps(60);

    let audio = CpalAudioDevice::new();
    sprig_sdk::run_windowed_with(config, SandboxGame::new(audio.clone()), audio, |session| {
        log::info!(
            "Sandbox running at {}x{}: arrows steer, space recolors, click moves, S/L save and load, P pauses",
            session.geometry().width(),
            session.geometry().height()
        );
    })?;
    Ok(())
}
