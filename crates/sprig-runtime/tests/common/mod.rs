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

//! Doubles shared by the runtime integration tests.

#![allow(dead_code)]

use sprig_core::audio::AudioDevice;
use sprig_core::persistence::{Persist, SaveSlot};
use sprig_core::{Canvas, DisplayGeometry, PresentError, Presenter, SurfaceProvider};
use sprig_runtime::{Game, GameContext, LoadContext};
use std::io::{self, Read, Write};
use std::path::PathBuf;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::thread;
use std::time::{Duration, Instant};

/// An ordered, thread-safe record of callbacks.
#[derive(Debug, Clone, Default)]
pub struct Journal {
    entries: Arc<Mutex<Vec<String>>>,
}

impl Journal {
    pub fn push(&self, entry: impl Into<String>) {
        self.entries.lock().unwrap().push(entry.into());
    }

    pub fn entries(&self) -> Vec<String> {
        self.entries.lock().unwrap().clone()
    }

    pub fn count(&self, entry: &str) -> usize {
        self.entries().iter().filter(|e| *e == entry).count()
    }

    pub fn position(&self, entry: &str) -> Option<usize> {
        self.entries().iter().position(|e| e == entry)
    }

    pub fn last_position(&self, entry: &str) -> Option<usize> {
        self.entries().iter().rposition(|e| e == entry)
    }
}

/// Polls `cond` until it holds or `timeout` elapses.
pub fn wait_until(timeout: Duration, mut cond: impl FnMut() -> bool) -> bool {
    let deadline = Instant::now() + timeout;
    while Instant::now() < deadline {
        if cond() {
            return true;
        }
        thread::sleep(Duration::from_millis(5));
    }
    cond()
}

/// Audio device that journals every call.
pub struct RecordingAudio {
    pub journal: Journal,
    pub available: bool,
}

impl AudioDevice for RecordingAudio {
    fn init(&self) -> anyhow::Result<()> {
        self.journal.push("audio_init");
        if self.available {
            Ok(())
        } else {
            Err(anyhow::anyhow!("no device"))
        }
    }

    fn pause_all(&self, paused: bool) {
        self.journal.push(format!("audio_pause:{paused}"));
    }

    fn stop_all(&self) {
        self.journal.push("audio_stop_all");
    }
}

/// Counters of a [`ScriptedSurface`].
#[derive(Debug, Default)]
pub struct SurfaceCounters {
    pub acquires: AtomicUsize,
    pub presents: AtomicUsize,
    pub successes: AtomicUsize,
}

impl SurfaceCounters {
    pub fn successes(&self) -> usize {
        self.successes.load(Ordering::SeqCst)
    }

    pub fn presents(&self) -> usize {
        self.presents.load(Ordering::SeqCst)
    }

    pub fn acquires(&self) -> usize {
        self.acquires.load(Ordering::SeqCst)
    }
}

/// A surface whose faults follow a script.
#[derive(Clone, Default)]
pub struct ScriptedSurface {
    pub journal: Journal,
    pub counters: Arc<SurfaceCounters>,
    /// The first `unavailable_acquires` acquisitions fail.
    pub unavailable_acquires: usize,
    /// Every `lose_every`-th present loses its contents (0 = never).
    pub lose_every: usize,
    /// Creating the presenter fails.
    pub broken: bool,
}

impl SurfaceProvider for ScriptedSurface {
    fn create_presenter(&mut self, _geometry: DisplayGeometry) -> anyhow::Result<Box<dyn Presenter>> {
        if self.broken {
            anyhow::bail!("no display");
        }
        self.journal.push("create_presenter");
        Ok(Box::new(ScriptedPresenter {
            script: self.clone(),
        }))
    }

    fn release(&mut self) {
        self.journal.push("release");
    }
}

struct ScriptedPresenter {
    script: ScriptedSurface,
}

impl Presenter for ScriptedPresenter {
    fn acquire(&mut self) -> Result<(), PresentError> {
        let n = self.script.counters.acquires.fetch_add(1, Ordering::SeqCst);
        if n < self.script.unavailable_acquires {
            Err(PresentError::Unavailable)
        } else {
            Ok(())
        }
    }

    fn present(&mut self, _canvas: &Canvas, _scale: u32) -> Result<(), PresentError> {
        let n = self.script.counters.presents.fetch_add(1, Ordering::SeqCst) + 1;
        if self.script.lose_every != 0 && n % self.script.lose_every == 0 {
            return Err(PresentError::ContentsLost);
        }
        self.script.counters.successes.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

/// What a [`Probe`] does besides journaling.
#[derive(Debug, Clone, Default)]
pub struct ProbeScript {
    /// Calls `exit_game` after this many updates.
    pub exit_after_updates: Option<usize>,
    pub base_path: Option<PathBuf>,
}

/// A game that journals its callbacks.
pub struct Probe {
    pub journal: Journal,
    pub script: ProbeScript,
    pub updates: usize,
    pub score: u32,
    pub loaded_with: Option<(String, u32)>,
}

impl Probe {
    pub fn new(journal: Journal, script: ProbeScript) -> Self {
        Self {
            journal,
            script,
            updates: 0,
            score: 0,
            loaded_with: None,
        }
    }
}

pub fn slot() -> SaveSlot {
    SaveSlot::new("probe.sav", "probe")
}

impl Persist for Probe {
    fn write_save(&self, stream: &mut dyn Write) -> io::Result<()> {
        stream.write_all(&self.score.to_le_bytes())
    }

    fn read_save(&mut self, stream: &mut dyn Read) -> io::Result<()> {
        let mut bytes = [0; 4];
        stream.read_exact(&mut bytes)?;
        self.score = u32::from_le_bytes(bytes);
        Ok(())
    }
}

/// Assets produced by [`Probe::init_game`]: the loader thread's name and
/// the logical width it saw.
pub type ProbeAssets = (String, u32, Duration);

impl Game for Probe {
    type Assets = ProbeAssets;

    fn init_game(ctx: &LoadContext) -> ProbeAssets {
        let name = thread::current().name().unwrap_or_default().to_owned();
        // A base path named `slow-<ms>` makes loading take that long.
        let delay = ctx
            .base_path()
            .file_name()
            .and_then(|n| n.to_str())
            .and_then(|n| n.strip_prefix("slow-"))
            .and_then(|ms| ms.parse().ok())
            .map(Duration::from_millis)
            .unwrap_or_default();
        thread::sleep(delay);
        (name, ctx.geometry().width(), delay)
    }

    fn init_loading(&mut self, _ctx: &mut GameContext<'_>) {
        self.journal.push("init_loading");
    }

    fn render_loading(&mut self, canvas: &mut Canvas, _ctx: &GameContext<'_>) {
        canvas.clear(1);
        self.journal.push("render_loading");
    }

    fn finish_loading(&mut self, assets: ProbeAssets, _ctx: &mut GameContext<'_>) {
        let (loader_thread, width, _) = assets;
        self.loaded_with = Some((loader_thread.clone(), width));
        let here = thread::current().name().unwrap_or_default().to_owned();
        self.journal.push(format!("finish_loading:{loader_thread}->{here}"));
    }

    fn update_game(&mut self, ctx: &mut GameContext<'_>) {
        self.updates += 1;
        self.score += 1;
        self.journal.push("update_game");
        if self.script.exit_after_updates == Some(self.updates) {
            ctx.exit_game();
        }
    }

    fn update_animations(&mut self, _ctx: &GameContext<'_>) {
        self.journal.push("update_animations");
    }

    fn render_game(&mut self, canvas: &mut Canvas, _ctx: &GameContext<'_>) {
        canvas.clear(2);
        self.journal.push("render_game");
    }

    fn finish_game(&mut self, _ctx: &mut GameContext<'_>) {
        self.journal.push("finish_game");
    }

    fn base_path(&self) -> PathBuf {
        self.script
            .base_path
            .clone()
            .unwrap_or_else(std::env::temp_dir)
    }

    fn on_menu(&mut self, id: &str, ctx: &mut GameContext<'_>) {
        self.journal.push(format!("menu:{id}"));
        match id {
            "save" => {
                let ok = ctx.save_game(&*self, &slot());
                self.journal.push(format!("saved:{ok}"));
            }
            "load" => {
                self.score = 0;
                let ok = ctx.load_game(self, &slot());
                self.journal.push(format!("loaded:{ok}:{}", self.score));
            }
            "pause" => ctx.pause(true),
            _ => {}
        }
    }
}
