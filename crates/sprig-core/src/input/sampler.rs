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

//! Edge/level input tracking, drained once per frame.

use super::event::{InputEvent, Key, MouseButton};
use super::sink::InputSink;
use crate::event::EventBus;
use crate::geometry::DisplayGeometry;
use std::collections::HashSet;
use std::hash::Hash;

/// What the focus handlers ask of the frame loop when pause-on-focus is on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FocusRequest {
    /// Focus was lost: pause.
    Pause,
    /// Focus came back: resume.
    Resume,
}

/// `down` (level) and `pressed` (edge) sets for one device.
#[derive(Debug, Clone)]
struct ButtonState<T: Eq + Hash + Clone> {
    down: HashSet<T>,
    pressed: HashSet<T>,
}

impl<T: Eq + Hash + Clone> Default for ButtonState<T> {
    fn default() -> Self {
        Self {
            down: HashSet::new(),
            pressed: HashSet::new(),
        }
    }
}

impl<T: Eq + Hash + Clone> ButtonState<T> {
    /// `Up -> Down`. A press of a symbol that is already down is a repeat
    /// and changes nothing.
    fn press(&mut self, symbol: T) {
        if self.down.insert(symbol.clone()) {
            self.pressed.insert(symbol);
        }
    }

    /// `Down -> Up`. A release inside the same unconsumed frame also takes
    /// back the edge.
    fn release(&mut self, symbol: &T) {
        self.down.remove(symbol);
        self.pressed.remove(symbol);
    }

    fn clear_edges(&mut self) {
        self.pressed.clear();
    }

    fn clear_all(&mut self) {
        self.down.clear();
        self.pressed.clear();
    }
}

/// A copy of the sampler state at one point in time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InputSnapshot {
    /// Keys currently held.
    pub keys_down: HashSet<Key>,
    /// Keys that went down since the last clear.
    pub keys_pressed: HashSet<Key>,
    /// Mouse buttons currently held.
    pub mouse_down: HashSet<MouseButton>,
    /// Mouse buttons that went down since the last clear.
    pub mouse_pressed: HashSet<MouseButton>,
    /// Cursor x in logical pixels.
    pub mouse_x: i32,
    /// Cursor y in logical pixels.
    pub mouse_y: i32,
}

/// Converts asynchronous key and mouse events into per-frame state.
///
/// Host threads only enqueue through the [`InputSink`] returned by
/// [`InputSampler::sink`]. The frame loop, which owns the sampler, calls
/// [`InputSampler::pump`] at the top of a frame, reads the state during the
/// update, then calls [`InputSampler::clear_keys`] and
/// [`InputSampler::clear_mouse`]. An event that arrives mid-frame is folded
/// in by the next pump, so it is never lost and never counted twice across a
/// clear.
#[derive(Debug)]
pub struct InputSampler {
    bus: EventBus<InputEvent>,
    keys: ButtonState<Key>,
    mouse: ButtonState<MouseButton>,
    raw_x: i32,
    raw_y: i32,
    geometry: DisplayGeometry,
    focused: bool,
    pause_on_focus: bool,
}

impl InputSampler {
    /// Creates an empty sampler for a session.
    pub fn new(geometry: DisplayGeometry, pause_on_focus: bool) -> Self {
        Self {
            bus: EventBus::new(),
            keys: ButtonState::default(),
            mouse: ButtonState::default(),
            raw_x: 0,
            raw_y: 0,
            geometry,
            focused: false,
            pause_on_focus,
        }
    }

    /// Returns a sink host bindings can deliver events to from any thread.
    pub fn sink(&self) -> InputSink {
        InputSink::new(self.bus.sender())
    }

    /// Folds every queued event into the state.
    ///
    /// Returns the last pause change requested by a focus event, if any.
    pub fn pump(&mut self) -> Option<FocusRequest> {
        let events: Vec<InputEvent> = self.bus.drain().collect();
        let mut request = None;
        for event in events {
            if let Some(focus) = self.apply(event) {
                request = Some(focus);
            }
        }
        request
    }

    /// Applies one event immediately.
    pub fn apply(&mut self, event: InputEvent) -> Option<FocusRequest> {
        match event {
            InputEvent::KeyPressed { key } => self.keys.press(key),
            InputEvent::KeyReleased { key } => {
                self.keys.release(&key);
                // Print-screen never reports a press on some platforms, so
                // its release is the only edge there is.
                if key == Key::PRINT_SCREEN {
                    self.keys.pressed.insert(key);
                }
            }
            InputEvent::MouseButtonPressed { button } => self.mouse.press(button),
            InputEvent::MouseButtonReleased { button } => self.mouse.release(&button),
            InputEvent::MouseMoved { x, y } => {
                self.raw_x = x;
                self.raw_y = y;
            }
            InputEvent::CursorLeft => self.mouse.clear_all(),
            InputEvent::FocusChanged { focused: true } => {
                self.focused = true;
                log::debug!("Input focus gained");
                if self.pause_on_focus {
                    return Some(FocusRequest::Resume);
                }
            }
            InputEvent::FocusChanged { focused: false } => {
                self.focused = false;
                self.keys.clear_all();
                self.mouse.clear_all();
                log::debug!("Input focus lost, held buttons released");
                if self.pause_on_focus {
                    return Some(FocusRequest::Pause);
                }
            }
        }
        None
    }

    /// Empties the key edge set. `down` is untouched.
    pub fn clear_keys(&mut self) {
        self.keys.clear_edges();
    }

    /// Empties the mouse edge set. `down` is untouched.
    pub fn clear_mouse(&mut self) {
        self.mouse.clear_edges();
    }

    /// `true` while `key` is held.
    pub fn key_down(&self, key: &Key) -> bool {
        self.keys.down.contains(key)
    }

    /// `true` if `key` went down since the last [`clear_keys`](Self::clear_keys).
    pub fn key_pressed(&self, key: &Key) -> bool {
        self.keys.pressed.contains(key)
    }

    /// `true` while `button` is held.
    pub fn mouse_down(&self, button: MouseButton) -> bool {
        self.mouse.down.contains(&button)
    }

    /// `true` if `button` went down since the last [`clear_mouse`](Self::clear_mouse).
    pub fn mouse_pressed(&self, button: MouseButton) -> bool {
        self.mouse.pressed.contains(&button)
    }

    /// Cursor x in logical pixels.
    pub fn mouse_x(&self) -> i32 {
        self.geometry.to_logical(self.raw_x)
    }

    /// Cursor y in logical pixels.
    pub fn mouse_y(&self) -> i32 {
        self.geometry.to_logical(self.raw_y)
    }

    /// `true` if the surface currently has focus.
    pub fn is_focused(&self) -> bool {
        self.focused
    }

    /// Whether focus changes request pause changes.
    pub fn pause_on_focus(&self) -> bool {
        self.pause_on_focus
    }

    /// Turns pause-on-focus on or off.
    pub fn set_pause_on_focus(&mut self, enabled: bool) {
        self.pause_on_focus = enabled;
    }

    /// Copies the current state.
    pub fn snapshot(&self) -> InputSnapshot {
        InputSnapshot {
            keys_down: self.keys.down.clone(),
            keys_pressed: self.keys.pressed.clone(),
            mouse_down: self.mouse.down.clone(),
            mouse_pressed: self.mouse.pressed.clone(),
            mouse_x: self.mouse_x(),
            mouse_y: self.mouse_y(),
        }
    }
}
