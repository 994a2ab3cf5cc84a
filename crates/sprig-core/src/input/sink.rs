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

//! The event-sink capability host bindings deliver input through.

use super::event::{Button, InputEvent};

/// Receives raw input from a host binding (desktop window, embedded surface,
/// test harness).
///
/// Implementations must be callable from the host's event-dispatch thread
/// while the frame loop runs on another.
pub trait EventSink: Send + Sync {
    /// A key or mouse button went down.
    fn on_button_down(&self, button: Button);

    /// A key or mouse button went up.
    fn on_button_up(&self, button: Button);

    /// The cursor moved to a raw surface position.
    fn on_move(&self, x: i32, y: i32);

    /// The surface gained or lost focus.
    fn on_focus_change(&self, focused: bool);

    /// The cursor left the surface.
    fn on_cursor_left(&self) {}

    /// Routes a translated [`InputEvent`] to the matching callback.
    fn dispatch(&self, event: InputEvent) {
        match event {
            InputEvent::KeyPressed { key } => self.on_button_down(Button::Key(key)),
            InputEvent::KeyReleased { key } => self.on_button_up(Button::Key(key)),
            InputEvent::MouseButtonPressed { button } => {
                self.on_button_down(Button::Mouse(button))
            }
            InputEvent::MouseButtonReleased { button } => self.on_button_up(Button::Mouse(button)),
            InputEvent::MouseMoved { x, y } => self.on_move(x, y),
            InputEvent::CursorLeft => self.on_cursor_left(),
            InputEvent::FocusChanged { focused } => self.on_focus_change(focused),
        }
    }
}

/// The [`EventSink`] handed out by an [`InputSampler`](super::InputSampler).
///
/// It only enqueues events; the sampler folds them into its state when the
/// frame loop pumps it. Cloning is cheap.
#[derive(Debug, Clone)]
pub struct InputSink {
    sender: flume::Sender<InputEvent>,
}

impl InputSink {
    pub(crate) fn new(sender: flume::Sender<InputEvent>) -> Self {
        Self { sender }
    }

    fn publish(&self, event: InputEvent) {
        if self.sender.send(event).is_err() {
            log::trace!("Input event dropped, the frame loop is gone.");
        }
    }
}

impl EventSink for InputSink {
    fn on_button_down(&self, button: Button) {
        self.publish(match button {
            Button::Key(key) => InputEvent::KeyPressed { key },
            Button::Mouse(button) => InputEvent::MouseButtonPressed { button },
        });
    }

    fn on_button_up(&self, button: Button) {
        self.publish(match button {
            Button::Key(key) => InputEvent::KeyReleased { key },
            Button::Mouse(button) => InputEvent::MouseButtonReleased { button },
        });
    }

    fn on_move(&self, x: i32, y: i32) {
        self.publish(InputEvent::MouseMoved { x, y });
    }

    fn on_focus_change(&self, focused: bool) {
        self.publish(InputEvent::FocusChanged { focused });
    }

    fn on_cursor_left(&self) {
        self.publish(InputEvent::CursorLeft);
    }

    fn dispatch(&self, event: InputEvent) {
        self.publish(event);
    }
}
