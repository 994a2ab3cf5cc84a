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

//! Backend-agnostic input event types.

use std::borrow::Cow;
use std::fmt;

/// A keyboard key, identified by the name of its physical key code
/// (`"KeyA"`, `"Space"`, `"ArrowLeft"`, ...).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Key(Cow<'static, str>);

impl Key {
    /// The pause hotkey.
    pub const P: Key = Key::from_static("KeyP");
    /// The print-screen key. Some platforms only report its release.
    pub const PRINT_SCREEN: Key = Key::from_static("PrintScreen");
    /// Escape.
    pub const ESCAPE: Key = Key::from_static("Escape");
    /// Space bar.
    pub const SPACE: Key = Key::from_static("Space");
    /// Enter / return.
    pub const ENTER: Key = Key::from_static("Enter");
    /// Left arrow.
    pub const LEFT: Key = Key::from_static("ArrowLeft");
    /// Right arrow.
    pub const RIGHT: Key = Key::from_static("ArrowRight");
    /// Up arrow.
    pub const UP: Key = Key::from_static("ArrowUp");
    /// Down arrow.
    pub const DOWN: Key = Key::from_static("ArrowDown");

    /// Creates a key from a static key-code name.
    pub const fn from_static(name: &'static str) -> Self {
        Self(Cow::Borrowed(name))
    }

    /// Creates a key from an owned key-code name.
    pub fn named(name: impl Into<String>) -> Self {
        Self(Cow::Owned(name.into()))
    }

    /// The key-code name.
    pub fn name(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// An engine-internal representation of a mouse button.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MouseButton {
    /// The left mouse button.
    Left,
    /// The right mouse button.
    Right,
    /// The middle mouse button.
    Middle,
    /// The back mouse button (typically on the side).
    Back,
    /// The forward mouse button (typically on the side).
    Forward,
    /// Another mouse button, identified by a numeric code.
    Other(u16),
}

/// Anything that can be held down: a key or a mouse button.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Button {
    /// A keyboard key.
    Key(Key),
    /// A mouse button.
    Mouse(MouseButton),
}

impl From<Key> for Button {
    fn from(key: Key) -> Self {
        Button::Key(key)
    }
}

impl From<MouseButton> for Button {
    fn from(button: MouseButton) -> Self {
        Button::Mouse(button)
    }
}

/// A raw input event as delivered by a host binding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputEvent {
    /// A keyboard key was pressed.
    KeyPressed {
        /// The key.
        key: Key,
    },
    /// A keyboard key was released.
    KeyReleased {
        /// The key.
        key: Key,
    },
    /// A mouse button was pressed.
    MouseButtonPressed {
        /// The mouse button that was pressed.
        button: MouseButton,
    },
    /// A mouse button was released.
    MouseButtonReleased {
        /// The mouse button that was released.
        button: MouseButton,
    },
    /// The cursor moved (or was dragged), in raw surface pixels.
    MouseMoved {
        /// Raw x-coordinate.
        x: i32,
        /// Raw y-coordinate.
        y: i32,
    },
    /// The cursor left the surface.
    CursorLeft,
    /// The surface gained or lost keyboard focus.
    FocusChanged {
        /// The new focus state.
        focused: bool,
    },
}
