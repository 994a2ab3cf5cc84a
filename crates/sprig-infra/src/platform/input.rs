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

//! Translation from `winit` window events to Sprig's [`InputEvent`].
//!
//! Keeps the sampler and the frame loop independent of the windowing crate.

use sprig_core::{InputEvent, Key, MouseButton};
use winit::event::{ElementState, MouseButton as WinitMouseButton, WindowEvent};
use winit::keyboard::{KeyCode, PhysicalKey};

/// Translates a `winit::event::WindowEvent` into an [`InputEvent`].
///
/// Keyboard auto-repeat is dropped: a held key produces one press. Cursor
/// positions are raw physical pixels; the sampler divides them by the scale.
///
/// # Returns
///
/// `Some(InputEvent)` for key, mouse button, cursor and focus events, `None`
/// for everything else (resize, close, scroll, ...).
pub fn translate_winit_input(event: &WindowEvent) -> Option<InputEvent> {
    match event {
        WindowEvent::KeyboardInput {
            event: key_event, ..
        } => {
            let PhysicalKey::Code(keycode) = key_event.physical_key else {
                return None;
            };
            let key = map_keycode(keycode);
            match key_event.state {
                ElementState::Pressed if !key_event.repeat => Some(InputEvent::KeyPressed { key }),
                ElementState::Released => Some(InputEvent::KeyReleased { key }),
                _ => None,
            }
        }
        WindowEvent::CursorMoved { position, .. } => Some(InputEvent::MouseMoved {
            x: position.x as i32,
            y: position.y as i32,
        }),
        WindowEvent::CursorLeft { .. } => Some(InputEvent::CursorLeft),
        WindowEvent::MouseInput { state, button, .. } => {
            let button = map_mouse_button(*button);
            match state {
                ElementState::Pressed => Some(InputEvent::MouseButtonPressed { button }),
                ElementState::Released => Some(InputEvent::MouseButtonReleased { button }),
            }
        }
        WindowEvent::Focused(focused) => Some(InputEvent::FocusChanged { focused: *focused }),
        _ => None,
    }
}

/// `winit` key codes are named by their `Debug` form (`KeyA`, `ArrowLeft`).
fn map_keycode(keycode: KeyCode) -> Key {
    Key::named(format!("{keycode:?}"))
}

fn map_mouse_button(button: WinitMouseButton) -> MouseButton {
    match button {
        WinitMouseButton::Left => MouseButton::Left,
        WinitMouseButton::Right => MouseButton::Right,
        WinitMouseButton::Middle => MouseButton::Middle,
        WinitMouseButton::Back => MouseButton::Back,
        WinitMouseButton::Forward => MouseButton::Forward,
        WinitMouseButton::Other(id) => MouseButton::Other(id),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use winit::dpi::PhysicalPosition;
    use winit::event::DeviceId;

    #[test]
    fn test_keycodes_match_the_named_keys() {
        assert_eq!(map_keycode(KeyCode::KeyP), Key::P);
        assert_eq!(map_keycode(KeyCode::PrintScreen), Key::PRINT_SCREEN);
        assert_eq!(map_keycode(KeyCode::ArrowLeft), Key::LEFT);
        assert_eq!(map_keycode(KeyCode::Space), Key::SPACE);
        assert_eq!(map_keycode(KeyCode::Digit1).name(), "Digit1");
    }

    #[test]
    fn test_map_mouse_button() {
        assert_eq!(map_mouse_button(WinitMouseButton::Left), MouseButton::Left);
        assert_eq!(map_mouse_button(WinitMouseButton::Forward), MouseButton::Forward);
        assert_eq!(
            map_mouse_button(WinitMouseButton::Other(8)),
            MouseButton::Other(8)
        );
    }

    #[test]
    fn test_translate_mouse_button_pressed() {
        let winit_event = WindowEvent::MouseInput {
            device_id: DeviceId::dummy(),
            state: ElementState::Pressed,
            button: WinitMouseButton::Left,
        };
        assert_eq!(
            translate_winit_input(&winit_event),
            Some(InputEvent::MouseButtonPressed {
                button: MouseButton::Left
            })
        );
    }

    #[test]
    fn test_translate_mouse_button_released() {
        let winit_event = WindowEvent::MouseInput {
            device_id: DeviceId::dummy(),
            state: ElementState::Released,
            button: WinitMouseButton::Right,
        };
        assert_eq!(
            translate_winit_input(&winit_event),
            Some(InputEvent::MouseButtonReleased {
                button: MouseButton::Right
            })
        );
    }

    #[test]
    fn test_translate_cursor_moved_truncates_to_pixels() {
        let winit_event = WindowEvent::CursorMoved {
            device_id: DeviceId::dummy(),
            position: PhysicalPosition::new(100.5, 200.75),
        };
        assert_eq!(
            translate_winit_input(&winit_event),
            Some(InputEvent::MouseMoved { x: 100, y: 200 })
        );
    }

    #[test]
    fn test_translate_cursor_left_and_focus() {
        let left = WindowEvent::CursorLeft {
            device_id: DeviceId::dummy(),
        };
        assert_eq!(translate_winit_input(&left), Some(InputEvent::CursorLeft));
        assert_eq!(
            translate_winit_input(&WindowEvent::Focused(false)),
            Some(InputEvent::FocusChanged { focused: false })
        );
    }

    #[test]
    fn test_translate_non_input_returns_none() {
        let resize = WindowEvent::Resized(winit::dpi::PhysicalSize::new(100, 100));
        assert_eq!(translate_winit_input(&resize), None);
        assert_eq!(translate_winit_input(&WindowEvent::CloseRequested), None);
    }
}
