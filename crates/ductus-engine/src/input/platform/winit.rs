use winit::event::{ElementState, MouseButton as WinitMouseButton, WindowEvent};
use winit::keyboard::{KeyCode, PhysicalKey};
use winit::window::Window;

use crate::input::{
    InputEvent, InputState, Key, KeyAction, MouseButton, PointerButtonEvent, PointerMoveEvent,
};

/// Translates a winit `WindowEvent` into an engine `InputEvent`.
///
/// `None` for events the input subsystem does not model.
pub(crate) fn translate_window_event(
    window: &Window,
    state: &InputState,
    event: &WindowEvent,
) -> Option<InputEvent> {
    let ev = match event {
        WindowEvent::Focused(f) => InputEvent::Focused(*f),
        WindowEvent::CursorLeft { .. } => InputEvent::PointerLeft,

        WindowEvent::CursorMoved { position, .. } => {
            let logical = position.to_logical::<f32>(window.scale_factor());
            InputEvent::PointerMoved(PointerMoveEvent { x: logical.x, y: logical.y })
        }

        // Button events carry no position; reuse the last tracked one.
        WindowEvent::MouseInput { state: st, button, .. } => {
            let (x, y) = state.pointer_pos.unwrap_or_default();
            InputEvent::PointerButton(PointerButtonEvent {
                button: map_mouse_button(*button),
                pressed: *st == ElementState::Pressed,
                x,
                y,
            })
        }

        WindowEvent::KeyboardInput { event, .. } => {
            let action = key_action(event.state, event.repeat);
            let (key, code) = match event.physical_key {
                PhysicalKey::Code(code) => (map_key(code), code as u32),
                PhysicalKey::Unidentified(_) => (Key::Unknown(0), 0),
            };
            InputEvent::Key { key, action, code }
        }

        _ => return None,
    };
    Some(ev)
}

fn key_action(state: ElementState, repeat: bool) -> KeyAction {
    match (state, repeat) {
        (ElementState::Released, _) => KeyAction::Release,
        (ElementState::Pressed, true) => KeyAction::Repeat,
        (ElementState::Pressed, false) => KeyAction::Press,
    }
}

fn map_mouse_button(b: WinitMouseButton) -> MouseButton {
    match b {
        WinitMouseButton::Left => MouseButton::Left,
        WinitMouseButton::Right => MouseButton::Right,
        WinitMouseButton::Middle => MouseButton::Middle,
        WinitMouseButton::Back => MouseButton::Other(3),
        WinitMouseButton::Forward => MouseButton::Other(4),
        WinitMouseButton::Other(v) => MouseButton::Other(v),
    }
}

const LETTERS: [(KeyCode, Key); 26] = [
    (KeyCode::KeyA, Key::A), (KeyCode::KeyB, Key::B), (KeyCode::KeyC, Key::C),
    (KeyCode::KeyD, Key::D), (KeyCode::KeyE, Key::E), (KeyCode::KeyF, Key::F),
    (KeyCode::KeyG, Key::G), (KeyCode::KeyH, Key::H), (KeyCode::KeyI, Key::I),
    (KeyCode::KeyJ, Key::J), (KeyCode::KeyK, Key::K), (KeyCode::KeyL, Key::L),
    (KeyCode::KeyM, Key::M), (KeyCode::KeyN, Key::N), (KeyCode::KeyO, Key::O),
    (KeyCode::KeyP, Key::P), (KeyCode::KeyQ, Key::Q), (KeyCode::KeyR, Key::R),
    (KeyCode::KeyS, Key::S), (KeyCode::KeyT, Key::T), (KeyCode::KeyU, Key::U),
    (KeyCode::KeyV, Key::V), (KeyCode::KeyW, Key::W), (KeyCode::KeyX, Key::X),
    (KeyCode::KeyY, Key::Y), (KeyCode::KeyZ, Key::Z),
];

// Top row and numpad digits both map to `Key::DigitN`.
const DIGITS: [(KeyCode, KeyCode, Key); 10] = [
    (KeyCode::Digit0, KeyCode::Numpad0, Key::Digit0),
    (KeyCode::Digit1, KeyCode::Numpad1, Key::Digit1),
    (KeyCode::Digit2, KeyCode::Numpad2, Key::Digit2),
    (KeyCode::Digit3, KeyCode::Numpad3, Key::Digit3),
    (KeyCode::Digit4, KeyCode::Numpad4, Key::Digit4),
    (KeyCode::Digit5, KeyCode::Numpad5, Key::Digit5),
    (KeyCode::Digit6, KeyCode::Numpad6, Key::Digit6),
    (KeyCode::Digit7, KeyCode::Numpad7, Key::Digit7),
    (KeyCode::Digit8, KeyCode::Numpad8, Key::Digit8),
    (KeyCode::Digit9, KeyCode::Numpad9, Key::Digit9),
];

fn map_key(code: KeyCode) -> Key {
    let named = match code {
        KeyCode::Escape => Some(Key::Escape),
        KeyCode::Enter | KeyCode::NumpadEnter => Some(Key::Enter),
        KeyCode::Tab => Some(Key::Tab),
        KeyCode::Backspace => Some(Key::Backspace),
        KeyCode::Space => Some(Key::Space),
        KeyCode::Delete => Some(Key::Delete),
        KeyCode::ArrowUp => Some(Key::ArrowUp),
        KeyCode::ArrowDown => Some(Key::ArrowDown),
        KeyCode::ArrowLeft => Some(Key::ArrowLeft),
        KeyCode::ArrowRight => Some(Key::ArrowRight),
        _ => None,
    };

    named
        .or_else(|| LETTERS.iter().find(|(c, _)| *c == code).map(|&(_, k)| k))
        .or_else(|| {
            DIGITS
                .iter()
                .find(|(row, pad, _)| *row == code || *pad == code)
                .map(|&(_, _, k)| k)
        })
        .unwrap_or(Key::Unknown(code as u32))
}

#[cfg(test)]
mod tests {
    use super::*;

    // ── keys ──────────────────────────────────────────────────────────────

    #[test]
    fn letters_and_digits() {
        assert_eq!(map_key(KeyCode::KeyF), Key::F);
        assert_eq!(map_key(KeyCode::KeyZ), Key::Z);
        assert_eq!(map_key(KeyCode::Digit3), Key::Digit3);
        assert_eq!(map_key(KeyCode::Numpad6), Key::Digit6);
    }

    #[test]
    fn named_keys() {
        assert_eq!(map_key(KeyCode::Space), Key::Space);
        assert_eq!(map_key(KeyCode::ArrowDown), Key::ArrowDown);
        assert_eq!(map_key(KeyCode::Escape), Key::Escape);
    }

    #[test]
    fn unmapped_keys_keep_their_code() {
        assert_eq!(map_key(KeyCode::F5), Key::Unknown(KeyCode::F5 as u32));
    }

    // ── actions and buttons ───────────────────────────────────────────────

    #[test]
    fn repeat_is_distinct_from_press() {
        assert_eq!(key_action(ElementState::Pressed, false), KeyAction::Press);
        assert_eq!(key_action(ElementState::Pressed, true), KeyAction::Repeat);
        assert_eq!(key_action(ElementState::Released, true), KeyAction::Release);
    }

    #[test]
    fn extra_buttons_are_numbered() {
        assert_eq!(map_mouse_button(WinitMouseButton::Left), MouseButton::Left);
        assert_eq!(map_mouse_button(WinitMouseButton::Back), MouseButton::Other(3));
        assert_eq!(map_mouse_button(WinitMouseButton::Other(9)), MouseButton::Other(9));
    }
}
