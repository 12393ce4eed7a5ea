use ductus_engine::input::Key;
use ductus_engine::paint::Color;

use crate::observer::Flow;

/// Color + lock flag carried by every shape, with the tint key protocol.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Tint {
    pub color: Color,
    pub locked: bool,
}

impl Tint {
    pub fn new(color: Color) -> Self {
        Self { color, locked: false }
    }

    /// R, G, B and W presses recolor an unlocked shape.
    ///
    /// After the shape locked, the first key event of any kind detaches.
    pub fn on_key(&mut self, key: Key, released: bool) -> Flow {
        if self.locked {
            return Flow::Detach;
        }
        if released {
            return Flow::Remain;
        }
        if let Some(color) = tint_for(key) {
            self.color = color;
        }
        Flow::Remain
    }

    #[inline]
    pub fn lock(&mut self) {
        self.locked = true;
    }
}

fn tint_for(key: Key) -> Option<Color> {
    match key {
        Key::R => Some(Color::RED),
        Key::G => Some(Color::GREEN),
        Key::B => Some(Color::BLUE),
        Key::W => Some(Color::WHITE),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tints_while_unlocked() {
        let mut t = Tint::new(Color::WHITE);
        assert_eq!(t.on_key(Key::R, false), Flow::Remain);
        assert_eq!(t.color, Color::RED);
        assert_eq!(t.on_key(Key::B, true), Flow::Remain);
        assert_eq!(t.color, Color::RED);
        t.on_key(Key::Q, false);
        assert_eq!(t.color, Color::RED);
    }

    #[test]
    fn detaches_after_lock() {
        let mut t = Tint::new(Color::WHITE);
        t.lock();
        assert_eq!(t.on_key(Key::G, false), Flow::Detach);
        assert_eq!(t.color, Color::WHITE);
    }
}
