use ductus_engine::input::{Key, KeyAction};

use crate::observer::{Dispatcher, Flow, ListenerId};

/// Keyboard event source.
///
/// Listeners receive `(key, released)`; repeats are filtered out.
#[derive(Debug)]
pub struct KeyboardEvents<L> {
    listeners: Dispatcher<L>,
}

impl<L> Default for KeyboardEvents<L> {
    fn default() -> Self {
        Self {
            listeners: Dispatcher::new(),
        }
    }
}

impl<L> KeyboardEvents<L> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_listener(&mut self, listener: L) -> ListenerId {
        self.listeners.add_listener(listener)
    }

    /// Feeds one key transition. Returns how many listeners detached.
    pub fn key<F>(&mut self, key: Key, action: KeyAction, mut f: F) -> usize
    where
        F: FnMut(&mut L, Key, bool) -> Flow,
    {
        let released = match action {
            KeyAction::Press => false,
            KeyAction::Release => true,
            KeyAction::Repeat => return 0,
        };
        let detached = self.listeners.dispatch(|l| f(l, key, released));
        log::trace!("key {key:?} released={released}: {detached} listener(s) detached");
        detached
    }

    #[inline]
    pub fn listeners(&self) -> &Dispatcher<L> {
        &self.listeners
    }

    #[inline]
    pub fn listeners_mut(&mut self) -> &mut Dispatcher<L> {
        &mut self.listeners
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn repeat_is_ignored() {
        let mut kb: KeyboardEvents<u32> = KeyboardEvents::new();
        kb.add_listener(0);
        let mut calls = 0;
        kb.key(Key::A, KeyAction::Repeat, |_, _, _| {
            calls += 1;
            Flow::Remain
        });
        assert_eq!(calls, 0);
    }

    #[test]
    fn press_and_release_carry_released_flag() {
        let mut kb: KeyboardEvents<()> = KeyboardEvents::new();
        kb.add_listener(());
        let mut seen = Vec::new();
        for action in [KeyAction::Press, KeyAction::Release] {
            kb.key(Key::F, action, |_, key, released| {
                seen.push((key, released));
                Flow::Remain
            });
        }
        assert_eq!(seen, vec![(Key::F, false), (Key::F, true)]);
    }

    #[test]
    fn detaching_listener_is_removed() {
        let mut kb: KeyboardEvents<u32> = KeyboardEvents::new();
        kb.add_listener(1);
        kb.add_listener(2);
        let detached = kb.key(Key::Space, KeyAction::Press, |l, _, _| {
            if *l == 1 { Flow::Detach } else { Flow::Remain }
        });
        assert_eq!(detached, 1);
        assert_eq!(kb.listeners().len(), 1);
    }
}
