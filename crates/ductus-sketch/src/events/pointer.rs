use crate::geom::Point;
use crate::observer::{Dispatcher, Flow, ListenerId};

/// Raw pointer event in NDC.
#[derive(Debug, Copy, Clone, PartialEq)]
pub enum PointerEvent {
    Moved(Point),
    /// Primary button transition.
    Button { at: Point, pressed: bool },
}

impl PointerEvent {
    #[inline]
    pub fn position(&self) -> Point {
        match *self {
            PointerEvent::Moved(p) => p,
            PointerEvent::Button { at, .. } => at,
        }
    }
}

/// Raw pointer event source. Tracks the last known position.
#[derive(Debug)]
pub struct PointerEvents<L> {
    listeners: Dispatcher<L>,
    position: Option<Point>,
}

impl<L> Default for PointerEvents<L> {
    fn default() -> Self {
        Self {
            listeners: Dispatcher::new(),
            position: None,
        }
    }
}

impl<L> PointerEvents<L> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_listener(&mut self, listener: L) -> ListenerId {
        self.listeners.add_listener(listener)
    }

    pub fn moved<F>(&mut self, p: Point, f: F) -> usize
    where
        F: FnMut(&mut L, PointerEvent) -> Flow,
    {
        self.emit(PointerEvent::Moved(p), f)
    }

    pub fn button<F>(&mut self, at: Point, pressed: bool, f: F) -> usize
    where
        F: FnMut(&mut L, PointerEvent) -> Flow,
    {
        self.emit(PointerEvent::Button { at, pressed }, f)
    }

    fn emit<F>(&mut self, ev: PointerEvent, mut f: F) -> usize
    where
        F: FnMut(&mut L, PointerEvent) -> Flow,
    {
        self.position = Some(ev.position());
        self.listeners.dispatch(|l| f(l, ev))
    }

    /// Last position seen by this source, if any.
    #[inline]
    pub fn position(&self) -> Option<Point> {
        self.position
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
    fn tracks_last_position() {
        let mut pe: PointerEvents<()> = PointerEvents::new();
        assert_eq!(pe.position(), None);
        pe.moved(Point::new(0.5, 0.5), |_, _| Flow::Remain);
        pe.button(Point::new(-0.5, 0.25), true, |_, _| Flow::Remain);
        assert_eq!(pe.position(), Some(Point::new(-0.5, 0.25)));
    }

    #[test]
    fn listeners_see_the_event() {
        let mut pe: PointerEvents<Vec<PointerEvent>> = PointerEvents::new();
        pe.add_listener(Vec::new());
        pe.button(Point::new(0.0, 0.0), false, |log, ev| {
            log.push(ev);
            Flow::Remain
        });
        let log = pe.listeners().listeners().next().cloned().unwrap_or_default();
        assert_eq!(log, vec![PointerEvent::Button { at: Point::new(0.0, 0.0), pressed: false }]);
    }
}
