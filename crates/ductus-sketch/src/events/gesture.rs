use crate::geom::{LineSegment, Point};
use crate::observer::{Dispatcher, Flow, ListenerId};

/// Phase of the shared drag gesture.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum GesturePhase {
    Idle,
    Tracking,
}

/// Event delivered to gesture listeners.
#[derive(Debug, Copy, Clone, PartialEq)]
pub enum GestureEvent {
    /// First click of a gesture.
    Started(Point),
    /// Pointer moved while tracking; carries the live segment.
    Moved(LineSegment),
    /// A click while tracking; carries the segment it closed.
    Finalized(LineSegment),
}

/// Result of feeding a click into the gesture.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum ClickOutcome {
    /// `Idle -> Tracking`.
    Started,
    /// Finalize with no detach; the segment was rebased on its end point.
    Continued,
    /// Finalize where `detached` listeners left; back to `Idle`.
    Completed { detached: usize },
}

/// Click-to-click drag gesture shared by all shapes of a sketch.
///
/// ```text
/// Idle --click(p)--> Tracking          start = end = p, notify Started
/// Tracking --move(p)--> Tracking       end = p, notify Moved
/// Tracking --click(p)--> Idle          end = p, dispatch Finalized, someone detached
/// Tracking --click(p)--> Tracking      end = p, dispatch Finalized, start = end
/// ```
#[derive(Debug)]
pub struct DragGesture<L> {
    listeners: Dispatcher<L>,
    phase: GesturePhase,
    segment: LineSegment,
}

impl<L> Default for DragGesture<L> {
    fn default() -> Self {
        Self {
            listeners: Dispatcher::new(),
            phase: GesturePhase::Idle,
            segment: LineSegment::default(),
        }
    }
}

impl<L> DragGesture<L> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_listener(&mut self, listener: L) -> ListenerId {
        self.listeners.add_listener(listener)
    }

    /// Feeds a primary-button press at `p`.
    pub fn click<F>(&mut self, p: Point, mut f: F) -> ClickOutcome
    where
        F: FnMut(&mut L, GestureEvent) -> Flow,
    {
        match self.phase {
            GesturePhase::Idle => {
                self.segment = LineSegment::at(p);
                self.phase = GesturePhase::Tracking;
                self.listeners.notify(|l| {
                    f(l, GestureEvent::Started(p));
                });
                ClickOutcome::Started
            }
            GesturePhase::Tracking => {
                self.segment.end = p;
                let seg = self.segment;
                let detached = self.listeners.dispatch(|l| f(l, GestureEvent::Finalized(seg)));
                if detached > 0 {
                    self.phase = GesturePhase::Idle;
                    ClickOutcome::Completed { detached }
                } else {
                    self.segment.start = self.segment.end;
                    ClickOutcome::Continued
                }
            }
        }
    }

    /// Feeds a pointer move. Ignored while idle; returns whether it was delivered.
    pub fn move_to<F>(&mut self, p: Point, mut f: F) -> bool
    where
        F: FnMut(&mut L, GestureEvent),
    {
        if self.phase == GesturePhase::Idle {
            return false;
        }
        self.segment.end = p;
        let seg = self.segment;
        self.listeners.notify(|l| f(l, GestureEvent::Moved(seg)));
        true
    }

    /// Forces the gesture back to `Idle` without notifying anyone.
    pub fn reset(&mut self) {
        self.phase = GesturePhase::Idle;
    }

    #[inline]
    pub fn phase(&self) -> GesturePhase {
        self.phase
    }

    #[inline]
    pub fn is_tracking(&self) -> bool {
        self.phase == GesturePhase::Tracking
    }

    #[inline]
    pub fn segment(&self) -> LineSegment {
        self.segment
    }

    #[inline]
    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }

    #[inline]
    pub fn listeners_mut(&mut self) -> &mut Dispatcher<L> {
        &mut self.listeners
    }
}
