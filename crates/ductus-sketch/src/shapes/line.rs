use ductus_engine::input::Key;
use ductus_engine::paint::Color;
use ductus_engine::scene::{DrawList, LineMode};

use crate::events::GestureEvent;
use crate::geom::{LineSegment, Point};
use crate::observer::Flow;

use super::{DrawCtx, KeyRole, Shape, Tint};

/// Free line between two clicks.
#[derive(Debug, Clone)]
pub struct Line {
    tint: Tint,
    segment: LineSegment,
}

impl Line {
    pub fn new(start: Point, color: Color) -> Self {
        Self {
            tint: Tint::new(color),
            segment: LineSegment::at(start),
        }
    }

    #[inline]
    pub fn segment(&self) -> LineSegment {
        self.segment
    }

    #[inline]
    pub fn color(&self) -> Color {
        self.tint.color
    }
}

impl Shape for Line {
    fn name(&self) -> &'static str {
        "line"
    }

    fn draw(&self, _ctx: &DrawCtx, out: &mut DrawList) {
        out.push_lines(
            vec![self.segment.start, self.segment.end],
            LineMode::List,
            self.tint.color,
        );
    }

    fn is_locked(&self) -> bool {
        self.tint.locked
    }

    fn on_gesture(&mut self, ev: GestureEvent) -> Flow {
        if self.tint.locked {
            return Flow::Detach;
        }
        match ev {
            GestureEvent::Started(_) => Flow::Remain,
            GestureEvent::Moved(seg) => {
                self.segment = seg;
                Flow::Remain
            }
            GestureEvent::Finalized(seg) => {
                self.segment = seg;
                self.tint.lock();
                if seg.is_degenerate() {
                    log::debug!("line locked with zero length at {:?}", seg.start);
                } else {
                    log::debug!("line locked: {:?} -> {:?}", seg.start, seg.end);
                }
                Flow::Detach
            }
        }
    }

    fn on_key(&mut self, _role: KeyRole, key: Key, released: bool) -> Flow {
        self.tint.on_key(key, released)
    }
}
