//! Shape state machines.
//!
//! Every shape starts out constructing and ends locked. Input reaches a shape
//! through its handlers, each returning a [`Flow`] that decides whether the
//! listener that delivered the event stays registered:
//! - [`Shape::on_gesture`]: the shared drag gesture (one listener per shape)
//! - [`Shape::on_key`]: one keyboard listener per [`KeyRole`] the shape declares
//! - [`Shape::on_pointer`]: raw pointer events (hover)

mod base;
mod bresenham;
mod line;
mod polygon;
mod scanline;

pub use base::Tint;
pub use bresenham::BresenhamLine;
pub use line::Line;
pub use polygon::Polygon;
pub use scanline::{ScanlinePolygon, DENSITY_MAX, DENSITY_MIN};

use ductus_engine::input::Key;
use ductus_engine::scene::DrawList;

use crate::events::{GestureEvent, PointerEvent};
use crate::geom::{Point, Viewport};
use crate::observer::Flow;

/// Keyboard listener kinds a shape can register.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum KeyRole {
    /// R/G/B/W recolor while constructing; detaches once locked.
    Tint,
    /// Locks a shape with an open-ended vertex count.
    Finalize,
    /// Fill density and fill toggle.
    Fill,
}

/// Per-frame draw parameters.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct DrawCtx {
    /// Logical window size, used for pixel-space work.
    pub viewport: Viewport,
}

impl DrawCtx {
    pub fn new(viewport: Viewport) -> Self {
        Self { viewport }
    }
}

/// Capability set shared by all shapes.
pub trait Shape {
    fn name(&self) -> &'static str;

    /// Records the shape into `out`.
    fn draw(&self, ctx: &DrawCtx, out: &mut DrawList);

    fn is_locked(&self) -> bool;

    fn on_gesture(&mut self, ev: GestureEvent) -> Flow;

    /// Keyboard roles to register when the shape is spawned.
    fn key_roles(&self) -> &'static [KeyRole] {
        &[KeyRole::Tint]
    }

    fn on_key(&mut self, role: KeyRole, key: Key, released: bool) -> Flow;

    /// Hit test in NDC. Shapes without an area are never hit.
    fn is_inside(&self, p: Point) -> bool {
        let _ = p;
        false
    }

    /// Shapes not interested in raw pointer events leave on the first one.
    fn on_pointer(&mut self, ev: PointerEvent) -> Flow {
        let _ = ev;
        Flow::Detach
    }
}
