use std::cell::RefCell;

use ductus_engine::input::Key;
use ductus_engine::paint::Color;
use ductus_engine::scene::DrawList;

use crate::events::GestureEvent;
use crate::geom::{LineSegment, Point, Vec2, Viewport};
use crate::observer::Flow;
use crate::raster;

use super::{DrawCtx, KeyRole, Shape, Tint};

/// Line drawn as individual pixels sampled with Bresenham's algorithm.
///
/// Follows the same drag protocol as [`Line`](super::Line). The segment is
/// rasterized in window pixels at draw time; once locked, the result is kept
/// until the viewport size changes.
#[derive(Debug)]
pub struct BresenhamLine {
    tint: Tint,
    segment: LineSegment,
    cache: RefCell<Option<(Viewport, Vec<Point>)>>,
}

impl BresenhamLine {
    pub fn new(start: Point, color: Color) -> Self {
        Self {
            tint: Tint::new(color),
            segment: LineSegment::at(start),
            cache: RefCell::new(None),
        }
    }

    #[inline]
    pub fn segment(&self) -> LineSegment {
        self.segment
    }

    /// Pixel samples of the current segment, mapped back to NDC pixel centers.
    pub fn samples(&self, viewport: Viewport) -> Vec<Point> {
        if !viewport.is_valid() {
            return Vec::new();
        }
        if self.tint.locked {
            if let Some((vp, pts)) = self.cache.borrow().as_ref() {
                if *vp == viewport {
                    return pts.clone();
                }
            }
        }

        let pts = rasterize_ndc(self.segment, viewport);
        if self.tint.locked {
            *self.cache.borrow_mut() = Some((viewport, pts.clone()));
        }
        pts
    }
}

fn rasterize_ndc(seg: LineSegment, viewport: Viewport) -> Vec<Point> {
    let to_px = |p: Point| {
        let px = viewport.to_pixels(p);
        Vec2::new(px.x.round(), px.y.round())
    };
    let px = LineSegment::new(to_px(seg.start), to_px(seg.end));
    raster::rasterize(px)
        .into_iter()
        .map(|q| viewport.to_ndc(Vec2::new(q.x + 0.5, q.y + 0.5)))
        .collect()
}

impl Shape for BresenhamLine {
    fn name(&self) -> &'static str {
        "bresenham line"
    }

    fn draw(&self, ctx: &DrawCtx, out: &mut DrawList) {
        out.push_points(self.samples(ctx.viewport), self.tint.color);
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
                log::debug!("bresenham line locked: {:?} -> {:?}", seg.start, seg.end);
                Flow::Detach
            }
        }
    }

    fn on_key(&mut self, _role: KeyRole, key: Key, released: bool) -> Flow {
        self.tint.on_key(key, released)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ductus_engine::scene::DrawCmd;

    const VP: Viewport = Viewport::new(100.0, 100.0);

    fn p(x: f32, y: f32) -> Point {
        Point::new(x, y)
    }

    #[test]
    fn horizontal_line_one_point_per_pixel_column() {
        let mut l = BresenhamLine::new(p(-0.5, 0.0), Color::WHITE);
        l.on_gesture(GestureEvent::Finalized(LineSegment::new(p(-0.5, 0.0), p(0.5, 0.0))));
        // -0.5..0.5 spans pixel columns 25..75
        let pts = l.samples(VP);
        assert_eq!(pts.len(), 50);
        assert!(pts.iter().all(|q| q.x >= -0.5 && q.x <= 0.5));
    }

    #[test]
    fn zero_length_draws_one_point() {
        let l = BresenhamLine::new(p(0.0, 0.0), Color::WHITE);
        assert_eq!(l.samples(VP).len(), 1);
    }

    #[test]
    fn locked_samples_are_cached_per_viewport() {
        let mut l = BresenhamLine::new(p(0.0, 0.0), Color::WHITE);
        l.on_gesture(GestureEvent::Finalized(LineSegment::new(p(0.0, 0.0), p(0.0, 0.5))));
        let a = l.samples(VP);
        assert!(l.cache.borrow().is_some());
        assert_eq!(l.samples(VP), a);

        let b = l.samples(Viewport::new(200.0, 200.0));
        assert_eq!(b.len(), a.len() * 2);
    }

    #[test]
    fn draw_records_points() {
        let l = BresenhamLine::new(p(0.0, 0.0), Color::BLUE);
        let mut out = DrawList::new();
        l.draw(&DrawCtx::new(VP), &mut out);
        assert!(matches!(out.items(), [DrawCmd::Points(cmd)] if cmd.color == Color::BLUE));
    }
}
