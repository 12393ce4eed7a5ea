use ductus_engine::input::Key;
use ductus_engine::paint::Color;
use ductus_engine::scene::{DrawList, LineMode};

use crate::events::{GestureEvent, PointerEvent};
use crate::geom::{orient, signed_area2, Point};
use crate::observer::Flow;

use super::{DrawCtx, KeyRole, Shape, Tint};

/// Filled polygon with exactly `N` vertices, one per click.
///
/// While constructing, the last vertex is open and follows the pointer. Each
/// finalized gesture segment commits it; the `N`-th commit locks the shape.
#[derive(Debug, Clone)]
pub struct Polygon<const N: usize> {
    tint: Tint,
    vertices: Vec<Point>,
    hovered: bool,
}

impl<const N: usize> Polygon<N> {
    pub fn new(start: Point, color: Color) -> Self {
        const { assert!(N >= 3, "a polygon needs at least 3 vertices") };
        let mut vertices = Vec::with_capacity(N);
        vertices.extend([start, start]);
        Self {
            tint: Tint::new(color),
            vertices,
            hovered: false,
        }
    }

    #[inline]
    pub fn vertices(&self) -> &[Point] {
        &self.vertices
    }

    #[inline]
    pub fn is_hovered(&self) -> bool {
        self.hovered
    }

    #[inline]
    pub fn color(&self) -> Color {
        self.tint.color
    }

    fn set_open(&mut self, p: Point) {
        if let Some(last) = self.vertices.last_mut() {
            *last = p;
        }
    }
}

impl<const N: usize> Shape for Polygon<N> {
    fn name(&self) -> &'static str {
        "polygon"
    }

    fn draw(&self, _ctx: &DrawCtx, out: &mut DrawList) {
        let v = &self.vertices;
        if v.len() < 3 || v[1] == v[2] {
            out.push_lines(v.clone(), LineMode::Strip, self.tint.color);
        } else {
            out.push_fan(v.clone(), self.tint.color);
        }
        if self.hovered {
            out.push_lines(v.clone(), LineMode::Loop, Color::YELLOW);
        }
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
                self.set_open(seg.end);
                Flow::Remain
            }
            GestureEvent::Finalized(seg) => {
                self.set_open(seg.end);
                if self.vertices.len() >= N {
                    self.tint.lock();
                    log::debug!("{N}-gon locked: {:?}", self.vertices);
                    Flow::Detach
                } else {
                    self.vertices.push(seg.end);
                    Flow::Remain
                }
            }
        }
    }

    fn on_key(&mut self, _role: KeyRole, key: Key, released: bool) -> Flow {
        self.tint.on_key(key, released)
    }

    /// Convex containment test accepting either winding.
    fn is_inside(&self, p: Point) -> bool {
        let v = &self.vertices;
        let n = v.len();
        if n < 3 {
            return false;
        }
        let ccw = signed_area2(v) >= 0.0;
        (0..n).all(|i| {
            let s = orient(v[i], v[(i + 1) % n], p);
            if ccw { s >= 0.0 } else { s <= 0.0 }
        })
    }

    fn on_pointer(&mut self, ev: PointerEvent) -> Flow {
        self.hovered = self.tint.locked && self.is_inside(ev.position());
        Flow::Remain
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geom::{LineSegment, Viewport};
    use ductus_engine::scene::DrawCmd;

    fn p(x: f32, y: f32) -> Point {
        Point::new(x, y)
    }

    /// Feeds click positions the way the shared gesture would.
    fn build<const N: usize>(clicks: &[Point]) -> (Polygon<N>, Vec<Flow>) {
        let mut poly = Polygon::<N>::new(clicks[0], Color::WHITE);
        poly.on_gesture(GestureEvent::Started(clicks[0]));
        let flows = clicks
            .windows(2)
            .map(|w| poly.on_gesture(GestureEvent::Finalized(LineSegment::new(w[0], w[1]))))
            .collect();
        (poly, flows)
    }

    // ── construction ──────────────────────────────────────────────────────

    #[test]
    fn triangle_locks_on_third_click() {
        let (tri, flows) = build::<3>(&[p(0.0, 0.0), p(1.0, 0.0), p(0.0, 1.0)]);
        assert_eq!(flows, vec![Flow::Remain, Flow::Detach]);
        assert!(tri.is_locked());
        assert_eq!(tri.vertices(), &[p(0.0, 0.0), p(1.0, 0.0), p(0.0, 1.0)]);
    }

    #[test]
    fn triangle_hit_test() {
        let (tri, _) = build::<3>(&[p(0.0, 0.0), p(1.0, 0.0), p(0.0, 1.0)]);
        assert!(tri.is_inside(p(0.2, 0.2)));
        assert!(!tri.is_inside(p(2.0, 2.0)));
    }

    #[test]
    fn hit_test_accepts_clockwise_winding() {
        let (tri, _) = build::<3>(&[p(0.0, 0.0), p(0.0, 1.0), p(1.0, 0.0)]);
        assert!(tri.is_inside(p(0.2, 0.2)));
        assert!(!tri.is_inside(p(-0.1, 0.5)));
    }

    #[test]
    fn move_overwrites_open_vertex() {
        let mut quad = Polygon::<4>::new(p(0.0, 0.0), Color::WHITE);
        quad.on_gesture(GestureEvent::Moved(LineSegment::new(p(0.0, 0.0), p(0.3, 0.0))));
        quad.on_gesture(GestureEvent::Moved(LineSegment::new(p(0.0, 0.0), p(0.4, 0.1))));
        assert_eq!(quad.vertices(), &[p(0.0, 0.0), p(0.4, 0.1)]);
    }

    #[test]
    fn locked_polygon_ignores_gestures() {
        let (mut tri, _) = build::<3>(&[p(0.0, 0.0), p(1.0, 0.0), p(0.0, 1.0)]);
        let before = tri.vertices().to_vec();
        assert_eq!(tri.on_gesture(GestureEvent::Moved(LineSegment::at(p(5.0, 5.0)))), Flow::Detach);
        assert_eq!(tri.vertices(), before.as_slice());
    }

    // ── drawing ───────────────────────────────────────────────────────────

    fn record<const N: usize>(poly: &Polygon<N>) -> DrawList {
        let mut out = DrawList::new();
        poly.draw(&DrawCtx::new(Viewport::new(100.0, 100.0)), &mut out);
        out
    }

    #[test]
    fn draws_strip_until_third_vertex_separates() {
        let (quad, _) = build::<4>(&[p(0.0, 0.0), p(1.0, 0.0)]);
        // [v0, v1, open == v1]
        assert!(matches!(record(&quad).items(), [DrawCmd::Lines(c)] if c.mode == LineMode::Strip));
    }

    #[test]
    fn draws_fan_once_area_exists() {
        let (tri, _) = build::<3>(&[p(0.0, 0.0), p(1.0, 0.0), p(0.0, 1.0)]);
        assert!(matches!(record(&tri).items(), [DrawCmd::Fan(_)]));
    }

    #[test]
    fn hover_adds_outline_when_locked() {
        let (mut tri, _) = build::<3>(&[p(0.0, 0.0), p(1.0, 0.0), p(0.0, 1.0)]);
        assert_eq!(tri.on_pointer(PointerEvent::Moved(p(0.1, 0.1))), Flow::Remain);
        assert!(tri.is_hovered());
        let out = record(&tri);
        assert!(matches!(
            out.items(),
            [DrawCmd::Fan(_), DrawCmd::Lines(c)]
                if c.mode == LineMode::Loop && c.color == Color::YELLOW
        ));

        tri.on_pointer(PointerEvent::Moved(p(0.9, 0.9)));
        assert!(!tri.is_hovered());
    }

    #[test]
    fn no_hover_while_constructing() {
        let mut tri = Polygon::<3>::new(p(0.0, 0.0), Color::WHITE);
        tri.on_pointer(PointerEvent::Moved(p(0.0, 0.0)));
        assert!(!tri.is_hovered());
    }
}
