use ductus_engine::input::Key;
use ductus_engine::paint::Color;
use ductus_engine::scene::{DrawList, LineMode};

use crate::events::GestureEvent;
use crate::geom::Point;
use crate::observer::Flow;
use crate::raster::{convex_contains, is_clockwise, lowest_vertex, Edge, EdgeTable};

use super::{DrawCtx, KeyRole, Shape, Tint};

/// Smallest fill-density multiplier reachable with the arrow keys.
pub const DENSITY_MIN: f32 = 1.0 / 64.0;
/// Largest fill-density multiplier reachable with the arrow keys.
pub const DENSITY_MAX: f32 = 64.0;

/// Tolerance used by [`ScanlinePolygon::is_inside`].
const INSIDE_EPS: f32 = 1e-6;

/// Convex polygon with an open-ended vertex count and a scanline fill.
///
/// Vertices are added one per click like [`Polygon`](super::Polygon); the
/// finalize key locks the shape, fixes its orientation and builds the edge
/// table used for filling.
#[derive(Debug, Clone)]
pub struct ScanlinePolygon {
    tint: Tint,
    vertices: Vec<Point>,
    edges: EdgeTable,

    finalize_key: Key,
    density: f32,
    filled: bool,
}

impl ScanlinePolygon {
    pub fn new(start: Point, color: Color, finalize_key: Key, density: f32) -> Self {
        Self {
            tint: Tint::new(color),
            vertices: vec![start, start],
            edges: EdgeTable::default(),
            finalize_key,
            density: clamp_density(density),
            filled: true,
        }
    }

    #[inline]
    pub fn vertices(&self) -> &[Point] {
        &self.vertices
    }

    #[inline]
    pub fn edges(&self) -> &EdgeTable {
        &self.edges
    }

    #[inline]
    pub fn density(&self) -> f32 {
        self.density
    }

    #[inline]
    pub fn is_filled(&self) -> bool {
        self.filled
    }

    pub fn set_filled(&mut self, filled: bool) {
        self.filled = filled;
    }

    /// Locks the contour: corrects its orientation to clockwise and splits
    /// it into left and right edge chains.
    pub fn finalize(&mut self) {
        let n = self.vertices.len();
        let mut lowest = lowest_vertex(&self.vertices).unwrap_or(0);

        if !is_clockwise(&self.vertices) {
            log::warn!("polygon is either not clockwise or not convex; reversing vertex order");
            self.vertices.reverse();
            lowest = n.saturating_sub(1) - lowest;
        }

        self.edges = EdgeTable::build(&self.vertices, lowest);

        log::debug!("left edges (y ranges): {:?}", y_ranges(&self.edges.left));
        log::debug!("right edges (y ranges): {:?}", y_ranges(&self.edges.right));
    }

    /// Fill rows for the current viewport height.
    pub fn fill_rows(&self, viewport_height: f32) -> Vec<(Point, Point)> {
        let Some((top, bottom)) = self.edges.y_extent() else {
            return Vec::new();
        };
        if viewport_height <= 0.0 {
            return Vec::new();
        }
        let delta = (top - bottom) / viewport_height * self.density;
        self.edges
            .rows(delta)
            .into_iter()
            .map(|r| (r.start, r.end))
            .collect()
    }

    fn set_open(&mut self, p: Point) {
        if let Some(last) = self.vertices.last_mut() {
            *last = p;
        }
    }

    fn on_finalize_key(&mut self, key: Key, released: bool) -> Flow {
        if key != self.finalize_key || released {
            return Flow::Remain;
        }
        if !self.tint.locked {
            self.tint.lock();
            self.finalize();
            log::debug!("scanline polygon locked with {} vertices", self.vertices.len());
        }
        Flow::Detach
    }

    fn on_fill_key(&mut self, key: Key, released: bool) -> Flow {
        if released {
            return Flow::Remain;
        }
        match key {
            Key::ArrowDown => self.density = clamp_density(self.density * 2.0),
            Key::ArrowUp => self.density = clamp_density(self.density / 2.0),
            Key::Space if self.tint.locked => self.filled = !self.filled,
            _ => return Flow::Remain,
        }
        log::trace!("fill density {} filled={}", self.density, self.filled);
        Flow::Remain
    }
}

fn y_ranges(chain: &[Edge]) -> Vec<(f32, f32)> {
    chain.iter().map(|e| (e.y_high(), e.y_low())).collect()
}

fn clamp_density(d: f32) -> f32 {
    if d.is_finite() {
        d.clamp(DENSITY_MIN, DENSITY_MAX)
    } else {
        1.0
    }
}

impl Shape for ScanlinePolygon {
    fn name(&self) -> &'static str {
        "scanline polygon"
    }

    fn draw(&self, ctx: &DrawCtx, out: &mut DrawList) {
        let mode = if self.tint.locked { LineMode::Loop } else { LineMode::Strip };
        out.push_lines(self.vertices.clone(), mode, self.tint.color);

        if self.filled && self.tint.locked {
            out.push_segments(&self.fill_rows(ctx.viewport.height), self.tint.color);
        }
    }

    fn is_locked(&self) -> bool {
        self.tint.locked
    }

    fn on_gesture(&mut self, ev: GestureEvent) -> Flow {
        if self.tint.locked {
            return match ev {
                GestureEvent::Finalized(_) => Flow::Detach,
                _ => Flow::Remain,
            };
        }
        match ev {
            GestureEvent::Started(_) => {}
            GestureEvent::Moved(seg) => self.set_open(seg.end),
            GestureEvent::Finalized(seg) => {
                self.set_open(seg.end);
                self.vertices.push(seg.end);
            }
        }
        Flow::Remain
    }

    fn key_roles(&self) -> &'static [KeyRole] {
        &[KeyRole::Tint, KeyRole::Finalize, KeyRole::Fill]
    }

    fn on_key(&mut self, role: KeyRole, key: Key, released: bool) -> Flow {
        match role {
            KeyRole::Tint => self.tint.on_key(key, released),
            KeyRole::Finalize => self.on_finalize_key(key, released),
            KeyRole::Fill => self.on_fill_key(key, released),
        }
    }

    /// Inside when on the right of every directed edge of the clockwise contour.
    fn is_inside(&self, p: Point) -> bool {
        convex_contains(&self.vertices, p, INSIDE_EPS)
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

    /// Clicks through `points`; the open vertex duplicates the last click.
    fn clicked(points: &[Point]) -> ScanlinePolygon {
        let mut poly = ScanlinePolygon::new(points[0], Color::WHITE, Key::F, 1.0);
        poly.on_gesture(GestureEvent::Started(points[0]));
        for w in points.windows(2) {
            poly.on_gesture(GestureEvent::Finalized(LineSegment::new(w[0], w[1])));
        }
        poly
    }

    /// Like [`clicked`] without the trailing open vertex.
    fn constructed(points: &[Point]) -> ScanlinePolygon {
        let mut poly = clicked(points);
        poly.vertices.pop();
        poly
    }

    fn assert_rows_inside(contour: &[Point], rows: &[(Point, Point)]) {
        assert!(!rows.is_empty());
        for w in rows.windows(2) {
            assert!(w[1].0.y < w[0].0.y);
        }
        for (l, r) in rows {
            assert_eq!(l.y, r.y);
            assert!(l.x <= r.x + 1e-5, "row {l:?}..{r:?} inverted");
            assert!(convex_contains(contour, *l, 1e-4), "{l:?} outside");
            assert!(convex_contains(contour, *r, 1e-4), "{r:?} outside");
        }
    }

    fn locked(points: &[Point]) -> ScanlinePolygon {
        let mut poly = constructed(points);
        assert_eq!(poly.on_key(KeyRole::Finalize, Key::F, false), Flow::Detach);
        poly
    }

    fn cw_diamond() -> Vec<Point> {
        vec![p(0.0, 0.5), p(0.5, 0.0), p(0.0, -0.5), p(-0.5, 0.0)]
    }

    // ── construction ──────────────────────────────────────────────────────

    #[test]
    fn finalize_gestures_append_vertices_and_remain() {
        let mut poly = ScanlinePolygon::new(p(0.0, 0.0), Color::WHITE, Key::F, 1.0);
        let seg = LineSegment::new(p(0.0, 0.0), p(0.3, 0.0));
        assert_eq!(poly.on_gesture(GestureEvent::Finalized(seg)), Flow::Remain);
        assert_eq!(poly.vertices(), &[p(0.0, 0.0), p(0.3, 0.0), p(0.3, 0.0)]);
    }

    #[test]
    fn finalize_key_locks_and_detaches() {
        let mut poly = constructed(&cw_diamond());
        assert_eq!(poly.on_key(KeyRole::Finalize, Key::G, false), Flow::Remain);
        assert_eq!(poly.on_key(KeyRole::Finalize, Key::F, true), Flow::Remain);
        assert!(!poly.is_locked());
        assert_eq!(poly.on_key(KeyRole::Finalize, Key::F, false), Flow::Detach);
        assert!(poly.is_locked());
    }

    #[test]
    fn locked_ignores_moves_and_detaches_on_finalize() {
        let mut poly = locked(&cw_diamond());
        let before = poly.vertices().to_vec();
        let at = LineSegment::at(p(0.9, 0.9));
        assert_eq!(poly.on_gesture(GestureEvent::Moved(at)), Flow::Remain);
        assert_eq!(poly.vertices(), before.as_slice());
        assert_eq!(poly.on_gesture(GestureEvent::Finalized(at)), Flow::Detach);
    }

    // ── orientation ───────────────────────────────────────────────────────

    #[test]
    fn counterclockwise_input_is_reversed() {
        let mut ccw = cw_diamond();
        ccw.reverse();
        let fixed = locked(&ccw);
        assert!(is_clockwise(fixed.vertices()));
        assert_eq!(fixed.edges(), locked(&cw_diamond()).edges());
    }

    #[test]
    fn hit_test_on_clockwise_contour() {
        let poly = locked(&cw_diamond());
        assert!(poly.is_inside(p(0.1, 0.1)));
        assert!(poly.is_inside(p(0.0, 0.0)));
        assert!(!poly.is_inside(p(0.4, 0.4)));
    }

    // ── fill ──────────────────────────────────────────────────────────────

    #[test]
    fn fill_rows_are_inside_and_descending() {
        let v = cw_diamond();
        let poly = locked(&v);
        let rows = poly.fill_rows(100.0);
        assert!(rows.len() > 50);
        assert_rows_inside(&v, &rows);
    }

    #[test]
    fn locking_right_after_a_click_keeps_the_duplicate_vertex() {
        let v = cw_diamond();
        let mut poly = clicked(&v);
        assert_eq!(poly.on_key(KeyRole::Finalize, Key::F, false), Flow::Detach);

        let n = poly.vertices().len();
        assert_eq!(n, v.len() + 1);
        assert_eq!(poly.vertices()[n - 1], poly.vertices()[n - 2]);
        assert!(is_clockwise(poly.vertices()));

        let rows = poly.fill_rows(200.0);
        assert_eq!(rows.len(), 201);
        assert_rows_inside(&v, &rows);
        assert!(poly.is_inside(p(0.1, -0.1)));
        assert!(!poly.is_inside(p(0.4, -0.4)));
    }

    #[test]
    fn counterclockwise_clicks_with_duplicate_vertex_fill_inside() {
        let mut ccw = cw_diamond();
        ccw.reverse();
        let mut poly = clicked(&ccw);
        poly.on_key(KeyRole::Finalize, Key::F, false);

        assert!(is_clockwise(poly.vertices()));
        assert_rows_inside(&cw_diamond(), &poly.fill_rows(200.0));
        assert!(poly.is_inside(p(-0.1, 0.1)));
        assert!(!poly.is_inside(p(-0.4, 0.4)));
    }

    #[test]
    fn open_vertex_at_the_cursor_becomes_a_corner() {
        let v = cw_diamond();
        let mut poly = clicked(&v[..3]);
        poly.on_gesture(GestureEvent::Moved(LineSegment::new(v[2], v[3])));
        poly.on_key(KeyRole::Finalize, Key::F, false);

        assert_eq!(poly.vertices(), v.as_slice());
        assert_rows_inside(&v, &poly.fill_rows(100.0));
    }

    #[test]
    fn density_keys_scale_row_spacing() {
        let mut poly = locked(&cw_diamond());
        let base = poly.fill_rows(100.0).len();
        poly.on_key(KeyRole::Fill, Key::ArrowDown, false);
        assert_eq!(poly.density(), 2.0);
        let sparse = poly.fill_rows(100.0).len();
        assert!(sparse < base);

        poly.on_key(KeyRole::Fill, Key::ArrowUp, false);
        poly.on_key(KeyRole::Fill, Key::ArrowUp, false);
        assert_eq!(poly.density(), 0.5);
        assert!(poly.fill_rows(100.0).len() > base);
    }

    #[test]
    fn density_is_clamped() {
        let mut poly = ScanlinePolygon::new(p(0.0, 0.0), Color::WHITE, Key::F, 1.0);
        for _ in 0..20 {
            assert_eq!(poly.on_key(KeyRole::Fill, Key::ArrowUp, false), Flow::Remain);
        }
        assert_eq!(poly.density(), DENSITY_MIN);
    }

    #[test]
    fn space_toggles_fill_only_when_locked() {
        let mut poly = constructed(&cw_diamond());
        poly.on_key(KeyRole::Fill, Key::Space, false);
        assert!(poly.is_filled());

        poly.on_key(KeyRole::Finalize, Key::F, false);
        poly.on_key(KeyRole::Fill, Key::Space, false);
        assert!(!poly.is_filled());
    }

    #[test]
    fn draw_outline_then_rows() {
        let vp = Viewport::new(100.0, 100.0);
        let mut out = DrawList::new();

        let open = constructed(&cw_diamond());
        open.draw(&DrawCtx::new(vp), &mut out);
        assert!(matches!(out.items(), [DrawCmd::Lines(c)] if c.mode == LineMode::Strip));

        out.clear();
        let closed = locked(&cw_diamond());
        closed.draw(&DrawCtx::new(vp), &mut out);
        assert!(matches!(
            out.items(),
            [DrawCmd::Lines(outline), DrawCmd::Lines(rows)]
                if outline.mode == LineMode::Loop && rows.mode == LineMode::List
        ));
    }

    #[test]
    fn degenerate_polygon_has_no_rows() {
        let poly = locked(&[p(0.1, 0.1), p(0.1, 0.1)]);
        assert!(poly.fill_rows(100.0).is_empty());
    }
}
