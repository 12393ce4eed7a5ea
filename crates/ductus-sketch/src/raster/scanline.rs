//! Convex polygon scanline fill.
//!
//! A clockwise convex contour is split at its lowest vertex into a left and a
//! right chain of edges. Both chains are stored top-down, so a fill that walks
//! rows from the top of the polygon to the bottom only ever moves its chain
//! cursors forward. Horizontal edges always land in the right chain, possibly
//! out of order; the cursor steps over them.

use crate::geom::{orient, LineSegment, Point};

/// Polygon edge oriented from its upper to its lower endpoint.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Edge {
    pub upper: Point,
    pub lower: Point,
}

impl Edge {
    pub fn new(a: Point, b: Point) -> Self {
        if a.y >= b.y {
            Self { upper: a, lower: b }
        } else {
            Self { upper: b, lower: a }
        }
    }

    #[inline]
    pub fn y_low(&self) -> f32 {
        self.lower.y
    }

    #[inline]
    pub fn y_high(&self) -> f32 {
        self.upper.y
    }

    /// Horizontal edges have no single `x` per row.
    #[inline]
    pub fn is_flat(&self) -> bool {
        self.upper.y == self.lower.y
    }

    /// X coordinate of the edge's supporting line at height `y`.
    ///
    /// Flat edges answer with their upper endpoint.
    pub fn x_at(&self, y: f32) -> f32 {
        if self.is_flat() {
            return self.upper.x;
        }
        let t = (y - self.upper.y) / (self.lower.y - self.upper.y);
        self.upper.x + t * (self.lower.x - self.upper.x)
    }
}

/// True when every cyclic vertex triple turns clockwise (or is collinear).
pub fn is_clockwise(vertices: &[Point]) -> bool {
    let n = vertices.len();
    (0..n).all(|i| orient(vertices[i], vertices[(i + 1) % n], vertices[(i + 2) % n]) <= 0.0)
}

/// Index of the vertex with the smallest `y`; the first one wins ties.
pub fn lowest_vertex(vertices: &[Point]) -> Option<usize> {
    let mut best: Option<usize> = None;
    for (i, v) in vertices.iter().enumerate() {
        match best {
            Some(b) if vertices[b].y <= v.y => {}
            _ => best = Some(i),
        }
    }
    best
}

/// Point-in-convex-polygon test for a clockwise contour.
///
/// `p` is inside when it lies on the right of (or within `tolerance` of) every
/// directed edge.
pub fn convex_contains(vertices: &[Point], p: Point, tolerance: f32) -> bool {
    let n = vertices.len();
    if n < 3 {
        return false;
    }
    (0..n).all(|i| orient(vertices[i], vertices[(i + 1) % n], p) <= tolerance)
}

/// Left and right edge chains of a clockwise convex polygon, both top-down.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EdgeTable {
    pub left: Vec<Edge>,
    pub right: Vec<Edge>,
}

impl EdgeTable {
    /// Walks the contour once starting at `lowest`.
    ///
    /// An edge going up (`a.y < b.y`) belongs to the left chain and is
    /// prepended; any other edge belongs to the right chain and is appended.
    pub fn build(vertices: &[Point], lowest: usize) -> Self {
        let n = vertices.len();
        let mut table = Self::default();
        if n < 2 || lowest >= n {
            return table;
        }

        for k in 0..n {
            let a = vertices[(lowest + k) % n];
            let b = vertices[(lowest + k + 1) % n];
            let edge = Edge::new(a, b);
            if a.y < b.y {
                table.left.insert(0, edge);
            } else {
                table.right.push(edge);
            }
        }
        table
    }

    /// `(top, bottom)` of the polygon as seen by the left chain.
    pub fn y_extent(&self) -> Option<(f32, f32)> {
        let first = self.left.first()?;
        let last = self.left.last()?;
        Some((first.y_high(), last.y_low()))
    }

    /// Horizontal fill rows from the top of the polygon to its bottom.
    ///
    /// Rows are `delta` apart and ordered by strictly decreasing `y`; each one
    /// runs from the left chain to the right chain. Empty when either chain is
    /// empty or `delta` is not a positive finite number.
    pub fn rows(&self, delta: f32) -> Vec<LineSegment> {
        let Some((top, bottom)) = self.y_extent() else {
            return Vec::new();
        };
        if self.right.is_empty() || !(delta.is_finite() && delta > 0.0) || top < bottom {
            return Vec::new();
        }

        let count = ((top - bottom) / delta).floor() as usize;
        let mut rows = Vec::with_capacity(count + 1);
        let (mut li, mut ri) = (0usize, 0usize);

        for i in 0..=count {
            let y = (top - i as f32 * delta).max(bottom);
            li = advance(&self.left, li, y);
            ri = advance(&self.right, ri, y);
            let xl = self.left[li].x_at(y);
            let xr = self.right[ri].x_at(y);
            rows.push(LineSegment::new(Point::new(xl, y), Point::new(xr, y)));
        }
        rows
    }
}

/// Moves `cur` past edges that end above `y` and past flat edges, never
/// beyond the last edge of the chain.
fn advance(chain: &[Edge], mut cur: usize, y: f32) -> usize {
    while cur + 1 < chain.len() && (y < chain[cur].y_low() || chain[cur].is_flat()) {
        cur += 1;
    }
    cur
}
