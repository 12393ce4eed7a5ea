//! Points, segments and the orientation predicate.

pub use ductus_engine::coords::{Vec2, Viewport};

/// A position in normalized device space ([-1, 1] on both axes, +Y up).
pub type Point = Vec2;

/// Ordered pair of points. Mutable while a drag is in progress.
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct LineSegment {
    pub start: Point,
    pub end: Point,
}

impl LineSegment {
    #[inline]
    pub const fn new(start: Point, end: Point) -> Self {
        Self { start, end }
    }

    /// Zero-length segment at `p`.
    #[inline]
    pub const fn at(p: Point) -> Self {
        Self { start: p, end: p }
    }

    #[inline]
    pub fn is_degenerate(&self) -> bool {
        self.start == self.end
    }
}

/// Signed doubled area of the triangle `(a, b, c)`.
///
/// Equal to the determinant of the homogeneous rows `[a 1; b 1; c 1]`:
/// positive for a counterclockwise turn, negative for clockwise, zero when
/// collinear.
#[inline]
pub fn orient(a: Point, b: Point, c: Point) -> f32 {
    (b - a).perp_dot(c - a)
}

/// Signed doubled area of a closed contour (shoelace). Positive when CCW.
pub fn signed_area2(vertices: &[Point]) -> f32 {
    let n = vertices.len();
    (0..n)
        .map(|i| vertices[i].perp_dot(vertices[(i + 1) % n]))
        .sum()
}
