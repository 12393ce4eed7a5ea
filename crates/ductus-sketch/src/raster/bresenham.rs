//! Integer-stepped line sampling.

use crate::geom::{LineSegment, Point};

/// Samples `seg` (pixel space) at unit steps along its major axis.
///
/// Steep segments (`|slope| >= 1`) are walked with x and y exchanged. The
/// sample at the far end is not emitted: a segment covering `k` columns
/// yields `k` points. A zero-length segment yields its start point.
///
/// Endpoints are expected on integer coordinates; fractional input walks the
/// same number of steps from the (unrounded) start.
pub fn rasterize(seg: LineSegment) -> Vec<Point> {
    let (mut start, mut end) = (seg.start, seg.end);
    if start == end {
        return vec![start];
    }

    let mut m = (end.y - start.y) / (end.x - start.x);
    let steep = m.abs() >= 1.0;
    if steep {
        start = start.transposed();
        end = end.transposed();
        m = 1.0 / m;
    }
    if start.x > end.x {
        std::mem::swap(&mut start, &mut end);
    }

    let step = if m >= 0.0 { 1.0 } else { -1.0 };
    let mut d = m - step / 2.0;
    let (mut x, mut y) = (start.x, start.y);

    let mut out = Vec::with_capacity((end.x - start.x).max(0.0) as usize + 1);
    while x < end.x {
        let p = Point::new(x, y);
        out.push(if steep { p.transposed() } else { p });
        if step * d >= 0.0 {
            y += step;
            d -= step;
        }
        d += m;
        x += 1.0;
    }
    out
}
