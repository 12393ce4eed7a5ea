use crate::coords::Vec2;
use crate::paint::Color;
use crate::scene::{DrawCmd, DrawList};

/// Point cloud draw payload (one pixel per point).
#[derive(Debug, Clone, PartialEq)]
pub struct PointsCmd {
    pub points: Vec<Vec2>,
    pub color: Color,
}

impl DrawList {
    /// Records a set of single-pixel points.
    #[inline]
    pub fn push_points(&mut self, points: Vec<Vec2>, color: Color) {
        if points.is_empty() {
            return;
        }
        self.push(DrawCmd::Points(PointsCmd { points, color }));
    }
}
