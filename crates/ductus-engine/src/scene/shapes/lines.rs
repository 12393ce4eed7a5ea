use crate::coords::Vec2;
use crate::paint::Color;
use crate::scene::{DrawCmd, DrawList};

/// How consecutive vertices of a [`LinesCmd`] are joined.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum LineMode {
    /// Independent segments: (v0, v1), (v2, v3), ...
    List,
    /// Open polyline through every vertex.
    Strip,
    /// Closed polyline; the last vertex connects back to the first.
    Loop,
}

/// Line draw payload.
#[derive(Debug, Clone, PartialEq)]
pub struct LinesCmd {
    pub vertices: Vec<Vec2>,
    pub mode: LineMode,
    pub color: Color,
}

impl LinesCmd {
    /// Expands the command into independent segments.
    ///
    /// A trailing unpaired vertex in `List` mode is dropped.
    pub fn segments(&self) -> Vec<(Vec2, Vec2)> {
        let v = &self.vertices;
        match self.mode {
            LineMode::List => v.chunks_exact(2).map(|p| (p[0], p[1])).collect(),
            LineMode::Strip => v.windows(2).map(|p| (p[0], p[1])).collect(),
            LineMode::Loop => {
                let mut out: Vec<_> = v.windows(2).map(|p| (p[0], p[1])).collect();
                if v.len() > 2 {
                    out.push((v[v.len() - 1], v[0]));
                }
                out
            }
        }
    }
}

impl DrawList {
    /// Records a line primitive.
    #[inline]
    pub fn push_lines(&mut self, vertices: Vec<Vec2>, mode: LineMode, color: Color) {
        if vertices.len() < 2 {
            return;
        }
        self.push(DrawCmd::Lines(LinesCmd { vertices, mode, color }));
    }

    /// Records independent segments given as pairs.
    pub fn push_segments(&mut self, segments: &[(Vec2, Vec2)], color: Color) {
        let vertices = segments.iter().flat_map(|&(a, b)| [a, b]).collect();
        self.push_lines(vertices, LineMode::List, color);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn v(x: f32, y: f32) -> Vec2 { Vec2::new(x, y) }

    fn cmd(mode: LineMode, n: usize) -> LinesCmd {
        LinesCmd {
            vertices: (0..n).map(|i| v(i as f32, 0.0)).collect(),
            mode,
            color: Color::WHITE,
        }
    }

    #[test]
    fn list_pairs_vertices() {
        assert_eq!(cmd(LineMode::List, 5).segments().len(), 2);
    }

    #[test]
    fn strip_joins_neighbours() {
        let s = cmd(LineMode::Strip, 3).segments();
        assert_eq!(s, vec![(v(0.0, 0.0), v(1.0, 0.0)), (v(1.0, 0.0), v(2.0, 0.0))]);
    }

    #[test]
    fn loop_closes_back_to_first() {
        let s = cmd(LineMode::Loop, 3).segments();
        assert_eq!(s.len(), 3);
        assert_eq!(s[2], (v(2.0, 0.0), v(0.0, 0.0)));
    }

    #[test]
    fn loop_of_two_is_a_single_segment() {
        assert_eq!(cmd(LineMode::Loop, 2).segments().len(), 1);
    }

    #[test]
    fn push_ignores_single_vertex() {
        let mut list = DrawList::new();
        list.push_lines(vec![v(0.0, 0.0)], LineMode::Strip, Color::WHITE);
        assert!(list.is_empty());
    }
}
