use crate::coords::Vec2;
use crate::paint::Color;
use crate::scene::{DrawCmd, DrawList};

/// Filled triangle fan anchored at `vertices[0]`.
#[derive(Debug, Clone, PartialEq)]
pub struct FanCmd {
    pub vertices: Vec<Vec2>,
    pub color: Color,
}

impl FanCmd {
    /// Expands the fan into a triangle list.
    pub fn triangles(&self) -> Vec<[Vec2; 3]> {
        let v = &self.vertices;
        if v.len() < 3 {
            return Vec::new();
        }
        (1..v.len() - 1).map(|i| [v[0], v[i], v[i + 1]]).collect()
    }
}

impl DrawList {
    /// Records a filled triangle fan. Fewer than 3 vertices records nothing.
    #[inline]
    pub fn push_fan(&mut self, vertices: Vec<Vec2>, color: Color) {
        if vertices.len() < 3 {
            return;
        }
        self.push(DrawCmd::Fan(FanCmd { vertices, color }));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quad_fans_into_two_triangles() {
        let fan = FanCmd {
            vertices: vec![
                Vec2::new(0.0, 0.0),
                Vec2::new(1.0, 0.0),
                Vec2::new(1.0, 1.0),
                Vec2::new(0.0, 1.0),
            ],
            color: Color::WHITE,
        };
        let tris = fan.triangles();
        assert_eq!(tris.len(), 2);
        assert_eq!(tris[1], [Vec2::new(0.0, 0.0), Vec2::new(1.0, 1.0), Vec2::new(0.0, 1.0)]);
    }
}
