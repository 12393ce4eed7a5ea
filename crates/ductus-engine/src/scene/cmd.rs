use crate::scene::shapes::{FanCmd, LinesCmd, PointsCmd};

/// Renderer-agnostic draw command stream.
///
/// Extending the scene:
/// - add a new primitive module under `scene::shapes::*`
/// - add a new variant here
/// - implement push helpers inside that module
/// - teach `render::shapes::primitive` how to tessellate it
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCmd {
    Points(PointsCmd),
    Lines(LinesCmd),
    Fan(FanCmd),
}

impl DrawCmd {
    /// Number of input vertices carried by the command.
    pub fn vertex_count(&self) -> usize {
        match self {
            DrawCmd::Points(c) => c.points.len(),
            DrawCmd::Lines(c) => c.vertices.len(),
            DrawCmd::Fan(c) => c.vertices.len(),
        }
    }
}
