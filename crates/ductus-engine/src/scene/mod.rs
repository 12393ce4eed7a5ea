//! Scene (draw stream) types.
//!
//! Responsibilities:
//! - store renderer-agnostic draw commands in NDC
//! - preserve recording order; it is the paint order
//! - keep primitive-specific helpers isolated per file under `scene::shapes`

mod cmd;
mod list;

pub mod shapes;

pub use cmd::DrawCmd;
pub use list::DrawList;
pub use shapes::{FanCmd, LineMode, LinesCmd, PointsCmd};
