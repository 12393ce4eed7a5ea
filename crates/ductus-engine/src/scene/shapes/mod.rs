pub(crate) mod fan;
pub(crate) mod lines;
pub(crate) mod points;

pub use fan::FanCmd;
pub use lines::{LineMode, LinesCmd};
pub use points::PointsCmd;
