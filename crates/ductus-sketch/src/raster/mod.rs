//! Pure rasterization algorithms.
//!
//! Nothing here touches the GPU: inputs are points, outputs are points or
//! segments ready to be recorded into a draw list.

pub mod bresenham;
pub mod scanline;

pub use bresenham::rasterize;
pub use scanline::{convex_contains, is_clockwise, lowest_vertex, Edge, EdgeTable};
