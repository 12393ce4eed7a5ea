//! Coordinate types shared by the engine and the sketch layer.
//!
//! Two spaces are in play:
//! - window space: logical pixels, origin top-left, +X right, +Y down
//! - normalized device space (NDC): [-1, 1] on both axes, +Y up
//!
//! Input arrives in window space; geometry lives in NDC. [`Viewport`] converts
//! between the two.

mod vec2;
mod viewport;

pub use vec2::Vec2;
pub use viewport::Viewport;
