//! Paint model shared between the sketch layer and renderers.
//!
//! Only solid colors exist; every primitive is tinted by one color.

pub mod color;

pub use color::Color;
