//! Shape renderers.

mod common;

pub mod primitive;

pub use primitive::PrimitiveRenderer;
