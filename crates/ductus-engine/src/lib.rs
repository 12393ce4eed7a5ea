//! Ductus engine crate.
//!
//! This crate owns the platform + GPU runtime pieces used by the sketch layer:
//! the winit window loop, input translation, the wgpu device and the
//! primitive renderer that consumes recorded draw lists.

pub mod device;
pub mod window;
pub mod input;
pub mod core;

pub mod logging;
pub mod coords;
pub mod render;
pub mod paint;
pub mod scene;
