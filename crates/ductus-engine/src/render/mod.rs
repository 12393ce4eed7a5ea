//! GPU rendering subsystem.
//!
//! Renderers consume `scene` draw streams and issue GPU commands via wgpu.
//! Each renderer is responsible for its own GPU resources (pipelines, buffers).
//!
//! Convention:
//! - CPU geometry arrives in normalized device coordinates (+Y up).
//! - Shaders pass positions through unchanged.

mod ctx;
pub mod shapes;

pub use ctx::{RenderCtx, RenderTarget};
