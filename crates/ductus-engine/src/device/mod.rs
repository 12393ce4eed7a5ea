//! wgpu device and window surface.
//!
//! [`Gpu`] is created once per window; [`GpuFrame`]s are acquired from it for
//! every redraw and handed back through [`Gpu::submit`].

mod error;
mod frame;
mod gpu;
mod init;

pub use error::SurfaceErrorAction;
pub use frame::GpuFrame;
pub use gpu::Gpu;
pub use init::GpuInit;
