/// Surface texture acquired for one frame plus its encoder.
///
/// Must be submitted before the next frame is acquired.
pub struct GpuFrame {
    pub surface_texture: wgpu::SurfaceTexture,
    pub view: wgpu::TextureView,
    pub encoder: wgpu::CommandEncoder,
}
