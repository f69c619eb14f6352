#[derive(Debug, thiserror::Error)]
pub enum GpuError {
    #[error("no suitable GPU adapter found")]
    NoAdapter,
    #[error("failed to create GPU device: {0}")]
    RequestDevice(#[from] wgpu::RequestDeviceError),
    #[error("failed to map readback buffer: {0}")]
    BufferMap(#[from] wgpu::BufferAsyncError),
    #[error("readback buffer was dropped before mapping finished")]
    ReadbackAborted,
}
