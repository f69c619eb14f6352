use imflow_core::{TransformUniform, Vertex};
use wgpu::{Adapter, Device, Instance, Queue};

use crate::GpuError;

pub struct GpuContext {
    pub instance: Instance,
    pub adapter: Adapter,
    pub device: Device,
    pub queue: Queue,
}

impl GpuContext {
    /// Create a headless GPU context (no surface). Used for offscreen
    /// rendering and testing; a windowed host creates its own device.
    pub async fn new_headless() -> Result<Self, GpuError> {
        let instance = Instance::new(&wgpu::InstanceDescriptor::default());

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::default(),
                compatible_surface: None,
                force_fallback_adapter: false,
            })
            .await
            .ok_or(GpuError::NoAdapter)?;

        log::info!("GPU adapter: {}", adapter.get_info().name);

        let (device, queue) = adapter
            .request_device(
                &wgpu::DeviceDescriptor {
                    label: Some("imflow-gpu device"),
                    required_features: wgpu::Features::empty(),
                    required_limits: wgpu::Limits::downlevel_defaults(),
                    memory_hints: Default::default(),
                },
                None,
            )
            .await?;

        Ok(Self {
            instance,
            adapter,
            device,
            queue,
        })
    }
}

/// The uniform block as laid out on the GPU.
/// Must match the `Transforms` struct in `image.wgsl`.
/// `repr(C)` + `bytemuck` ensures safe casting to `&[u8]`.
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct Transforms {
    pub transform: [f32; 16], // column-major 4x4
    pub width: u32,
    pub height: u32,
    pub _padding: [u32; 2], // uniform struct size rounds up to 16 bytes
}

impl From<&TransformUniform> for Transforms {
    fn from(u: &TransformUniform) -> Self {
        Self {
            transform: u.transform.to_cols_array(),
            width: u.width,
            height: u.height,
            _padding: [0; 2],
        }
    }
}

/// Per-vertex attributes: location 0 position, location 1 UV.
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct GpuVertex {
    pub position: [f32; 3],
    pub uv: [f32; 2],
}

impl GpuVertex {
    const ATTRIBUTES: [wgpu::VertexAttribute; 2] =
        wgpu::vertex_attr_array![0 => Float32x3, 1 => Float32x2];

    pub fn layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<GpuVertex>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &Self::ATTRIBUTES,
        }
    }
}

impl From<&Vertex> for GpuVertex {
    fn from(v: &Vertex) -> Self {
        Self {
            position: v.position.to_array(),
            uv: v.uv.to_array(),
        }
    }
}
