use imflow_core::geometry::{QUAD_INDICES, QUAD_VERTICES};
use imflow_core::TransformUniform;
use wgpu::util::DeviceExt;
use wgpu::{BindGroup, BindGroupLayout, Buffer, Device, Queue, RenderPipeline, TextureView};

use crate::context::{GpuVertex, Transforms};
use crate::shader::{
    FRAGMENT_ENTRY, IMAGE_WGSL, SAMPLER_BINDING, TEXTURE_BINDING, TRANSFORMS_BINDING,
    VERTEX_ENTRY,
};

/// Render pipeline for `image.wgsl` plus the bind group layout describing
/// its binding contract. Independent of any particular texture or target
/// size; rebuilt only when the target format changes.
pub struct ImagePipeline {
    pub pipeline: RenderPipeline,
    pub bind_group_layout: BindGroupLayout,
    pub target_format: wgpu::TextureFormat,
}

impl ImagePipeline {
    pub fn new(device: &Device, target_format: wgpu::TextureFormat) -> Self {
        // --- bind group layout -------------------------------------------------
        // binding 0 : filterable 2D float texture      (fragment)
        // binding 1 : filtering sampler                (fragment)
        // binding 2 : Transforms uniform buffer        (vertex + fragment)
        let bind_group_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("image_bgl"),
            entries: &[
                wgpu::BindGroupLayoutEntry {
                    binding: TEXTURE_BINDING,
                    visibility: wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Texture {
                        sample_type: wgpu::TextureSampleType::Float { filterable: true },
                        view_dimension: wgpu::TextureViewDimension::D2,
                        multisampled: false,
                    },
                    count: None,
                },
                wgpu::BindGroupLayoutEntry {
                    binding: SAMPLER_BINDING,
                    visibility: wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Sampler(wgpu::SamplerBindingType::Filtering),
                    count: None,
                },
                wgpu::BindGroupLayoutEntry {
                    binding: TRANSFORMS_BINDING,
                    visibility: wgpu::ShaderStages::VERTEX_FRAGMENT,
                    ty: wgpu::BindingType::Buffer {
                        ty: wgpu::BufferBindingType::Uniform,
                        has_dynamic_offset: false,
                        min_binding_size: wgpu::BufferSize::new(
                            std::mem::size_of::<Transforms>() as u64,
                        ),
                    },
                    count: None,
                },
            ],
        });

        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("image_pl"),
            bind_group_layouts: &[&bind_group_layout],
            push_constant_ranges: &[],
        });

        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("image"),
            source: wgpu::ShaderSource::Wgsl(IMAGE_WGSL.into()),
        });

        let pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("image_pipeline"),
            layout: Some(&pipeline_layout),
            vertex: wgpu::VertexState {
                module: &shader,
                entry_point: Some(VERTEX_ENTRY),
                buffers: &[GpuVertex::layout()],
                compilation_options: Default::default(),
            },
            fragment: Some(wgpu::FragmentState {
                module: &shader,
                entry_point: Some(FRAGMENT_ENTRY),
                targets: &[Some(wgpu::ColorTargetState {
                    format: target_format,
                    blend: Some(wgpu::BlendState::REPLACE),
                    write_mask: wgpu::ColorWrites::ALL,
                })],
                compilation_options: Default::default(),
            }),
            primitive: wgpu::PrimitiveState {
                topology: wgpu::PrimitiveTopology::TriangleList,
                ..Default::default()
            },
            depth_stencil: None,
            multisample: wgpu::MultisampleState::default(),
            multiview: None,
            cache: None,
        });

        log::debug!("Image pipeline built for {:?}", target_format);

        Self {
            pipeline,
            bind_group_layout,
            target_format,
        }
    }
}

/// The pipeline together with the small buffers every draw needs: the
/// uniform block and the unit quad.
pub struct ImagePass {
    pub pipeline: ImagePipeline,
    uniform_buf: Buffer,
    vertex_buf: Buffer,
    index_buf: Buffer,
}

impl ImagePass {
    pub fn new(device: &Device, target_format: wgpu::TextureFormat) -> Self {
        let pipeline = ImagePipeline::new(device, target_format);

        let uniform_buf = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("image_transforms"),
            size: std::mem::size_of::<Transforms>() as u64,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        let vertices: Vec<GpuVertex> = QUAD_VERTICES.iter().map(GpuVertex::from).collect();
        let vertex_buf = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("image_quad_vertices"),
            contents: bytemuck::cast_slice(&vertices),
            usage: wgpu::BufferUsages::VERTEX,
        });
        let index_buf = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("image_quad_indices"),
            contents: bytemuck::cast_slice(&QUAD_INDICES),
            usage: wgpu::BufferUsages::INDEX,
        });

        Self {
            pipeline,
            uniform_buf,
            vertex_buf,
            index_buf,
        }
    }

    /// Upload the frame's uniform block. Ordered before any draw submitted
    /// afterwards on `queue`.
    pub fn write_uniforms(&self, queue: &Queue, uniforms: &TransformUniform) {
        if let Err(e) = uniforms.validate() {
            log::warn!("uploading degenerate uniforms: {e}");
        }
        queue.write_buffer(&self.uniform_buf, 0, bytemuck::bytes_of(&Transforms::from(uniforms)));
    }

    /// Bind a texture view and sampler with this pass's uniform buffer.
    /// Rebuild whenever the host swaps the texture.
    pub fn bind_group(
        &self,
        device: &Device,
        texture_view: &TextureView,
        sampler: &wgpu::Sampler,
    ) -> BindGroup {
        device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("image_bg"),
            layout: &self.pipeline.bind_group_layout,
            entries: &[
                wgpu::BindGroupEntry {
                    binding: TEXTURE_BINDING,
                    resource: wgpu::BindingResource::TextureView(texture_view),
                },
                wgpu::BindGroupEntry {
                    binding: SAMPLER_BINDING,
                    resource: wgpu::BindingResource::Sampler(sampler),
                },
                wgpu::BindGroupEntry {
                    binding: TRANSFORMS_BINDING,
                    resource: self.uniform_buf.as_entire_binding(),
                },
            ],
        })
    }

    /// Record the quad draw into `encoder`. `clear` selects between clearing
    /// the target first and drawing over its current contents.
    pub fn draw(
        &self,
        encoder: &mut wgpu::CommandEncoder,
        target: &TextureView,
        bind_group: &BindGroup,
        clear: Option<wgpu::Color>,
    ) {
        let load = match clear {
            Some(color) => wgpu::LoadOp::Clear(color),
            None => wgpu::LoadOp::Load,
        };
        let mut rpass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
            label: Some("image_pass"),
            color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                view: target,
                resolve_target: None,
                ops: wgpu::Operations {
                    load,
                    store: wgpu::StoreOp::Store,
                },
            })],
            depth_stencil_attachment: None,
            timestamp_writes: None,
            occlusion_query_set: None,
        });
        rpass.set_pipeline(&self.pipeline.pipeline);
        rpass.set_bind_group(0, bind_group, &[]);
        rpass.set_vertex_buffer(0, self.vertex_buf.slice(..));
        rpass.set_index_buffer(self.index_buf.slice(..), wgpu::IndexFormat::Uint16);
        rpass.draw_indexed(0..QUAD_INDICES.len() as u32, 0, 0..1);
    }
}
