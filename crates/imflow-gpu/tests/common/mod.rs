//! Offscreen host for the image pass: uploads a texture, draws the quad into
//! an RGBA8 target and reads it back. Everything here is host-side setup the
//! kernel itself never does.

use glam::{UVec2, Vec2};
use imflow_core::stages::fragment_stage;
use imflow_core::texture::to_rgba8;
use imflow_core::{Bindings, Sampler, TexelBuffer, TransformUniform};
use imflow_gpu::readback::read_rgba8;
use imflow_gpu::sampler::create_sampler;
use imflow_gpu::{GpuContext, ImagePass};

pub const FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Rgba8Unorm;

/// Set to make a missing adapter fail the test instead of skipping it.
pub const REQUIRE_GPU_VAR: &str = "IMFLOW_REQUIRE_GPU";

/// `None` when the machine has no usable adapter; callers skip the test.
/// The skip is printed to stderr so it shows up without `RUST_LOG`.
pub fn context() -> Option<GpuContext> {
    let _ = env_logger::builder().is_test(true).try_init();
    match pollster::block_on(GpuContext::new_headless()) {
        Ok(ctx) => Some(ctx),
        Err(e) if std::env::var_os(REQUIRE_GPU_VAR).is_some() => {
            panic!("{REQUIRE_GPU_VAR} is set but no GPU is available: {e}")
        }
        Err(e) => {
            log::warn!("skipping GPU test: {e}");
            eprintln!("SKIPPED: no GPU available ({e}); set {REQUIRE_GPU_VAR}=1 to fail instead");
            None
        }
    }
}

/// Texture whose texels are all different, so any addressing mistake shows.
pub fn pattern(width: u32, height: u32) -> TexelBuffer {
    let bytes: Vec<u8> = (0..height)
        .flat_map(|y| {
            (0..width).flat_map(move |x| [(x * 30 + 7) as u8, (y * 30 + 11) as u8, ((x + y) * 17) as u8, 255])
        })
        .collect();
    TexelBuffer::from_rgba8(width, height, &bytes).unwrap()
}

pub fn upload(ctx: &GpuContext, image: &TexelBuffer) -> wgpu::Texture {
    let size = wgpu::Extent3d {
        width: image.width(),
        height: image.height(),
        depth_or_array_layers: 1,
    };
    let texture = ctx.device.create_texture(&wgpu::TextureDescriptor {
        label: Some("test_image"),
        size,
        mip_level_count: 1,
        sample_count: 1,
        dimension: wgpu::TextureDimension::D2,
        format: FORMAT,
        usage: wgpu::TextureUsages::TEXTURE_BINDING | wgpu::TextureUsages::COPY_DST,
        view_formats: &[],
    });
    ctx.queue.write_texture(
        wgpu::TexelCopyTextureInfo {
            texture: &texture,
            mip_level: 0,
            origin: wgpu::Origin3d::ZERO,
            aspect: wgpu::TextureAspect::All,
        },
        &image.to_rgba8(),
        wgpu::TexelCopyBufferLayout {
            offset: 0,
            bytes_per_row: Some(4 * image.width()),
            rows_per_image: Some(image.height()),
        },
        size,
    );
    texture
}

/// Draw `image` with `uniforms`/`sampler` into a `target`-sized RGBA8
/// texture and return its tightly packed pixels.
pub fn render(
    ctx: &GpuContext,
    pass: &ImagePass,
    image: &wgpu::Texture,
    uniforms: &TransformUniform,
    sampler: &Sampler,
    target: UVec2,
) -> Vec<u8> {
    let extent = wgpu::Extent3d {
        width: target.x,
        height: target.y,
        depth_or_array_layers: 1,
    };
    let output = ctx.device.create_texture(&wgpu::TextureDescriptor {
        label: Some("test_target"),
        size: extent,
        mip_level_count: 1,
        sample_count: 1,
        dimension: wgpu::TextureDimension::D2,
        format: FORMAT,
        usage: wgpu::TextureUsages::RENDER_ATTACHMENT | wgpu::TextureUsages::COPY_SRC,
        view_formats: &[],
    });
    let output_view = output.create_view(&Default::default());
    let image_view = image.create_view(&Default::default());
    let gpu_sampler = create_sampler(&ctx.device, sampler);

    pass.write_uniforms(&ctx.queue, uniforms);
    let bind_group = pass.bind_group(&ctx.device, &image_view, &gpu_sampler);

    let mut encoder = ctx
        .device
        .create_command_encoder(&wgpu::CommandEncoderDescriptor { label: Some("test_encoder") });
    pass.draw(&mut encoder, &output_view, &bind_group, Some(wgpu::Color::BLACK));
    ctx.queue.submit(std::iter::once(encoder.finish()));

    read_rgba8(ctx, &output, target).unwrap()
}

/// CPU kernel evaluated at every pixel center of a full-screen quad.
pub fn reference(image: &TexelBuffer, uniforms: &TransformUniform, sampler: &Sampler, target: UVec2) -> Vec<u8> {
    let bindings = Bindings::new(uniforms, image, sampler);
    (0..target.y)
        .flat_map(|y| (0..target.x).map(move |x| (x, y)))
        .flat_map(|(x, y)| {
            let uv = (Vec2::new(x as f32, y as f32) + 0.5) / target.as_vec2();
            to_rgba8(fragment_stage(&bindings, uv))
        })
        .collect()
}

/// Largest per-channel difference between two RGBA8 buffers.
pub fn max_diff(a: &[u8], b: &[u8]) -> u8 {
    assert_eq!(a.len(), b.len(), "buffer sizes differ");
    a.iter().zip(b).map(|(x, y)| x.abs_diff(*y)).max().unwrap_or(0)
}
