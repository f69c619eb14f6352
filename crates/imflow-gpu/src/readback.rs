//! Copy an RGBA8 render target back to the CPU.

use glam::UVec2;

use crate::{GpuContext, GpuError};

/// Row pitch for a `width`-texel RGBA8 copy, rounded up to
/// `COPY_BYTES_PER_ROW_ALIGNMENT`.
pub fn padded_bytes_per_row(width: u32) -> u32 {
    let align = wgpu::COPY_BYTES_PER_ROW_ALIGNMENT;
    (width * 4).div_ceil(align) * align
}

/// Drop the per-row padding of a mapped copy, keeping `width * 4` bytes of
/// every `padded`-byte row.
pub fn strip_row_padding(mapped: &[u8], width: u32, padded: u32) -> Vec<u8> {
    let unpadded = (width * 4) as usize;
    mapped
        .chunks_exact(padded as usize)
        .flat_map(|row| row[..unpadded].iter().copied())
        .collect()
}

/// Read `texture` (RGBA8, `COPY_SRC`) of the given `size` into tightly packed
/// bytes. Blocks until the GPU has finished the copy.
pub fn read_rgba8(ctx: &GpuContext, texture: &wgpu::Texture, size: UVec2) -> Result<Vec<u8>, GpuError> {
    let padded = padded_bytes_per_row(size.x);
    let buffer = ctx.device.create_buffer(&wgpu::BufferDescriptor {
        label: Some("readback"),
        size: padded as u64 * size.y as u64,
        usage: wgpu::BufferUsages::MAP_READ | wgpu::BufferUsages::COPY_DST,
        mapped_at_creation: false,
    });

    let mut encoder = ctx
        .device
        .create_command_encoder(&wgpu::CommandEncoderDescriptor { label: Some("readback_encoder") });
    encoder.copy_texture_to_buffer(
        wgpu::TexelCopyTextureInfo {
            texture,
            mip_level: 0,
            origin: wgpu::Origin3d::ZERO,
            aspect: wgpu::TextureAspect::All,
        },
        wgpu::TexelCopyBufferInfo {
            buffer: &buffer,
            layout: wgpu::TexelCopyBufferLayout {
                offset: 0,
                bytes_per_row: Some(padded),
                rows_per_image: Some(size.y),
            },
        },
        wgpu::Extent3d {
            width: size.x,
            height: size.y,
            depth_or_array_layers: 1,
        },
    );
    ctx.queue.submit(std::iter::once(encoder.finish()));

    let slice = buffer.slice(..);
    let (tx, rx) = std::sync::mpsc::channel();
    slice.map_async(wgpu::MapMode::Read, move |result| {
        let _ = tx.send(result);
    });
    let _ = ctx.device.poll(wgpu::Maintain::Wait);
    rx.recv().map_err(|_| GpuError::ReadbackAborted)??;

    let mapped = slice.get_mapped_range();
    let pixels = strip_row_padding(&mapped, size.x, padded);
    drop(mapped);
    buffer.unmap();
    Ok(pixels)
}
