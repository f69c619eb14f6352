//! The two per-invocation stages of the image kernel.
//!
//! Both are pure functions of their inputs and the read-only bindings, in
//! the same shape as `vs_main`/`fs_main` in the GPU crate's WGSL module.

use glam::{UVec2, Vec2, Vec4};

use crate::{Bindings, Texture, TransformUniform, Vertex};

/// Vertex stage output, interpolated by the rasterizer before the fragment
/// stage sees `uv`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VertexOutput {
    pub clip_position: Vec4,
    pub uv: Vec2,
}

/// `clip = transform * [position, 1]`, UV passed through untouched.
pub fn vertex_stage(uniforms: &TransformUniform, vertex: &Vertex) -> VertexOutput {
    VertexOutput {
        clip_position: uniforms.transform * vertex.position.extend(1.0),
        uv: vertex.uv,
    }
}

/// Per-axis ratio of the target resolution to the texture's native one.
///
/// A zero target size yields a zero scale; a zero native size is impossible
/// for a valid texture and would yield infinities.
pub fn resolution_scale(uniforms: &TransformUniform, native_size: UVec2) -> Vec2 {
    uniforms.target_size() / native_size.as_vec2()
}

/// Texture coordinate actually sampled for an interpolated `uv`.
pub fn sample_coord(uniforms: &TransformUniform, native_size: UVec2, uv: Vec2) -> Vec2 {
    uv * resolution_scale(uniforms, native_size)
}

/// Sample the bound texture at the resolution-corrected coordinate.
///
/// Native dimensions are queried from the texture on every call.
pub fn fragment_stage<T: Texture + ?Sized>(bindings: &Bindings<'_, T>, uv: Vec2) -> Vec4 {
    let native_size = bindings.texture.dimensions();
    let coord = sample_coord(bindings.uniforms, native_size, uv);
    bindings.sampler.sample_sized(bindings.texture, native_size, coord)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
