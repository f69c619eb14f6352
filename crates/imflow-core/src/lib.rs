pub mod geometry;
pub mod presets;
pub mod sampler;
pub mod stages;
pub mod texture;
pub mod view;

use glam::{Mat4, UVec2, Vec2, Vec3, Vec4};

pub use sampler::{AddressMode, FilterMode, Sampler};
pub use texture::{TexelBuffer, TextureError};

// ---------------------------------------------------------------------------
// Vertex: one per mesh vertex, read-only to the kernel
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Vertex {
    pub position: Vec3,
    pub uv: Vec2,
}

impl Vertex {
    pub const fn new(position: Vec3, uv: Vec2) -> Self {
        Self { position, uv }
    }
}

// ---------------------------------------------------------------------------
// TransformUniform: the per-frame uniform block shared by both stages
// ---------------------------------------------------------------------------

/// Object-to-clip transform plus the logical output resolution.
///
/// `width`/`height` describe the *intended* output size, which is usually
/// not the native size of the bound texture. Both must be non-zero; the
/// stages do not check this, call [`TransformUniform::validate`] on the host
/// side before uploading.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TransformUniform {
    pub transform: Mat4,
    pub width: u32,
    pub height: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum UniformError {
    #[error("target resolution must be non-zero, got {width}x{height}")]
    ZeroTarget { width: u32, height: u32 },
}

impl TransformUniform {
    pub fn new(transform: Mat4, width: u32, height: u32) -> Self {
        Self {
            transform,
            width,
            height,
        }
    }

    /// Identity transform with the given target size.
    pub fn identity(width: u32, height: u32) -> Self {
        Self::new(Mat4::IDENTITY, width, height)
    }

    pub fn target_size(&self) -> Vec2 {
        Vec2::new(self.width as f32, self.height as f32)
    }

    pub fn validate(&self) -> Result<(), UniformError> {
        if self.width == 0 || self.height == 0 {
            return Err(UniformError::ZeroTarget {
                width: self.width,
                height: self.height,
            });
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Traits
// ---------------------------------------------------------------------------

/// A 2D image the fragment stage can query and sample.
///
/// `dimensions` is called on every fragment invocation, so implementations
/// that can change size (a host rebinding a different image) are always
/// observed at their current size.
pub trait Texture {
    /// Native size in texels. Never zero on either axis.
    fn dimensions(&self) -> UVec2;
    /// Linear RGBA of the texel at integer coordinates inside `dimensions`.
    fn texel(&self, x: u32, y: u32) -> Vec4;
}

impl<T: Texture + ?Sized> Texture for &T {
    fn dimensions(&self) -> UVec2 {
        (**self).dimensions()
    }

    fn texel(&self, x: u32, y: u32) -> Vec4 {
        (**self).texel(x, y)
    }
}

// ---------------------------------------------------------------------------
// Bindings: the read-only resources one draw call sees
// ---------------------------------------------------------------------------

/// Uniform block, texture and sampler as bound for a single draw.
pub struct Bindings<'a, T: ?Sized> {
    pub uniforms: &'a TransformUniform,
    pub texture: &'a T,
    pub sampler: &'a Sampler,
}

impl<'a, T: ?Sized> Bindings<'a, T> {
    pub fn new(uniforms: &'a TransformUniform, texture: &'a T, sampler: &'a Sampler) -> Self {
        Self {
            uniforms,
            texture,
            sampler,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validate_accepts_nonzero_target() {
        assert_eq!(TransformUniform::identity(1, 1).validate(), Ok(()));
    }

    #[test]
    fn validate_rejects_zero_width_or_height() {
        assert_eq!(
            TransformUniform::identity(0, 10).validate(),
            Err(UniformError::ZeroTarget { width: 0, height: 10 })
        );
        assert!(TransformUniform::identity(10, 0).validate().is_err());
    }

    #[test]
    fn target_size_is_float_pair() {
        assert_eq!(TransformUniform::identity(100, 50).target_size(), Vec2::new(100.0, 50.0));
    }

    #[test]
    fn bindings_construct_over_raw_texture_storage() {
        let raw: &[u8] = &[255, 0, 0, 255];
        let u = TransformUniform::identity(1, 1);
        let s = Sampler::default();
        let b = Bindings::new(&u, raw, &s);
        assert_eq!(b.texture.len(), 4);
        assert_eq!(b.uniforms.width, 1);
    }

    #[test]
    fn core_types_are_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<TransformUniform>();
        assert_send_sync::<Vertex>();
        assert_send_sync::<Sampler>();
        assert_send_sync::<TexelBuffer>();
    }
}
