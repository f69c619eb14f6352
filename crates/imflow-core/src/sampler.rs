use glam::{IVec2, UVec2, Vec2, Vec4};

use crate::Texture;

// ---------------------------------------------------------------------------
// Addressing / filtering modes
// ---------------------------------------------------------------------------

/// How a texel index outside `[0, size)` is brought back into range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AddressMode {
    #[default]
    ClampToEdge,
    Repeat,
    MirrorRepeat,
}

impl AddressMode {
    /// Map an integer texel index onto `[0, size)`.
    ///
    /// Valid for every `u32` size; the arithmetic runs in `i64` so the
    /// mirror period `2 * size` cannot overflow.
    pub fn resolve(self, index: i32, size: u32) -> u32 {
        let n = i64::from(size.max(1));
        let index = i64::from(index);
        let resolved = match self {
            AddressMode::ClampToEdge => index.clamp(0, n - 1),
            AddressMode::Repeat => index.rem_euclid(n),
            AddressMode::MirrorRepeat => {
                let period = n * 2;
                let m = index.rem_euclid(period);
                if m < n {
                    m
                } else {
                    period - 1 - m
                }
            }
        };
        resolved as u32
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FilterMode {
    Nearest,
    #[default]
    Linear,
}

// ---------------------------------------------------------------------------
// Sampler
// ---------------------------------------------------------------------------

/// Filtering and addressing applied to a normalised texture coordinate.
///
/// Single mip level only: the same filter is used for magnification and
/// minification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Sampler {
    pub address_mode_u: AddressMode,
    pub address_mode_v: AddressMode,
    pub filter: FilterMode,
}

impl Sampler {
    pub const fn new(address_mode: AddressMode, filter: FilterMode) -> Self {
        Self {
            address_mode_u: address_mode,
            address_mode_v: address_mode,
            filter,
        }
    }

    /// Sample `texture` at the normalised coordinate `coord`.
    ///
    /// `coord` is not clamped: values outside `[0, 1]` are resolved per axis
    /// by the address modes.
    pub fn sample<T: Texture + ?Sized>(&self, texture: &T, coord: Vec2) -> Vec4 {
        self.sample_sized(texture, texture.dimensions(), coord)
    }

    /// Like [`Sampler::sample`] with the texture's dimensions already queried
    /// by the caller.
    pub fn sample_sized<T: Texture + ?Sized>(&self, texture: &T, size: UVec2, coord: Vec2) -> Vec4 {
        let texel_space = coord * size.as_vec2();
        match self.filter {
            FilterMode::Nearest => self.fetch(texture, size, texel_space.floor().as_ivec2()),
            FilterMode::Linear => {
                let centered = texel_space - Vec2::splat(0.5);
                let base = centered.floor();
                let t = centered - base;
                let i0 = base.as_ivec2();

                let c00 = self.fetch(texture, size, i0);
                // i0 saturates for huge coordinates; neighbours must not overflow
                let c10 = self.fetch(texture, size, i0.saturating_add(IVec2::X));
                let c01 = self.fetch(texture, size, i0.saturating_add(IVec2::Y));
                let c11 = self.fetch(texture, size, i0.saturating_add(IVec2::ONE));

                let top = c00.lerp(c10, t.x);
                let bottom = c01.lerp(c11, t.x);
                top.lerp(bottom, t.y)
            }
        }
    }

    fn fetch<T: Texture + ?Sized>(&self, texture: &T, size: UVec2, index: IVec2) -> Vec4 {
        let x = self.address_mode_u.resolve(index.x, size.x);
        let y = self.address_mode_v.resolve(index.y, size.y);
        texture.texel(x, y)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
