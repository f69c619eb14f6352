use glam::{UVec2, Vec4};

use crate::Texture;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TextureError {
    #[error("texture dimensions must be non-zero, got {width}x{height}")]
    ZeroDimension { width: u32, height: u32 },
    #[error("expected {expected} values for the texture, got {actual}")]
    DataLength { expected: usize, actual: usize },
    #[error("region {size:?} at {origin:?} does not fit in a {bounds:?} texture")]
    RegionOutOfBounds {
        origin: UVec2,
        size: UVec2,
        bounds: UVec2,
    },
}

/// Row-major RGBA texture held in memory, texel `(0, 0)` at the top left.
#[derive(Debug, Clone, PartialEq)]
pub struct TexelBuffer {
    width: u32,
    height: u32,
    texels: Vec<Vec4>,
}

impl TexelBuffer {
    pub fn new(width: u32, height: u32, texels: Vec<Vec4>) -> Result<Self, TextureError> {
        let expected = texel_count(width, height)?;
        if texels.len() != expected {
            return Err(TextureError::DataLength {
                expected,
                actual: texels.len(),
            });
        }
        Ok(Self {
            width,
            height,
            texels,
        })
    }

    /// A texture with every texel set to `color`.
    pub fn filled(width: u32, height: u32, color: Vec4) -> Result<Self, TextureError> {
        let count = texel_count(width, height)?;
        Ok(Self {
            width,
            height,
            texels: vec![color; count],
        })
    }

    /// Build from tightly packed 8-bit RGBA, as decoded images are laid out.
    pub fn from_rgba8(width: u32, height: u32, bytes: &[u8]) -> Result<Self, TextureError> {
        let expected = texel_count(width, height)? * 4;
        if bytes.len() != expected {
            return Err(TextureError::DataLength {
                expected,
                actual: bytes.len(),
            });
        }
        let texels = bytes
            .chunks_exact(4)
            .map(|px| Vec4::new(px[0] as f32, px[1] as f32, px[2] as f32, px[3] as f32) / 255.0)
            .collect();
        Ok(Self {
            width,
            height,
            texels,
        })
    }

    /// Pack back into 8-bit RGBA, rounding and saturating each channel.
    pub fn to_rgba8(&self) -> Vec<u8> {
        self.texels.iter().flat_map(|&t| to_rgba8(t)).collect()
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn texels(&self) -> &[Vec4] {
        &self.texels
    }

    pub fn set_texel(&mut self, x: u32, y: u32, color: Vec4) {
        let idx = self.index(x, y);
        self.texels[idx] = color;
    }

    /// Copy `source` into this texture with its top-left corner at `origin`.
    ///
    /// This is how a viewer reuses one large texture for images of varying
    /// size: the image lands in a corner and the uniform block's
    /// `width`/`height` select that region at sample time.
    pub fn write_region(&mut self, origin: UVec2, source: &TexelBuffer) -> Result<(), TextureError> {
        let size = UVec2::new(source.width, source.height);
        let bounds = UVec2::new(self.width, self.height);
        let fits = |o: u32, s: u32, b: u32| o.checked_add(s).is_some_and(|end| end <= b);
        if !fits(origin.x, size.x, bounds.x) || !fits(origin.y, size.y, bounds.y) {
            return Err(TextureError::RegionOutOfBounds {
                origin,
                size,
                bounds,
            });
        }
        for row in 0..source.height {
            let src = (row * source.width) as usize;
            let dst = self.index(origin.x, origin.y + row);
            self.texels[dst..dst + source.width as usize]
                .copy_from_slice(&source.texels[src..src + source.width as usize]);
        }
        Ok(())
    }

    fn index(&self, x: u32, y: u32) -> usize {
        debug_assert!(x < self.width && y < self.height, "texel ({x}, {y}) out of range");
        y as usize * self.width as usize + x as usize
    }
}

impl Texture for TexelBuffer {
    fn dimensions(&self) -> UVec2 {
        UVec2::new(self.width, self.height)
    }

    fn texel(&self, x: u32, y: u32) -> Vec4 {
        self.texels[self.index(x, y)]
    }
}

/// Quantise a normalised colour to 8-bit RGBA.
pub fn to_rgba8(color: Vec4) -> [u8; 4] {
    let c = (color.clamp(Vec4::ZERO, Vec4::ONE) * 255.0).round();
    [c.x as u8, c.y as u8, c.z as u8, c.w as u8]
}

fn texel_count(width: u32, height: u32) -> Result<usize, TextureError> {
    if width == 0 || height == 0 {
        return Err(TextureError::ZeroDimension { width, height });
    }
    Ok(width as usize * height as usize)
}
