use glam::{Mat4, UVec2, Vec2, Vec4};

use crate::TransformUniform;

/// User zoom is raised to this power before it reaches the matrix, so the
/// wheel feels even across the whole range.
pub const ZOOM_EXPONENT: f32 = 3.0;
pub const MIN_ZOOM: f32 = 1.0;
pub const MAX_ZOOM: f32 = 20.0;

// ---------------------------------------------------------------------------
// Aspect fit (pure, testable)
// ---------------------------------------------------------------------------

/// Per-axis scale that letterboxes an image of size `image` into a viewport
/// of size `viewport` while keeping the image's aspect ratio.
///
/// Exactly one component is `1.0`; the other shrinks the axis with spare room.
pub fn aspect_fit(image: UVec2, viewport: UVec2) -> Vec2 {
    let image_aspect = image.x as f32 / image.y as f32;
    let viewport_aspect = viewport.x as f32 / viewport.y as f32;
    if viewport_aspect > image_aspect {
        Vec2::new(image_aspect / viewport_aspect, 1.0)
    } else {
        Vec2::new(1.0, viewport_aspect / image_aspect)
    }
}

// ---------------------------------------------------------------------------
// ViewState
// ---------------------------------------------------------------------------

/// Pan and zoom of the displayed image, in clip-space units.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewState {
    pub pan_x: f32,
    pub pan_y: f32,
    pub zoom: f32,
}

impl Default for ViewState {
    fn default() -> Self {
        Self {
            pan_x: 0.0,
            pan_y: 0.0,
            zoom: MIN_ZOOM,
        }
    }
}

impl ViewState {
    /// Apply a relative zoom and pan. Zoom is clamped to
    /// \[[`MIN_ZOOM`], [`MAX_ZOOM`]\]; pan is unbounded.
    pub fn pan_zoom(&mut self, zoom_delta: f32, pan_x: f32, pan_y: f32) {
        self.zoom = (self.zoom + zoom_delta).clamp(MIN_ZOOM, MAX_ZOOM);
        self.pan_x += pan_x;
        self.pan_y += pan_y;
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Column-major object-to-clip matrix: scale by `zoom^3 * fit`, then
    /// translate by the pan offset.
    pub fn matrix(&self, fit: Vec2) -> Mat4 {
        let zoom = self.zoom.powf(ZOOM_EXPONENT);
        Mat4::from_cols(
            Vec4::new(zoom * fit.x, 0.0, 0.0, 0.0),
            Vec4::new(0.0, zoom * fit.y, 0.0, 0.0),
            Vec4::new(0.0, 0.0, 1.0, 0.0),
            Vec4::new(self.pan_x, self.pan_y, 0.0, 1.0),
        )
    }

    /// Uniform block for drawing an `image`-sized picture into `viewport`.
    ///
    /// The target resolution is the image's own size, so a texture larger
    /// than the image (the image uploaded into its top-left corner) is only
    /// addressed over the image region.
    pub fn uniform(&self, image: UVec2, viewport: UVec2) -> TransformUniform {
        TransformUniform::new(self.matrix(aspect_fit(image, viewport)), image.x, image.y)
    }
}
