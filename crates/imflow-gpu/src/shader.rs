/// Vertex + fragment kernel. `fs_main` rescales the interpolated UV by
/// `(width, height) / textureDimensions(t_image)` before sampling.
pub const IMAGE_WGSL: &str = include_str!("../shaders/image.wgsl");

pub const VERTEX_ENTRY: &str = "vs_main";
pub const FRAGMENT_ENTRY: &str = "fs_main";

// Group 0 binding slots, must match `image.wgsl`.
pub const TEXTURE_BINDING: u32 = 0;
pub const SAMPLER_BINDING: u32 = 1;
pub const TRANSFORMS_BINDING: u32 = 2;
