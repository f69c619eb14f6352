use crate::{AddressMode, FilterMode, Sampler};

/// Named sampler configurations a host can bind alongside the image.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Preset {
    /// Clamp-to-edge, bilinear. What the image viewer binds.
    #[default]
    Viewer,
    Pixelated,
    Tiled,
    Mirrored,
}

impl Preset {
    pub const ALL: [Preset; 4] = [
        Preset::Viewer,
        Preset::Pixelated,
        Preset::Tiled,
        Preset::Mirrored,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Preset::Viewer => "Viewer",
            Preset::Pixelated => "Pixelated",
            Preset::Tiled => "Tiled",
            Preset::Mirrored => "Mirrored",
        }
    }

    pub fn sampler(self) -> Sampler {
        match self {
            Preset::Viewer => Sampler::new(AddressMode::ClampToEdge, FilterMode::Linear),
            Preset::Pixelated => Sampler::new(AddressMode::ClampToEdge, FilterMode::Nearest),
            Preset::Tiled => Sampler::new(AddressMode::Repeat, FilterMode::Linear),
            Preset::Mirrored => Sampler::new(AddressMode::MirrorRepeat, FilterMode::Linear),
        }
    }
}
