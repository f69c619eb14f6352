pub mod context;
pub mod error;
pub mod image_pipeline;
pub mod readback;
pub mod sampler;
pub mod shader;

pub use context::{GpuContext, GpuVertex, Transforms};
pub use error::GpuError;
pub use image_pipeline::{ImagePass, ImagePipeline};
