//! rtrace renderer
//!
//! Whitted-style shading of a loaded [`Scene`](rtrace_core::Scene): Blinn-Phong
//! direct lighting with hard shadows, recursive mirror reflection, and a
//! fork-join driver that splits the image into one pixel range per worker.

pub mod export;
pub mod partition;
pub mod renderer;
pub mod shading;

pub use export::{save_image, write_ppm, ExportError};
pub use partition::{partition_pixels, render_range, PixelRange, RangeResult};
pub use renderer::{render, render_pixel, ImageBuffer, RenderConfig, RenderError, DEFAULT_MAX_DEPTH};
pub use shading::{reflect, shade};

/// Re-export the math types renderer callers need
pub use rtrace_math::{Color, Vec3};
