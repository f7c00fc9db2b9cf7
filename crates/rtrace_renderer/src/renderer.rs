//! Fork-join renderer.
//!
//! The scene is built and frozen first, then the pixel ranges are rendered
//! in parallel on a dedicated worker pool, and only after every worker has
//! finished are the results written into the image from this thread.

use std::num::NonZeroUsize;
use std::time::Instant;

use rayon::prelude::*;
use rtrace_core::Scene;
use rtrace_math::numerics::clamp_channel;
use rtrace_math::Color;
use thiserror::Error;

use crate::partition::{partition_pixels, render_range, RangeResult};
use crate::shading::shade;

/// Mirror bounces allowed per primary ray unless configured otherwise.
pub const DEFAULT_MAX_DEPTH: u32 = 6;

/// Render configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderConfig {
    /// Maximum number of mirror bounces per primary ray
    pub max_depth: u32,
    /// Worker count. `None` uses the available hardware parallelism.
    pub threads: Option<usize>,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
            threads: None,
        }
    }
}

impl RenderConfig {
    pub fn with_max_depth(mut self, max_depth: u32) -> Self {
        self.max_depth = max_depth;
        self
    }

    pub fn with_threads(mut self, threads: usize) -> Self {
        self.threads = Some(threads);
        self
    }

    /// Number of workers the render will use. Always at least one.
    pub fn worker_count(&self) -> usize {
        self.threads
            .unwrap_or_else(|| {
                std::thread::available_parallelism()
                    .map(NonZeroUsize::get)
                    .unwrap_or(1)
            })
            .max(1)
    }
}

/// Errors that can occur while rendering.
#[derive(Error, Debug)]
pub enum RenderError {
    #[error("Image has no pixels ({width}x{height})")]
    EmptyImage { width: u32, height: u32 },

    #[error("Failed to start render workers: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),
}

/// Row-major buffer of linear colors.
#[derive(Debug, Clone, PartialEq)]
pub struct ImageBuffer {
    pub width: u32,
    pub height: u32,
    pixels: Vec<Color>,
}

impl ImageBuffer {
    /// Create a new image buffer filled with black.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            pixels: vec![Color::ZERO; width as usize * height as usize],
        }
    }

    fn offset(&self, x: u32, y: u32) -> Option<usize> {
        (x < self.width && y < self.height).then(|| y as usize * self.width as usize + x as usize)
    }

    /// Get the pixel at (x, y), or `None` outside the image.
    pub fn get(&self, x: u32, y: u32) -> Option<Color> {
        self.offset(x, y).map(|i| self.pixels[i])
    }

    /// Set the pixel at (x, y). Out-of-bounds writes are ignored.
    pub fn set(&mut self, x: u32, y: u32, color: Color) {
        if let Some(i) = self.offset(x, y) {
            self.pixels[i] = color;
        }
    }

    pub fn pixels(&self) -> &[Color] {
        &self.pixels
    }

    /// Copy rendered ranges into the buffer at their flattened positions.
    pub fn write_ranges(&mut self, results: &[RangeResult]) {
        let width = self.width as usize;
        for result in results {
            for (p, color) in result.range.pixels().zip(&result.pixels) {
                self.set((p % width) as u32, (p / width) as u32, *color);
            }
        }
    }

    /// Convert to 8-bit RGB triplets, clamping each channel into [0, 255].
    pub fn to_rgb8(&self) -> Vec<u8> {
        self.pixels
            .iter()
            .flat_map(|c| c.to_array().map(clamp_channel))
            .collect()
    }
}

/// Render a single pixel.
pub fn render_pixel(scene: &Scene, x: u32, y: u32, config: &RenderConfig) -> Color {
    let ray = scene.camera.ray_to_pixel(x, y);
    shade(scene, &ray, config.max_depth)
}

/// Render the entire scene to an image buffer.
///
/// The pixel range is split into one contiguous range per worker. Workers only
/// read the scene; the image is assembled after all of them have returned.
pub fn render(scene: &Scene, config: &RenderConfig) -> Result<ImageBuffer, RenderError> {
    let width = scene.camera.image_width;
    let height = scene.camera.image_height;
    if width == 0 || height == 0 {
        return Err(RenderError::EmptyImage { width, height });
    }

    let workers = config.worker_count();
    let ranges = partition_pixels(scene.camera.pixel_count(), workers);
    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(workers)
        .thread_name(|i| format!("rtrace-worker-{i}"))
        .build()?;

    log::info!(
        "Rendering {}x{} with {} workers, max depth {}",
        width,
        height,
        workers,
        config.max_depth
    );
    let start = Instant::now();

    // collect() keeps range order regardless of which worker finishes first
    let results: Vec<RangeResult> = pool.install(|| {
        ranges
            .par_iter()
            .map(|range| RangeResult::new(*range, render_range(range, scene, config)))
            .collect()
    });

    log::info!(
        "Rendering is completed in {:.3} seconds",
        start.elapsed().as_secs_f64()
    );

    let mut image = ImageBuffer::new(width, height);
    image.write_ranges(&results);
    Ok(image)
}
