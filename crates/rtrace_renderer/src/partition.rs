//! Static partitioning of the image into per-worker pixel ranges.
//!
//! Pixels are numbered row-major: index `p` is column `p % width`, row
//! `p / width`. Each worker gets one contiguous range and renders it on its
//! own; results are stitched back together in range order after all workers
//! finish, so the image does not depend on scheduling.

use std::ops::Range;

use rtrace_core::Scene;
use rtrace_math::Color;

use crate::renderer::{render_pixel, RenderConfig};

/// A contiguous run of flattened pixel indices.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PixelRange {
    /// First pixel index
    pub start: usize,
    /// Number of pixels
    pub len: usize,
    /// Position of this range in the partition
    pub index: usize,
}

impl PixelRange {
    pub fn new(start: usize, len: usize, index: usize) -> Self {
        Self { start, len, index }
    }

    /// One past the last pixel index.
    pub fn end(&self) -> usize {
        self.start + self.len
    }

    pub fn pixels(&self) -> Range<usize> {
        self.start..self.end()
    }
}

/// Split `total` pixels into `workers` contiguous ranges.
///
/// Every range gets `total / workers` pixels and the last one also takes the
/// remainder. A worker count of zero is treated as one.
pub fn partition_pixels(total: usize, workers: usize) -> Vec<PixelRange> {
    let workers = workers.max(1);
    let per_worker = total / workers;
    let leftover = total % workers;

    (0..workers)
        .map(|index| {
            let len = if index == workers - 1 {
                per_worker + leftover
            } else {
                per_worker
            };
            PixelRange::new(index * per_worker, len, index)
        })
        .collect()
}

/// Render every pixel of a range, in index order.
pub fn render_range(range: &PixelRange, scene: &Scene, config: &RenderConfig) -> Vec<Color> {
    log::debug!("Calculating pixels [{}, {})...", range.start, range.end());

    let width = scene.camera.image_width as usize;
    let pixels: Vec<Color> = range
        .pixels()
        .map(|p| render_pixel(scene, (p % width) as u32, (p / width) as u32, config))
        .collect();

    log::debug!("Pixels [{}, {}) are calculated", range.start, range.end());
    pixels
}

/// Result of rendering a range.
#[derive(Debug, Clone)]
pub struct RangeResult {
    /// The range that was rendered
    pub range: PixelRange,
    /// Pixel colors in index order
    pub pixels: Vec<Color>,
}

impl RangeResult {
    pub fn new(range: PixelRange, pixels: Vec<Color>) -> Self {
        Self { range, pixels }
    }
}
