//! Math primitives for rtrace.
//!
//! Double precision throughout: the shading offsets (1e-7) and the
//! triangle determinant threshold (1e-6) are below what `f32` resolves
//! for scene-scale coordinates.

// Re-export glam's f64 vector under the names the rest of the workspace uses
pub use glam::DVec3 as Vec3;
pub use glam::DMat3 as Mat3;

/// A position in world space.
pub type Point3 = Vec3;

/// Linear RGB color. Channels are unbounded; clamping happens on export.
pub type Color = Vec3;

mod aabb;
mod interval;
pub mod numerics;
mod ray;

pub use aabb::Aabb;
pub use interval::Interval;
pub use ray::Ray;
