//! Hittable trait and HitRecord for ray-object intersection.

use rtrace_math::{Aabb, Interval, Ray, Vec3};

/// Record of a ray-object intersection.
///
/// Scratch output of a single query. Callers create one, pass it into
/// [`Hittable::hit`], and read it only when the call returned `true`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HitRecord<'a> {
    /// Parameter t where the intersection occurs
    pub t: f64,
    /// Geometric normal of the hit triangle. Not unit length; normalize before use.
    pub normal: Vec3,
    /// Id of the material assigned to the hit surface
    pub material_id: &'a str,
}

impl<'a> Default for HitRecord<'a> {
    fn default() -> Self {
        Self {
            t: f64::INFINITY,
            normal: Vec3::ZERO,
            material_id: "",
        }
    }
}

/// Trait for objects that can be hit by rays.
pub trait Hittable: Send + Sync {
    /// Test if a ray hits this object strictly inside `ray_t`.
    ///
    /// Returns true if hit, and fills in the hit record with the closest hit.
    /// The record is left untouched on a miss.
    fn hit<'a>(&'a self, ray: &Ray, ray_t: Interval, rec: &mut HitRecord<'a>) -> bool;

    /// Get the axis-aligned bounding box of this object.
    fn bounding_box(&self) -> Aabb;

    /// Number of triangles, for scene statistics.
    fn primitive_count(&self) -> usize {
        1
    }

    /// Material id used by this object, if it has a single one.
    fn material_id(&self) -> Option<&str> {
        None
    }
}
