//! Triangle meshes over a shared vertex arena.
//!
//! All meshes of a scene index into one [`VertexArena`]. The arena is frozen
//! before any mesh is built and shared by reference count, so a mesh never
//! owns a copy of the vertex data and can never observe it changing.

use std::ops::Index;
use std::sync::Arc;

use rtrace_math::numerics::{determinant, DETERMINANT_EPSILON};
use rtrace_math::{Aabb, Interval, Point3, Ray};
use thiserror::Error;

use crate::hittable::{HitRecord, Hittable};

/// Margin added around every mesh bounding box. The triangle test accepts
/// hits exactly on edges and vertices, which the slab test would otherwise
/// reject when they lie on the box boundary.
const BOUNDS_MARGIN: f64 = 0.0001;

/// Errors raised while building a mesh from a face list.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum MeshError {
    #[error("face list has {0} indices, which is not a multiple of 3")]
    IncompleteTriangle(usize),

    #[error("vertex index {index} is out of range (vertex count {vertex_count}, indices are 1-based)")]
    IndexOutOfRange { index: usize, vertex_count: usize },

    #[error("mesh has no triangles")]
    Empty,
}

/// Immutable, shared vertex storage for a scene.
#[derive(Clone, Debug)]
pub struct VertexArena {
    positions: Arc<[Point3]>,
}

impl VertexArena {
    /// Freeze a vertex list. No vertex can be added or moved afterwards.
    pub fn new(positions: Vec<Point3>) -> Self {
        Self {
            positions: positions.into(),
        }
    }

    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }
}

impl Default for VertexArena {
    fn default() -> Self {
        Self::new(Vec::new())
    }
}

impl Index<usize> for VertexArena {
    type Output = Point3;

    #[inline]
    fn index(&self, index: usize) -> &Point3 {
        &self.positions[index]
    }
}

/// A triangle mesh with a single material.
#[derive(Clone, Debug)]
pub struct Mesh {
    vertices: VertexArena,
    /// Zero-based vertex indices, one triple per triangle
    triangles: Vec<[usize; 3]>,
    material_id: String,
    bounds: Aabb,
}

impl Mesh {
    /// Build a mesh from a flat list of 1-based vertex indices.
    ///
    /// Every index must refer to a vertex in `vertices`.
    pub fn new(
        vertices: &VertexArena,
        faces: &[usize],
        material_id: impl Into<String>,
    ) -> Result<Self, MeshError> {
        if faces.is_empty() {
            return Err(MeshError::Empty);
        }
        if faces.len() % 3 != 0 {
            return Err(MeshError::IncompleteTriangle(faces.len()));
        }

        let vertex_count = vertices.len();
        let mut triangles = Vec::with_capacity(faces.len() / 3);
        for face in faces.chunks_exact(3) {
            let mut triangle = [0usize; 3];
            for (slot, &index) in triangle.iter_mut().zip(face) {
                if index == 0 || index > vertex_count {
                    return Err(MeshError::IndexOutOfRange {
                        index,
                        vertex_count,
                    });
                }
                *slot = index - 1;
            }
            triangles.push(triangle);
        }

        let bounds = Aabb::enclosing(triangles.iter().flatten().map(|&i| vertices[i]))
            .ok_or(MeshError::Empty)?
            .padded(BOUNDS_MARGIN);

        Ok(Self {
            vertices: vertices.clone(),
            triangles,
            material_id: material_id.into(),
            bounds,
        })
    }

    /// Get the number of triangles in the mesh.
    pub fn triangle_count(&self) -> usize {
        self.triangles.len()
    }

    pub fn material_id(&self) -> &str {
        &self.material_id
    }

    /// Corner positions of every triangle, in face order.
    pub fn triangles(&self) -> impl Iterator<Item = [Point3; 3]> + '_ {
        self.triangles
            .iter()
            .map(|&[a, b, c]| [self.vertices[a], self.vertices[b], self.vertices[c]])
    }
}

/// Ray-triangle intersection by Cramer's rule.
///
/// Solves `o + t*d = v0 + beta*(v1 - v0) + gamma*(v2 - v0)` and returns `t`
/// when the ray crosses the triangle strictly inside `ray_t`.
#[inline]
pub fn intersect_triangle(v0: Point3, v1: Point3, v2: Point3, ray: &Ray, ray_t: Interval) -> Option<f64> {
    let d = ray.direction();
    let a_b = v0 - v1;
    let a_c = v0 - v2;

    let det_a = determinant(a_b, a_c, d);
    if det_a.abs() < DETERMINANT_EPSILON {
        return None;
    }
    let inv_det = 1.0 / det_a;
    let a_o = v0 - ray.origin();

    let beta = determinant(a_o, a_c, d) * inv_det;
    if !(0.0..=1.0).contains(&beta) {
        return None;
    }

    let gamma = determinant(a_b, a_o, d) * inv_det;
    if gamma < 0.0 || beta + gamma > 1.0 {
        return None;
    }

    let t = determinant(a_b, a_c, a_o) * inv_det;
    ray_t.surrounds(t).then_some(t)
}

impl Hittable for Mesh {
    fn hit<'a>(&'a self, ray: &Ray, ray_t: Interval, rec: &mut HitRecord<'a>) -> bool {
        if !self.bounds.hit(ray, ray_t) {
            return false;
        }

        // Shrinking the window keeps the first triangle on exact ties
        let mut closest = None;
        let mut window = ray_t;
        for (index, [v0, v1, v2]) in self.triangles().enumerate() {
            if let Some(t) = intersect_triangle(v0, v1, v2, ray, window) {
                window = window.with_max(t);
                closest = Some((index, t));
            }
        }

        let Some((index, t)) = closest else {
            return false;
        };

        let [a, b, c] = self.triangles[index];
        let v0 = self.vertices[a];
        rec.t = t;
        rec.normal = (self.vertices[b] - v0).cross(self.vertices[c] - v0);
        rec.material_id = &self.material_id;
        true
    }

    fn bounding_box(&self) -> Aabb {
        self.bounds
    }

    fn primitive_count(&self) -> usize {
        self.triangle_count()
    }

    fn material_id(&self) -> Option<&str> {
        Some(&self.material_id)
    }
}
