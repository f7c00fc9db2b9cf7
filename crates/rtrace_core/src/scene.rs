//! Scene representation for rtrace.
//!
//! A [`Scene`] is assembled once (usually by the loader) and then only read.
//! Rendering shares it across worker threads by reference, which the
//! `Send + Sync` bound on [`Hittable`] makes possible without locking.

use rtrace_math::{Aabb, Color, Interval, Point3, Ray};

use crate::camera::Camera;
use crate::hittable::{HitRecord, Hittable};
use crate::mesh::VertexArena;

/// Blinn-Phong material with a mirror term.
#[derive(Clone, Debug, PartialEq)]
pub struct Material {
    /// Key that meshes use to refer to this material
    pub id: String,
    pub ambient: Color,
    pub diffuse: Color,
    pub specular: Color,
    /// Fraction of the mirror-reflected color added per channel
    pub mirror_reflectance: Color,
    pub phong_exponent: f64,
}

/// Returned for ids that match no material: black on every term.
static DEFAULT_MATERIAL: Material = Material::zero();

impl Material {
    /// A material that contributes nothing.
    pub const fn zero() -> Self {
        Self {
            id: String::new(),
            ambient: Color::ZERO,
            diffuse: Color::ZERO,
            specular: Color::ZERO,
            mirror_reflectance: Color::ZERO,
            phong_exponent: 0.0,
        }
    }

    /// Create a material with the given id and all terms zeroed.
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            ..Self::zero()
        }
    }

    pub fn with_ambient(mut self, ambient: Color) -> Self {
        self.ambient = ambient;
        self
    }

    pub fn with_diffuse(mut self, diffuse: Color) -> Self {
        self.diffuse = diffuse;
        self
    }

    pub fn with_specular(mut self, specular: Color, phong_exponent: f64) -> Self {
        self.specular = specular;
        self.phong_exponent = phong_exponent;
        self
    }

    pub fn with_mirror(mut self, mirror_reflectance: Color) -> Self {
        self.mirror_reflectance = mirror_reflectance;
        self
    }

    /// Check if this material spawns reflection rays.
    pub fn is_mirror(&self) -> bool {
        self.mirror_reflectance.length_squared() > 0.0
    }
}

impl Default for Material {
    fn default() -> Self {
        Self::zero()
    }
}

/// Isotropic point light. Irradiance falls off with the squared distance.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PointLight {
    pub position: Point3,
    pub intensity: Color,
}

impl PointLight {
    pub fn new(position: Point3, intensity: Color) -> Self {
        Self {
            position,
            intensity,
        }
    }
}

/// A complete scene: camera, lighting, materials and geometry.
pub struct Scene {
    pub camera: Camera,
    pub background: Color,
    pub ambient_light: Color,
    pub lights: Vec<PointLight>,
    pub materials: Vec<Material>,

    /// Recursion cap requested by the scene file, if any
    pub max_recursion_depth: Option<u32>,

    vertices: VertexArena,
    objects: Vec<Box<dyn Hittable>>,
}

impl Scene {
    /// Create an empty scene around a camera and the frozen vertex arena.
    pub fn new(camera: Camera, vertices: VertexArena) -> Self {
        Self {
            camera,
            background: Color::ZERO,
            ambient_light: Color::ZERO,
            lights: Vec::new(),
            materials: Vec::new(),
            max_recursion_depth: None,
            vertices,
            objects: Vec::new(),
        }
    }

    pub fn add_light(&mut self, light: PointLight) {
        self.lights.push(light);
    }

    pub fn add_material(&mut self, material: Material) {
        self.materials.push(material);
    }

    /// Add an object to the scene.
    ///
    /// Logs a warning if the object's material id does not resolve. The object
    /// is still added and renders with the zero material.
    pub fn add_object(&mut self, object: Box<dyn Hittable>) {
        if let Some(id) = object.material_id() {
            if self.find_material(id).is_none() {
                log::warn!("Material '{}' is not defined, falling back to the zero material", id);
            }
        }
        self.objects.push(object);
    }

    /// The shared vertex arena meshes of this scene index into.
    pub fn vertices(&self) -> &VertexArena {
        &self.vertices
    }

    fn find_material(&self, id: &str) -> Option<&Material> {
        self.materials.iter().find(|m| m.id == id)
    }

    /// Look up a material by id, falling back to the zero material.
    pub fn get_material(&self, id: &str) -> &Material {
        self.find_material(id).unwrap_or(&DEFAULT_MATERIAL)
    }

    /// Material ids referenced by objects that match no material, in object order.
    pub fn unresolved_material_ids(&self) -> Vec<&str> {
        let mut unresolved: Vec<&str> = Vec::new();
        for id in self.objects.iter().filter_map(|o| o.material_id()) {
            if self.find_material(id).is_none() && !unresolved.contains(&id) {
                unresolved.push(id);
            }
        }
        unresolved
    }

    /// Closest hit over all objects strictly inside `ray_t`.
    pub fn hit<'a>(&'a self, ray: &Ray, ray_t: Interval, rec: &mut HitRecord<'a>) -> bool {
        let mut hit_anything = false;
        let mut closest_so_far = ray_t.max;

        for object in &self.objects {
            if object.hit(ray, ray_t.with_max(closest_so_far), rec) {
                hit_anything = true;
                closest_so_far = rec.t;
            }
        }

        hit_anything
    }

    /// True if any object blocks the ray strictly inside `ray_t`.
    ///
    /// Stops at the first blocker instead of searching for the closest.
    pub fn occluded(&self, ray: &Ray, ray_t: Interval) -> bool {
        let mut rec = HitRecord::default();
        self.objects.iter().any(|object| object.hit(ray, ray_t, &mut rec))
    }

    pub fn mesh_count(&self) -> usize {
        self.objects.len()
    }

    /// Get total triangle count across all objects.
    pub fn triangle_count(&self) -> usize {
        self.objects.iter().map(|o| o.primitive_count()).sum()
    }

    /// Bounding box of all geometry, or `None` for an empty scene.
    pub fn bounds(&self) -> Option<Aabb> {
        self.objects
            .iter()
            .map(|o| o.bounding_box())
            .reduce(|acc, b| Aabb::surrounding(&acc, &b))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::camera::NearPlane;
    use crate::mesh::Mesh;
    use rtrace_math::Vec3;

    fn camera() -> Camera {
        Camera::new(
            Vec3::ZERO,
            Vec3::new(0.0, 0.0, -1.0),
            Vec3::Y,
            NearPlane::new(-1.0, 1.0, -1.0, 1.0),
            1.0,
            4,
            4,
        )
    }

    /// Two facing-the-camera triangles at z = -2 and z = -5.
    fn two_layer_scene() -> Scene {
        let vertices = VertexArena::new(vec![
            Vec3::new(-1.0, -1.0, -2.0),
            Vec3::new(1.0, -1.0, -2.0),
            Vec3::new(0.0, 1.0, -2.0),
            Vec3::new(-1.0, -1.0, -5.0),
            Vec3::new(1.0, -1.0, -5.0),
            Vec3::new(0.0, 1.0, -5.0),
        ]);
        let far = Mesh::new(&vertices, &[4, 5, 6], "far").unwrap();
        let near = Mesh::new(&vertices, &[1, 2, 3], "near").unwrap();

        let mut scene = Scene::new(camera(), vertices);
        scene.add_material(Material::new("near").with_ambient(Vec3::ONE));
        scene.add_object(Box::new(far));
        scene.add_object(Box::new(near));
        scene
    }

    #[test]
    fn test_scene_hit_keeps_closest_object() {
        let scene = two_layer_scene();
        let ray = Ray::new(Vec3::ZERO, Vec3::new(0.0, 0.0, -1.0));
        let mut rec = HitRecord::default();

        assert!(scene.hit(&ray, Interval::FORWARD, &mut rec));
        assert!((rec.t - 2.0).abs() < 1e-9);
        assert_eq!(rec.material_id, "near");
    }

    #[test]
    fn test_scene_miss() {
        let scene = two_layer_scene();
        let ray = Ray::new(Vec3::ZERO, Vec3::new(0.0, 0.0, 1.0));
        let mut rec = HitRecord::default();

        assert!(!scene.hit(&ray, Interval::FORWARD, &mut rec));
    }

    #[test]
    fn test_empty_scene_never_hits() {
        let scene = Scene::new(camera(), VertexArena::default());
        let ray = Ray::new(Vec3::ZERO, Vec3::new(0.0, 0.0, -1.0));
        let mut rec = HitRecord::default();

        assert!(!scene.hit(&ray, Interval::FORWARD, &mut rec));
        assert!(!scene.occluded(&ray, Interval::FORWARD));
        assert!(scene.bounds().is_none());
    }

    #[test]
    fn test_occluded_respects_distance() {
        let scene = two_layer_scene();
        let ray = Ray::new(Vec3::ZERO, Vec3::new(0.0, 0.0, -1.0));

        assert!(scene.occluded(&ray, Interval::new(0.0, 3.0)));
        assert!(!scene.occluded(&ray, Interval::new(0.0, 1.0)));
    }

    #[test]
    fn test_get_material_falls_back_to_zero() {
        let scene = two_layer_scene();

        assert_eq!(scene.get_material("near").ambient, Vec3::ONE);
        assert_eq!(scene.get_material("missing"), &Material::zero());
        assert_eq!(scene.unresolved_material_ids(), vec!["far"]);
    }

    #[test]
    fn test_scene_statistics() {
        let scene = two_layer_scene();

        assert_eq!(scene.mesh_count(), 2);
        assert_eq!(scene.triangle_count(), 2);
        assert_eq!(scene.vertices().len(), 6);

        let bounds = scene.bounds().unwrap();
        assert!(bounds.contains(Vec3::new(0.0, 1.0, -5.0)));
        assert!(bounds.contains(Vec3::new(1.0, -1.0, -2.0)));
    }

    #[test]
    fn test_material_builders() {
        let material = Material::new("m")
            .with_diffuse(Vec3::new(1.0, 0.5, 0.25))
            .with_specular(Vec3::ONE, 32.0);

        assert!(!material.is_mirror());
        assert_eq!(material.phong_exponent, 32.0);
        assert!(material.clone().with_mirror(Vec3::splat(0.1)).is_mirror());
    }
}
