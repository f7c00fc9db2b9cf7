//! Recursive Blinn-Phong shading with shadows and mirror reflection.

use rtrace_core::{HitRecord, Material, PointLight, Scene};
use rtrace_math::numerics::SURFACE_EPSILON;
use rtrace_math::{Color, Interval, Point3, Ray, Vec3};

/// Compute the color seen along a ray.
///
/// `depth` is the number of mirror bounces still allowed. At zero only the
/// local lighting of the hit surface is returned.
pub fn shade(scene: &Scene, ray: &Ray, depth: u32) -> Color {
    let mut rec = HitRecord::default();
    if !scene.hit(ray, Interval::FORWARD, &mut rec) {
        return scene.background;
    }

    let x = ray.at(rec.t);
    let n = rec.normal.normalize();
    let material = scene.get_material(rec.material_id);
    let w_o = (-ray.direction()).normalize();

    let mut color = material.ambient * scene.ambient_light;
    for light in &scene.lights {
        color += direct_light(scene, light, material, x, n, w_o);
    }

    if material.is_mirror() && depth > 0 {
        let w_r = reflect(w_o, n);
        let reflected = Ray::new(x + SURFACE_EPSILON * w_r, w_r);
        color += material.mirror_reflectance * shade(scene, &reflected, depth - 1);
    }

    color
}

/// Diffuse and specular contribution of one light, or zero when occluded.
fn direct_light(
    scene: &Scene,
    light: &PointLight,
    material: &Material,
    x: Point3,
    n: Vec3,
    w_o: Vec3,
) -> Color {
    let to_light = light.position - x;
    let distance = to_light.length();
    let w_i = to_light / distance;

    let shadow_ray = Ray::new(x + SURFACE_EPSILON * w_i, w_i);
    if scene.occluded(&shadow_ray, Interval::FORWARD.with_max(distance)) {
        return Color::ZERO;
    }

    let irradiance = light.intensity / (distance * distance);

    let cos_theta = n.dot(w_i).max(0.0);
    let diffuse = material.diffuse * cos_theta * irradiance;

    let h = (w_i + w_o).normalize();
    let cos_alpha = n.dot(h).max(0.0);
    let specular = material.specular * cos_alpha.powf(material.phong_exponent) * irradiance;

    diffuse + specular
}

/// Mirror `w_o` (pointing away from the surface) about the normal.
#[inline]
pub fn reflect(w_o: Vec3, n: Vec3) -> Vec3 {
    -w_o + 2.0 * n * n.dot(w_o)
}
