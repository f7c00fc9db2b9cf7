//! Pinhole camera for primary ray generation.

use rtrace_math::{Point3, Ray, Vec3};

/// Extents of the image rectangle on the near plane, in camera units.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NearPlane {
    pub left: f64,
    pub right: f64,
    pub bottom: f64,
    pub top: f64,
}

impl NearPlane {
    pub fn new(left: f64, right: f64, bottom: f64, top: f64) -> Self {
        Self {
            left,
            right,
            bottom,
            top,
        }
    }
}

/// Camera for generating rays into the scene.
///
/// `u` points right, `v` up and `w` backwards (opposite the gaze). The image
/// is the `near_plane` rectangle placed `near_distance` in front of the eye.
#[derive(Debug, Clone, PartialEq)]
pub struct Camera {
    pub image_width: u32,
    pub image_height: u32,

    position: Point3,
    u: Vec3,
    v: Vec3,
    w: Vec3,
    near_plane: NearPlane,
    near_distance: f64,
}

impl Camera {
    /// Create a camera from an eye position, a gaze direction and an up hint.
    ///
    /// The basis is re-orthogonalized, so `up` only needs to be roughly
    /// perpendicular to `gaze`.
    pub fn new(
        position: Point3,
        gaze: Vec3,
        up: Vec3,
        near_plane: NearPlane,
        near_distance: f64,
        image_width: u32,
        image_height: u32,
    ) -> Self {
        let w = -gaze.normalize();
        let u = up.cross(w).normalize();
        let v = w.cross(u);

        Self {
            image_width,
            image_height,
            position,
            u,
            v,
            w,
            near_plane,
            near_distance,
        }
    }

    pub fn position(&self) -> Point3 {
        self.position
    }

    /// Right, up and backward basis vectors.
    pub fn basis(&self) -> (Vec3, Vec3, Vec3) {
        (self.u, self.v, self.w)
    }

    pub fn near_plane(&self) -> NearPlane {
        self.near_plane
    }

    pub fn near_distance(&self) -> f64 {
        self.near_distance
    }

    /// Total number of pixels in the image.
    pub fn pixel_count(&self) -> usize {
        self.image_width as usize * self.image_height as usize
    }

    /// Generate the ray through the center of pixel (i, j).
    ///
    /// `i` counts columns from the left edge, `j` counts rows from the top.
    pub fn ray_to_pixel(&self, i: u32, j: u32) -> Ray {
        let NearPlane {
            left,
            right,
            bottom,
            top,
        } = self.near_plane;

        let center = self.position - self.w * self.near_distance;
        let top_left = center + left * self.u + top * self.v;

        let s_u = (i as f64 + 0.5) * (right - left) / self.image_width as f64;
        let s_v = (j as f64 + 0.5) * (top - bottom) / self.image_height as f64;
        let pixel = top_left + s_u * self.u - s_v * self.v;

        Ray::new(self.position, pixel - self.position)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn camera(width: u32, height: u32) -> Camera {
        Camera::new(
            Vec3::ZERO,
            Vec3::new(0.0, 0.0, -1.0),
            Vec3::Y,
            NearPlane::new(-1.0, 1.0, -1.0, 1.0),
            1.0,
            width,
            height,
        )
    }

    #[test]
    fn test_camera_basis() {
        let (u, v, w) = camera(4, 4).basis();

        assert!((u - Vec3::X).length() < 1e-12);
        assert!((v - Vec3::Y).length() < 1e-12);
        assert!((w - Vec3::Z).length() < 1e-12);
    }

    #[test]
    fn test_camera_basis_is_orthonormal_for_skewed_up() {
        let camera = Camera::new(
            Vec3::new(1.0, 2.0, 3.0),
            Vec3::new(0.0, -0.3, -2.0),
            Vec3::new(0.2, 1.0, 0.0),
            NearPlane::new(-1.0, 1.0, -1.0, 1.0),
            1.0,
            8,
            8,
        );
        let (u, v, w) = camera.basis();

        for axis in [u, v, w] {
            assert!((axis.length() - 1.0).abs() < 1e-12);
        }
        assert!(u.dot(v).abs() < 1e-12);
        assert!(v.dot(w).abs() < 1e-12);
        assert!(u.dot(w).abs() < 1e-12);
    }

    #[test]
    fn test_center_pixel_looks_down_gaze() {
        let ray = camera(3, 3).ray_to_pixel(1, 1);

        assert_eq!(ray.origin(), Vec3::ZERO);
        assert!((ray.direction() - Vec3::new(0.0, 0.0, -1.0)).length() < 1e-12);
    }

    #[test]
    fn test_corner_pixels() {
        let camera = camera(4, 4);

        // Pixels are 0.5 wide; the top-left center sits half a pixel in from each edge
        let top_left = camera.ray_to_pixel(0, 0).direction();
        assert!((top_left - Vec3::new(-0.75, 0.75, -1.0)).length() < 1e-12);

        let bottom_right = camera.ray_to_pixel(3, 3).direction();
        assert!((bottom_right - Vec3::new(0.75, -0.75, -1.0)).length() < 1e-12);
    }

    #[test]
    fn test_asymmetric_near_plane() {
        let camera = Camera::new(
            Vec3::ZERO,
            Vec3::new(0.0, 0.0, -1.0),
            Vec3::Y,
            NearPlane::new(0.0, 2.0, -1.0, 0.0),
            2.0,
            2,
            1,
        );

        let ray = camera.ray_to_pixel(1, 0);
        assert!((ray.direction() - Vec3::new(1.5, -0.5, -2.0)).length() < 1e-12);
        assert_eq!(camera.pixel_count(), 2);
    }
}
