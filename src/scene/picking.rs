//! CPU ray picking against shape bounding spheres.

use glam::{Vec2, Vec3, Vec4};

use crate::camera::{Camera, Viewport};

/// World-space ray with a unit direction.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ray {
    /// Point on the near plane.
    pub origin: Vec3,
    /// Unit direction away from the eye.
    pub dir: Vec3,
}

/// Convert a surface pixel into a world-space ray through the camera.
#[must_use]
pub fn screen_to_ray(camera: &Camera, at: Vec2, viewport: Viewport) -> Ray {
    // NDC, y flipped for screen coordinates
    let ndc_x = (at.x / viewport.width as f32) * 2.0 - 1.0;
    let ndc_y = 1.0 - (at.y / viewport.height as f32) * 2.0;

    let inv_view_proj = camera.build_matrix().inverse();

    // [0,1] depth range
    let world_near = inv_view_proj * Vec4::new(ndc_x, ndc_y, 0.0, 1.0);
    let world_far = inv_view_proj * Vec4::new(ndc_x, ndc_y, 1.0, 1.0);

    let origin = world_near.truncate() / world_near.w;
    let far = world_far.truncate() / world_far.w;

    Ray {
        origin,
        dir: (far - origin).normalize_or_zero(),
    }
}

/// Distance along `ray` to the first intersection with the sphere, if it
/// lies in front of the origin.
#[must_use]
pub fn ray_sphere(ray: &Ray, center: Vec3, radius: f32) -> Option<f32> {
    let oc = ray.origin - center;
    let b = oc.dot(ray.dir);
    let c = oc.dot(oc) - radius * radius;
    let disc = b * b - c;
    if disc < 0.0 {
        return None;
    }
    let t = -b - disc.sqrt();
    (t >= 0.0).then_some(t)
}
