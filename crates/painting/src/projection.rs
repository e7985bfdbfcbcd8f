//! Pointer ray projection.
//!
//! Turns a normalized pointer position and the frame's camera into a
//! world-space ray, and brings that ray into a mesh's local space. Both
//! operations are pure and total: degenerate camera bases are clamped to a
//! fallback axis instead of failing.

use glam::{DVec2, DVec3};

use crate::types::{Camera, ModelTransform, Ray};

/// Build an orthonormal (right, up) pair for a viewing direction.
///
/// Falls back to +X / +Y style axes when `up` is parallel to `forward`.
fn camera_basis(forward: DVec3, up: DVec3) -> (DVec3, DVec3) {
    let right = forward
        .cross(up)
        .try_normalize()
        .unwrap_or_else(|| forward.any_orthonormal_vector());
    let true_up = right.cross(forward).normalize();
    (right, true_up)
}

/// Unproject a pointer position through a perspective camera.
///
/// `pointer` is in normalized device coordinates ([-1, 1], +Y up). The ray
/// starts at the camera position and passes through the pointer's point on
/// the image plane.
pub fn project_ray(camera: &Camera, pointer: DVec2) -> Ray {
    let forward = camera.view_dir();
    let (right, up) = camera_basis(forward, camera.up);

    let tan_half = (camera.fov_y * 0.5).tan();
    let tan_half = if tan_half.is_finite() { tan_half } else { 1.0 };
    let aspect = if camera.aspect.is_finite() && camera.aspect > 0.0 {
        camera.aspect
    } else {
        1.0
    };

    let direction =
        forward + right * (pointer.x * tan_half * aspect) + up * (pointer.y * tan_half);
    Ray::new(camera.position, direction)
}

/// Bring a world-space ray into a mesh's local space.
pub fn ray_to_local(ray: &Ray, transform: &ModelTransform) -> Ray {
    transform.ray_to_local(ray)
}
