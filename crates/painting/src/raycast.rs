//! Ray-mesh intersection for brush distance measurement.
//!
//! Ray-triangle intersection uses the Moller-Trumbore algorithm. Triangles
//! are hit from either side.

use glam::DVec3;

use crate::mesh::TriangulatedMesh;
use crate::types::Ray;

/// Epsilon for floating point comparisons in ray intersection
const EPSILON: f64 = 1e-9;

/// Result of a ray-triangle intersection test
#[derive(Debug, Clone, Copy)]
pub struct TriangleHit {
    /// Distance along the ray to the intersection point
    pub t: f64,
    /// Barycentric coordinate u (weight for vertex 1)
    pub u: f64,
    /// Barycentric coordinate v (weight for vertex 2)
    pub v: f64,
}

/// Closest intersection of a ray with a mesh
#[derive(Debug, Clone, Copy)]
pub struct MeshHit {
    /// Distance along the ray, in the ray's space
    pub distance: f64,
    /// Index of the face that was hit
    pub face: usize,
    /// Hit position, in the ray's space
    pub point: DVec3,
}

/// Moller-Trumbore ray-triangle intersection algorithm.
///
/// # Arguments
/// * `ray_origin` - Origin point of the ray
/// * `ray_dir` - Direction of the ray (should be normalized for consistent t values)
/// * `v0`, `v1`, `v2` - Triangle vertices
///
/// # Returns
/// `Some(TriangleHit)` if ray intersects in front of its origin, `None` otherwise
pub fn ray_triangle_intersection(
    ray_origin: DVec3,
    ray_dir: DVec3,
    v0: DVec3,
    v1: DVec3,
    v2: DVec3,
) -> Option<TriangleHit> {
    let edge1 = v1 - v0;
    let edge2 = v2 - v0;

    let pvec = ray_dir.cross(edge2);
    let det = edge1.dot(pvec);

    // Ray lies in the triangle's plane or the triangle is degenerate
    if det.abs() < EPSILON {
        return None;
    }

    let inv_det = 1.0 / det;
    let tvec = ray_origin - v0;

    let u = tvec.dot(pvec) * inv_det;
    if !(0.0..=1.0).contains(&u) {
        return None;
    }

    let qvec = tvec.cross(edge1);
    let v = ray_dir.dot(qvec) * inv_det;
    if v < 0.0 || u + v > 1.0 {
        return None;
    }

    let t = edge2.dot(qvec) * inv_det;
    if t < EPSILON {
        return None;
    }

    Some(TriangleHit { t, u, v })
}

/// Cast a ray against every face of a mesh and return the closest hit.
///
/// The ray must already be in the mesh's local space.
pub fn raycast_mesh(ray: &Ray, mesh: &TriangulatedMesh) -> Option<MeshHit> {
    let mut closest: Option<(TriangleHit, usize)> = None;

    // Brute force over all faces
    for face in 0..mesh.face_count() {
        let (v0, v1, v2) = mesh.face_positions(face);
        if let Some(hit) = ray_triangle_intersection(ray.origin, ray.direction, v0, v1, v2) {
            let dominated = matches!(&closest, Some((prev, _)) if hit.t >= prev.t);
            if !dominated {
                closest = Some((hit, face));
            }
        }
    }

    closest.map(|(hit, face)| MeshHit {
        distance: hit.t,
        face,
        point: ray.at(hit.t),
    })
}
