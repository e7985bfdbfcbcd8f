//! Per-vertex brush painting.
//!
//! Every vertex within the brush radius of the local-space pointer ray
//! takes the brush color outright; there is no falloff or blending.

use tracing::debug;

use crate::brush::BrushState;
use crate::mesh::TriangulatedMesh;
use crate::types::Ray;

/// Paint all vertices under the brush.
///
/// # Arguments
/// * `mesh` - Mesh whose color stream is updated in place
/// * `local_ray` - Pointer ray in the mesh's local space
/// * `brush` - Brush radius (world units) and color
/// * `model_scale` - Uniform scale of the mesh's model transform, used to
///   convert the brush radius into local units
/// * `backside_allowed` - When false, only vertices whose normal faces the
///   ray origin are painted
///
/// # Returns
/// Number of vertices painted. Zero is a normal result for a missed swipe.
pub fn paint(
    mesh: &mut TriangulatedMesh,
    local_ray: &Ray,
    brush: &BrushState,
    model_scale: f64,
    backside_allowed: bool,
) -> usize {
    let radius = brush.size / model_scale;
    let vertices = mesh.vertices_mut();
    let mut painted = 0;

    let (positions, normals, colors) = vertices.streams_mut();
    for (i, position) in positions.iter().enumerate() {
        if local_ray.distance_to_point(*position) > radius {
            continue;
        }
        if !backside_allowed && local_ray.direction.dot(normals[i]) >= 0.0 {
            continue;
        }
        colors[i] = brush.color;
        painted += 1;
    }

    if painted > 0 {
        vertices.mark_colors_dirty();
        debug!("paint: {} vertices within radius {:.4}", painted, radius);
    }

    painted
}
