//! Brush indicator placement.
//!
//! The indicator is a small ring drawn just past the near plane under the
//! pointer. Its scale is divided by the measured camera-to-surface distance
//! so the ring keeps a constant apparent size relative to the brush.

use glam::{DQuat, DVec2, DVec3};

use crate::brush::BrushState;
use crate::constants::{INDICATOR_NEAR_OFFSET, MIN_BRUSH_DISTANCE, MIN_COS_ALPHA};
use crate::mesh::TriangulatedMesh;
use crate::raycast::raycast_mesh;
use crate::types::{ModelTransform, Ray};

/// World-space placement of the brush indicator
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IndicatorTransform {
    pub position: DVec3,
    /// Turns the indicator's local +Z toward the ray origin
    pub rotation: DQuat,
    /// Scale on the indicator's local X and Y axes
    pub scale: DVec2,
}

impl Default for IndicatorTransform {
    fn default() -> Self {
        Self {
            position: DVec3::ZERO,
            rotation: DQuat::IDENTITY,
            scale: DVec2::ONE,
        }
    }
}

/// Surface the indicator is measured against
#[derive(Debug, Clone, Copy)]
pub struct IndicatorTarget<'a> {
    pub mesh: &'a TriangulatedMesh,
    pub transform: &'a ModelTransform,
}

/// Place the indicator and refresh `brush.distance`.
///
/// # Arguments
/// * `world_ray` - Pointer ray in world space
/// * `camera_forward` - Normalized camera viewing direction
/// * `near` - Camera near clip distance
/// * `target` - Mesh to measure the brush distance against, if any
/// * `brush` - Brush whose `distance` is updated on a hit and kept otherwise
pub fn update_indicator(
    world_ray: &Ray,
    camera_forward: DVec3,
    near: f64,
    target: Option<IndicatorTarget<'_>>,
    brush: &mut BrushState,
) -> IndicatorTransform {
    let cos_alpha = camera_forward.dot(world_ray.direction).max(MIN_COS_ALPHA);

    let position = world_ray.at((near + INDICATOR_NEAR_OFFSET) / cos_alpha);
    let facing = (world_ray.origin - position)
        .try_normalize()
        .unwrap_or(-world_ray.direction);
    let rotation = DQuat::from_rotation_arc(DVec3::Z, facing);

    if let Some(IndicatorTarget { mesh, transform }) = target {
        let local_ray = transform.ray_to_local(world_ray);
        if let Some(hit) = raycast_mesh(&local_ray, mesh) {
            // Local hit distance back to world units, then onto the view axis
            brush.distance = hit.distance * transform.scale * cos_alpha;
        }
    }

    let scale = brush.size / brush.distance.max(MIN_BRUSH_DISTANCE);
    IndicatorTransform {
        position,
        rotation,
        scale: DVec2::splat(scale),
    }
}
