use crate::types::Rgb;

/// Sentinel color for a vertex that has not been painted yet.
pub const UNPAINTED: Rgb = Rgb::WHITE;

/// Offset past the near plane where the brush indicator is placed.
pub const INDICATOR_NEAR_OFFSET: f64 = 0.01;

/// Floor for the measured brush distance when scaling the indicator.
pub const MIN_BRUSH_DISTANCE: f64 = 1e-3;

/// Floor for the cosine between view axis and pointer ray.
pub const MIN_COS_ALPHA: f64 = 1e-6;

/// Brush distance before the first successful raycast.
pub const INITIAL_BRUSH_DISTANCE: f64 = 1.0;

/// Edge length of the canonical box a loaded mesh is fitted into.
pub const CANONICAL_BOX_SIZE: f64 = 2.0;
