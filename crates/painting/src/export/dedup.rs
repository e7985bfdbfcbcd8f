//! Position welding for export.
//!
//! Upstream mesh storage often splits one geometric vertex into several
//! (per-face normals or UVs). Export collapses them back so each position
//! appears once.
//!
//! Faces whose corners weld together are still written (`f 1 1 2`), so face
//! count and order always match the painted mesh. Three.js
//! `Geometry.mergeVertices` drops such faces instead.

use std::collections::HashMap;

use glam::DVec3;
use labelpaint_config::MAX_WELD_DECIMALS;
use tracing::debug;

/// Result of welding duplicate positions
#[derive(Debug, Clone, PartialEq)]
pub struct DedupMesh {
    /// One position per merged vertex, in order of first occurrence
    pub positions: Vec<DVec3>,
    /// Faces rewritten to merged indices, same order and winding
    pub faces: Vec<[u32; 3]>,
    /// Source vertex index -> merged vertex index
    pub remap: Vec<u32>,
}

impl DedupMesh {
    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    pub fn face_count(&self) -> usize {
        self.faces.len()
    }
}

/// Round a position onto a `10^-decimals` grid for hashing.
///
/// Keys are the bits of the rounded value, so coordinates far outside the
/// `i64` range stay distinct.
fn quantize(p: DVec3, factor: f64) -> [u64; 3] {
    // `+ 0.0` folds -0.0 into 0.0 after rounding
    let q = |v: f64| ((v * factor).round() + 0.0).to_bits();
    [q(p.x), q(p.y), q(p.z)]
}

/// Merge vertices whose positions agree to `weld_decimals` decimal places.
///
/// `weld_decimals` is clamped to [`MAX_WELD_DECIMALS`]. The first vertex of
/// each group supplies the merged position. Every face is kept, including
/// faces whose corners collapse together.
pub fn deduplicate(positions: &[DVec3], faces: &[[u32; 3]], weld_decimals: u32) -> DedupMesh {
    let factor = 10f64.powi(weld_decimals.min(MAX_WELD_DECIMALS) as i32);

    let mut key_to_merged: HashMap<[u64; 3], u32> = HashMap::with_capacity(positions.len());
    let mut merged_positions = Vec::new();
    let mut remap = Vec::with_capacity(positions.len());

    for &position in positions {
        let next = merged_positions.len() as u32;
        let merged = *key_to_merged
            .entry(quantize(position, factor))
            .or_insert_with(|| {
                merged_positions.push(position);
                next
            });
        remap.push(merged);
    }

    let faces: Vec<[u32; 3]> = faces
        .iter()
        .map(|face| face.map(|i| remap[i as usize]))
        .collect();

    if merged_positions.len() < positions.len() {
        debug!(
            "deduplicate: welded {} duplicate vertices ({} unique of {} total)",
            positions.len() - merged_positions.len(),
            merged_positions.len(),
            positions.len()
        );
    }

    DedupMesh {
        positions: merged_positions,
        faces,
        remap,
    }
}
