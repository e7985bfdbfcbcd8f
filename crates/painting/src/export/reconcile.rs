//! Color selection for merged vertices.
//!
//! A merged vertex can inherit different colors from its duplicates, for
//! example along a seam painted from one side only. The first color met in
//! face order wins: faces by increasing index, then corners a, b, c. This
//! keeps exports reproducible; no majority vote is taken.

use tracing::debug;

use crate::constants::UNPAINTED;
use crate::types::Rgb;

use super::dedup::DedupMesh;

/// Colors contributed to each merged vertex, in face traversal order.
///
/// `source_faces` are the faces before welding (same order as
/// `dedup.faces`); `colors` is the source color stream.
pub fn color_candidates(
    dedup: &DedupMesh,
    source_faces: &[[u32; 3]],
    colors: &[Rgb],
) -> Vec<Vec<Rgb>> {
    let mut candidates = vec![Vec::new(); dedup.vertex_count()];
    for face in source_faces {
        for &source in face {
            let merged = dedup.remap[source as usize] as usize;
            candidates[merged].push(colors[source as usize]);
        }
    }
    candidates
}

/// Pick one color per merged vertex.
///
/// Returns `None` for every vertex when there is no color stream. A merged
/// vertex that no face references falls back to the unpainted sentinel.
pub fn reconcile_colors(
    dedup: &DedupMesh,
    source_faces: &[[u32; 3]],
    colors: Option<&[Rgb]>,
) -> Vec<Option<Rgb>> {
    let Some(colors) = colors else {
        return vec![None; dedup.vertex_count()];
    };

    let candidates = color_candidates(dedup, source_faces, colors);

    let conflicts = candidates
        .iter()
        .filter(|c| c.iter().any(|color| Some(color) != c.first()))
        .count();
    if conflicts > 0 {
        debug!(
            "reconcile_colors: {} merged vertices had conflicting colors, kept first",
            conflicts
        );
    }

    candidates
        .into_iter()
        .map(|c| Some(c.first().copied().unwrap_or(UNPAINTED)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::export::dedup::deduplicate;
    use glam::DVec3;

    #[test]
    fn test_first_encountered_wins() {
        // Two copies of the origin, red first then green in face order
        let positions = vec![
            DVec3::ZERO,
            DVec3::X,
            DVec3::Y,
            DVec3::ZERO,
            DVec3::Y,
            DVec3::Z,
        ];
        let faces = vec![[0, 1, 2], [3, 4, 5]];
        let colors = vec![
            Rgb::RED,
            Rgb::BLUE,
            Rgb::BLUE,
            Rgb::GREEN,
            Rgb::BLUE,
            Rgb::BLUE,
        ];

        let dedup = deduplicate(&positions, &faces, 4);
        let reconciled = reconcile_colors(&dedup, &faces, Some(&colors));

        assert_eq!(reconciled.len(), 4);
        assert_eq!(reconciled[0], Some(Rgb::RED));
        assert!(reconciled.iter().skip(1).all(|c| *c == Some(Rgb::BLUE)));
    }

    #[test]
    fn test_order_follows_faces_not_vertex_index() {
        // Vertex 1 is met first through face 0 even though vertex 0 has the lower index
        let positions = vec![DVec3::ZERO, DVec3::ZERO, DVec3::X, DVec3::Y];
        let faces = vec![[1, 2, 3], [0, 3, 2]];
        let colors = vec![Rgb::RED, Rgb::GREEN, Rgb::BLUE, Rgb::BLUE];

        let dedup = deduplicate(&positions, &faces, 4);
        let reconciled = reconcile_colors(&dedup, &faces, Some(&colors));

        assert_eq!(reconciled[0], Some(Rgb::GREEN));
    }

    #[test]
    fn test_unreferenced_vertex_falls_back_to_sentinel() {
        let positions = vec![DVec3::ZERO, DVec3::X, DVec3::Y, DVec3::Z];
        let faces = vec![[0, 1, 2]];
        let colors = vec![Rgb::RED; 4];

        let dedup = deduplicate(&positions, &faces, 4);
        let reconciled = reconcile_colors(&dedup, &faces, Some(&colors));

        assert_eq!(reconciled[3], Some(UNPAINTED));
    }

    #[test]
    fn test_no_color_stream() {
        let positions = vec![DVec3::ZERO, DVec3::X, DVec3::Y];
        let faces = vec![[0, 1, 2]];
        let dedup = deduplicate(&positions, &faces, 4);

        assert_eq!(reconcile_colors(&dedup, &faces, None), vec![None; 3]);
    }

    #[test]
    fn test_candidates_are_a_multiset() {
        let positions = vec![DVec3::ZERO, DVec3::X, DVec3::Y, DVec3::ZERO];
        let faces = vec![[0, 1, 2], [3, 2, 1]];
        let colors = vec![Rgb::RED, Rgb::BLUE, Rgb::BLUE, Rgb::RED];

        let dedup = deduplicate(&positions, &faces, 4);
        let candidates = color_candidates(&dedup, &faces, &colors);

        assert_eq!(candidates[0], vec![Rgb::RED, Rgb::RED]);
        assert_eq!(candidates[1].len(), 2);
    }
}
