//! OBJ loading into a paintable mesh.
//!
//! Parsing is delegated to `tobj`. The loader reads from any buffered
//! reader; opening files is left to the caller.

use std::io::BufRead;

use glam::DVec3;
use tracing::{info, warn};

use crate::constants::CANONICAL_BOX_SIZE;
use crate::error::LoadError;
use crate::mesh::{TriangulatedMesh, VertexBuffer};
use crate::types::{ModelTransform, Rgb};

/// A parsed mesh and the transform that places it in the scene
#[derive(Debug, Clone)]
pub struct LoadedMesh {
    pub mesh: TriangulatedMesh,
    pub transform: ModelTransform,
}

/// Parse OBJ text into a triangulated mesh.
///
/// Polygons are triangulated and per-corner attributes collapsed to a
/// single index stream. Only the first object is used. Vertex colors in the
/// file (`v x y z r g b`) are kept; otherwise every vertex starts unpainted.
/// Normals are always recomputed from the faces.
pub fn load_obj<R: BufRead>(reader: &mut R, name: &str) -> Result<LoadedMesh, LoadError> {
    let (models, _materials) = tobj::load_obj_buf(
        reader,
        &tobj::LoadOptions {
            triangulate: true,
            single_index: true,
            ..Default::default()
        },
        |_| Err(tobj::LoadError::OpenFileFailed),
    )
    .map_err(LoadError::Parse)?;

    if models.len() > 1 {
        warn!(
            "load_obj: '{}' has {} objects, only the first is painted",
            name,
            models.len()
        );
    }
    let Some(model) = models.into_iter().next() else {
        return Err(LoadError::NoMesh);
    };
    let obj = model.mesh;

    // tobj keeps only vertices that faces reference, so a file without
    // faces also arrives without positions
    let faces: Vec<[u32; 3]> = obj
        .indices
        .chunks_exact(3)
        .map(|f| [f[0], f[1], f[2]])
        .collect();
    if faces.iter().all(|&[a, b, c]| a == b || b == c || a == c) {
        return Err(LoadError::MissingFaces);
    }
    if obj.positions.is_empty() {
        return Err(LoadError::MissingPositions);
    }

    let positions: Vec<DVec3> = obj
        .positions
        .chunks_exact(3)
        .map(|p| DVec3::new(p[0] as f64, p[1] as f64, p[2] as f64))
        .collect();
    if positions.iter().any(|p| !p.is_finite()) {
        return Err(LoadError::NonFiniteGeometry);
    }

    let colors = if obj.vertex_color.is_empty() {
        None
    } else if obj.vertex_color.len() == obj.positions.len() {
        Some(
            obj.vertex_color
                .chunks_exact(3)
                .map(|c| Rgb::new(c[0], c[1], c[2]))
                .collect(),
        )
    } else {
        warn!(
            "load_obj: '{}' has {} color values for {} positions, ignoring colors",
            name,
            obj.vertex_color.len(),
            obj.positions.len()
        );
        None
    };

    let vertices = VertexBuffer::from_streams(positions, None, colors)?;
    let (min, max) = vertices.bounds().ok_or(LoadError::MissingPositions)?;
    let transform =
        ModelTransform::fit_bounds(min, max, CANONICAL_BOX_SIZE).ok_or(LoadError::DegenerateBounds)?;

    let mut mesh = TriangulatedMesh::new(name, vertices, faces)?;
    mesh.compute_vertex_normals();

    info!(
        "Loaded mesh '{}': {} vertices, {} faces, scale {:.4}",
        name,
        mesh.vertex_count(),
        mesh.face_count(),
        transform.scale
    );

    Ok(LoadedMesh { mesh, transform })
}
