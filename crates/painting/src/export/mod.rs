//! Export pipeline: weld duplicates, reconcile colors, write OBJ text.
//!
//! - [`dedup`] - Position welding with a rounded-key hash
//! - [`reconcile`] - First-color-wins selection per merged vertex
//! - [`obj`] - Fixed-precision OBJ serializer

pub mod dedup;
pub mod obj;
pub mod reconcile;

use glam::DVec3;
use labelpaint_config::{DEFAULT_EXPORT_PRECISION, DEFAULT_WELD_DECIMALS, PaintConfig};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::MalformedMeshError;
use crate::mesh::{TriangulatedMesh, validate_streams};
use crate::types::Rgb;

pub use dedup::{DedupMesh, deduplicate};
pub use obj::write_obj;
pub use reconcile::{color_candidates, reconcile_colors};

/// Tunables for [`export_obj`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExportOptions {
    /// Fraction digits for coordinates and color channels
    pub precision: usize,
    /// Decimal places positions are rounded to before welding
    pub weld_decimals: u32,
    /// Append reconciled colors to `v` lines
    pub include_colors: bool,
}

impl Default for ExportOptions {
    fn default() -> Self {
        Self {
            precision: DEFAULT_EXPORT_PRECISION,
            weld_decimals: DEFAULT_WELD_DECIMALS,
            include_colors: true,
        }
    }
}

impl From<&PaintConfig> for ExportOptions {
    fn from(config: &PaintConfig) -> Self {
        Self {
            precision: config.export_precision,
            weld_decimals: config.weld_decimals,
            ..Default::default()
        }
    }
}

/// Run the full pipeline over raw streams.
///
/// The input is validated before any work is done, so a malformed mesh
/// produces an error and no text.
pub fn export_streams(
    positions: &[DVec3],
    colors: Option<&[Rgb]>,
    faces: &[[u32; 3]],
    options: &ExportOptions,
) -> Result<String, MalformedMeshError> {
    validate_streams(positions, colors, faces)?;

    let dedup = deduplicate(positions, faces, options.weld_decimals);
    let colors = if options.include_colors { colors } else { None };
    let merged_colors = reconcile_colors(&dedup, faces, colors);

    let text = write_obj(&dedup.positions, &merged_colors, &dedup.faces, options.precision)?;

    info!(
        "Exported OBJ: {} vertices ({} before welding), {} faces",
        dedup.vertex_count(),
        positions.len(),
        dedup.face_count()
    );

    Ok(text)
}

/// Export a mesh's current geometry and colors as OBJ text.
pub fn export_obj(
    mesh: &TriangulatedMesh,
    options: &ExportOptions,
) -> Result<String, MalformedMeshError> {
    let vertices = mesh.vertices();
    export_streams(
        vertices.positions(),
        Some(vertices.colors()),
        mesh.faces(),
        options,
    )
}

/// File name an export of `mesh_name` is written under.
///
/// Directory components are dropped and `.obj` is appended unless the
/// name already ends with it.
pub fn obj_file_name(mesh_name: &str) -> String {
    let base = mesh_name
        .rsplit(['/', '\\'])
        .next()
        .filter(|s| !s.is_empty())
        .unwrap_or("mesh");

    if base.to_ascii_lowercase().ends_with(".obj") {
        base.to_string()
    } else {
        format!("{base}.obj")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mesh::VertexBuffer;

    #[test]
    fn test_painted_triangle_round_trip() {
        let mut vertices = VertexBuffer::from_positions(vec![
            DVec3::new(0.0, 0.0, 0.0),
            DVec3::new(1.0, 0.0, 0.0),
            DVec3::new(0.0, 1.0, 0.0),
        ]);
        for i in 0..3 {
            vertices.set_color(i, Rgb::RED);
        }
        let mesh = TriangulatedMesh::new("triangle", vertices, vec![[0, 1, 2]]).unwrap();

        let text = export_obj(&mesh, &ExportOptions::default()).unwrap();

        assert_eq!(
            text,
            "# Vertices: 3\n\
             # Faces: 1\n\
             v 0.000000 0.000000 0.000000 1.000000 0.000000 0.000000\n\
             v 1.000000 0.000000 0.000000 1.000000 0.000000 0.000000\n\
             v 0.000000 1.000000 0.000000 1.000000 0.000000 0.000000\n\
             f 1 2 3\n"
        );
    }

    #[test]
    fn test_seam_duplicates_weld_and_keep_first_color() {
        // Quad split along its diagonal with the diagonal vertices duplicated
        let positions = vec![
            DVec3::new(0.0, 0.0, 0.0),
            DVec3::new(1.0, 0.0, 0.0),
            DVec3::new(1.0, 1.0, 0.0),
            DVec3::new(0.0, 0.0, 0.0),
            DVec3::new(1.0, 1.0, 0.0),
            DVec3::new(0.0, 1.0, 0.0),
        ];
        let colors = vec![
            Rgb::RED,
            Rgb::RED,
            Rgb::RED,
            Rgb::GREEN,
            Rgb::GREEN,
            Rgb::GREEN,
        ];
        let faces = vec![[0, 1, 2], [3, 4, 5]];

        let text =
            export_streams(&positions, Some(&colors), &faces, &ExportOptions::default()).unwrap();
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines[0], "# Vertices: 4");
        assert_eq!(lines[1], "# Faces: 2");
        assert!(lines[2].ends_with("1.000000 0.000000 0.000000"));
        assert!(lines[4].ends_with("1.000000 0.000000 0.000000"));
        assert!(lines[5].ends_with("0.000000 1.000000 0.000000"));
        assert_eq!(lines[6], "f 1 2 3");
        assert_eq!(lines[7], "f 1 3 4");
    }

    #[test]
    fn test_without_colors() {
        let positions = vec![DVec3::ZERO, DVec3::X, DVec3::Y];
        let colors = vec![Rgb::RED; 3];
        let options = ExportOptions {
            include_colors: false,
            ..Default::default()
        };

        let text = export_streams(&positions, Some(&colors), &[[0, 1, 2]], &options).unwrap();
        assert!(text.contains("v 1.000000 0.000000 0.000000\n"));

        let text = export_streams(&positions, None, &[[0, 1, 2]], &ExportOptions::default()).unwrap();
        assert!(text.contains("v 0.000000 1.000000 0.000000\n"));
    }

    #[test]
    fn test_malformed_streams_rejected() {
        let options = ExportOptions::default();
        assert_eq!(
            export_streams(&[], None, &[[0, 1, 2]], &options),
            Err(MalformedMeshError::NoVertices)
        );
        assert!(matches!(
            export_streams(&[DVec3::ZERO, DVec3::X], Some(&[Rgb::RED]), &[[0, 1, 1]], &options),
            Err(MalformedMeshError::StreamLengthMismatch { .. })
        ));
        assert!(matches!(
            export_streams(&[DVec3::ZERO], None, &[[0, 0, 4]], &options),
            Err(MalformedMeshError::IndexOutOfRange { .. })
        ));
    }

    #[test]
    fn test_obj_file_name() {
        assert_eq!(obj_file_name("person"), "person.obj");
        assert_eq!(obj_file_name("person.obj"), "person.obj");
        assert_eq!(obj_file_name("models/person.OBJ"), "person.OBJ");
        assert_eq!(obj_file_name("C:\\scans\\body"), "body.obj");
        assert_eq!(obj_file_name(""), "mesh.obj");
    }

    #[test]
    fn test_options_from_config() {
        let config = PaintConfig {
            export_precision: 3,
            weld_decimals: 2,
            ..Default::default()
        };
        let options = ExportOptions::from(&config);
        assert_eq!(options.precision, 3);
        assert_eq!(options.weld_decimals, 2);
        assert!(options.include_colors);
    }
}
