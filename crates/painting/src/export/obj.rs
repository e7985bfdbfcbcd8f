//! OBJ text serialization with per-vertex colors.
//!
//! Colors are appended to `v` lines (`v x y z r g b`), the convention read
//! by MeshLab and MeshMixer. No normals, UVs, materials or groups are
//! written.

use std::fmt::Write;

use glam::DVec3;

use crate::error::MalformedMeshError;
use crate::mesh::validate_streams;
use crate::types::Rgb;

/// Serialize merged vertices and faces as OBJ text.
///
/// `colors` holds one optional color per vertex; vertices without one are
/// written as plain `v x y z`. All numbers use `precision` fraction digits in
/// fixed-point notation. Face indices are written 1-based.
///
/// Nothing is produced when the input is structurally invalid.
pub fn write_obj(
    positions: &[DVec3],
    colors: &[Option<Rgb>],
    faces: &[[u32; 3]],
    precision: usize,
) -> Result<String, MalformedMeshError> {
    validate_streams(positions, None, faces)?;
    if colors.len() != positions.len() {
        return Err(MalformedMeshError::StreamLengthMismatch {
            positions: positions.len(),
            normals: positions.len(),
            colors: colors.len(),
        });
    }

    let mut out = String::with_capacity(positions.len() * 64 + faces.len() * 24);

    // Writing into a String cannot fail
    let _ = writeln!(out, "# Vertices: {}", positions.len());
    let _ = writeln!(out, "# Faces: {}", faces.len());

    for (p, color) in positions.iter().zip(colors) {
        let _ = write!(
            out,
            "v {:.prec$} {:.prec$} {:.prec$}",
            p.x,
            p.y,
            p.z,
            prec = precision
        );
        if let Some(c) = color {
            let _ = write!(
                out,
                " {:.prec$} {:.prec$} {:.prec$}",
                c.r,
                c.g,
                c.b,
                prec = precision
            );
        }
        out.push('\n');
    }

    for [a, b, c] in faces {
        let _ = writeln!(out, "f {} {} {}", a + 1, b + 1, c + 1);
    }

    Ok(out)
}
