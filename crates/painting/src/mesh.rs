//! Vertex buffer and triangulated mesh storage.
//!
//! Positions, normals and colors are kept as parallel streams of equal
//! length. Topology is fixed once a mesh is built; only per-vertex colors
//! change afterwards.

use glam::DVec3;

use crate::constants::UNPAINTED;
use crate::error::MalformedMeshError;
use crate::types::Rgb;

/// Parallel position, normal and color streams
#[derive(Debug, Clone, Default)]
pub struct VertexBuffer {
    positions: Vec<DVec3>,
    normals: Vec<DVec3>,
    colors: Vec<Rgb>,
    /// Colors changed since the renderer last took them
    colors_dirty: bool,
}

impl VertexBuffer {
    /// Build a buffer from positions only.
    ///
    /// Normals start at zero and colors at the unpainted sentinel.
    pub fn from_positions(positions: Vec<DVec3>) -> Self {
        let count = positions.len();
        Self {
            positions,
            normals: vec![DVec3::ZERO; count],
            colors: vec![UNPAINTED; count],
            colors_dirty: false,
        }
    }

    /// Build a buffer from explicit streams.
    ///
    /// Missing normals are zero-filled and missing colors are synthesized
    /// with the unpainted sentinel. Present streams must match the position
    /// count.
    pub fn from_streams(
        positions: Vec<DVec3>,
        normals: Option<Vec<DVec3>>,
        colors: Option<Vec<Rgb>>,
    ) -> Result<Self, MalformedMeshError> {
        let count = positions.len();
        let normals = normals.unwrap_or_else(|| vec![DVec3::ZERO; count]);
        let colors = colors.unwrap_or_else(|| vec![UNPAINTED; count]);

        if normals.len() != count || colors.len() != count {
            return Err(MalformedMeshError::StreamLengthMismatch {
                positions: count,
                normals: normals.len(),
                colors: colors.len(),
            });
        }

        Ok(Self {
            positions,
            normals,
            colors,
            colors_dirty: false,
        })
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.positions.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    #[inline]
    pub fn positions(&self) -> &[DVec3] {
        &self.positions
    }

    #[inline]
    pub fn normals(&self) -> &[DVec3] {
        &self.normals
    }

    #[inline]
    pub fn colors(&self) -> &[Rgb] {
        &self.colors
    }

    /// Overwrite one vertex color. Out-of-range indices are ignored.
    pub fn set_color(&mut self, index: usize, color: Rgb) {
        if let Some(slot) = self.colors.get_mut(index) {
            *slot = color;
            self.colors_dirty = true;
        }
    }

    /// Read positions and normals while writing colors.
    ///
    /// Callers manage the dirty flag.
    pub(crate) fn streams_mut(&mut self) -> (&[DVec3], &[DVec3], &mut [Rgb]) {
        (&self.positions, &self.normals, &mut self.colors)
    }

    pub(crate) fn mark_colors_dirty(&mut self) {
        self.colors_dirty = true;
    }

    /// Whether colors changed since the last [`take_colors_dirty`](Self::take_colors_dirty)
    pub fn colors_dirty(&self) -> bool {
        self.colors_dirty
    }

    /// Return and clear the dirty flag (renderer re-upload hook)
    pub fn take_colors_dirty(&mut self) -> bool {
        std::mem::take(&mut self.colors_dirty)
    }

    /// Color stream as raw bytes for GPU upload
    pub fn color_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.colors)
    }

    /// Axis-aligned bounds of all positions, `None` when empty
    pub fn bounds(&self) -> Option<(DVec3, DVec3)> {
        let first = *self.positions.first()?;
        Some(
            self.positions
                .iter()
                .fold((first, first), |(min, max), p| (min.min(*p), max.max(*p))),
        )
    }
}

/// A vertex buffer plus triangle index triples referencing it
#[derive(Debug, Clone)]
pub struct TriangulatedMesh {
    /// Base name used for exported files
    name: String,
    vertices: VertexBuffer,
    faces: Vec<[u32; 3]>,
}

impl TriangulatedMesh {
    /// Build a mesh, validating its structure.
    pub fn new(
        name: impl Into<String>,
        vertices: VertexBuffer,
        faces: Vec<[u32; 3]>,
    ) -> Result<Self, MalformedMeshError> {
        validate_streams(vertices.positions(), Some(vertices.colors()), &faces)?;
        Ok(Self {
            name: name.into(),
            vertices,
            faces,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn vertices(&self) -> &VertexBuffer {
        &self.vertices
    }

    pub fn vertices_mut(&mut self) -> &mut VertexBuffer {
        &mut self.vertices
    }

    pub fn faces(&self) -> &[[u32; 3]] {
        &self.faces
    }

    #[inline]
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    #[inline]
    pub fn face_count(&self) -> usize {
        self.faces.len()
    }

    /// Corner positions of one face
    pub fn face_positions(&self, face: usize) -> (DVec3, DVec3, DVec3) {
        let [a, b, c] = self.faces[face];
        let positions = self.vertices.positions();
        (
            positions[a as usize],
            positions[b as usize],
            positions[c as usize],
        )
    }

    /// Recompute smooth vertex normals from the faces.
    ///
    /// Each face contributes its unnormalized cross product, so larger faces
    /// weigh more. Vertices with no faces (or only degenerate ones) get a
    /// zero normal.
    pub fn compute_vertex_normals(&mut self) {
        let mut accum = vec![DVec3::ZERO; self.vertices.len()];
        for face in 0..self.faces.len() {
            let (a, b, c) = self.face_positions(face);
            let face_normal = (b - a).cross(c - a);
            for &index in &self.faces[face] {
                accum[index as usize] += face_normal;
            }
        }
        for normal in &mut accum {
            *normal = normal.try_normalize().unwrap_or(DVec3::ZERO);
        }
        self.vertices.normals = accum;
    }
}

/// Check that streams and faces form a valid triangulated mesh.
pub fn validate_streams(
    positions: &[DVec3],
    colors: Option<&[Rgb]>,
    faces: &[[u32; 3]],
) -> Result<(), MalformedMeshError> {
    if positions.is_empty() {
        return Err(MalformedMeshError::NoVertices);
    }
    if faces.is_empty() {
        return Err(MalformedMeshError::NoFaces);
    }
    if let Some(colors) = colors {
        if colors.len() != positions.len() {
            return Err(MalformedMeshError::StreamLengthMismatch {
                positions: positions.len(),
                normals: positions.len(),
                colors: colors.len(),
            });
        }
    }
    if let Some(index) = positions.iter().position(|p| !p.is_finite()) {
        return Err(MalformedMeshError::NonFinitePosition(index));
    }
    for (face, corners) in faces.iter().enumerate() {
        if let Some(&index) = corners.iter().find(|&&i| i as usize >= positions.len()) {
            return Err(MalformedMeshError::IndexOutOfRange {
                face,
                index,
                vertex_count: positions.len(),
            });
        }
    }
    Ok(())
}
