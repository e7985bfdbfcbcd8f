//! Error types for mesh loading and export.

use thiserror::Error;

/// Errors raised while turning mesh text into a paintable mesh.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("File could not be parsed: {0}")]
    Parse(#[source] tobj::LoadError),

    #[error("File does not describe a mesh")]
    NoMesh,

    #[error("Mesh has no vertex positions")]
    MissingPositions,

    #[error("Mesh has no triangle faces")]
    MissingFaces,

    #[error("Mesh could not be loaded (missing or non-finite vertex values)")]
    NonFiniteGeometry,

    #[error("Mesh has zero extent and cannot be fitted into the scene")]
    DegenerateBounds,

    #[error(transparent)]
    Malformed(#[from] MalformedMeshError),
}

/// Structural problems that make a mesh unusable for export.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MalformedMeshError {
    #[error("Mesh has no vertices")]
    NoVertices,

    #[error("Mesh has no faces")]
    NoFaces,

    #[error("Vertex streams differ in length: {positions} positions, {normals} normals, {colors} colors")]
    StreamLengthMismatch {
        positions: usize,
        normals: usize,
        colors: usize,
    },

    #[error("Face {face} references vertex {index} but only {vertex_count} exist")]
    IndexOutOfRange {
        face: usize,
        index: u32,
        vertex_count: usize,
    },

    #[error("Vertex {0} has a non-finite position")]
    NonFinitePosition(usize),
}

/// Errors from the export trigger of a paint session.
#[derive(Debug, Error)]
pub enum ExportError {
    #[error("No mesh is loaded")]
    NoMesh,

    #[error("Mesh is malformed: {0}")]
    Malformed(#[from] MalformedMeshError),
}
