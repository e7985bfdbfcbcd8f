//! Color completeness check.

use crate::constants::UNPAINTED;
use crate::mesh::VertexBuffer;

/// True when no vertex still carries the unpainted sentinel.
///
/// Uses exact color equality. An empty buffer is complete.
pub fn all_painted(vertices: &VertexBuffer) -> bool {
    !vertices.colors().iter().any(|c| *c == UNPAINTED)
}

/// Number of vertices still at the unpainted sentinel
pub fn unpainted_count(vertices: &VertexBuffer) -> usize {
    vertices.colors().iter().filter(|c| **c == UNPAINTED).count()
}
