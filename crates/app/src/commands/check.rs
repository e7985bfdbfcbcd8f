//! Check command

use std::path::Path;

use anyhow::Result;
use labelpaint_config::PaintConfig;
use painting::unpainted_count;

use super::open_session;

/// Report completeness of `mesh`. Returns whether every vertex is painted.
pub fn run(mesh: &Path, config: &PaintConfig) -> Result<bool> {
    let session = open_session(mesh, config)?;

    if session.check_completeness() {
        println!("{}: all vertices painted", mesh.display());
        return Ok(true);
    }

    let (unpainted, total) = session
        .mesh()
        .map(|m| (unpainted_count(m.vertices()), m.vertex_count()))
        .unwrap_or((0, 0));
    println!(
        "{}: {} of {} vertices unpainted",
        mesh.display(),
        unpainted,
        total
    );
    Ok(false)
}
