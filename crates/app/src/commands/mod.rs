//! Command implementations

pub mod check;
pub mod export;
pub mod paint;

use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use labelpaint_config::PaintConfig;
use painting::{ObjExport, PaintSession};
use tracing::info;

/// Create a session from `config` and load the mesh at `path` into it.
pub fn open_session(path: &Path, config: &PaintConfig) -> Result<PaintSession> {
    let file = File::open(path).with_context(|| format!("Failed to open {}", path.display()))?;
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "mesh".to_string());

    let mut session = PaintSession::new(config);
    session
        .load_mesh(&mut BufReader::new(file), &name)
        .with_context(|| format!("Failed to load mesh {}", path.display()))?;
    Ok(session)
}

/// Write an export under `out_dir`, refusing to overwrite `source`.
pub fn write_export(out_dir: &Path, export: &ObjExport, source: &Path) -> Result<PathBuf> {
    std::fs::create_dir_all(out_dir)
        .with_context(|| format!("Failed to create {}", out_dir.display()))?;

    let target = out_dir.join(&export.file_name);
    if same_file(&target, source) {
        anyhow::bail!(
            "Export would overwrite the source mesh {}; choose another --out",
            source.display()
        );
    }

    std::fs::write(&target, &export.text)
        .with_context(|| format!("Failed to write {}", target.display()))?;
    info!("Wrote {}", target.display());
    Ok(target)
}

fn same_file(a: &Path, b: &Path) -> bool {
    match (a.canonicalize(), b.canonicalize()) {
        (Ok(a), Ok(b)) => a == b,
        _ => false,
    }
}
