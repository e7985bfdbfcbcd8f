//! Paint command: replay a script, check, export

use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use labelpaint_config::PaintConfig;
use painting::unpainted_count;
use tracing::warn;

use super::{open_session, write_export};
use crate::script::PaintScript;

pub struct PaintArgs {
    pub mesh: PathBuf,
    pub script: PathBuf,
    pub out: PathBuf,
    pub force: bool,
}

pub fn run(args: PaintArgs, config: &PaintConfig) -> Result<()> {
    let mut session = open_session(&args.mesh, config)?;

    let text = std::fs::read_to_string(&args.script)
        .with_context(|| format!("Failed to read script {}", args.script.display()))?;
    let script = PaintScript::from_json(&text)
        .with_context(|| format!("Failed to parse script {}", args.script.display()))?;
    let hits = script.replay(&mut session)?;

    println!(
        "Replayed {} strokes ({} vertex hits)",
        script.strokes.len(),
        hits
    );

    if !session.check_completeness() {
        let unpainted = session
            .mesh()
            .map(|m| unpainted_count(m.vertices()))
            .unwrap_or(0);
        if !args.force {
            bail!(
                "{unpainted} vertices are still unpainted; paint them or pass --force to export anyway"
            );
        }
        warn!("Exporting with {} unpainted vertices", unpainted);
    }

    let export = session.export()?;
    let path = write_export(&args.out, &export, &args.mesh)?;
    println!("Exported {}", path.display());
    Ok(())
}
