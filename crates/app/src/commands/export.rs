//! Export command: weld and re-serialize without painting

use std::path::PathBuf;

use anyhow::Result;
use labelpaint_config::PaintConfig;

use super::{open_session, write_export};

pub struct ExportArgs {
    pub mesh: PathBuf,
    pub out: PathBuf,
    pub precision: Option<usize>,
    pub no_colors: bool,
}

pub fn run(args: ExportArgs, config: &PaintConfig) -> Result<()> {
    let mut session = open_session(&args.mesh, config)?;

    let mut options = *session.export_options();
    if let Some(precision) = args.precision {
        options.precision = precision;
    }
    options.include_colors = !args.no_colors;
    session.set_export_options(options);

    let export = session.export()?;
    let path = write_export(&args.out, &export, &args.mesh)?;
    println!("Exported {}", path.display());
    Ok(())
}
