//! labelpaint - headless label painting for triangle meshes

mod commands;
mod config;
mod script;

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Result;
use clap::{Parser, Subcommand};
use commands::{check, export, paint};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "labelpaint")]
#[command(about = "Paint labels onto mesh vertices and export colored OBJ files", long_about = None)]
#[command(version)]
struct Cli {
    /// JSON file with brush and export settings
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Replay a paint script on a mesh and export the result
    Paint {
        /// Mesh to paint (OBJ)
        mesh: PathBuf,

        /// JSON paint script
        #[arg(long)]
        script: PathBuf,

        /// Directory the exported OBJ is written to
        #[arg(long, default_value = "out")]
        out: PathBuf,

        /// Export even if some vertices are still unpainted
        #[arg(long)]
        force: bool,
    },

    /// Report whether every vertex of a mesh carries a label color
    Check {
        /// Mesh to check (OBJ with vertex colors)
        mesh: PathBuf,
    },

    /// Weld and re-serialize a mesh without painting
    Export {
        /// Mesh to export (OBJ)
        mesh: PathBuf,

        /// Directory the exported OBJ is written to
        #[arg(long, default_value = "out")]
        out: PathBuf,

        /// Fraction digits, overrides the config
        #[arg(long)]
        precision: Option<usize>,

        /// Write plain `v x y z` lines without colors
        #[arg(long)]
        no_colors: bool,
    },
}

fn main() -> Result<ExitCode> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = config::load(cli.config.as_deref())?;

    match cli.command {
        Commands::Paint {
            mesh,
            script,
            out,
            force,
        } => paint::run(
            paint::PaintArgs {
                mesh,
                script,
                out,
                force,
            },
            &config,
        )?,
        Commands::Check { mesh } => {
            if !check::run(&mesh, &config)? {
                return Ok(ExitCode::FAILURE);
            }
        }
        Commands::Export {
            mesh,
            out,
            precision,
            no_colors,
        } => export::run(
            export::ExportArgs {
                mesh,
                out,
                precision,
                no_colors,
            },
            &config,
        )?,
    }

    Ok(ExitCode::SUCCESS)
}
