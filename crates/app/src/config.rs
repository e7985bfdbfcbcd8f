//! Configuration loading

use std::path::Path;

use anyhow::{Context, Result};
use labelpaint_config::PaintConfig;
use tracing::info;

/// Read `path` as JSON if given, otherwise use defaults. Environment
/// overrides (LABELPAINT_MODE) are applied last.
pub fn load(path: Option<&Path>) -> Result<PaintConfig> {
    let config = match path {
        Some(path) => {
            let text = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read config {}", path.display()))?;
            let config = parse(&text)
                .with_context(|| format!("Failed to parse config {}", path.display()))?;
            info!("Loaded config from {}", path.display());
            config
        }
        None => PaintConfig::default(),
    };
    Ok(config.with_env_overrides())
}

fn parse(text: &str) -> Result<PaintConfig, serde_json::Error> {
    serde_json::from_str(text)
}
