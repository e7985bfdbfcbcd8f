//! Shared configuration for labelpaint
//!
//! This crate provides the single source of truth for brush defaults,
//! interaction mode and export formatting shared by the painting library
//! and the command-line front end.

use serde::{Deserialize, Serialize};

/// Smallest brush size the UI can select
pub const MIN_BRUSH_SIZE: u32 = 1;

/// Largest brush size the UI can select
pub const MAX_BRUSH_SIZE: u32 = 50;

/// Default brush size (UI units, divided by 100 for model units)
pub const DEFAULT_BRUSH_SIZE: u32 = 15;

/// Divisor mapping UI brush size to model-space radius
pub const BRUSH_SIZE_DIVISOR: f64 = 100.0;

/// Fraction digits written for coordinates and color channels
pub const DEFAULT_EXPORT_PRECISION: usize = 6;

/// Decimal places used to weld duplicate positions on export
pub const DEFAULT_WELD_DECIMALS: u32 = 4;

/// Largest weld precision honored; higher settings are clamped to it
pub const MAX_WELD_DECIMALS: u32 = 9;

/// What a held pointer button does by default
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InteractionMode {
    /// Pointer drags paint the mesh
    #[default]
    Paint,
    /// Pointer drags orbit the camera
    Camera,
}

impl InteractionMode {
    /// Parse from environment variable LABELPAINT_MODE
    pub fn from_env() -> Option<Self> {
        match std::env::var("LABELPAINT_MODE").as_deref() {
            Ok("camera") => Some(Self::Camera),
            Ok("paint") | Ok("brush") => Some(Self::Paint),
            _ => None,
        }
    }

    /// The other mode
    pub fn toggled(self) -> Self {
        match self {
            Self::Paint => Self::Camera,
            Self::Camera => Self::Paint,
        }
    }
}

/// Paint session configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PaintConfig {
    /// Brush size in UI units (1..=50)
    pub brush_size: u32,
    /// Initial brush color as `#rrggbb`; empty selects the first palette preset
    pub brush_color: String,
    /// Paint vertices whose normals face away from the viewer
    pub backside_allowed: bool,
    /// Default pointer interaction
    pub mode: InteractionMode,
    /// Fraction digits in exported OBJ text
    pub export_precision: usize,
    /// Decimal places for duplicate welding on export
    pub weld_decimals: u32,
}

impl Default for PaintConfig {
    fn default() -> Self {
        Self {
            brush_size: DEFAULT_BRUSH_SIZE,
            brush_color: String::new(),
            backside_allowed: true,
            mode: InteractionMode::default(),
            export_precision: DEFAULT_EXPORT_PRECISION,
            weld_decimals: DEFAULT_WELD_DECIMALS,
        }
    }
}

impl PaintConfig {
    /// Apply environment overrides on top of this config
    pub fn with_env_overrides(mut self) -> Self {
        if let Some(mode) = InteractionMode::from_env() {
            self.mode = mode;
        }
        self
    }
}

/// Clamp a UI brush size into [MIN_BRUSH_SIZE, MAX_BRUSH_SIZE]
pub fn clamp_brush_size(size: u32) -> u32 {
    size.clamp(MIN_BRUSH_SIZE, MAX_BRUSH_SIZE)
}

/// Convert a UI brush size into a model-space brush radius
pub fn brush_radius(size: u32) -> f64 {
    clamp_brush_size(size) as f64 / BRUSH_SIZE_DIVISOR
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = PaintConfig::default();
        assert_eq!(config.brush_size, DEFAULT_BRUSH_SIZE);
        assert!(config.backside_allowed);
        assert_eq!(config.mode, InteractionMode::Paint);
        assert_eq!(config.export_precision, 6);
    }

    #[test]
    fn test_brush_radius_clamps() {
        assert!((brush_radius(15) - 0.15).abs() < 1e-12);
        assert!((brush_radius(0) - 0.01).abs() < 1e-12);
        assert!((brush_radius(500) - 0.5).abs() < 1e-12);
    }

    #[test]
    fn test_mode_toggle() {
        assert_eq!(InteractionMode::Paint.toggled(), InteractionMode::Camera);
        assert_eq!(InteractionMode::Camera.toggled(), InteractionMode::Paint);
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config: PaintConfig = serde_json::from_str(r#"{"brush_size": 30, "mode": "camera"}"#)
            .unwrap();
        assert_eq!(config.brush_size, 30);
        assert_eq!(config.mode, InteractionMode::Camera);
        assert_eq!(config.weld_decimals, DEFAULT_WELD_DECIMALS);
    }
}
