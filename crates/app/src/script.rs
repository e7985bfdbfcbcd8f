//! Paint scripts
//!
//! A script stands in for interactive input: a camera and a list of strokes,
//! each a run of pointer positions painted with one brush setting.
//!
//! ```json
//! {
//!   "camera": { "position": [0.0, 0.2, 2.5], "forward": [0.0, -0.08, -1.0] },
//!   "strokes": [
//!     { "preset": "q", "size": 20, "points": [[0.0, 0.1], [0.05, 0.1]] },
//!     { "color": "#ff0000", "backside": false, "points": [[-0.2, -0.4]] }
//!   ]
//! }
//! ```

use anyhow::{Result, anyhow, bail};
use glam::DVec2;
use painting::{Camera, FrameInput, PaintSession, Rgb};
use serde::Deserialize;
use tracing::debug;

#[derive(Debug, Clone, Deserialize)]
pub struct PaintScript {
    #[serde(default)]
    pub camera: Camera,
    #[serde(default)]
    pub strokes: Vec<Stroke>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Stroke {
    /// Palette hotkey selecting the label color
    #[serde(default)]
    pub preset: Option<char>,
    /// Explicit `#rrggbb` color, used when no preset is given
    #[serde(default)]
    pub color: Option<String>,
    /// Brush size in UI units (1..=50)
    #[serde(default)]
    pub size: Option<u32>,
    /// Paint through to back-facing vertices
    #[serde(default)]
    pub backside: Option<bool>,
    /// Camera for this stroke only
    #[serde(default)]
    pub camera: Option<Camera>,
    /// Pointer positions in normalized device coordinates
    pub points: Vec<DVec2>,
}

impl PaintScript {
    pub fn from_json(text: &str) -> Result<Self> {
        Ok(serde_json::from_str(text)?)
    }

    /// Replay every stroke on `session`. Returns the number of paint hits.
    pub fn replay(&self, session: &mut PaintSession) -> Result<usize> {
        let mut painted = 0;
        for (index, stroke) in self.strokes.iter().enumerate() {
            stroke
                .apply_brush(session)
                .map_err(|e| e.context(format!("stroke {index}")))?;

            let camera = stroke.camera.unwrap_or(self.camera);
            session.pointer_down();
            for &pointer in &stroke.points {
                painted += session.tick(&FrameInput { camera, pointer }).painted;
            }
            session.pointer_up();
        }
        debug!(
            "replayed {} strokes, {} vertex hits",
            self.strokes.len(),
            painted
        );
        Ok(painted)
    }
}

impl Stroke {
    fn apply_brush(&self, session: &mut PaintSession) -> Result<()> {
        match (self.preset, &self.color) {
            (Some(key), _) => {
                let index = session
                    .palette()
                    .find_hotkey(key)
                    .ok_or_else(|| anyhow!("unknown preset hotkey '{key}'"))?;
                session.select_preset(index);
            }
            (None, Some(hex)) => {
                let color =
                    Rgb::from_hex(hex).ok_or_else(|| anyhow!("invalid color '{hex}'"))?;
                session.set_brush_color(color);
            }
            (None, None) => {}
        }
        if let Some(size) = self.size {
            if size == 0 {
                bail!("brush size must be at least 1");
            }
            session.set_brush_size(size);
        }
        if let Some(backside) = self.backside {
            session.set_backside_allowed(backside);
        }
        Ok(())
    }
}
