//! Brush state and the labelled brush palette
//!
//! The brush is recomputed from UI parameters every frame; only `distance`
//! carries over between frames (it holds the last successful raycast).

use labelpaint_config::{InteractionMode, brush_radius};

use crate::constants::INITIAL_BRUSH_DISTANCE;
use crate::types::Rgb;

/// Current brush parameters
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BrushState {
    /// Brush radius in world units (UI size / 100)
    pub size: f64,
    /// Paint color
    pub color: Rgb,
    /// Whether painting happens this frame
    pub enabled: bool,
    /// Last measured view-axis distance from camera to surface
    pub distance: f64,
}

impl Default for BrushState {
    fn default() -> Self {
        Self {
            size: brush_radius(labelpaint_config::DEFAULT_BRUSH_SIZE),
            color: BrushPalette::standard().presets()[0].color,
            enabled: false,
            distance: INITIAL_BRUSH_DISTANCE,
        }
    }
}

impl BrushState {
    /// Create a brush with the given radius and color, disabled
    pub fn new(size: f64, color: Rgb) -> Self {
        Self {
            size,
            color,
            ..Default::default()
        }
    }

    /// Set the radius from a UI size in [1, 50]
    pub fn set_ui_size(&mut self, ui_size: u32) {
        self.size = brush_radius(ui_size);
    }
}

/// Whether the brush paints this frame.
///
/// True while the pointer is held in paint mode, or while a momentary
/// paint-override key is held regardless of mode.
pub fn brush_enabled(pointer_held: bool, mode: InteractionMode, override_held: bool) -> bool {
    (pointer_held && mode == InteractionMode::Paint) || override_held
}

/// A named label color bound to a hotkey
#[derive(Debug, Clone, PartialEq)]
pub struct BrushPreset {
    pub hotkey: char,
    pub color: Rgb,
    pub label: String,
}

impl BrushPreset {
    pub fn new(hotkey: char, color: Rgb, label: impl Into<String>) -> Self {
        Self {
            hotkey,
            color,
            label: label.into(),
        }
    }
}

/// Ordered set of brush presets
#[derive(Debug, Clone, PartialEq)]
pub struct BrushPalette {
    presets: Vec<BrushPreset>,
}

impl Default for BrushPalette {
    fn default() -> Self {
        Self::standard()
    }
}

impl BrushPalette {
    pub fn new(presets: Vec<BrushPreset>) -> Self {
        Self { presets }
    }

    /// Body-part label palette: one color family per limb, darker shades
    /// closer to the torso.
    pub fn standard() -> Self {
        let preset = |hotkey, hex: u32, label| {
            let color = Rgb::from_u8((hex >> 16) as u8, (hex >> 8) as u8, hex as u8);
            BrushPreset::new(hotkey, color, label)
        };
        Self::new(vec![
            preset('q', 0x33691e, "head"),
            preset('w', 0x558b2f, "chest"),
            preset('e', 0x7cb342, "abdomen"),
            preset('r', 0xaed581, "pelvis"),
            preset('a', 0x006064, "left upper arm"),
            preset('s', 0x00acc1, "left lower arm"),
            preset('d', 0x4dd0e1, "left hand"),
            preset('f', 0xff6f00, "right upper arm"),
            preset('g', 0xffb300, "right lower arm"),
            preset('h', 0xffd54f, "right hand"),
            preset('z', 0x4a148c, "left upper leg"),
            preset('x', 0x8e24aa, "left lower leg"),
            preset('c', 0xba68c8, "left foot"),
            preset('v', 0x880e4f, "right upper leg"),
            preset('b', 0xd81b60, "right lower leg"),
            preset('n', 0xf06292, "right foot"),
        ])
    }

    pub fn presets(&self) -> &[BrushPreset] {
        &self.presets
    }

    pub fn get(&self, index: usize) -> Option<&BrushPreset> {
        self.presets.get(index)
    }

    /// Index of the preset bound to `key` (case-insensitive)
    pub fn find_hotkey(&self, key: char) -> Option<usize> {
        let key = key.to_ascii_lowercase();
        self.presets.iter().position(|p| p.hotkey == key)
    }

    pub fn len(&self) -> usize {
        self.presets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.presets.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_brush_default() {
        let brush = BrushState::default();
        assert!((brush.size - 0.15).abs() < 1e-12);
        assert!(!brush.enabled);
        assert_eq!(brush.distance, INITIAL_BRUSH_DISTANCE);
    }

    #[test]
    fn test_set_ui_size() {
        let mut brush = BrushState::default();
        brush.set_ui_size(50);
        assert!((brush.size - 0.5).abs() < 1e-12);
        brush.set_ui_size(0);
        assert!((brush.size - 0.01).abs() < 1e-12);
    }

    #[test]
    fn test_brush_enabled_rules() {
        assert!(brush_enabled(true, InteractionMode::Paint, false));
        assert!(!brush_enabled(true, InteractionMode::Camera, false));
        assert!(!brush_enabled(false, InteractionMode::Paint, false));
        assert!(brush_enabled(false, InteractionMode::Camera, true));
    }

    #[test]
    fn test_standard_palette() {
        let palette = BrushPalette::standard();
        assert_eq!(palette.len(), 16);
        assert_eq!(palette.find_hotkey('Q'), Some(0));
        assert_eq!(palette.find_hotkey('n'), Some(15));
        assert_eq!(palette.find_hotkey('1'), None);

        let head = palette.get(0).unwrap();
        assert_eq!(head.label, "head");
        assert_eq!(head.color, Rgb::from_hex("#33691e").unwrap());
    }
}
