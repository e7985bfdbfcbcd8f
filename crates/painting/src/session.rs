//! Paint session state
//!
//! A [`PaintSession`] owns everything a painting front end needs between
//! frames: the loaded mesh, brush, palette, interaction mode and input
//! state. The front end feeds it pointer and key events plus one
//! [`FrameInput`] per render tick, and triggers completeness checks and
//! exports as discrete actions.
//!
//! Painting and exporting are mutually exclusive phases. [`PaintSession::tick`]
//! borrows the session mutably while [`PaintSession::check_completeness`] and
//! [`PaintSession::export`] borrow it shared, so a check or export always sees
//! a finished tick and completes before the next one can mutate colors.

use std::io::BufRead;

use labelpaint_config::{InteractionMode, PaintConfig};
use tracing::{debug, info, warn};

use crate::brush::{BrushPalette, BrushState, brush_enabled};
use crate::completeness::{all_painted, unpainted_count};
use crate::constants::INITIAL_BRUSH_DISTANCE;
use crate::error::{ExportError, LoadError};
use crate::export::{ExportOptions, export_obj, obj_file_name};
use crate::indicator::{IndicatorTarget, IndicatorTransform, update_indicator};
use crate::load::{LoadedMesh, load_obj};
use crate::mesh::TriangulatedMesh;
use crate::painter::paint;
use crate::projection::{project_ray, ray_to_local};
use crate::types::{FrameInput, ModelTransform, Ray, Rgb};

/// Result of one render tick
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameReport {
    /// Pointer ray in world space
    pub world_ray: Ray,
    /// Indicator placement, `None` when no mesh is loaded
    pub indicator: Option<IndicatorTransform>,
    /// Vertices painted this tick
    pub painted: usize,
}

/// OBJ text ready to be written by the caller
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ObjExport {
    pub file_name: String,
    pub text: String,
}

pub struct PaintSession {
    loaded: Option<LoadedMesh>,
    brush: BrushState,
    palette: BrushPalette,
    mode: InteractionMode,
    backside_allowed: bool,
    pointer_held: bool,
    /// Hotkey currently holding the momentary paint override
    override_key: Option<char>,
    export_options: ExportOptions,
}

impl Default for PaintSession {
    fn default() -> Self {
        Self::new(&PaintConfig::default())
    }
}

impl PaintSession {
    /// Create a session with brush, mode and export settings from `config`.
    pub fn new(config: &PaintConfig) -> Self {
        let palette = BrushPalette::standard();
        let mut brush = BrushState::default();
        brush.set_ui_size(config.brush_size);

        if !config.brush_color.is_empty() {
            match Rgb::from_hex(&config.brush_color) {
                Some(color) => brush.color = color,
                None => warn!(
                    "PaintSession: invalid brush color '{}', using palette default",
                    config.brush_color
                ),
            }
        }

        Self {
            loaded: None,
            brush,
            palette,
            mode: config.mode,
            backside_allowed: config.backside_allowed,
            pointer_held: false,
            override_key: None,
            export_options: ExportOptions::from(config),
        }
    }

    /// Parse OBJ text and make it the painted mesh.
    ///
    /// On error the previously loaded mesh, if any, stays in place.
    pub fn load_mesh<R: BufRead>(&mut self, reader: &mut R, name: &str) -> Result<(), LoadError> {
        let loaded = load_obj(reader, name)?;
        self.set_mesh(loaded);
        Ok(())
    }

    /// Replace the painted mesh with an already loaded one.
    pub fn set_mesh(&mut self, loaded: LoadedMesh) {
        self.loaded = Some(loaded);
        self.brush.distance = INITIAL_BRUSH_DISTANCE;
    }

    pub fn mesh(&self) -> Option<&TriangulatedMesh> {
        self.loaded.as_ref().map(|l| &l.mesh)
    }

    pub fn transform(&self) -> Option<&ModelTransform> {
        self.loaded.as_ref().map(|l| &l.transform)
    }

    pub fn brush(&self) -> &BrushState {
        &self.brush
    }

    pub fn palette(&self) -> &BrushPalette {
        &self.palette
    }

    pub fn mode(&self) -> InteractionMode {
        self.mode
    }

    pub fn backside_allowed(&self) -> bool {
        self.backside_allowed
    }

    pub fn export_options(&self) -> &ExportOptions {
        &self.export_options
    }

    pub fn set_export_options(&mut self, options: ExportOptions) {
        self.export_options = options;
    }

    /// Set the brush radius from a UI size, clamped to [1, 50]
    pub fn set_brush_size(&mut self, ui_size: u32) {
        self.brush.set_ui_size(ui_size);
    }

    pub fn set_brush_color(&mut self, color: Rgb) {
        self.brush.color = color;
    }

    /// Use the color of palette entry `index`. Returns false if out of range.
    pub fn select_preset(&mut self, index: usize) -> bool {
        match self.palette.get(index) {
            Some(preset) => {
                self.brush.color = preset.color;
                true
            }
            None => false,
        }
    }

    pub fn set_backside_allowed(&mut self, allowed: bool) {
        self.backside_allowed = allowed;
    }

    pub fn pointer_down(&mut self) {
        self.pointer_held = true;
        self.refresh_enabled();
    }

    pub fn pointer_up(&mut self) {
        self.pointer_held = false;
        self.refresh_enabled();
    }

    /// Handle a key press.
    ///
    /// A palette hotkey selects its color and holds the paint override until
    /// released. Presses while another hotkey is held are ignored. Returns
    /// whether the key was consumed.
    pub fn key_down(&mut self, key: char) -> bool {
        if self.override_key.is_some() {
            return false;
        }
        let Some(index) = self.palette.find_hotkey(key) else {
            return false;
        };

        self.select_preset(index);
        self.override_key = Some(key.to_ascii_lowercase());
        self.refresh_enabled();
        true
    }

    /// Handle a key release, dropping the override if `key` holds it.
    pub fn key_up(&mut self, key: char) {
        if self.override_key == Some(key.to_ascii_lowercase()) {
            self.override_key = None;
            self.refresh_enabled();
        }
    }

    /// Flip the default pointer interaction between painting and camera
    pub fn toggle_mode(&mut self) {
        self.mode = self.mode.toggled();
        self.refresh_enabled();
        debug!("PaintSession: interaction mode now {:?}", self.mode);
    }

    fn refresh_enabled(&mut self) {
        self.brush.enabled =
            brush_enabled(self.pointer_held, self.mode, self.override_key.is_some());
    }

    /// Run one render tick: project the pointer, place the indicator and
    /// paint when the brush is enabled.
    pub fn tick(&mut self, frame: &FrameInput) -> FrameReport {
        let camera = &frame.camera;
        let world_ray = project_ray(camera, frame.pointer);
        self.refresh_enabled();

        let Some(loaded) = self.loaded.as_mut() else {
            return FrameReport {
                world_ray,
                indicator: None,
                painted: 0,
            };
        };

        let indicator = update_indicator(
            &world_ray,
            camera.view_dir(),
            camera.near,
            Some(IndicatorTarget {
                mesh: &loaded.mesh,
                transform: &loaded.transform,
            }),
            &mut self.brush,
        );

        let painted = if self.brush.enabled {
            let local_ray = ray_to_local(&world_ray, &loaded.transform);
            paint(
                &mut loaded.mesh,
                &local_ray,
                &self.brush,
                loaded.transform.scale,
                self.backside_allowed,
            )
        } else {
            0
        };

        FrameReport {
            world_ray,
            indicator: Some(indicator),
            painted,
        }
    }

    /// Whether every vertex has been painted. True when no mesh is loaded.
    pub fn check_completeness(&self) -> bool {
        let Some(loaded) = self.loaded.as_ref() else {
            return true;
        };
        let vertices = loaded.mesh.vertices();
        let complete = all_painted(vertices);
        if !complete {
            info!(
                "Completeness check: {} of {} vertices unpainted",
                unpainted_count(vertices),
                vertices.len()
            );
        }
        complete
    }

    /// Weld, reconcile and serialize the current mesh.
    pub fn export(&self) -> Result<ObjExport, ExportError> {
        let loaded = self.loaded.as_ref().ok_or(ExportError::NoMesh)?;
        let text = export_obj(&loaded.mesh, &self.export_options)?;
        Ok(ObjExport {
            file_name: obj_file_name(loaded.mesh.name()),
            text,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::UNPAINTED;
    use crate::types::Camera;
    use glam::{DVec2, DVec3};

    const EPSILON: f64 = 1e-9;
    const TRIANGLE: &str = "v 0 0 0\nv 1 0 0\nv 0 1 0\nf 1 2 3\n";

    /// Session with the unit triangle loaded. It lands in world space as
    /// (-1,-1,0), (1,-1,0), (-1,1,0) facing +Z.
    fn triangle_session() -> PaintSession {
        let mut session = PaintSession::default();
        session.load_mesh(&mut TRIANGLE.as_bytes(), "triangle").unwrap();
        session
    }

    /// Pointer coordinates that make `camera` look through `target`
    fn pointer_at(camera: &Camera, target: DVec3) -> DVec2 {
        let forward = camera.view_dir();
        let right = forward.cross(camera.up).normalize();
        let up = right.cross(forward);
        let d = target - camera.position;
        let depth = d.dot(forward);
        let tan_half = (camera.fov_y * 0.5).tan();
        DVec2::new(
            d.dot(right) / depth / (tan_half * camera.aspect),
            d.dot(up) / depth / tan_half,
        )
    }

    fn frame_at(camera: Camera, target: DVec3) -> FrameInput {
        FrameInput {
            camera,
            pointer: pointer_at(&camera, target),
        }
    }

    fn front_camera() -> Camera {
        Camera::looking_at(DVec3::new(0.0, 0.0, 3.0), DVec3::ZERO)
    }

    #[test]
    fn test_tick_without_mesh() {
        let mut session = PaintSession::default();
        session.pointer_down();
        let report = session.tick(&frame_at(front_camera(), DVec3::ZERO));

        assert!(report.indicator.is_none());
        assert_eq!(report.painted, 0);
        assert!((report.world_ray.direction - DVec3::NEG_Z).length() < EPSILON);
    }

    #[test]
    fn test_pointer_paints_vertex_under_cursor() {
        let mut session = triangle_session();
        session.set_brush_color(Rgb::RED);
        session.pointer_down();

        let report = session.tick(&frame_at(front_camera(), DVec3::new(-1.0, -1.0, 0.0)));
        assert_eq!(report.painted, 1);

        let colors = session.mesh().unwrap().vertices().colors();
        assert_eq!(colors[0], Rgb::RED);
        assert_eq!(colors[1], UNPAINTED);
        assert_eq!(colors[2], UNPAINTED);
    }

    #[test]
    fn test_indicator_uses_surface_distance() {
        let mut session = triangle_session();
        let report = session.tick(&frame_at(front_camera(), DVec3::new(-0.5, -0.5, 0.0)));

        assert_eq!(report.painted, 0);
        assert!((session.brush().distance - 3.0).abs() < 1e-6);
        let indicator = report.indicator.unwrap();
        assert!((indicator.scale.x - session.brush().size / 3.0).abs() < 1e-6);
    }

    #[test]
    fn test_camera_mode_does_not_paint() {
        let mut session = triangle_session();
        session.toggle_mode();
        assert_eq!(session.mode(), InteractionMode::Camera);
        session.pointer_down();

        let report = session.tick(&frame_at(front_camera(), DVec3::new(-1.0, -1.0, 0.0)));
        assert_eq!(report.painted, 0);
    }

    #[test]
    fn test_backside_filter() {
        let mut session = triangle_session();
        session.set_backside_allowed(false);
        session.pointer_down();

        let behind = Camera::looking_at(DVec3::new(0.0, 0.0, -3.0), DVec3::ZERO);
        let report = session.tick(&frame_at(behind, DVec3::new(-1.0, -1.0, 0.0)));
        assert_eq!(report.painted, 0);

        session.set_backside_allowed(true);
        let report = session.tick(&frame_at(behind, DVec3::new(-1.0, -1.0, 0.0)));
        assert_eq!(report.painted, 1);
    }

    #[test]
    fn test_hotkey_override() {
        let mut session = triangle_session();
        session.toggle_mode();
        assert!(!session.brush().enabled);

        assert!(session.key_down('W'));
        assert!(session.brush().enabled);
        let chest = session.palette().presets()[1].color;
        assert_eq!(session.brush().color, chest);

        // A second hotkey while one is held is ignored
        assert!(!session.key_down('e'));
        assert_eq!(session.brush().color, chest);

        session.key_up('e');
        assert!(session.brush().enabled);
        session.key_up('w');
        assert!(!session.brush().enabled);

        assert!(!session.key_down('1'));
    }

    #[test]
    fn test_completeness_and_export() {
        let mut session = triangle_session();
        assert!(!session.check_completeness());

        session.set_brush_color(Rgb::BLUE);
        session.pointer_down();
        let camera = front_camera();
        for target in [
            DVec3::new(-1.0, -1.0, 0.0),
            DVec3::new(1.0, -1.0, 0.0),
            DVec3::new(-1.0, 1.0, 0.0),
        ] {
            session.tick(&frame_at(camera, target));
        }
        session.pointer_up();

        assert!(session.check_completeness());

        let export = session.export().unwrap();
        assert_eq!(export.file_name, "triangle.obj");
        assert!(export.text.starts_with("# Vertices: 3\n# Faces: 1\n"));
        assert!(export
            .text
            .contains("v 0.000000 0.000000 0.000000 0.000000 0.000000 1.000000\n"));
        assert!(export.text.ends_with("f 1 2 3\n"));
    }

    #[test]
    fn test_export_without_mesh() {
        let session = PaintSession::default();
        assert!(matches!(session.export(), Err(ExportError::NoMesh)));
        assert!(session.check_completeness());
    }

    #[test]
    fn test_check_and_export_share_the_session() {
        let mut session = triangle_session();
        session.pointer_down();
        session.tick(&frame_at(front_camera(), DVec3::new(-1.0, -1.0, 0.0)));
        session.pointer_up();

        // Both run on a shared borrow, after the tick above has finished
        let shared = &session;
        let (complete, export) = (shared.check_completeness(), shared.export().unwrap());
        assert!(!complete);
        assert_eq!(export.text.lines().count(), 6);
    }

    #[test]
    fn test_failed_load_keeps_previous_mesh() {
        let mut session = triangle_session();
        let result = session.load_mesh(&mut "v 1 1 1\nv 1 1 1\nv 1 1 1\nf 1 2 3\n".as_bytes(), "flat");

        assert!(matches!(result, Err(LoadError::DegenerateBounds)));
        assert_eq!(session.mesh().unwrap().name(), "triangle");
    }

    #[test]
    fn test_config_brush() {
        let config = PaintConfig {
            brush_size: 80,
            brush_color: "#ff0000".to_string(),
            ..Default::default()
        };
        let session = PaintSession::new(&config);
        assert!((session.brush().size - 0.5).abs() < EPSILON);
        assert_eq!(session.brush().color, Rgb::RED);
    }
}
