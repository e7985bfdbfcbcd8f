//! labelpaint painting system - per-vertex label painting and OBJ export
//!
//! This crate provides the core of the label painter:
//! - [`types`] - Colors, rays, camera and model transform
//! - [`mesh`] - Vertex streams and triangulated meshes
//! - [`projection`] - Pointer ray projection into world and local space
//! - [`raycast`] - Ray/triangle and ray/mesh intersection
//! - [`brush`] - Brush state and the labelled palette
//! - [`painter`] - Per-vertex painting under the brush
//! - [`indicator`] - Brush indicator placement and distance tracking
//! - [`completeness`] - Unpainted vertex detection
//! - [`export`] - Duplicate welding, color reconciliation and OBJ text
//! - [`load`] - OBJ parsing into a paintable mesh
//! - [`session`] - Session state tying the above together per frame

pub mod brush;
pub mod completeness;
pub mod constants;
pub mod error;
pub mod export;
pub mod indicator;
pub mod load;
pub mod mesh;
pub mod painter;
pub mod projection;
pub mod raycast;
pub mod session;
pub mod types;

pub use brush::*;
pub use completeness::*;
pub use constants::*;
pub use error::*;
pub use export::{ExportOptions, export_obj, export_streams, obj_file_name};
pub use indicator::*;
pub use load::*;
pub use mesh::*;
pub use painter::*;
pub use projection::*;
pub use raycast::*;
pub use session::*;
pub use types::*;
