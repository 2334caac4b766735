//! # Helix
//!
//! Writer and reader for the Helix (.hx) binary scene format.
//!
//! A producer builds an exporter-owned [`scene::SceneDocument`] (meshes,
//! textures, materials and scenes with an object hierarchy) and hands it to
//! [`export::export`]. Every written record gets a dense id; relations between
//! records (hierarchy, mesh and material references, group instancing) are
//! collected as typed links and flushed after the object list.
//!
//! ## Modules
//!
//! - [`util`] - Errors, math re-exports
//! - [`hx`] - Low-level format: constants, property encoder, object and link tables, decoder
//! - [`scene`] - Exporter-owned scene model
//! - [`export`] - Scene writer and per-run export context
//!
//! ## Example
//!
//! ```ignore
//! use helix::prelude::*;
//!
//! let mut doc = SceneDocument::new();
//! doc.add_scene(Scene::new("Main").with_root(SceneObject::light("Sun", Light::directional())));
//! export_to_path("scene.hx", &doc, &ExportOptions::default())?;
//!
//! let archive = IArchive::open("scene.hx")?;
//! assert!(archive.dangling_links().is_empty());
//! ```

pub mod util;
pub mod hx;
pub mod scene;
pub mod export;

pub use util::{EncodeError, Error, Result};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::util::{EncodeError, Error, Result, Transform};
    pub use crate::hx::{IArchive, LightingMode, LightingModel, LinkKind, ObjectType, PropertyType};
    pub use crate::scene::*;
    pub use crate::export::{export, export_to_path, export_to_vec, ExportOptions, ExportSummary};
}
