//! Exporter-owned scene model.
//!
//! Producers build these plain types from their host snapshot (or load them
//! from JSON) and hand them to [`crate::export`]. The writer never touches
//! host objects directly.
//!
//! - [`SceneDocument`] - everything written to one file
//! - [`Mesh`], [`Texture`], [`Material`] - shared resources
//! - [`Scene`], [`SceneObject`], [`ObjectKind`] - hierarchy
//! - [`Light`] - light parameters

mod document;
mod light;
mod object;
mod resource;

pub use document::SceneDocument;
pub use light::{Light, LightType};
pub use object::{ObjectKind, Scene, SceneObject};
pub use resource::{Material, Mesh, SubMesh, Texture};
