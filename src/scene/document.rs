//! Exporter-owned snapshot of everything written to one file.

use std::collections::HashSet;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::util::{Error, Result};

use super::{Material, Mesh, Scene, Texture};

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SceneDocument {
    pub meshes: Vec<Mesh>,
    pub textures: Vec<Texture>,
    pub materials: Vec<Material>,
    pub scenes: Vec<Scene>,
    /// Index into `scenes` of the scene a loader shows first.
    pub default_scene: usize,
}

impl SceneDocument {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a JSON scene description.
    pub fn from_json(json: &str) -> Result<Self> {
        let doc: Self = serde_json::from_str(json)?;
        doc.validate()?;
        Ok(doc)
    }

    /// Load a JSON scene description from disk.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                Error::FileNotFound(path.to_path_buf())
            } else {
                Error::Io(e)
            }
        })?;
        let doc: Self = serde_json::from_reader(BufReader::new(file))?;
        doc.validate()?;
        Ok(doc)
    }

    /// Reject documents the writer cannot map to ids unambiguously.
    ///
    /// Resource names are entity identities, so they must be unique within
    /// their category. The default scene must index an existing scene.
    pub fn validate(&self) -> Result<()> {
        unique_names("mesh", self.meshes.iter().map(|m| m.name.as_str()))?;
        unique_names("texture", self.textures.iter().map(|t| t.name.as_str()))?;
        unique_names("material", self.materials.iter().map(|m| m.name.as_str()))?;
        self.check_default_scene()
    }

    fn check_default_scene(&self) -> Result<()> {
        if !self.scenes.is_empty() && self.default_scene >= self.scenes.len() {
            return Err(Error::invalid(format!(
                "default scene {} out of range ({} scenes)",
                self.default_scene,
                self.scenes.len()
            )));
        }
        Ok(())
    }

    pub fn add_mesh(&mut self, mesh: Mesh) -> &mut Self {
        self.meshes.push(mesh);
        self
    }

    pub fn add_texture(&mut self, texture: Texture) -> &mut Self {
        self.textures.push(texture);
        self
    }

    pub fn add_material(&mut self, material: Material) -> &mut Self {
        self.materials.push(material);
        self
    }

    pub fn add_scene(&mut self, scene: Scene) -> &mut Self {
        self.scenes.push(scene);
        self
    }
}

fn unique_names<'a>(category: &str, names: impl Iterator<Item = &'a str>) -> Result<()> {
    let mut seen = HashSet::new();
    for name in names {
        if !seen.insert(name) {
            return Err(Error::invalid(format!("duplicate {} name '{}'", category, name)));
        }
    }
    Ok(())
}
