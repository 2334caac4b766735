//! Shared resources: meshes, textures and materials.

use serde::{Deserialize, Serialize};

use crate::hx::LightingModel;
use crate::util::{Vec2, Vec3};

/// Mesh data block. Each sub-mesh becomes its own mesh record.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Mesh {
    pub name: String,
    #[serde(default)]
    pub submeshes: Vec<SubMesh>,
}

impl Mesh {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into(), submeshes: Vec::new() }
    }

    pub fn with_submesh(mut self, submesh: SubMesh) -> Self {
        self.submeshes.push(submesh);
        self
    }

    pub fn num_vertices(&self) -> usize {
        self.submeshes.iter().map(|s| s.positions.len()).sum()
    }
}

/// Triangle list with per-vertex attributes.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SubMesh {
    pub positions: Vec<Vec3>,
    pub normals: Vec<Vec3>,
    pub uvs: Vec<Vec2>,
    pub indices: Vec<u32>,
}

impl SubMesh {
    pub fn new(positions: Vec<Vec3>, indices: Vec<u32>) -> Self {
        Self { positions, indices, ..Default::default() }
    }

    pub fn with_normals(mut self, normals: Vec<Vec3>) -> Self {
        self.normals = normals;
        self
    }

    pub fn with_uvs(mut self, uvs: Vec<Vec2>) -> Self {
        self.uvs = uvs;
        self
    }

    #[inline]
    pub fn num_triangles(&self) -> usize {
        self.indices.len() / 3
    }
}

/// Image texture referenced by URL, relative to the exported file.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Texture {
    pub name: String,
    pub url: String,
}

impl Texture {
    pub fn new(name: impl Into<String>, url: impl Into<String>) -> Self {
        Self { name: name.into(), url: url.into() }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Material {
    pub name: String,
    pub color: Vec3,
    pub roughness: f32,
    pub metallicness: f32,
    pub lighting_model: LightingModel,
    /// Alpha test cutoff; `None` for opaque materials.
    pub alpha_threshold: Option<f32>,
    pub color_map: Option<String>,
    pub normal_map: Option<String>,
    pub specular_map: Option<String>,
}

impl Default for Material {
    fn default() -> Self {
        Self {
            name: String::new(),
            color: Vec3::ONE,
            roughness: 0.5,
            metallicness: 0.0,
            lighting_model: LightingModel::default(),
            alpha_threshold: None,
            color_map: None,
            normal_map: None,
            specular_map: None,
        }
    }
}

impl Material {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into(), ..Default::default() }
    }

    pub fn with_color(mut self, color: Vec3) -> Self {
        self.color = color;
        self
    }

    pub fn with_color_map(mut self, texture: impl Into<String>) -> Self {
        self.color_map = Some(texture.into());
        self
    }

    pub fn with_normal_map(mut self, texture: impl Into<String>) -> Self {
        self.normal_map = Some(texture.into());
        self
    }

    pub fn with_specular_map(mut self, texture: impl Into<String>) -> Self {
        self.specular_map = Some(texture.into());
        self
    }
}
