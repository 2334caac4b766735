//! Scene hierarchy: scenes, objects and the closed set of object kinds.

use serde::{Deserialize, Serialize};

use crate::util::{Transform, Vec3};

use super::Light;

/// What an object in the hierarchy is. Dispatch in the writer is a match on this.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum ObjectKind {
    /// Instance of a mesh data block with one material per sub-mesh slot.
    Mesh {
        mesh: String,
        #[serde(default)]
        materials: Vec<String>,
    },
    Light(Light),
    /// Instanced group: members are proxied from the group node.
    Group {
        #[serde(default)]
        offset: Vec3,
        #[serde(default)]
        members: Vec<SceneObject>,
    },
    /// Host object with no Helix representation (cameras, curves, empties).
    Unsupported {
        #[serde(default)]
        host_type: String,
    },
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SceneObject {
    pub name: String,
    #[serde(default)]
    pub transform: Transform,
    pub kind: ObjectKind,
    #[serde(default)]
    pub children: Vec<SceneObject>,
}

impl SceneObject {
    pub fn new(name: impl Into<String>, kind: ObjectKind) -> Self {
        Self {
            name: name.into(),
            transform: Transform::IDENTITY,
            kind,
            children: Vec::new(),
        }
    }

    pub fn mesh(name: impl Into<String>, mesh: impl Into<String>) -> Self {
        Self::new(name, ObjectKind::Mesh { mesh: mesh.into(), materials: Vec::new() })
    }

    pub fn light(name: impl Into<String>, light: Light) -> Self {
        Self::new(name, ObjectKind::Light(light))
    }

    pub fn group(name: impl Into<String>, offset: Vec3, members: Vec<SceneObject>) -> Self {
        Self::new(name, ObjectKind::Group { offset, members })
    }

    pub fn unsupported(name: impl Into<String>, host_type: impl Into<String>) -> Self {
        Self::new(name, ObjectKind::Unsupported { host_type: host_type.into() })
    }

    pub fn with_transform(mut self, transform: Transform) -> Self {
        self.transform = transform;
        self
    }

    pub fn with_position(mut self, position: Vec3) -> Self {
        self.transform.position = position;
        self
    }

    /// Append a material slot. Only meaningful for mesh objects.
    pub fn with_material(mut self, material: impl Into<String>) -> Self {
        if let ObjectKind::Mesh { materials, .. } = &mut self.kind {
            materials.push(material.into());
        }
        self
    }

    pub fn with_child(mut self, child: SceneObject) -> Self {
        self.children.push(child);
        self
    }

    /// Count of this object and all descendants, group members included.
    pub fn num_objects(&self) -> usize {
        let members = match &self.kind {
            ObjectKind::Group { members, .. } => members.iter().map(|m| m.num_objects()).sum(),
            _ => 0,
        };
        1 + members + self.children.iter().map(|c| c.num_objects()).sum::<usize>()
    }
}

/// A top-level scene with its root objects.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Scene {
    pub name: String,
    #[serde(default)]
    pub ambient_color: Option<Vec3>,
    #[serde(default)]
    pub roots: Vec<SceneObject>,
}

impl Scene {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into(), ambient_color: None, roots: Vec::new() }
    }

    pub fn with_root(mut self, root: SceneObject) -> Self {
        self.roots.push(root);
        self
    }

    pub fn with_ambient(mut self, color: Vec3) -> Self {
        self.ambient_color = Some(color);
        self
    }
}
