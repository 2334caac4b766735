//! Object table: dense id assignment and entity-to-id lookup.
//!
//! Ids come from a single counter shared by every object type, starting at 0
//! and issued only by [`ObjectTable::start_object`].

use std::collections::HashMap;
use std::fmt;
use std::io::Write;

use smallvec::SmallVec;

use crate::hx::format::{ObjectType, SENTINEL};
use crate::util::{EncodeError, Error, Result};

use super::property::end_list;
use super::stream::OStream;

/// Producer-side identity of an exported entity.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum EntityKey {
    Mesh(String),
    Texture(String),
    Material(String),
    Scene(String),
    Object(String),
}

impl EntityKey {
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Mesh(_) => "mesh",
            Self::Texture(_) => "texture",
            Self::Material(_) => "material",
            Self::Scene(_) => "scene",
            Self::Object(_) => "object",
        }
    }

    pub fn name(&self) -> &str {
        match self {
            Self::Mesh(n) | Self::Texture(n) | Self::Material(n) | Self::Scene(n) | Self::Object(n) => n,
        }
    }
}

impl fmt::Display for EntityKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} '{}'", self.kind(), self.name())
    }
}

/// Id assignment for one export run.
#[derive(Debug, Default)]
pub struct ObjectTable {
    /// Type of every issued id, indexed by id.
    types: Vec<ObjectType>,
    open: Option<u32>,
    entities: HashMap<EntityKey, SmallVec<[u32; 2]>>,
}

impl ObjectTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Write the type tag, allocate the next id and open its property list.
    pub fn start_object<W: Write>(&mut self, stream: &mut OStream<W>, ty: ObjectType) -> Result<u32> {
        if let Some(open) = self.open {
            return Err(EncodeError::ObjectAlreadyOpen(open).into());
        }
        let id = u32::try_from(self.types.len()).map_err(|_| EncodeError::ValueOutOfRange {
            field: "object id",
            value: self.types.len() as u64,
            max: u32::MAX as u64,
        })?;
        stream.write_u8(ty.as_u8())?;
        self.types.push(ty);
        self.open = Some(id);
        tracing::trace!(id, ty = %ty, "start object");
        Ok(id)
    }

    /// Close the open record's property list.
    pub fn end_object<W: Write>(&mut self, stream: &mut OStream<W>) -> Result<()> {
        if self.open.take().is_none() {
            return Err(EncodeError::NoOpenObject.into());
        }
        end_list(stream)
    }

    /// Associate `id` with `entity`. Entities may collect several ids.
    pub fn link_entity(&mut self, entity: EntityKey, id: u32) -> Result<()> {
        if id as usize >= self.types.len() {
            return Err(EncodeError::ValueOutOfRange {
                field: "object id",
                value: id as u64,
                max: self.types.len().saturating_sub(1) as u64,
            }
            .into());
        }
        self.entities.entry(entity).or_default().push(id);
        Ok(())
    }

    /// All ids linked to `entity`, in link order.
    pub fn ids_for(&self, entity: &EntityKey) -> Result<&[u32]> {
        self.entities
            .get(entity)
            .map(|ids| ids.as_slice())
            .ok_or_else(|| Error::lookup(entity))
    }

    /// Write the sentinel that ends the object list.
    pub fn end_object_list<W: Write>(&mut self, stream: &mut OStream<W>) -> Result<()> {
        if let Some(open) = self.open {
            return Err(EncodeError::ObjectAlreadyOpen(open).into());
        }
        stream.write_u8(SENTINEL)
    }

    /// Number of ids issued so far.
    #[inline]
    pub fn len(&self) -> usize {
        self.types.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }

    pub fn object_type(&self, id: u32) -> Option<ObjectType> {
        self.types.get(id as usize).copied()
    }
}
