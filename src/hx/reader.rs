//! Helix file decoder.
//!
//! Parses a whole file eagerly: header, object records, link table. Used for
//! inspection and for checking exported files (link validity, round trips).

use std::fs::File;
use std::path::Path;

use memmap2::Mmap;
use serde::Serialize;

use super::format::*;
use super::header::Header;
use super::read_util::ByteReader;
use super::writer::Link;
use crate::util::{Error, Result, Vec3, Vec4};

/// Decoded property payload.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub enum Value {
    String(String),
    U8(u8),
    U32(u32),
    F32(f32),
    Vec3(Vec3),
    Vec4(Vec4),
    F32Array(Vec<f32>),
    U32Array(Vec<u32>),
}

impl Value {
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_u8(&self) -> Option<u8> {
        match self {
            Self::U8(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_u32(&self) -> Option<u32> {
        match self {
            Self::U32(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_f32(&self) -> Option<f32> {
        match self {
            Self::F32(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_vec3(&self) -> Option<Vec3> {
        match self {
            Self::Vec3(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_vec4(&self) -> Option<Vec4> {
        match self {
            Self::Vec4(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_f32_array(&self) -> Option<&[f32]> {
        match self {
            Self::F32Array(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_u32_array(&self) -> Option<&[u32]> {
        match self {
            Self::U32Array(v) => Some(v),
            _ => None,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Property {
    pub tag: PropertyType,
    pub value: Value,
}

/// One decoded object record. `id` is its position in the object list.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ObjectRecord {
    pub id: u32,
    pub object_type: ObjectType,
    pub properties: Vec<Property>,
}

impl ObjectRecord {
    /// First property with the given tag.
    pub fn get(&self, tag: PropertyType) -> Option<&Value> {
        self.properties.iter().find(|p| p.tag == tag).map(|p| &p.value)
    }

    pub fn name(&self) -> Option<&str> {
        self.get(PropertyType::Name).and_then(Value::as_str)
    }
}

/// A fully decoded Helix file.
#[derive(Clone, Debug, Serialize)]
pub struct IArchive {
    header: Header,
    objects: Vec<ObjectRecord>,
    links: Vec<Link>,
    size: u64,
}

impl IArchive {
    /// Open and decode a file through a read-only memory map.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                Error::FileNotFound(path.to_path_buf())
            } else {
                Error::Io(e)
            }
        })?;

        let size = file.metadata()?.len();
        if size < HX_MAGIC.len() as u64 {
            return Err(Error::UnexpectedEof(size));
        }

        // Safety: the map is read-only and dropped before returning
        let mmap = unsafe { Mmap::map(&file) }.map_err(|e| Error::MmapFailed(e.to_string()))?;
        Self::from_bytes(&mmap)
    }

    /// Decode from an in-memory buffer.
    pub fn from_bytes(data: &[u8]) -> Result<Self> {
        let mut r = ByteReader::new(data);

        let magic = r.read_bytes(HX_MAGIC.len())?;
        if magic != HX_MAGIC {
            return Err(Error::InvalidMagic);
        }

        let header = decode_header(read_property_list(&mut r, false)?)?;

        let mut objects = Vec::new();
        loop {
            let tag = r.read_u8()?;
            if tag == SENTINEL {
                break;
            }
            let object_type = ObjectType::from_u8(tag).ok_or_else(|| {
                Error::invalid(format!("unknown object type {} at offset {}", tag, r.position() - 1))
            })?;
            let id = objects.len() as u32;
            let properties = read_property_list(&mut r, header.pad_arrays)?;
            objects.push(ObjectRecord { id, object_type, properties });
        }

        let tail = r.remaining();
        if tail.len() % LINK_RECORD_SIZE != 0 {
            return Err(Error::invalid(format!(
                "link table length {} is not a multiple of {}",
                tail.len(),
                LINK_RECORD_SIZE
            )));
        }
        let mut links = Vec::with_capacity(tail.len() / LINK_RECORD_SIZE);
        while !r.is_empty() {
            let from = r.read_u32()?;
            let to = r.read_u32()?;
            let kind = r.read_u8()?;
            links.push(Link { from, to, kind });
        }

        tracing::debug!(
            objects = objects.len(),
            links = links.len(),
            "decoded helix archive"
        );

        Ok(Self { header, objects, links, size: data.len() as u64 })
    }

    pub fn header(&self) -> &Header {
        &self.header
    }

    pub fn objects(&self) -> &[ObjectRecord] {
        &self.objects
    }

    pub fn object(&self, id: u32) -> Option<&ObjectRecord> {
        self.objects.get(id as usize)
    }

    pub fn objects_of_type(&self, ty: ObjectType) -> impl Iterator<Item = &ObjectRecord> {
        self.objects.iter().filter(move |o| o.object_type == ty)
    }

    /// First object of the given type and name.
    pub fn find(&self, ty: ObjectType, name: &str) -> Option<&ObjectRecord> {
        self.objects_of_type(ty).find(|o| o.name() == Some(name))
    }

    pub fn links(&self) -> &[Link] {
        &self.links
    }

    /// Links from `id`, in file order.
    pub fn links_from(&self, id: u32) -> impl Iterator<Item = &Link> {
        self.links.iter().filter(move |l| l.from == id)
    }

    /// Links whose endpoints are not valid object ids.
    pub fn dangling_links(&self) -> Vec<Link> {
        let count = self.objects.len();
        self.links.iter().filter(|l| l.is_dangling(count)).copied().collect()
    }

    /// File size in bytes.
    pub fn size(&self) -> u64 {
        self.size
    }
}

fn read_property_list(r: &mut ByteReader<'_>, padded: bool) -> Result<Vec<Property>> {
    let mut props = Vec::new();
    loop {
        let offset = r.position();
        let raw = r.read_u8()?;
        if raw == SENTINEL {
            return Ok(props);
        }
        let tag = PropertyType::from_u8(raw).ok_or_else(|| {
            Error::invalid(format!("unknown property tag {} at offset {}", raw, offset))
        })?;
        let value = match tag.value_kind() {
            ValueKind::String => Value::String(r.read_string()?),
            ValueKind::U8 => Value::U8(r.read_u8()?),
            ValueKind::U32 => Value::U32(r.read_u32()?),
            ValueKind::F32 => Value::F32(r.read_f32()?),
            ValueKind::Vec3 => Value::Vec3(r.read_vec3()?),
            ValueKind::Vec4 => Value::Vec4(r.read_vec4()?),
            ValueKind::F32Array => Value::F32Array(r.read_f32_array(padded)?),
            ValueKind::U32Array => Value::U32Array(r.read_u32_array(padded)?),
        };
        props.push(Property { tag, value });
    }
}

fn decode_header(props: Vec<Property>) -> Result<Header> {
    let find = |tag: PropertyType| {
        props
            .iter()
            .find(|p| p.tag == tag)
            .map(|p| &p.value)
            .ok_or_else(|| Error::invalid(format!("header is missing {}", tag)))
    };

    let version = find(PropertyType::Version)?.as_str().unwrap_or_default().to_string();
    let generator = find(PropertyType::Generator)?.as_str().unwrap_or_default().to_string();
    let pad_arrays = find(PropertyType::PadArrays)?.as_u8().unwrap_or_default() != 0;
    let default_scene = find(PropertyType::DefaultSceneIndex)?.as_u8().unwrap_or_default();
    let mode = find(PropertyType::LightingMode)?.as_u8().unwrap_or_default();
    let lighting_mode = LightingMode::from_u8(mode)
        .ok_or_else(|| Error::invalid(format!("unknown lighting mode {}", mode)))?;

    Ok(Header { version, generator, pad_arrays, default_scene, lighting_mode })
}
