//! Property encoder.
//!
//! A property is a tag byte followed by the payload of the kind fixed for
//! that tag. A list of properties ends with the zero sentinel.

use std::io::Write;

use crate::hx::format::{PropertyType, ValueKind, MAX_STRING_LEN, SENTINEL};
use crate::util::{EncodeError, Result, Vec3, Vec4};

use super::stream::OStream;

/// Borrowed property payload.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum PropertyValue<'a> {
    String(&'a str),
    U8(u8),
    U32(u32),
    F32(f32),
    Vec3(Vec3),
    Vec4(Vec4),
    F32Array(&'a [f32]),
    U32Array(&'a [u32]),
}

impl PropertyValue<'_> {
    pub fn kind(&self) -> ValueKind {
        match self {
            Self::String(_) => ValueKind::String,
            Self::U8(_) => ValueKind::U8,
            Self::U32(_) => ValueKind::U32,
            Self::F32(_) => ValueKind::F32,
            Self::Vec3(_) => ValueKind::Vec3,
            Self::Vec4(_) => ValueKind::Vec4,
            Self::F32Array(_) => ValueKind::F32Array,
            Self::U32Array(_) => ValueKind::U32Array,
        }
    }
}

impl From<bool> for PropertyValue<'_> {
    fn from(v: bool) -> Self {
        Self::U8(v as u8)
    }
}

impl<'a> From<&'a str> for PropertyValue<'a> {
    fn from(v: &'a str) -> Self {
        Self::String(v)
    }
}

impl From<f32> for PropertyValue<'_> {
    fn from(v: f32) -> Self {
        Self::F32(v)
    }
}

impl From<Vec3> for PropertyValue<'_> {
    fn from(v: Vec3) -> Self {
        Self::Vec3(v)
    }
}

impl From<glam::Quat> for PropertyValue<'_> {
    fn from(q: glam::Quat) -> Self {
        Self::Vec4(Vec4::from(q))
    }
}

/// Write one tagged property.
///
/// The value kind must match [`PropertyType::value_kind`]; nothing is written
/// when it does not.
pub fn write_prop<W: Write>(
    stream: &mut OStream<W>,
    tag: PropertyType,
    value: PropertyValue<'_>,
) -> Result<()> {
    let expected = tag.value_kind();
    if value.kind() != expected {
        return Err(EncodeError::KindMismatch {
            tag: tag.name(),
            expected: expected.name(),
            actual: value.kind().name(),
        }
        .into());
    }
    if let PropertyValue::String(s) = value {
        if s.len() > MAX_STRING_LEN {
            return Err(EncodeError::StringTooLong {
                tag: tag.name(),
                len: s.len(),
                max: MAX_STRING_LEN,
            }
            .into());
        }
    }

    stream.write_u8(tag.as_u8())?;
    match value {
        PropertyValue::String(s) => {
            stream.write_u16(s.len() as u16)?;
            stream.write_bytes(s.as_bytes())?;
        }
        PropertyValue::U8(v) => stream.write_u8(v)?,
        PropertyValue::U32(v) => stream.write_u32(v)?,
        PropertyValue::F32(v) => stream.write_f32(v)?,
        PropertyValue::Vec3(v) => {
            for c in v.to_array() {
                stream.write_f32(c)?;
            }
        }
        PropertyValue::Vec4(v) => {
            for c in v.to_array() {
                stream.write_f32(c)?;
            }
        }
        PropertyValue::F32Array(values) => {
            write_array_len(stream, tag, values.len())?;
            stream.align_array()?;
            let mut buf = Vec::with_capacity(values.len() * 4);
            for v in values {
                buf.extend_from_slice(&v.to_le_bytes());
            }
            stream.write_bytes(&buf)?;
        }
        PropertyValue::U32Array(values) => {
            write_array_len(stream, tag, values.len())?;
            stream.align_array()?;
            let mut buf = Vec::with_capacity(values.len() * 4);
            for v in values {
                buf.extend_from_slice(&v.to_le_bytes());
            }
            stream.write_bytes(&buf)?;
        }
    }
    Ok(())
}

fn write_array_len<W: Write>(stream: &mut OStream<W>, tag: PropertyType, len: usize) -> Result<()> {
    let count = u32::try_from(len).map_err(|_| EncodeError::ValueOutOfRange {
        field: tag.name(),
        value: len as u64,
        max: u32::MAX as u64,
    })?;
    stream.write_u32(count)
}

/// Close a property list.
#[inline]
pub fn end_list<W: Write>(stream: &mut OStream<W>) -> Result<()> {
    stream.write_u8(SENTINEL)
}
