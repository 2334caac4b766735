//! Bounds-checked cursor over Helix bytes.

use byteorder::{ByteOrder, LittleEndian};

use super::format::array_padding;
use crate::util::{Error, Result, Vec3, Vec4};

/// Little-endian reader over a byte slice.
#[derive(Debug, Clone)]
pub struct ByteReader<'a> {
    data: &'a [u8],
    pos: usize,
}

impl<'a> ByteReader<'a> {
    pub fn new(data: &'a [u8]) -> Self {
        Self { data, pos: 0 }
    }

    #[inline]
    pub fn position(&self) -> usize {
        self.pos
    }

    #[inline]
    pub fn remaining(&self) -> &'a [u8] {
        &self.data[self.pos..]
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.pos >= self.data.len()
    }

    /// Read exactly `n` bytes.
    pub fn read_bytes(&mut self, n: usize) -> Result<&'a [u8]> {
        let end = self.pos.checked_add(n).filter(|end| *end <= self.data.len());
        match end {
            Some(end) => {
                let bytes = &self.data[self.pos..end];
                self.pos = end;
                Ok(bytes)
            }
            None => Err(Error::UnexpectedEof(self.data.len() as u64)),
        }
    }

    #[inline]
    pub fn read_u8(&mut self) -> Result<u8> {
        Ok(self.read_bytes(1)?[0])
    }

    #[inline]
    pub fn read_u16(&mut self) -> Result<u16> {
        Ok(LittleEndian::read_u16(self.read_bytes(2)?))
    }

    #[inline]
    pub fn read_u32(&mut self) -> Result<u32> {
        Ok(LittleEndian::read_u32(self.read_bytes(4)?))
    }

    #[inline]
    pub fn read_f32(&mut self) -> Result<f32> {
        Ok(LittleEndian::read_f32(self.read_bytes(4)?))
    }

    pub fn read_vec3(&mut self) -> Result<Vec3> {
        Ok(Vec3::new(self.read_f32()?, self.read_f32()?, self.read_f32()?))
    }

    pub fn read_vec4(&mut self) -> Result<Vec4> {
        Ok(Vec4::new(
            self.read_f32()?,
            self.read_f32()?,
            self.read_f32()?,
            self.read_f32()?,
        ))
    }

    /// `u16` length-prefixed UTF-8.
    pub fn read_string(&mut self) -> Result<String> {
        let len = self.read_u16()? as usize;
        let bytes = self.read_bytes(len)?;
        Ok(String::from_utf8(bytes.to_vec())?)
    }

    /// Element count, optional alignment padding, then `count * 4` bytes.
    fn read_array_bytes(&mut self, padded: bool) -> Result<&'a [u8]> {
        let count = self.read_u32()? as usize;
        if padded {
            let pad = array_padding(self.pos as u64) as usize;
            self.read_bytes(pad)?;
        }
        let len = count
            .checked_mul(4)
            .ok_or_else(|| Error::invalid(format!("array of {} elements is too large", count)))?;
        self.read_bytes(len)
    }

    pub fn read_f32_array(&mut self, padded: bool) -> Result<Vec<f32>> {
        let bytes = self.read_array_bytes(padded)?;
        let mut out = vec![0f32; bytes.len() / 4];
        LittleEndian::read_f32_into(bytes, &mut out);
        Ok(out)
    }

    pub fn read_u32_array(&mut self, padded: bool) -> Result<Vec<u32>> {
        let bytes = self.read_array_bytes(padded)?;
        let mut out = vec![0u32; bytes.len() / 4];
        LittleEndian::read_u32_into(bytes, &mut out);
        Ok(out)
    }
}
