//! Helix writer stream.

use std::fs::{File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::Path;

use byteorder::{LittleEndian, WriteBytesExt};

use crate::hx::format::array_padding;
use crate::util::{Error, Result};

/// Output stream for writing Helix data.
///
/// Tracks the absolute write position so array payloads can be aligned.
pub struct OStream<W: Write> {
    writer: W,
    pos: u64,
    pad_arrays: bool,
}

/// Open `path` for writing behind a 1MB buffer.
///
/// Nothing is written if the file cannot be opened.
pub fn create_sink(path: impl AsRef<Path>) -> Result<BufWriter<File>> {
    let path = path.as_ref();
    let file = OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(true)
        .open(path)
        .map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                Error::FileNotFound(path.to_path_buf())
            } else {
                Error::Io(e)
            }
        })?;
    Ok(BufWriter::with_capacity(1024 * 1024, file))
}

impl OStream<BufWriter<File>> {
    /// Create a new output stream for the given file path.
    pub fn create(path: impl AsRef<Path>) -> Result<Self> {
        Ok(Self::new(create_sink(path)?))
    }
}

impl<W: Write> OStream<W> {
    /// Wrap any sink. Array padding is on by default.
    pub fn new(writer: W) -> Self {
        Self { writer, pos: 0, pad_arrays: true }
    }

    /// Get the current write position.
    #[inline]
    pub fn pos(&self) -> u64 {
        self.pos
    }

    #[inline]
    pub fn pad_arrays(&self) -> bool {
        self.pad_arrays
    }

    pub fn set_pad_arrays(&mut self, pad: bool) {
        self.pad_arrays = pad;
    }

    /// Write bytes and advance position.
    pub fn write_bytes(&mut self, data: &[u8]) -> Result<()> {
        self.writer.write_all(data)?;
        self.pos += data.len() as u64;
        Ok(())
    }

    /// Write a u32 value (little-endian).
    pub fn write_u32(&mut self, value: u32) -> Result<()> {
        self.writer.write_u32::<LittleEndian>(value)?;
        self.pos += 4;
        Ok(())
    }

    /// Write a u16 value (little-endian).
    pub fn write_u16(&mut self, value: u16) -> Result<()> {
        self.writer.write_u16::<LittleEndian>(value)?;
        self.pos += 2;
        Ok(())
    }

    /// Write a u8 value.
    pub fn write_u8(&mut self, value: u8) -> Result<()> {
        self.writer.write_u8(value)?;
        self.pos += 1;
        Ok(())
    }

    /// Write an f32 value (little-endian).
    pub fn write_f32(&mut self, value: f32) -> Result<()> {
        self.writer.write_f32::<LittleEndian>(value)?;
        self.pos += 4;
        Ok(())
    }

    /// Write zero bytes up to the array alignment, if padding is enabled.
    pub fn align_array(&mut self) -> Result<()> {
        if !self.pad_arrays {
            return Ok(());
        }
        let pad = array_padding(self.pos) as usize;
        if pad > 0 {
            self.write_bytes(&[0u8; 4][..pad])?;
        }
        Ok(())
    }

    /// Flush the buffer to the sink.
    pub fn flush(&mut self) -> Result<()> {
        self.writer.flush()?;
        Ok(())
    }

    /// Flush and hand back the underlying sink.
    pub fn into_inner(mut self) -> Result<W> {
        self.writer.flush()?;
        Ok(self.writer)
    }
}
