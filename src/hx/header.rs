//! File header: the property list following the magic bytes.

use std::io::Write;

use serde::Serialize;

use super::format::{LightingMode, PropertyType, HX_MAGIC, HX_VERSION};
use super::writer::{end_list, write_prop, OStream, PropertyValue};
use crate::util::Result;

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Header {
    pub version: String,
    pub generator: String,
    /// Array payloads are aligned to 4 bytes in the file.
    pub pad_arrays: bool,
    pub default_scene: u8,
    pub lighting_mode: LightingMode,
}

impl Header {
    pub fn new(generator: impl Into<String>) -> Self {
        Self {
            version: HX_VERSION.to_string(),
            generator: generator.into(),
            pad_arrays: true,
            default_scene: 0,
            lighting_mode: LightingMode::Fixed,
        }
    }

    /// Write magic and header list.
    pub fn write<W: Write>(&self, stream: &mut OStream<W>) -> Result<()> {
        stream.write_bytes(HX_MAGIC)?;
        write_prop(stream, PropertyType::Version, PropertyValue::String(&self.version))?;
        write_prop(stream, PropertyType::Generator, PropertyValue::String(&self.generator))?;
        write_prop(stream, PropertyType::PadArrays, self.pad_arrays.into())?;
        write_prop(stream, PropertyType::DefaultSceneIndex, PropertyValue::U8(self.default_scene))?;
        write_prop(
            stream,
            PropertyType::LightingMode,
            PropertyValue::U8(self.lighting_mode.as_u8()),
        )?;
        end_list(stream)
    }
}

/// Default generator string, e.g. `Helix-rs 0.1.0 (built Oct 15 2026)`.
pub fn default_generator() -> String {
    let date = option_env!("HELIX_BUILD_DATE").unwrap_or("unknown");
    format!("Helix-rs {} (built {})", env!("CARGO_PKG_VERSION"), date)
}
