//! Export configuration.

use serde::{Deserialize, Serialize};

use crate::hx::{default_generator, LightingMode};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExportOptions {
    pub lighting_mode: LightingMode,
    /// Written as the header's generator string.
    pub generator: String,
    /// Align array payloads to 4 bytes so loaders can view them in place.
    pub pad_arrays: bool,
}

impl Default for ExportOptions {
    fn default() -> Self {
        Self {
            lighting_mode: LightingMode::Fixed,
            generator: default_generator(),
            pad_arrays: true,
        }
    }
}

impl ExportOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_lighting_mode(mut self, mode: LightingMode) -> Self {
        self.lighting_mode = mode;
        self
    }

    pub fn with_generator(mut self, generator: impl Into<String>) -> Self {
        self.generator = generator.into();
        self
    }

    pub fn with_pad_arrays(mut self, pad: bool) -> Self {
        self.pad_arrays = pad;
        self
    }
}
