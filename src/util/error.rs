//! Error types for the Helix library.

use std::path::PathBuf;
use thiserror::Error;

/// Failures raised while encoding properties and object records.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum EncodeError {
    /// String payload longer than the `u16` length prefix allows
    #[error("String for {tag} is {len} bytes, limit is {max}")]
    StringTooLong { tag: &'static str, len: usize, max: usize },

    /// Value kind does not match the kind fixed for the property tag
    #[error("Property {tag} expects {expected}, got {actual}")]
    KindMismatch {
        tag: &'static str,
        expected: &'static str,
        actual: &'static str,
    },

    /// Numeric value does not fit the encoded width
    #[error("Value {value} for {field} exceeds {max}")]
    ValueOutOfRange { field: &'static str, value: u64, max: u64 },

    /// `start_object` called while another record is still open
    #[error("Object {0} is still open")]
    ObjectAlreadyOpen(u32),

    /// `end_object` called with no open record
    #[error("No object record is open")]
    NoOpenObject,
}

/// Main error type for Helix operations.
#[derive(Error, Debug)]
pub enum Error {
    /// File does not exist or cannot be accessed
    #[error("File not found: {0}")]
    FileNotFound(PathBuf),

    /// Invalid magic bytes at start of file
    #[error("Invalid Helix file: expected HX magic bytes")]
    InvalidMagic,

    /// File is truncated
    #[error("Unexpected end of file at position {0}")]
    UnexpectedEof(u64),

    /// Invalid data structure in file
    #[error("Invalid file structure: {0}")]
    InvalidStructure(String),

    /// Encoding failed, the export is aborted
    #[error("Encode failed: {0}")]
    Encode(#[from] EncodeError),

    /// Id requested for an entity that was never registered
    #[error("Entity not registered: {0}")]
    Lookup(String),

    /// Memory mapping failed
    #[error("Memory mapping failed: {0}")]
    MmapFailed(String),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// UTF-8 conversion error
    #[error("Invalid UTF-8: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),

    /// Scene document could not be parsed
    #[error("Scene document error: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    /// Create an invalid structure error.
    pub fn invalid(msg: impl Into<String>) -> Self {
        Self::InvalidStructure(msg.into())
    }

    /// Create a lookup error for an entity description.
    pub fn lookup(entity: impl std::fmt::Display) -> Self {
        Self::Lookup(entity.to_string())
    }
}

/// Result type alias for Helix operations.
pub type Result<T> = std::result::Result<T, Error>;
