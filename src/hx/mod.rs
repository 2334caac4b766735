//! Low-level Helix binary format.
//!
//! ## File Structure
//!
//! Little endian throughout.
//!
//! ```text
//! +---------------------------+
//! | Magic: "HX"               |  2 bytes
//! +---------------------------+
//! | Header property list      |  tag/payload pairs, 0-terminated
//! +---------------------------+
//! | Object records            |  u8 type, property list, repeated
//! +---------------------------+
//! | Object list sentinel      |  1 byte (0)
//! +---------------------------+
//! | Link table                |  9-byte records to end of file:
//! |                           |  u32 from, u32 to, u8 kind
//! +---------------------------+
//! ```
//!
//! Object ids are implicit: the n-th record has id n. The link table has no
//! count field, its length is the remainder of the file.

mod format;
mod header;
mod read_util;
mod reader;
pub mod writer;

pub use format::*;
pub use header::{default_generator, Header};
pub use read_util::ByteReader;
pub use reader::{IArchive, ObjectRecord, Property, Value};
pub use writer::{EntityKey, Link, LinkTable, ObjectTable, OStream, PropertyValue};
