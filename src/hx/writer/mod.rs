//! Helix format writer building blocks.
//!
//! - [`OStream`] - position-tracking little-endian sink
//! - [`write_prop`] / [`end_list`] - property encoder
//! - [`ObjectTable`] - id assignment and entity lookup
//! - [`LinkTable`] - deferred typed links

mod link_table;
mod object_table;
mod property;
mod stream;

pub use link_table::{Link, LinkTable};
pub use object_table::{EntityKey, ObjectTable};
pub use property::{end_list, write_prop, PropertyValue};
pub use stream::{create_sink, OStream};
