//! Deferred link table.
//!
//! Links are collected while objects are written and flushed after the
//! object list. No validation happens on append; [`LinkTable::dangling`]
//! reports links whose endpoints were never issued.

use std::io::Write;

use serde::Serialize;

use crate::hx::format::LinkKind;
use crate::util::Result;

use super::stream::OStream;

/// Typed directed edge between two object ids.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
pub struct Link {
    pub from: u32,
    pub to: u32,
    pub kind: u8,
}

impl Link {
    pub fn new(from: u32, to: u32, kind: LinkKind) -> Self {
        Self { from, to, kind: kind.as_u8() }
    }

    /// Known kind, or `None` for a reserved value.
    pub fn link_kind(&self) -> Option<LinkKind> {
        LinkKind::from_u8(self.kind)
    }

    #[inline]
    pub fn is_dangling(&self, object_count: usize) -> bool {
        self.from as usize >= object_count || self.to as usize >= object_count
    }
}

#[derive(Debug, Default)]
pub struct LinkTable {
    links: Vec<Link>,
}

impl LinkTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn link(&mut self, from: u32, to: u32, kind: LinkKind) {
        self.links.push(Link::new(from, to, kind));
    }

    pub fn links(&self) -> &[Link] {
        &self.links
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.links.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.links.is_empty()
    }

    /// Links referencing ids at or beyond `object_count`.
    pub fn dangling(&self, object_count: usize) -> Vec<Link> {
        self.links
            .iter()
            .filter(|l| l.is_dangling(object_count))
            .copied()
            .collect()
    }

    /// Write every link as `u32 from, u32 to, u8 kind`, in insertion order.
    pub fn flush<W: Write>(&self, stream: &mut OStream<W>) -> Result<()> {
        for link in &self.links {
            stream.write_u32(link.from)?;
            stream.write_u32(link.to)?;
            stream.write_u8(link.kind)?;
        }
        Ok(())
    }
}
