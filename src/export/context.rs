//! Per-run export state.

use std::io::Write;

use serde::Serialize;
use smallvec::SmallVec;

use crate::hx::writer::{write_prop, EntityKey, LinkTable, OStream, ObjectTable, PropertyValue};
use crate::hx::{Header, LinkKind, ObjectType, PropertyType};
use crate::util::{Error, Result};

use super::ExportOptions;

/// Totals reported after a finished export.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct ExportSummary {
    pub objects: usize,
    pub links: usize,
    /// Scene objects with no Helix representation.
    pub skipped: usize,
    /// Links pointing at ids that were never issued.
    pub dangling: usize,
    pub bytes: u64,
}

/// Owns the stream, object table and link table of one export.
///
/// A fresh context starts ids at 0; nothing is shared between runs.
pub struct ExportContext<W: Write> {
    stream: OStream<W>,
    objects: ObjectTable,
    links: LinkTable,
    skipped: usize,
}

impl<W: Write> ExportContext<W> {
    pub fn new(sink: W, options: &ExportOptions) -> Self {
        let mut stream = OStream::new(sink);
        stream.set_pad_arrays(options.pad_arrays);
        Self {
            stream,
            objects: ObjectTable::new(),
            links: LinkTable::new(),
            skipped: 0,
        }
    }

    pub fn write_header(&mut self, header: &Header) -> Result<()> {
        if header.pad_arrays != self.stream.pad_arrays() {
            return Err(Error::invalid("header padding flag differs from the stream setting"));
        }
        header.write(&mut self.stream)
    }

    pub fn start_object(&mut self, ty: ObjectType) -> Result<u32> {
        self.objects.start_object(&mut self.stream, ty)
    }

    #[inline]
    pub fn prop<'a>(&mut self, tag: PropertyType, value: impl Into<PropertyValue<'a>>) -> Result<()> {
        write_prop(&mut self.stream, tag, value.into())
    }

    pub fn end_object(&mut self) -> Result<()> {
        self.objects.end_object(&mut self.stream)
    }

    pub fn link_entity(&mut self, entity: EntityKey, id: u32) -> Result<()> {
        self.objects.link_entity(entity, id)
    }

    /// Copy of the ids linked to `entity`, so links can be added while iterating.
    pub fn ids_for(&self, entity: &EntityKey) -> Result<SmallVec<[u32; 2]>> {
        Ok(SmallVec::from_slice(self.objects.ids_for(entity)?))
    }

    /// First id linked to `entity`.
    pub fn first_id(&self, entity: &EntityKey) -> Result<u32> {
        self.objects
            .ids_for(entity)?
            .first()
            .copied()
            .ok_or_else(|| Error::lookup(entity))
    }

    pub fn link(&mut self, from: u32, to: u32, kind: LinkKind) {
        self.links.link(from, to, kind);
    }

    pub fn mark_skipped(&mut self) {
        self.skipped += 1;
    }

    pub fn object_table(&self) -> &ObjectTable {
        &self.objects
    }

    pub fn link_table(&self) -> &LinkTable {
        &self.links
    }

    /// Close the object list, flush the link table and return the sink.
    pub fn finish(mut self) -> Result<(W, ExportSummary)> {
        self.objects.end_object_list(&mut self.stream)?;

        let dangling = self.links.dangling(self.objects.len());
        for link in &dangling {
            tracing::warn!(from = link.from, to = link.to, kind = link.kind, "dangling link");
        }
        self.links.flush(&mut self.stream)?;

        let summary = ExportSummary {
            objects: self.objects.len(),
            links: self.links.len(),
            skipped: self.skipped,
            dangling: dangling.len(),
            bytes: self.stream.pos(),
        };
        let sink = self.stream.into_inner()?;
        Ok((sink, summary))
    }
}
