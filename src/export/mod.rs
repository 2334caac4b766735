//! Scene writer.
//!
//! The document is validated before anything is written.
//!
//! Section order is fixed: header, meshes, textures, materials, scenes with
//! their hierarchies, object-list sentinel, link table. Any error aborts the
//! run; a partially written file is left for the caller to discard.

mod context;
mod objects;
mod options;
mod resources;

use std::io::Write;
use std::path::Path;

use crate::hx::writer::create_sink;
use crate::hx::Header;
use crate::scene::SceneDocument;
use crate::util::{EncodeError, Result};

pub use context::{ExportContext, ExportSummary};
pub use options::ExportOptions;

/// Export `doc` into `sink`, returning the sink once the link table is flushed.
pub fn export<W: Write>(sink: W, doc: &SceneDocument, options: &ExportOptions) -> Result<(W, ExportSummary)> {
    doc.validate()?;
    let default_scene = u8::try_from(doc.default_scene).map_err(|_| EncodeError::ValueOutOfRange {
        field: "default scene index",
        value: doc.default_scene as u64,
        max: u8::MAX as u64,
    })?;

    tracing::info!(
        meshes = doc.meshes.len(),
        textures = doc.textures.len(),
        materials = doc.materials.len(),
        scenes = doc.scenes.len(),
        "exporting helix file"
    );

    let mut ctx = ExportContext::new(sink, options);
    ctx.write_header(&Header {
        default_scene,
        lighting_mode: options.lighting_mode,
        pad_arrays: options.pad_arrays,
        ..Header::new(options.generator.clone())
    })?;

    for mesh in &doc.meshes {
        resources::write_mesh(&mut ctx, mesh)?;
    }
    for texture in &doc.textures {
        resources::write_texture(&mut ctx, texture)?;
    }
    for material in &doc.materials {
        resources::write_material(&mut ctx, material)?;
    }
    for scene in &doc.scenes {
        objects::write_scene(&mut ctx, scene)?;
    }

    let (sink, summary) = ctx.finish()?;
    tracing::info!(
        objects = summary.objects,
        links = summary.links,
        skipped = summary.skipped,
        bytes = summary.bytes,
        "export finished"
    );
    Ok((sink, summary))
}

/// Export to a file. Nothing is written if the file cannot be created.
pub fn export_to_path(
    path: impl AsRef<Path>,
    doc: &SceneDocument,
    options: &ExportOptions,
) -> Result<ExportSummary> {
    let sink = create_sink(path)?;
    let (_, summary) = export(sink, doc, options)?;
    Ok(summary)
}

/// Export into a fresh byte buffer.
pub fn export_to_vec(doc: &SceneDocument, options: &ExportOptions) -> Result<Vec<u8>> {
    let (bytes, _) = export(Vec::new(), doc, options)?;
    Ok(bytes)
}

#[cfg(test)]
mod tests;
