//! Resource categories: meshes, textures, materials.

use std::io::Write;

use crate::hx::writer::{EntityKey, PropertyValue};
use crate::hx::{LinkKind, ObjectType, PropertyType};
use crate::scene::{Material, Mesh, SubMesh, Texture};
use crate::util::{flatten_vec2, flatten_vec3, EncodeError, Result};

use super::ExportContext;

/// One record per sub-mesh, all linked to the mesh entity.
/// A mesh without sub-meshes still gets a single, empty record.
pub(crate) fn write_mesh<W: Write>(ctx: &mut ExportContext<W>, mesh: &Mesh) -> Result<()> {
    let key = EntityKey::Mesh(mesh.name.clone());
    if mesh.submeshes.is_empty() {
        let id = write_submesh(ctx, &mesh.name, &SubMesh::default())?;
        return ctx.link_entity(key, id);
    }
    for submesh in &mesh.submeshes {
        let id = write_submesh(ctx, &mesh.name, submesh)?;
        ctx.link_entity(key.clone(), id)?;
    }
    tracing::debug!(
        mesh = %mesh.name,
        submeshes = mesh.submeshes.len(),
        vertices = mesh.num_vertices(),
        triangles = mesh.submeshes.iter().map(SubMesh::num_triangles).sum::<usize>(),
        "wrote mesh"
    );
    Ok(())
}

fn write_submesh<W: Write>(ctx: &mut ExportContext<W>, name: &str, submesh: &SubMesh) -> Result<u32> {
    let num_vertices = u32::try_from(submesh.positions.len()).map_err(|_| {
        EncodeError::ValueOutOfRange {
            field: "vertex count",
            value: submesh.positions.len() as u64,
            max: u32::MAX as u64,
        }
    })?;

    let id = ctx.start_object(ObjectType::Mesh)?;
    ctx.prop(PropertyType::Name, name)?;
    ctx.prop(PropertyType::NumVertices, PropertyValue::U32(num_vertices))?;

    let positions = flatten_vec3(&submesh.positions);
    ctx.prop(PropertyType::VertexPositions, PropertyValue::F32Array(&positions))?;
    if !submesh.normals.is_empty() {
        let normals = flatten_vec3(&submesh.normals);
        ctx.prop(PropertyType::VertexNormals, PropertyValue::F32Array(&normals))?;
    }
    if !submesh.uvs.is_empty() {
        let uvs = flatten_vec2(&submesh.uvs);
        ctx.prop(PropertyType::VertexUvs, PropertyValue::F32Array(&uvs))?;
    }
    ctx.prop(PropertyType::Indices, PropertyValue::U32Array(&submesh.indices))?;
    ctx.end_object()?;
    Ok(id)
}

pub(crate) fn write_texture<W: Write>(ctx: &mut ExportContext<W>, texture: &Texture) -> Result<()> {
    let id = ctx.start_object(ObjectType::Texture)?;
    ctx.prop(PropertyType::Name, texture.name.as_str())?;
    ctx.prop(PropertyType::Url, texture.url.as_str())?;
    ctx.end_object()?;
    tracing::debug!(texture = %texture.name, id, "wrote texture");
    ctx.link_entity(EntityKey::Texture(texture.name.clone()), id)
}

/// Textures must already be written; slot links point at their ids.
pub(crate) fn write_material<W: Write>(ctx: &mut ExportContext<W>, material: &Material) -> Result<()> {
    let id = ctx.start_object(ObjectType::Material)?;
    ctx.prop(PropertyType::Name, material.name.as_str())?;
    ctx.prop(PropertyType::Color, material.color)?;
    ctx.prop(
        PropertyType::LightingModel,
        PropertyValue::U8(material.lighting_model.as_u8()),
    )?;
    ctx.prop(PropertyType::Roughness, material.roughness)?;
    ctx.prop(PropertyType::Metallicness, material.metallicness)?;
    if let Some(threshold) = material.alpha_threshold {
        ctx.prop(PropertyType::AlphaThreshold, threshold)?;
    }
    ctx.end_object()?;

    let slots = [
        (&material.color_map, LinkKind::ColorMap),
        (&material.normal_map, LinkKind::NormalMap),
        (&material.specular_map, LinkKind::SpecularMap),
    ];
    for (texture, kind) in slots {
        if let Some(texture) = texture {
            let texture_id = ctx.first_id(&EntityKey::Texture(texture.clone()))?;
            ctx.link(id, texture_id, kind);
        }
    }

    tracing::debug!(material = %material.name, id, "wrote material");
    ctx.link_entity(EntityKey::Material(material.name.clone()), id)
}
