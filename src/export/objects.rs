//! Scene records and hierarchy traversal.

use std::io::Write;

use crate::hx::writer::EntityKey;
use crate::hx::{LinkKind, ObjectType, PropertyType};
use crate::scene::{Light, LightType, ObjectKind, Scene, SceneObject};
use crate::util::{Mat4, Result, Transform, Vec3};

use super::ExportContext;

/// Scene record, then every root subtree.
pub(crate) fn write_scene<W: Write>(ctx: &mut ExportContext<W>, scene: &Scene) -> Result<u32> {
    let id = ctx.start_object(ObjectType::Scene)?;
    ctx.prop(PropertyType::Name, scene.name.as_str())?;
    if let Some(ambient) = scene.ambient_color {
        ctx.prop(PropertyType::AmbientColor, ambient)?;
    }
    ctx.end_object()?;
    ctx.link_entity(EntityKey::Scene(scene.name.clone()), id)?;

    tracing::debug!(scene = %scene.name, id, roots = scene.roots.len(), "writing scene");
    for root in &scene.roots {
        write_object(ctx, root, Some(id))?;
    }
    Ok(id)
}

/// Write `obj` if it has a Helix representation and link it under `parent`.
///
/// Children of a skipped object attach to `parent` instead, so they end up
/// under the nearest written ancestor.
pub(crate) fn write_object<W: Write>(
    ctx: &mut ExportContext<W>,
    obj: &SceneObject,
    parent: Option<u32>,
) -> Result<Option<u32>> {
    let id = match &obj.kind {
        ObjectKind::Mesh { mesh, materials } => Some(write_model_instance(ctx, obj, mesh, materials)?),
        ObjectKind::Light(light) => Some(write_light(ctx, obj, light)?),
        ObjectKind::Group { offset, members } => Some(write_group(ctx, obj, *offset, members)?),
        ObjectKind::Unsupported { host_type } => {
            tracing::warn!(object = %obj.name, host_type = %host_type, "skipping unsupported object");
            ctx.mark_skipped();
            None
        }
    };

    if let Some(id) = id {
        ctx.link_entity(EntityKey::Object(obj.name.clone()), id)?;
        if let Some(parent) = parent {
            ctx.link(parent, id, LinkKind::Hierarchy);
        }
    }

    let child_parent = id.or(parent);
    for child in &obj.children {
        write_object(ctx, child, child_parent)?;
    }
    Ok(id)
}

fn write_transform<W: Write>(ctx: &mut ExportContext<W>, t: &Transform) -> Result<()> {
    ctx.prop(PropertyType::Position, t.position)?;
    ctx.prop(PropertyType::Rotation, t.rotation)?;
    ctx.prop(PropertyType::Scale, t.scale)
}

/// Instance record referencing every mesh record of its mesh and its material slots.
fn write_model_instance<W: Write>(
    ctx: &mut ExportContext<W>,
    obj: &SceneObject,
    mesh: &str,
    materials: &[String],
) -> Result<u32> {
    let id = ctx.start_object(ObjectType::ModelInstance)?;
    ctx.prop(PropertyType::Name, obj.name.as_str())?;
    write_transform(ctx, &obj.transform)?;
    ctx.end_object()?;

    for mesh_id in ctx.ids_for(&EntityKey::Mesh(mesh.to_string()))? {
        ctx.link(id, mesh_id, LinkKind::Hierarchy);
    }
    for material in materials {
        let material_id = ctx.first_id(&EntityKey::Material(material.clone()))?;
        ctx.link(id, material_id, LinkKind::Hierarchy);
    }
    tracing::trace!(object = %obj.name, id, "wrote model instance");
    Ok(id)
}

fn write_light<W: Write>(ctx: &mut ExportContext<W>, obj: &SceneObject, light: &Light) -> Result<u32> {
    let id = ctx.start_object(light.light_type.object_type())?;
    ctx.prop(PropertyType::Name, obj.name.as_str())?;
    write_transform(ctx, &obj.transform)?;
    ctx.prop(PropertyType::Color, light.color)?;
    ctx.prop(PropertyType::Intensity, light.intensity)?;
    ctx.prop(PropertyType::CastShadows, light.cast_shadows)?;
    if light.has_radius() {
        ctx.prop(PropertyType::Radius, light.radius)?;
    }
    if light.light_type == LightType::Spot {
        ctx.prop(PropertyType::SpotInnerAngle, light.spot_inner_angle)?;
        ctx.prop(PropertyType::SpotOuterAngle, light.spot_outer_angle)?;
    }
    ctx.end_object()?;
    tracing::trace!(object = %obj.name, id, "wrote light");
    Ok(id)
}

/// Scene node for the group, then each member proxied from it.
///
/// The node transform is the object transform with the group offset removed.
fn write_group<W: Write>(
    ctx: &mut ExportContext<W>,
    obj: &SceneObject,
    offset: Vec3,
    members: &[SceneObject],
) -> Result<u32> {
    let node = Transform::from_matrix(obj.transform.to_matrix() * Mat4::from_translation(-offset));

    let id = ctx.start_object(ObjectType::SceneNode)?;
    ctx.prop(PropertyType::Name, obj.name.as_str())?;
    write_transform(ctx, &node)?;
    ctx.end_object()?;

    for member in members {
        if let Some(member_id) = write_object(ctx, member, None)? {
            ctx.link(id, member_id, LinkKind::Proxied);
        }
    }
    tracing::trace!(object = %obj.name, id, members = members.len(), "wrote group");
    Ok(id)
}
