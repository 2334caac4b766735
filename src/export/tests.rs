use super::*;
use crate::hx::{IArchive, Link, LinkKind, ObjectType, PropertyType, HX_MAGIC};
use crate::scene::{Light, Material, Mesh, Scene, SceneObject, SubMesh, Texture};
use crate::util::{Error, Vec3};

fn triangle() -> SubMesh {
    SubMesh::new(
        vec![Vec3::ZERO, Vec3::X, Vec3::Y],
        vec![0, 1, 2],
    )
}

fn doc_with_scene(scene: Scene) -> SceneDocument {
    let mut doc = SceneDocument::new();
    doc.add_mesh(Mesh::new("CubeData").with_submesh(triangle()));
    doc.add_scene(scene);
    doc
}

fn link(from: u32, to: u32, kind: LinkKind) -> Link {
    Link::new(from, to, kind)
}

fn decode(doc: &SceneDocument) -> IArchive {
    let bytes = export_to_vec(doc, &ExportOptions::default()).expect("export");
    IArchive::from_bytes(&bytes).expect("decode")
}

#[test]
fn test_magic_first() -> Result<()> {
    let bytes = export_to_vec(&SceneDocument::new(), &ExportOptions::default())?;
    assert_eq!(&bytes[..2], HX_MAGIC);
    Ok(())
}

#[test]
fn test_mesh_with_child_light() {
    let scene = Scene::new("Main").with_root(
        SceneObject::mesh("Cube", "CubeData").with_child(SceneObject::light("Lamp", Light::point())),
    );
    let archive = decode(&doc_with_scene(scene));

    assert_eq!(archive.objects_of_type(ObjectType::Scene).count(), 1);
    assert_eq!(archive.objects_of_type(ObjectType::ModelInstance).count(), 1);
    assert_eq!(archive.objects_of_type(ObjectType::PointLight).count(), 1);

    let scene_id = archive.find(ObjectType::Scene, "Main").map(|o| o.id);
    let cube_id = archive.find(ObjectType::ModelInstance, "Cube").map(|o| o.id);
    let lamp_id = archive.find(ObjectType::PointLight, "Lamp").map(|o| o.id);
    assert_eq!((scene_id, cube_id, lamp_id), (Some(1), Some(2), Some(3)));

    assert_eq!(
        archive.links(),
        &[
            link(2, 0, LinkKind::Hierarchy),
            link(1, 2, LinkKind::Hierarchy),
            link(2, 3, LinkKind::Hierarchy),
        ]
    );
    // everything except the instance-to-mesh reference is scene hierarchy
    let scene_graph: Vec<_> = archive.links().iter().filter(|l| l.to != 0).copied().collect();
    assert_eq!(
        scene_graph,
        vec![link(1, 2, LinkKind::Hierarchy), link(2, 3, LinkKind::Hierarchy)]
    );
}

#[test]
fn test_unsupported_root_is_skipped() -> Result<()> {
    let scene = Scene::new("Main").with_root(
        SceneObject::unsupported("Rig", "ARMATURE").with_child(SceneObject::mesh("Cube", "CubeData")),
    );
    let (bytes, summary) = export(Vec::new(), &doc_with_scene(scene), &ExportOptions::default())?;
    let archive = IArchive::from_bytes(&bytes)?;

    assert_eq!(summary.skipped, 1);
    assert_eq!(archive.objects().len(), 3);
    assert!(archive.objects().iter().all(|o| o.name() != Some("Rig")));
    assert_eq!(
        archive.links(),
        &[link(2, 0, LinkKind::Hierarchy), link(1, 2, LinkKind::Hierarchy)]
    );
    Ok(())
}

#[test]
fn test_nested_unsupported_attaches_to_exported_ancestor() {
    let scene = Scene::new("Main").with_root(
        SceneObject::mesh("Parent", "CubeData").with_child(
            SceneObject::unsupported("Cam", "CAMERA")
                .with_child(SceneObject::light("Lamp", Light::directional())),
        ),
    );
    let archive = decode(&doc_with_scene(scene));
    let lamp = archive.find(ObjectType::DirectionalLight, "Lamp").map(|o| o.id);
    assert_eq!(lamp, Some(3));
    assert!(archive.links().contains(&link(2, 3, LinkKind::Hierarchy)));
}

#[test]
fn test_group_members_are_proxied() {
    let group = SceneObject::group(
        "Group",
        Vec3::new(1.0, 0.0, 0.0),
        vec![SceneObject::mesh("A", "CubeData"), SceneObject::mesh("B", "CubeData")],
    );
    let archive = decode(&doc_with_scene(Scene::new("Main").with_root(group)));

    let node = archive.find(ObjectType::SceneNode, "Group").expect("group node");
    assert_eq!(node.id, 2);
    let position = node.get(PropertyType::Position).and_then(|v| v.as_vec3());
    assert_eq!(position, Some(Vec3::new(-1.0, 0.0, 0.0)));

    let proxied: Vec<_> = archive
        .links()
        .iter()
        .filter(|l| l.link_kind() == Some(LinkKind::Proxied))
        .copied()
        .collect();
    assert_eq!(proxied, vec![link(2, 3, LinkKind::Proxied), link(2, 4, LinkKind::Proxied)]);
    assert!(archive.links().contains(&link(1, 2, LinkKind::Hierarchy)));
}

#[test]
fn test_multi_id_mesh_and_materials() {
    let mut doc = SceneDocument::new();
    doc.add_mesh(Mesh::new("Split").with_submesh(triangle()).with_submesh(triangle()));
    doc.add_texture(Texture::new("Bricks", "bricks.png"));
    doc.add_texture(Texture::new("BricksN", "bricks_n.png"));
    doc.add_material(Material::new("Wall").with_color_map("Bricks").with_normal_map("BricksN"));
    doc.add_material(Material::new("Trim"));
    doc.add_scene(Scene::new("Main").with_root(
        SceneObject::mesh("House", "Split").with_material("Wall").with_material("Trim"),
    ));
    let archive = decode(&doc);

    // meshes 0,1; textures 2,3; materials 4,5; scene 6; instance 7
    let types: Vec<_> = archive.objects().iter().map(|o| o.object_type).collect();
    assert_eq!(
        types,
        vec![
            ObjectType::Mesh,
            ObjectType::Mesh,
            ObjectType::Texture,
            ObjectType::Texture,
            ObjectType::Material,
            ObjectType::Material,
            ObjectType::Scene,
            ObjectType::ModelInstance,
        ]
    );
    assert_eq!(
        archive.links(),
        &[
            link(4, 2, LinkKind::ColorMap),
            link(4, 3, LinkKind::NormalMap),
            link(7, 0, LinkKind::Hierarchy),
            link(7, 1, LinkKind::Hierarchy),
            link(7, 4, LinkKind::Hierarchy),
            link(7, 5, LinkKind::Hierarchy),
            link(6, 7, LinkKind::Hierarchy),
        ]
    );
}

#[test]
fn test_unknown_mesh_is_lookup_error() {
    let mut doc = SceneDocument::new();
    doc.add_scene(Scene::new("Main").with_root(SceneObject::mesh("Cube", "Nope")));
    let err = export_to_vec(&doc, &ExportOptions::default()).unwrap_err();
    assert!(matches!(err, Error::Lookup(ref m) if m.contains("Nope")));
}

#[test]
fn test_unknown_texture_is_lookup_error() {
    let mut doc = SceneDocument::new();
    doc.add_material(Material::new("Wall").with_specular_map("Missing"));
    let err = export_to_vec(&doc, &ExportOptions::default()).unwrap_err();
    assert!(matches!(err, Error::Lookup(_)));
}

#[test]
fn test_default_scene_index_out_of_range() {
    let mut doc = SceneDocument::new();
    doc.default_scene = 300;
    let err = export_to_vec(&doc, &ExportOptions::default()).unwrap_err();
    assert!(matches!(err, Error::Encode(crate::util::EncodeError::ValueOutOfRange { .. })));
}

#[test]
fn test_default_scene_past_last_scene() {
    let mut doc = doc_with_scene(Scene::new("Only"));
    doc.default_scene = 7;
    let err = export_to_vec(&doc, &ExportOptions::default()).unwrap_err();
    assert!(matches!(err, Error::InvalidStructure(_)));
}

#[test]
fn test_duplicate_mesh_names_rejected() {
    let mut doc = SceneDocument::new();
    doc.add_mesh(Mesh::new("A").with_submesh(triangle()));
    doc.add_mesh(Mesh::new("A").with_submesh(triangle()));
    doc.add_scene(Scene::new("Main").with_root(SceneObject::mesh("Inst", "A")));

    let mut bytes = Vec::new();
    let err = export(&mut bytes, &doc, &ExportOptions::default()).unwrap_err();
    assert!(matches!(err, Error::InvalidStructure(_)));
    assert!(bytes.is_empty(), "nothing is written for a rejected document");
}

#[test]
fn test_duplicate_material_names_rejected() {
    let mut doc = SceneDocument::new();
    doc.add_material(Material::new("Paint"));
    doc.add_material(Material { roughness: 0.1, ..Material::new("Paint") });
    let err = export_to_vec(&doc, &ExportOptions::default()).unwrap_err();
    assert!(matches!(err, Error::InvalidStructure(_)));
}

#[test]
fn test_object_linked_into_two_scenes() -> Result<()> {
    let mut doc = SceneDocument::new();
    doc.add_mesh(Mesh::new("CubeData").with_submesh(triangle()));
    doc.add_scene(Scene::new("A").with_root(SceneObject::mesh("Cube", "CubeData")));
    doc.add_scene(Scene::new("B").with_root(SceneObject::mesh("Cube", "CubeData")));

    let mut ctx = ExportContext::new(Vec::new(), &ExportOptions::default());
    ctx.write_header(&crate::hx::Header::new("test"))?;
    resources::write_mesh(&mut ctx, &doc.meshes[0])?;
    for scene in &doc.scenes {
        objects::write_scene(&mut ctx, scene)?;
    }
    let key = crate::hx::EntityKey::Object("Cube".into());
    assert_eq!(ctx.object_table().ids_for(&key)?, &[2, 4]);
    let (_, summary) = ctx.finish()?;
    assert_eq!(summary.objects, 5);
    assert_eq!(summary.dangling, 0);
    Ok(())
}

#[test]
fn test_light_properties() {
    let spot = Light::spot(0.3, 0.6).with_color(Vec3::new(1.0, 0.5, 0.0), 4.0).with_shadows(true);
    let scene = Scene::new("Main")
        .with_ambient(Vec3::splat(0.1))
        .with_root(SceneObject::light("Spot", spot))
        .with_root(SceneObject::light("Sun", Light::directional()));
    let archive = decode(&doc_with_scene(scene));

    let spot = archive.find(ObjectType::SpotLight, "Spot").expect("spot");
    assert_eq!(spot.get(PropertyType::Intensity).and_then(|v| v.as_f32()), Some(4.0));
    assert_eq!(spot.get(PropertyType::CastShadows).and_then(|v| v.as_u8()), Some(1));
    assert_eq!(spot.get(PropertyType::SpotOuterAngle).and_then(|v| v.as_f32()), Some(0.6));

    let sun = archive.find(ObjectType::DirectionalLight, "Sun").expect("sun");
    assert!(sun.get(PropertyType::Radius).is_none());
    assert!(sun.get(PropertyType::SpotInnerAngle).is_none());

    let scene = archive.find(ObjectType::Scene, "Main").expect("scene");
    assert_eq!(
        scene.get(PropertyType::AmbientColor).and_then(|v| v.as_vec3()),
        Some(Vec3::splat(0.1))
    );
}
