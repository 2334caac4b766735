//! Integration tests for writing Helix files and reading them back.

use helix::hx::{IArchive, LinkKind, ObjectType, PropertyType, HX_MAGIC, HX_VERSION};
use helix::prelude::*;
use helix::util::{Vec2, Vec3};

use tempfile::NamedTempFile;

fn sample_document() -> SceneDocument {
    let mut doc = SceneDocument::new();
    doc.add_mesh(
        Mesh::new("Quad").with_submesh(
            SubMesh::new(
                vec![
                    Vec3::new(0.0, 0.0, 0.0),
                    Vec3::new(1.0, 0.0, 0.0),
                    Vec3::new(1.0, 1.0, 0.0),
                    Vec3::new(0.0, 1.0, 0.0),
                ],
                vec![0, 1, 2, 0, 2, 3],
            )
            .with_normals(vec![Vec3::Z; 4])
            .with_uvs(vec![Vec2::ZERO, Vec2::X, Vec2::ONE, Vec2::Y]),
        ),
    );
    doc.add_texture(Texture::new("Checker", "textures/checker.png"));
    doc.add_material(Material::new("Floor").with_color_map("Checker"));

    let floor = SceneObject::mesh("Floor", "Quad")
        .with_material("Floor")
        .with_child(SceneObject::light("Lamp", Light::point()).with_position(Vec3::new(0.0, 2.0, 0.0)));
    let group = SceneObject::group(
        "Props",
        Vec3::ZERO,
        vec![SceneObject::mesh("PropA", "Quad"), SceneObject::mesh("PropB", "Quad")],
    );
    doc.add_scene(
        Scene::new("Main")
            .with_root(floor)
            .with_root(group)
            .with_root(SceneObject::unsupported("Camera", "CAMERA")),
    );
    doc.add_scene(Scene::new("Empty"));
    doc.default_scene = 1;
    doc
}

#[test]
fn test_file_starts_with_magic() {
    let temp = NamedTempFile::new().expect("Failed to create temp file");
    export_to_path(temp.path(), &sample_document(), &ExportOptions::default())
        .expect("Failed to export");

    let bytes = std::fs::read(temp.path()).expect("Failed to read back");
    assert_eq!(&bytes[..2], HX_MAGIC);
}

#[test]
fn test_header_roundtrip() {
    for (mode, pad) in [(LightingMode::Fixed, true), (LightingMode::Dynamic, false)] {
        let temp = NamedTempFile::new().expect("Failed to create temp file");
        let options = ExportOptions::new()
            .with_lighting_mode(mode)
            .with_pad_arrays(pad)
            .with_generator("Roundtrip Test");
        export_to_path(temp.path(), &sample_document(), &options).expect("Failed to export");

        let archive = IArchive::open(temp.path()).expect("Failed to open");
        let header = archive.header();
        assert_eq!(header.version, HX_VERSION);
        assert_eq!(header.generator, "Roundtrip Test");
        assert_eq!(header.pad_arrays, pad);
        assert_eq!(header.default_scene, 1);
        assert_eq!(header.lighting_mode, mode);
    }
}

#[test]
fn test_export_is_idempotent() {
    let doc = sample_document();
    let options = ExportOptions::default();
    let first = export_to_vec(&doc, &options).expect("first export");
    let second = export_to_vec(&doc, &options).expect("second export");
    assert_eq!(first, second);
}

#[test]
fn test_ids_dense_and_links_resolvable() {
    let doc = sample_document();
    let (bytes, summary) = export(Vec::new(), &doc, &ExportOptions::default()).expect("export");
    let archive = IArchive::from_bytes(&bytes).expect("decode");

    let n = archive.objects().len();
    assert_eq!(n, summary.objects);
    let ids: Vec<u32> = archive.objects().iter().map(|o| o.id).collect();
    assert_eq!(ids, (0..n as u32).collect::<Vec<_>>());

    assert_eq!(archive.links().len(), summary.links);
    for link in archive.links() {
        assert!((link.from as usize) < n, "dangling from in {:?}", link);
        assert!((link.to as usize) < n, "dangling to in {:?}", link);
    }
    assert!(archive.dangling_links().is_empty());
    assert_eq!(summary.dangling, 0);
    assert_eq!(summary.skipped, 1);
    assert_eq!(summary.bytes, bytes.len() as u64);
}

#[test]
fn test_section_order() {
    let bytes = export_to_vec(&sample_document(), &ExportOptions::default()).expect("export");
    let archive = IArchive::from_bytes(&bytes).expect("decode");

    let rank = |ty: ObjectType| match ty {
        ObjectType::Mesh => 0,
        ObjectType::Texture => 1,
        ObjectType::Material => 2,
        _ => 3,
    };
    let ranks: Vec<_> = archive.objects().iter().map(|o| rank(o.object_type)).collect();
    let mut sorted = ranks.clone();
    sorted.sort();
    assert_eq!(ranks, sorted, "resources must precede scenes in category order");

    let scenes: Vec<_> = archive.objects_of_type(ObjectType::Scene).filter_map(|o| o.name()).collect();
    assert_eq!(scenes, vec!["Main", "Empty"]);
}

#[test]
fn test_mesh_data_roundtrip_with_and_without_padding() {
    let doc = sample_document();
    let padded = export_to_vec(&doc, &ExportOptions::new().with_pad_arrays(true)).expect("padded");
    let packed = export_to_vec(&doc, &ExportOptions::new().with_pad_arrays(false)).expect("packed");
    assert!(padded.len() >= packed.len());

    for bytes in [padded, packed] {
        let archive = IArchive::from_bytes(&bytes).expect("decode");
        let mesh = archive.find(ObjectType::Mesh, "Quad").expect("mesh record");
        assert_eq!(mesh.get(PropertyType::NumVertices).and_then(|v| v.as_u32()), Some(4));
        assert_eq!(
            mesh.get(PropertyType::Indices).and_then(|v| v.as_u32_array()),
            Some(&[0u32, 1, 2, 0, 2, 3][..])
        );
        let positions = mesh
            .get(PropertyType::VertexPositions)
            .and_then(|v| v.as_f32_array())
            .expect("positions");
        assert_eq!(positions.len(), 12);
        assert_eq!(&positions[6..9], &[1.0f32, 1.0, 0.0]);
        let uvs = mesh.get(PropertyType::VertexUvs).and_then(|v| v.as_f32_array()).expect("uvs");
        assert_eq!(uvs, &[0.0f32, 0.0, 1.0, 0.0, 1.0, 1.0, 0.0, 1.0]);
    }
}

#[test]
fn test_group_and_material_links_in_file() {
    let bytes = export_to_vec(&sample_document(), &ExportOptions::default()).expect("export");
    let archive = IArchive::from_bytes(&bytes).expect("decode");

    let id_of = |ty, name| archive.find(ty, name).map(|o| o.id).expect("object");
    let floor_mat = id_of(ObjectType::Material, "Floor");
    let checker = id_of(ObjectType::Texture, "Checker");
    let props = id_of(ObjectType::SceneNode, "Props");
    let prop_a = id_of(ObjectType::ModelInstance, "PropA");
    let prop_b = id_of(ObjectType::ModelInstance, "PropB");
    let main = id_of(ObjectType::Scene, "Main");

    let has = |from, to, kind: LinkKind| {
        archive.links().iter().any(|l| l.from == from && l.to == to && l.kind == kind.as_u8())
    };
    assert!(has(floor_mat, checker, LinkKind::ColorMap));
    assert!(has(props, prop_a, LinkKind::Proxied));
    assert!(has(props, prop_b, LinkKind::Proxied));
    assert!(has(main, props, LinkKind::Hierarchy));
    assert!(!has(main, prop_a, LinkKind::Hierarchy));
}

#[test]
fn test_unopenable_sink_writes_nothing() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("no_such_dir").join("out.hx");
    let err = export_to_path(&path, &sample_document(), &ExportOptions::default()).unwrap_err();
    assert!(matches!(err, Error::FileNotFound(_)));
    assert!(!path.exists());
}

#[test]
fn test_json_document_export() {
    let json = r#"{
        "meshes": [{"name": "Tri", "submeshes": [{"positions": [[0,0,0],[1,0,0],[0,1,0]], "indices": [0,1,2]}]}],
        "materials": [{"name": "Red", "color": [1, 0, 0], "lighting_model": "BlinnPhong"}],
        "scenes": [{
            "name": "Main",
            "roots": [{
                "name": "Tri",
                "transform": {"position": [0, 1, 0]},
                "kind": {"type": "Mesh", "mesh": "Tri", "materials": ["Red"]},
                "children": [{"name": "Sun", "kind": {"type": "Light", "light_type": "Directional"}}]
            }]
        }]
    }"#;
    let doc = SceneDocument::from_json(json).expect("parse");
    let bytes = export_to_vec(&doc, &ExportOptions::default()).expect("export");
    let archive = IArchive::from_bytes(&bytes).expect("decode");

    let red = archive.find(ObjectType::Material, "Red").expect("material");
    assert_eq!(
        red.get(PropertyType::LightingModel).and_then(|v| v.as_u8()),
        Some(LightingModel::BlinnPhong.as_u8())
    );
    let tri = archive.find(ObjectType::ModelInstance, "Tri").expect("instance");
    assert_eq!(
        tri.get(PropertyType::Position).and_then(|v| v.as_vec3()),
        Some(Vec3::new(0.0, 1.0, 0.0))
    );
    assert!(archive.find(ObjectType::DirectionalLight, "Sun").is_some());
}
