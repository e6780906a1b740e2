// Scene composition: object handles, draw order and primitive checks.

use glam::Vec3;
use rand::rngs::StdRng;
use rand::SeedableRng;
use sketch_core::geometry::{cuboid, icosahedron};
use sketch_core::scene::ObjectBinding;
use sketch_core::{
    Camera, ExplodeAttributes, LineSegments, SceneComposer, ShaderVariant, SketchError,
    VertexLayout,
};

fn camera() -> Camera {
    Camera::perspective(50.0, 0.01, 100.0, Vec3::new(0.0, 0.0, -4.0), Vec3::ZERO)
}

#[test]
fn ids_survive_draw_sorting() {
    let mut composer = SceneComposer::new();
    let first = composer
        .add_mesh(&cuboid(1.0, 1.0, 1.0), ShaderVariant::Lambert, Vec3::X)
        .unwrap();
    let second = composer.add_instance(first, Vec3::Y).unwrap();
    let third = composer.add_instance(first, Vec3::Z).unwrap();
    composer.transform_mut(first).unwrap().scale.y = 3.0;
    composer.transform_mut(second).unwrap().scale.y = 1.0;
    composer.transform_mut(third).unwrap().scale.y = 2.0;
    composer.sort_objects_by(|o| o.transform.scale.y);

    let (mut scene, resources) = composer.finish(camera());
    assert_eq!(resources.draw_order, [1, 2, 0]);
    // ids still address the objects they were minted for
    assert_eq!(scene.object_mut(first).unwrap().color, Vec3::X);
    assert_eq!(scene.object_mut(second).unwrap().color, Vec3::Y);
    assert_eq!(scene.object_mut(third).unwrap().color, Vec3::Z);
}

#[test]
fn unsorted_scenes_draw_in_insertion_order() {
    let mut composer = SceneComposer::new();
    let a = composer
        .add_mesh(&cuboid(1.0, 1.0, 1.0), ShaderVariant::Normal, Vec3::ONE)
        .unwrap();
    composer.add_instance(a, Vec3::ONE).unwrap();
    let (_, resources) = composer.finish(camera());
    assert_eq!(resources.draw_order, [0, 1]);
    assert_eq!(
        resources.objects,
        [ObjectBinding { mesh: 0, program: 0 }; 2]
    );
}

#[test]
fn foreign_ids_are_rejected() {
    let mut other = SceneComposer::new();
    let a = other
        .add_mesh(&cuboid(1.0, 1.0, 1.0), ShaderVariant::Normal, Vec3::ONE)
        .unwrap();
    let b = other.add_instance(a, Vec3::ONE).unwrap();

    let mut composer = SceneComposer::new();
    composer
        .add_mesh(&cuboid(1.0, 1.0, 1.0), ShaderVariant::Normal, Vec3::ONE)
        .unwrap();
    assert_eq!(
        composer.add_instance(b, Vec3::ONE),
        Err(SketchError::UnknownObject { index: 1 })
    );
    assert!(composer.transform_mut(b).is_err());

    let (mut scene, _) = composer.finish(camera());
    assert!(scene.object_mut(b).is_none());
}

#[test]
fn lines_get_their_own_layout() {
    let mut composer = SceneComposer::new();
    let lines = LineSegments::from_segments([[Vec3::ZERO, Vec3::X]]);
    composer.add_lines(&lines, Vec3::X).unwrap();
    let (_, resources) = composer.finish(camera());
    assert_eq!(resources.meshes[0].layout, VertexLayout::Line);
    assert_eq!(resources.meshes[0].vertex_count, 2);
    assert_eq!(resources.meshes[0].bytes.len(), 24);
    assert_eq!(resources.programs[0].label(), "lines");
}

#[test]
fn add_mesh_refuses_programs_it_cannot_feed() {
    let mut composer = SceneComposer::new();
    let shell = icosahedron(1.0, 0);
    assert!(matches!(
        composer.add_mesh(&shell, ShaderVariant::Line, Vec3::ONE),
        Err(SketchError::WrongPrimitive { .. })
    ));
    assert!(matches!(
        composer.add_mesh(&shell, ShaderVariant::Explode, Vec3::ONE),
        Err(SketchError::AttributeLengthMismatch { .. })
    ));
    let mut rng = StdRng::seed_from_u64(1);
    let attributes = ExplodeAttributes::generate(&shell, &mut rng);
    assert!(composer.add_procedural(&shell, &attributes, Vec3::ONE).is_ok());
}
