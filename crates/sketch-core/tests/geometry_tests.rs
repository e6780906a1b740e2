// Host-side tests for the built-in geometry sources.

use glam::Vec3;
use sketch_core::geometry::{box_lattice_points, cuboid, icosahedron, icosahedron_points, uv_sphere};
use sketch_core::sketches::dash_segments;
use sketch_core::{Geometry, LineSegments, SketchError};

#[test]
fn icosahedron_triangle_counts() {
    assert_eq!(icosahedron(1.0, 0).triangle_count(), 20);
    assert_eq!(icosahedron(1.0, 1).triangle_count(), 80);
    assert_eq!(icosahedron(1.0, 2).triangle_count(), 180);
}

#[test]
fn icosahedron_vertices_lie_on_sphere() {
    let geometry = icosahedron(0.2, 2);
    for p in geometry.positions() {
        assert!((p.length() - 0.2).abs() < 1e-5);
    }
}

#[test]
fn icosahedron_point_sets() {
    assert_eq!(icosahedron_points(1.0, 0).len(), 12);
    assert_eq!(icosahedron_points(1.0, 1).len(), 42);
}

#[test]
fn uv_sphere_and_cuboid_counts() {
    assert_eq!(uv_sphere(1.0, 32, 16).triangle_count(), 32 * 30);
    assert_eq!(cuboid(1.0, 1.0, 1.0).triangle_count(), 12);
}

#[test]
fn cuboid_normals_point_outwards() {
    let geometry = cuboid(1.0, 2.0, 3.0);
    for (tri, normals) in geometry.triangles().zip(geometry.normals().chunks_exact(3)) {
        let centre = (tri[0] + tri[1] + tri[2]) / 3.0;
        assert!(normals[0].dot(centre) > 0.0, "inward normal at {centre:?}");
        assert!((normals[0].length() - 1.0).abs() < 1e-5);
    }
}

#[test]
fn partial_triangle_is_an_error() {
    let err = Geometry::new(vec![Vec3::ZERO, Vec3::X, Vec3::Y, Vec3::Z]).unwrap_err();
    assert_eq!(err, SketchError::VertexCountNotTriangles { vertex_count: 4 });
    assert!(Geometry::new(vec![Vec3::ZERO, Vec3::X, Vec3::Y]).is_ok());
}

#[test]
fn box_lattice_has_only_surface_points() {
    let points = box_lattice_points(1.0, 1.0, 1.0, 5);
    // 6^3 grid minus the 4^3 interior
    assert_eq!(points.len(), 152);
    for p in &points {
        assert!(p.abs().max_element() <= 0.5 + 1e-6);
        assert!((p.abs().max_element() - 0.5).abs() < 1e-6);
    }
    assert_eq!(box_lattice_points(2.0, 2.0, 2.0, 1).len(), 8);
}

#[test]
fn each_dash_is_two_joined_segments() {
    let p = Vec3::new(0.5, -0.5, 0.1);
    let lines = dash_segments(&[p]);
    assert_eq!(lines.segment_count(), 2);
    let v = lines.positions();
    assert_eq!(v[1], v[2]);
    // centred on the bend, pulled in by a tenth of it
    let shift = (p + Vec3::splat(0.05)) * -0.1;
    assert!((v[0] - (p + shift)).length() < 1e-6);
    assert!((v[3] - (p + Vec3::splat(0.1) + shift)).length() < 1e-6);
}

#[test]
fn line_segments_flatten_in_order() {
    let lines = LineSegments::from_segments([[Vec3::ZERO, Vec3::X], [Vec3::Y, Vec3::Z]]);
    assert_eq!(lines.vertex_count(), 4);
    assert_eq!(lines.positions(), &[Vec3::ZERO, Vec3::X, Vec3::Y, Vec3::Z]);
}
