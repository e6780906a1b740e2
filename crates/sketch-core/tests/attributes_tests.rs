// Host-side tests for per-triangle attribute generation.

use glam::Vec3;
use rand::rngs::StdRng;
use rand::SeedableRng;
use sketch_core::geometry::{cuboid, icosahedron};
use sketch_core::{ExplodeAttributes, SketchError};

#[test]
fn cuboid_gets_one_sample_per_triangle() {
    let geometry = cuboid(1.0, 1.0, 1.0);
    assert_eq!(geometry.vertex_count(), 36);

    let attrs = ExplodeAttributes::from_seed(&geometry, Some(7));
    assert_eq!(attrs.directions.len(), 36);
    assert_eq!(attrs.strengths.len(), 36);

    for tri in 0..12 {
        let base = tri * 3;
        assert_eq!(attrs.directions[base], attrs.directions[base + 1]);
        assert_eq!(attrs.directions[base], attrs.directions[base + 2]);
        assert_eq!(attrs.strengths[base], attrs.strengths[base + 1]);
        assert_eq!(attrs.strengths[base], attrs.strengths[base + 2]);
    }
}

#[test]
fn directions_are_unit_and_strengths_in_range() {
    let geometry = icosahedron(1.0, 3);
    let mut rng = StdRng::seed_from_u64(0xfeed);
    let attrs = ExplodeAttributes::generate(&geometry, &mut rng);

    for d in &attrs.directions {
        assert!((d.length() - 1.0).abs() < 1e-5, "not unit: {d:?}");
    }
    for s in &attrs.strengths {
        assert!((0.0..10.0).contains(s), "out of range: {s}");
    }
}

#[test]
fn same_seed_same_attributes() {
    let geometry = icosahedron(1.0, 2);
    let a = ExplodeAttributes::from_seed(&geometry, Some(42));
    let b = ExplodeAttributes::from_seed(&geometry, Some(42));
    let c = ExplodeAttributes::from_seed(&geometry, Some(43));
    assert_eq!(a, b);
    assert_ne!(a, c);
}

#[test]
fn neighbouring_triangles_usually_differ() {
    let geometry = icosahedron(1.0, 1);
    let attrs = ExplodeAttributes::from_seed(&geometry, Some(1));
    let distinct = (1..geometry.triangle_count())
        .filter(|t| attrs.directions[t * 3] != attrs.directions[(t - 1) * 3])
        .count();
    assert_eq!(distinct, geometry.triangle_count() - 1);
}

#[test]
fn truncated_arrays_are_rejected() {
    let geometry = cuboid(1.0, 1.0, 1.0);
    let mut attrs = ExplodeAttributes::from_seed(&geometry, Some(3));
    attrs.strengths.pop();
    assert_eq!(
        attrs.validate(&geometry),
        Err(SketchError::AttributeLengthMismatch {
            attribute: "randStrength",
            expected: 36,
            actual: 35,
        })
    );

    let mut attrs = ExplodeAttributes::from_seed(&geometry, Some(3));
    attrs.directions.push(Vec3::X);
    assert!(matches!(
        attrs.interleave(&geometry),
        Err(SketchError::AttributeLengthMismatch {
            attribute: "randDirection",
            ..
        })
    ));
}

#[test]
fn interleaved_stream_keeps_positions() {
    let geometry = cuboid(2.0, 1.0, 1.0);
    let attrs = ExplodeAttributes::from_seed(&geometry, Some(9));
    let vertices = attrs.interleave(&geometry).unwrap();
    assert_eq!(vertices.len(), 36);
    for ((v, p), s) in vertices.iter().zip(geometry.positions()).zip(&attrs.strengths) {
        assert_eq!(v.position, p.to_array());
        assert_eq!(v.rand_strength, *s);
    }
}
