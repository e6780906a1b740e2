// Host-side checks of the shader math mirrors.

use glam::{Mat4, Vec3};
use sketch_core::stages::*;

#[test]
fn explode_scale_never_shrinks() {
    let dirs = [Vec3::X, Vec3::new(0.6, -0.8, 0.0), Vec3::new(-0.3, 0.3, -0.9).normalize()];
    for dir in dirs {
        for strength in [0.0, 0.5, 4.2, 9.99] {
            for i in 0..200 {
                let s = explode_scale(dir, strength, i as f32 * 0.173);
                assert!(s.min_element() >= 1.0, "{s:?}");
            }
        }
    }
}

#[test]
fn explode_at_rest_is_base_scale() {
    let p = Vec3::new(1.0, 0.0, 0.0);
    let out = explode_displace(p, Vec3::X, 7.0, 0.0);
    assert!((out - Vec3::new(0.8, 0.0, 0.0)).length() < 1e-6);
}

#[test]
fn explode_peak_matches_closed_form() {
    // sin(pi/2) = 1, so the multiplier is 1 + 0.1 * strength on a unit axis
    let t = std::f32::consts::FRAC_PI_2;
    let out = explode_displace(Vec3::X, Vec3::X, 5.0, t);
    assert!((out.x - 0.8 * 1.5).abs() < 1e-5);
}

#[test]
fn explode_color_tracks_displacement() {
    let color = Vec3::new(1.0, 0.39, 0.28);
    assert_eq!(explode_color(color, Vec3::ONE, 0.0), color);
    let lit = explode_color(color, Vec3::splat(0.5), std::f32::consts::FRAC_PI_2);
    assert!((lit - (color + Vec3::splat(0.5))).length() < 1e-5);
}

#[test]
fn mask_is_full_on_a_point() {
    let points = [Vec3::X, Vec3::Y, Vec3::Z];
    assert_eq!(proximity_mask(Vec3::Y, &points, 0.0, 0.01), 1.0);
}

#[test]
fn mask_is_empty_far_away() {
    let points = [Vec3::X, Vec3::Y, Vec3::Z];
    assert_eq!(proximity_mask(Vec3::splat(-1.0), &points, 0.0, 0.01), 0.0);
    assert_eq!(proximity_mask(Vec3::ZERO, &[], 0.0, 0.01), 0.0);
}

#[test]
fn mask_threshold_wobbles_within_bounds() {
    for i in 0..100 {
        let th = mask_threshold(i as f32 * 0.37);
        assert!((0.14..=0.16).contains(&th));
    }
}

#[test]
fn hard_step_without_gradient() {
    assert_eq!(aastep(0.15, 0.149, 0.0), 0.0);
    assert_eq!(aastep(0.15, 0.151, 0.0), 1.0);
    let mid = aastep(0.15, 0.15, 0.02);
    assert!((mid - 0.5).abs() < 1e-5);
}

#[test]
fn rim_is_zero_facing_camera_and_full_at_silhouette() {
    let camera = Vec3::new(0.0, 0.0, 4.0);
    let facing = sphere_rim(Vec3::Z, Mat4::IDENTITY, camera);
    assert!(facing.abs() < 1e-5);
    let edge = sphere_rim(Vec3::X, Mat4::IDENTITY, Vec3::new(0.0, 0.0, 1000.0));
    assert!(edge > 0.99);
}

#[test]
fn masked_fragment_turns_white() {
    let color = Vec3::new(0.4, 0.2, 0.6);
    let camera = Vec3::new(0.0, 0.0, 4.0);
    let out = proximity_color(color, Vec3::Z, &[Vec3::Z], 0.0, Mat4::IDENTITY, camera, 0.01);
    assert!((out - Vec3::ONE).length() < 1e-4);
}

#[test]
fn fragment_on_any_of_twelve_points_is_fully_masked() {
    let points = sketch_core::geometry::icosahedron_points(1.0, 0);
    assert_eq!(points.len(), 12);
    for p in &points {
        assert_eq!(nearest_point_distance(*p, &points), 0.0);
        assert_eq!(proximity_mask(*p, &points, 3.7, 0.02), 1.0);
    }
}
