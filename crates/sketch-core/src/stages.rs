//! Host-side mirrors of the WGSL stage math.
//!
//! These follow the shader code line for line so the animation can be reasoned
//! about (and tested) without a GPU. The screen-space derivative used by
//! `aastep` is passed in explicitly as `gradient`.

use glam::{Mat3, Mat4, Vec3};

use crate::constants::{
    AASTEP_WIDTH_SCALE, EXPLODE_BASE_SCALE, EXPLODE_TIME_AMPLITUDE, MASK_FAR_DISTANCE,
    MASK_THRESHOLD, MASK_WOBBLE, MASK_WOBBLE_RATE, RIM_WEIGHT,
};

/// Per-axis multiplier of the explode vertex stage. Always `>= 1`.
#[inline]
pub fn explode_scale(direction: Vec3, strength: f32, time: f32) -> Vec3 {
    direction.abs() * (time.sin() * EXPLODE_TIME_AMPLITUDE).abs() * 2.0 * strength * 0.5
        + Vec3::ONE
}

/// Object-space position emitted by the explode vertex stage.
#[inline]
pub fn explode_displace(position: Vec3, direction: Vec3, strength: f32, time: f32) -> Vec3 {
    position * EXPLODE_BASE_SCALE * explode_scale(direction, strength, time)
}

/// Explode fragment color before the alpha channel is appended.
#[inline]
pub fn explode_color(color: Vec3, displaced: Vec3, time: f32) -> Vec3 {
    color + displaced * time.sin().abs()
}

/// Distance to the closest reference point, starting from a far sentinel.
pub fn nearest_point_distance(position: Vec3, points: &[Vec3]) -> f32 {
    points
        .iter()
        .fold(MASK_FAR_DISTANCE, |dist, p| position.distance(*p).min(dist))
}

/// Hermite step; collapses to a hard step when the edges coincide.
#[inline]
pub fn smoothstep(edge0: f32, edge1: f32, x: f32) -> f32 {
    if edge0 == edge1 {
        return if x < edge0 { 0.0 } else { 1.0 };
    }
    let t = ((x - edge0) / (edge1 - edge0)).clamp(0.0, 1.0);
    t * t * (3.0 - 2.0 * t)
}

/// Anti-aliased step: 0 below `threshold`, 1 above, blended across the pixel footprint.
#[inline]
pub fn aastep(threshold: f32, value: f32, gradient: f32) -> f32 {
    let afwidth = gradient * AASTEP_WIDTH_SCALE;
    smoothstep(threshold - afwidth, threshold + afwidth, value)
}

/// Mask threshold, slowly breathing with time.
#[inline]
pub fn mask_threshold(time: f32) -> f32 {
    MASK_THRESHOLD + (MASK_WOBBLE_RATE * time).sin() * MASK_WOBBLE
}

/// 1 on (and near) a reference point, 0 away from all of them.
pub fn proximity_mask(position: Vec3, points: &[Vec3], time: f32, gradient: f32) -> f32 {
    1.0 - aastep(
        mask_threshold(time),
        nearest_point_distance(position, points),
        gradient,
    )
}

/// Fresnel-style rim term for a point on a sphere centred at the object origin.
pub fn sphere_rim(sphere_position: Vec3, model: Mat4, camera_position: Vec3) -> f32 {
    let normal = sphere_position.normalize_or_zero();
    let world_normal = (Mat3::from_mat4(model) * normal).normalize_or_zero();
    let world_position = model.transform_point3(sphere_position);
    let view_dir = (camera_position - world_position).normalize_or_zero();
    let rim = 1.0 - view_dir.dot(world_normal).max(0.0);
    smoothstep(0.0, 1.0, rim).powf(0.5)
}

/// Proximity-mask fragment color: base color pushed to white under the mask, plus rim.
pub fn proximity_color(
    color: Vec3,
    position: Vec3,
    points: &[Vec3],
    time: f32,
    model: Mat4,
    camera_position: Vec3,
    gradient: f32,
) -> Vec3 {
    let mask = proximity_mask(position, points, time, gradient);
    color.lerp(Vec3::ONE, mask) + Vec3::splat(sphere_rim(position, model, camera_position) * RIM_WEIGHT)
}
