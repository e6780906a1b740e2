use glam::Vec3;

// Shared tuning constants used by the presets, the shader programs and the front-ends.

// Attribute generation (fixed ranges, not exposed as configuration)
pub const DIRECTION_COMPONENT_MIN: f32 = -1.0;
pub const DIRECTION_COMPONENT_MAX: f32 = 1.0;
pub const STRENGTH_MIN: f32 = 0.0;
pub const STRENGTH_MAX: f32 = 10.0; // exclusive

// Explode vertex stage
pub const EXPLODE_BASE_SCALE: f32 = 0.8; // applied to position before displacement
pub const EXPLODE_TIME_AMPLITUDE: f32 = 0.1;

// Proximity-mask fragment stage
pub const MASK_THRESHOLD: f32 = 0.15;
pub const MASK_WOBBLE: f32 = 0.01; // threshold oscillation amplitude
pub const MASK_WOBBLE_RATE: f32 = 0.5; // multiplies time inside sin()
pub const MASK_FAR_DISTANCE: f32 = 10000.0; // starting value of the nearest-point search
pub const RIM_WEIGHT: f32 = 0.2;

// aastep width factor (1 / sqrt(2))
pub const AASTEP_WIDTH_SCALE: f32 = std::f32::consts::FRAC_1_SQRT_2;

// Named colors (sRGB components)
pub const TOMATO: [f32; 3] = [1.0, 0.388_235, 0.278_431];
pub const REBECCA_PURPLE: [f32; 3] = [0.4, 0.2, 0.6];
pub const RED: [f32; 3] = [1.0, 0.0, 0.0];
pub const WHITE: [f32; 3] = [1.0, 1.0, 1.0];
pub const BLACK: [f32; 3] = [0.0, 0.0, 0.0];
pub const SKYLINE_BACKGROUND: [f32; 3] = [0.85, 0.85, 0.85]; // hsl(0, 0%, 85%)
pub const SKYLINE_AMBIENT: [f32; 3] = [0.4, 0.4, 0.4]; // hsl(0, 0%, 40%)

// Explodahedron camera dolly
pub const DOLLY_Z_LIMIT: f32 = -2.5;
pub const DOLLY_OFFSET: f32 = 1.5;
pub const DOLLY_GAIN: f32 = 2.0;
// D20 spin rate applied inside sin(time * rate)
pub const SPIN_RATE: f32 = 0.001;

// Dashes: one bent line per surface point of a subdivided unit box
pub const DASH_BOX_SEGMENTS: u32 = 5;
pub const DASH_MID_OFFSET: f32 = 0.05; // added to every axis of the bend point
pub const DASH_END_OFFSET: f32 = 0.1;
pub const DASH_RECENTER: f32 = -0.1; // line origin = centre of its bounds times this

// Skyline layout
pub const SKYLINE_BOX_COUNT: usize = 50;
pub const SKYLINE_ZOOM: f32 = 2.0;

// Default perspective clip planes
pub const CAMERA_NEAR: f32 = 0.01;
pub const CAMERA_FAR: f32 = 100.0;

#[inline]
pub fn color_vec3(rgb: [f32; 3]) -> Vec3 {
    Vec3::from(rgb)
}
