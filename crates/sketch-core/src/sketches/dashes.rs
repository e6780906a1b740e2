use glam::Vec3;
use rand::rngs::StdRng;

use crate::camera::Camera;
use crate::constants::{
    color_vec3, BLACK, CAMERA_FAR, CAMERA_NEAR, DASH_BOX_SEGMENTS, DASH_END_OFFSET,
    DASH_MID_OFFSET, DASH_RECENTER, RED,
};
use crate::error::Result;
use crate::geometry::{box_lattice_points, LineSegments};
use crate::input::InputState;
use crate::lifecycle::SketchProgram;
use crate::playback::{FrameState, Settings};
use crate::scene::{Scene, SceneComposer};

/// A bent red dash at every grid point of a subdivided unit box, the whole
/// cluster turning to follow the pointer.
#[derive(Debug, Default)]
pub struct Dashes;

impl Dashes {
    pub fn new() -> Self {
        Self
    }
}

/// Two segments per lattice point: start, bend and end, each pulled towards
/// the origin by a fraction of the dash's own centre.
pub fn dash_segments(points: &[Vec3]) -> LineSegments {
    LineSegments::from_segments(points.iter().flat_map(|&p| {
        let mid = p + Vec3::splat(DASH_MID_OFFSET);
        let end = p + Vec3::splat(DASH_END_OFFSET);
        // bounds of start..end are centred on the bend point
        let shift = mid * DASH_RECENTER;
        [[p + shift, mid + shift], [mid + shift, end + shift]]
    }))
}

impl SketchProgram for Dashes {
    fn name(&self) -> &'static str {
        "dashes"
    }

    fn settings(&self) -> Settings {
        Settings::default()
    }

    fn compose(&mut self, composer: &mut SceneComposer, _rng: &mut StdRng) -> Result<Camera> {
        composer.set_clear_color(BLACK);

        let points = box_lattice_points(1.0, 1.0, 1.0, DASH_BOX_SEGMENTS);
        composer.add_lines(&dash_segments(&points), color_vec3(RED))?;

        Ok(Camera::perspective(
            50.0,
            CAMERA_NEAR,
            CAMERA_FAR,
            Vec3::new(0.0, 0.0, -4.0),
            Vec3::ZERO,
        ))
    }

    fn update(&mut self, scene: &mut Scene, _frame: FrameState, input: &InputState) {
        scene.root.set_rotation_y(input.pointer.x);
    }
}
