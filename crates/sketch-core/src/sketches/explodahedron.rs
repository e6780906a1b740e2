use std::f32::consts::PI;

use glam::Vec3;
use rand::rngs::StdRng;

use crate::attributes::ExplodeAttributes;
use crate::camera::Camera;
use crate::constants::{
    color_vec3, BLACK, CAMERA_FAR, CAMERA_NEAR, DOLLY_GAIN, DOLLY_OFFSET, DOLLY_Z_LIMIT,
    SPIN_RATE, TOMATO,
};
use crate::error::Result;
use crate::geometry::icosahedron;
use crate::input::InputState;
use crate::lifecycle::SketchProgram;
use crate::playback::{FrameState, Settings};
use crate::scene::{ObjectId, Scene, SceneComposer};
use crate::shader::ShaderVariant;

/// Icosphere whose faces fly apart and back with `sin(time)`, with a small
/// spinning D20 at its centre and a camera dollying through on the playhead.
#[derive(Debug, Default)]
pub struct Explodahedron {
    d20: Option<ObjectId>,
}

impl Explodahedron {
    pub fn new() -> Self {
        Self::default()
    }
}

/// Camera Z for a playhead value.
#[inline]
fn dolly_z(playhead: f32) -> f32 {
    -((playhead.sin() * PI).abs() - DOLLY_OFFSET) * DOLLY_GAIN
}

impl SketchProgram for Explodahedron {
    fn name(&self) -> &'static str {
        "explodahedron"
    }

    fn settings(&self) -> Settings {
        Settings {
            dimensions: [720, 720],
            fps: 60,
            duration: 20.0,
            ..Settings::default()
        }
    }

    fn compose(&mut self, composer: &mut SceneComposer, rng: &mut StdRng) -> Result<Camera> {
        composer.set_clear_color(BLACK);

        let shell = icosahedron(1.0, 2);
        let attributes = ExplodeAttributes::generate(&shell, rng);
        composer.add_procedural(&shell, &attributes, color_vec3(TOMATO))?;

        let d20 = icosahedron(0.2, 0);
        self.d20 = Some(composer.add_mesh(&d20, ShaderVariant::Normal, Vec3::ONE)?);

        Ok(Camera::perspective(
            60.0,
            CAMERA_NEAR,
            CAMERA_FAR,
            Vec3::new(1.0, 1.0, 2.0),
            Vec3::ZERO,
        ))
    }

    fn update(&mut self, scene: &mut Scene, frame: FrameState, _input: &InputState) {
        if scene.camera.eye.z > DOLLY_Z_LIMIT {
            scene.camera.eye.z = dolly_z(frame.playhead);
        }

        if let Some(id) = self.d20 {
            if let Some(d20) = scene.object_mut(id) {
                let spin = (frame.time * SPIN_RATE).sin();
                d20.transform.rotate_x(spin);
                d20.transform.rotate_y(spin);
            }
        }
    }
}
