use std::f32::consts::PI;

use glam::Vec3;
use rand::rngs::StdRng;

use crate::camera::Camera;
use crate::constants::{color_vec3, CAMERA_FAR, CAMERA_NEAR, REBECCA_PURPLE, TOMATO, WHITE};
use crate::error::Result;
use crate::geometry::{icosahedron_points, uv_sphere};
use crate::input::InputState;
use crate::lifecycle::SketchProgram;
use crate::playback::{FrameState, Settings};
use crate::scene::{ObjectId, Scene, SceneComposer};
use crate::shader::ShaderVariant;

/// Two spheres dotted white wherever they pass near the vertices of an
/// icosahedron, counter-rotating over the loop.
#[derive(Debug)]
pub struct ProximityDots {
    points: Vec<Vec3>,
    primary: Option<ObjectId>,
    secondary: Option<ObjectId>,
}

impl Default for ProximityDots {
    fn default() -> Self {
        Self::new()
    }
}

impl ProximityDots {
    /// Dots on the 42 vertices of a once-subdivided icosahedron.
    pub fn new() -> Self {
        Self {
            points: icosahedron_points(1.0, 1),
            primary: None,
            secondary: None,
        }
    }
}

impl SketchProgram for ProximityDots {
    fn name(&self) -> &'static str {
        "dots"
    }

    fn settings(&self) -> Settings {
        Settings {
            dimensions: [1080, 1080],
            fps: 60,
            duration: 4.0,
            ..Settings::default()
        }
    }

    fn compose(&mut self, composer: &mut SceneComposer, _rng: &mut StdRng) -> Result<Camera> {
        composer.set_clear_color(WHITE);

        let sphere = uv_sphere(1.0, 32, 16);
        let variant = ShaderVariant::ProximityMask {
            points: self.points.clone(),
        };
        let primary = composer.add_mesh(&sphere, variant, color_vec3(REBECCA_PURPLE))?;
        let secondary = composer.add_instance(primary, color_vec3(TOMATO))?;
        let t = composer.transform_mut(secondary)?;
        t.position = Vec3::splat(1.0);
        t.scale = Vec3::splat(0.7);
        self.primary = Some(primary);
        self.secondary = Some(secondary);

        Ok(Camera::perspective(
            50.0,
            CAMERA_NEAR,
            CAMERA_FAR,
            Vec3::new(0.0, 0.0, -4.0),
            Vec3::ZERO,
        ))
    }

    fn update(&mut self, scene: &mut Scene, frame: FrameState, _input: &InputState) {
        let turns = [
            (self.primary, frame.playhead * PI),
            (self.secondary, -(frame.playhead * PI * 2.0) * 0.5),
        ];
        for (id, angle) in turns.into_iter().filter_map(|(id, a)| Some((id?, a))) {
            if let Some(obj) = scene.object_mut(id) {
                obj.transform.set_rotation_y(angle);
            }
        }
    }
}
