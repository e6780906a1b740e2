use std::f32::consts::TAU;

use glam::{Quat, Vec3};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::Rng;

use crate::camera::Camera;
use crate::constants::{
    color_vec3, SKYLINE_AMBIENT, SKYLINE_BACKGROUND, SKYLINE_BOX_COUNT, SKYLINE_ZOOM, WHITE,
};
use crate::error::Result;
use crate::geometry::cuboid;
use crate::input::InputState;
use crate::lifecycle::SketchProgram;
use crate::playback::{FrameState, Settings};
use crate::scene::{Light, Scene, SceneComposer};
use crate::shader::ShaderVariant;

use super::palettes::{palette_color, PALETTES};

/// Random palette-colored boxes under an orthographic camera, turning once
/// per loop.
#[derive(Debug, Default)]
pub struct Skyline;

impl Skyline {
    pub fn new() -> Self {
        Self
    }
}

impl SketchProgram for Skyline {
    fn name(&self) -> &'static str {
        "skyline"
    }

    fn settings(&self) -> Settings {
        Settings {
            dimensions: [512, 512],
            fps: 60,
            duration: 8.0,
            ..Settings::default()
        }
    }

    fn compose(&mut self, composer: &mut SceneComposer, rng: &mut StdRng) -> Result<Camera> {
        let palette = *PALETTES.choose(rng).unwrap_or(&PALETTES[0]);
        composer.set_clear_color(SKYLINE_BACKGROUND);

        let unit_box = cuboid(1.0, 1.0, 1.0);
        let mut first = None;
        for _ in 0..SKYLINE_BOX_COUNT {
            let color = palette_color(*palette.choose(rng).unwrap_or(&palette[0]));
            let id = match first {
                None => {
                    let id = composer.add_mesh(&unit_box, ShaderVariant::Lambert, color)?;
                    first = Some(id);
                    id
                }
                Some(source) => composer.add_instance(source, color)?,
            };
            let t = composer.transform_mut(id)?;
            t.position = Vec3::new(
                rng.gen_range(-1.0..1.0),
                rng.gen_range(-0.5..0.5),
                rng.gen_range(-1.0..1.0),
            );
            // signed scales mirror some boxes; culling is off so they still draw
            t.scale = Vec3::new(
                rng.gen_range(-0.8..0.8),
                rng.gen_range(-1.0..1.0),
                rng.gen_range(-0.8..0.8),
            ) * 0.5;
        }
        composer.sort_objects_by(|o| o.transform.scale.y);

        composer.add_light(Light::Ambient {
            color: color_vec3(SKYLINE_AMBIENT),
            intensity: 1.0,
        });
        composer.add_light(Light::Directional {
            color: color_vec3(WHITE),
            intensity: 1.0,
            position: Vec3::new(0.0, 1.0, 4.0),
        });

        Ok(Camera::orthographic(
            SKYLINE_ZOOM,
            -100.0,
            100.0,
            Vec3::new(2.0, 2.0, 2.0),
            Vec3::ZERO,
        ))
    }

    fn update(&mut self, scene: &mut Scene, frame: FrameState, _input: &InputState) {
        scene.root.rotation = Quat::from_rotation_y(frame.playhead * TAU);
    }
}
