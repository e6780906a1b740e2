//! The sketch lifecycle: `setup` → `resize`/`render`… → `unload`.
//!
//! A [`Sketch`] is driven entirely from outside. The front-end owns the frame
//! clock and the render context, calls in synchronously once per tick, and
//! lends the context for the duration of each call. Everything that
//! allocates GPU resources happens inside [`Sketch::setup`]; `render` only
//! rewrites uniforms into storage allocated during setup.

use std::fmt;

use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::camera::{Camera, Viewport};
use crate::context::{FrameUniforms, RenderContext};
use crate::error::{Result, SketchError};
use crate::input::{InputEvent, InputState};
use crate::playback::{FrameState, Settings};
use crate::scene::{Scene, SceneComposer};
use crate::shader::ObjectUniforms;

/// One sketch: geometry source, attribute strategy and shader variants, plus
/// whatever time-driven transforms it animates.
pub trait SketchProgram {
    fn name(&self) -> &'static str;

    fn settings(&self) -> Settings;

    /// Build all geometry, attributes and programs. Runs once, inside `setup`.
    fn compose(&mut self, composer: &mut SceneComposer, rng: &mut StdRng) -> Result<Camera>;

    /// Mutate transforms and uniform values for this frame. Must not allocate.
    fn update(&mut self, scene: &mut Scene, frame: FrameState, input: &InputState);
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LifecycleState {
    /// Set up, nothing drawn yet.
    Ready,
    /// At least one frame drawn.
    Rendering,
    /// Terminal; GPU resources have been released.
    Unloaded,
}

pub struct Sketch {
    program: Box<dyn SketchProgram>,
    settings: Settings,
    scene: Scene,
    uniforms: Vec<ObjectUniforms>,
    input: InputState,
    viewport: Option<Viewport>,
    state: LifecycleState,
    frames: u64,
}

impl fmt::Debug for Sketch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Sketch")
            .field("name", &self.program.name())
            .field("state", &self.state)
            .field("objects", &self.scene.object_count())
            .field("frames", &self.frames)
            .finish()
    }
}

impl Sketch {
    /// Compose the scene and upload it through `ctx`. A context that cannot
    /// accept the upload aborts setup with its error.
    pub fn setup(
        ctx: &mut dyn RenderContext,
        mut program: Box<dyn SketchProgram>,
        seed: Option<u64>,
    ) -> Result<Self> {
        let settings = program.settings();
        let mut rng = match seed {
            Some(s) => StdRng::seed_from_u64(s),
            None => StdRng::from_entropy(),
        };

        let mut composer = SceneComposer::new();
        let camera = program.compose(&mut composer, &mut rng)?;
        let (scene, resources) = composer.finish(camera);
        ctx.upload(&resources)?;

        let uniforms = vec![ObjectUniforms::default(); scene.object_count()];
        log::info!(
            "sketch '{}' ready: {} objects, {}x{} @ {}fps, {}s loop",
            program.name(),
            scene.object_count(),
            settings.dimensions[0],
            settings.dimensions[1],
            settings.fps,
            settings.duration
        );
        Ok(Self {
            program,
            settings,
            scene,
            uniforms,
            input: InputState::default(),
            viewport: None,
            state: LifecycleState::Ready,
            frames: 0,
        })
    }

    /// Recompute the projection and reconfigure the surface. Zero-area
    /// viewports are ignored.
    pub fn resize(&mut self, ctx: &mut dyn RenderContext, viewport: Viewport) -> Result<()> {
        if self.state == LifecycleState::Unloaded {
            return Err(SketchError::AfterUnload {
                operation: "resize",
            });
        }
        if viewport.is_empty() {
            log::debug!("ignoring empty viewport {viewport:?}");
            return Ok(());
        }
        self.scene.camera.resize(&viewport);
        ctx.resize(&viewport);
        self.viewport = Some(viewport);
        Ok(())
    }

    /// Advance to `frame` and issue one draw.
    pub fn render(&mut self, ctx: &mut dyn RenderContext, frame: FrameState) -> Result<()> {
        if self.state == LifecycleState::Unloaded {
            return Err(SketchError::AfterUnload {
                operation: "render",
            });
        }
        self.state = LifecycleState::Rendering;

        self.scene.set_time(frame.time);
        self.program.update(&mut self.scene, frame, &self.input);
        self.scene.write_uniforms(&mut self.uniforms);

        let camera = self.scene.camera.uniforms();
        ctx.draw(&FrameUniforms {
            camera: &camera,
            lights: &self.scene.lights,
            objects: &self.uniforms,
        })?;
        self.frames += 1;
        Ok(())
    }

    /// Frame-loop entry point: renders unless the sketch has been unloaded,
    /// in which case nothing is drawn and `Ok(false)` tells the loop to stop.
    pub fn tick(&mut self, ctx: &mut dyn RenderContext, frame: FrameState) -> Result<bool> {
        if self.state == LifecycleState::Unloaded {
            return Ok(false);
        }
        self.render(ctx, frame)?;
        Ok(true)
    }

    pub fn on_input(&mut self, event: InputEvent) {
        if self.state != LifecycleState::Unloaded {
            self.input.apply(event);
        }
    }

    /// Release GPU resources. Only the first call releases anything; later
    /// calls report [`SketchError::AlreadyUnloaded`].
    pub fn unload(&mut self, ctx: &mut dyn RenderContext) -> Result<()> {
        if self.state == LifecycleState::Unloaded {
            log::warn!("sketch '{}' unloaded twice", self.program.name());
            return Err(SketchError::AlreadyUnloaded);
        }
        ctx.release();
        self.state = LifecycleState::Unloaded;
        log::info!(
            "sketch '{}' unloaded after {} frames",
            self.program.name(),
            self.frames
        );
        Ok(())
    }

    pub fn name(&self) -> &'static str {
        self.program.name()
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn state(&self) -> LifecycleState {
        self.state
    }

    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    pub fn input(&self) -> &InputState {
        &self.input
    }

    pub fn viewport(&self) -> Option<Viewport> {
        self.viewport
    }

    pub fn frame_count(&self) -> u64 {
        self.frames
    }
}
