//! The renderer handle threaded through every lifecycle call.
//!
//! A sketch never owns its renderer: the front-end creates one (wgpu on native
//! and web, a recording double in tests) and lends it to `setup`, `resize`,
//! `render` and `unload`.

use crate::camera::Viewport;
use crate::error::Result;
use crate::scene::SceneResources;
use crate::shader::{CameraUniforms, LightUniforms, ObjectUniforms};

/// Per-frame values pushed to the GPU. `objects` has one entry per
/// [`SceneResources::objects`] binding, in the same order.
#[derive(Clone, Copy, Debug)]
pub struct FrameUniforms<'a> {
    pub camera: &'a CameraUniforms,
    pub lights: &'a LightUniforms,
    pub objects: &'a [ObjectUniforms],
}

pub trait RenderContext {
    /// Create every buffer and pipeline for `resources`. Called once, before the first draw.
    fn upload(&mut self, resources: &SceneResources) -> Result<()>;

    /// Reconfigure the drawing surface for a new viewport.
    fn resize(&mut self, viewport: &Viewport);

    /// Write uniforms and issue one frame of draw calls.
    fn draw(&mut self, frame: &FrameUniforms<'_>) -> Result<()>;

    /// Free every GPU-side resource created by `upload`.
    fn release(&mut self);
}
