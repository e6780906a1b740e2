//! Camera description and viewport math.
//!
//! Platform-free; the GPU context only ever sees the [`CameraUniforms`] built here.

use glam::{Mat4, Vec3};

use crate::shader::CameraUniforms;

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Projection {
    Perspective {
        fov_y_degrees: f32,
        near: f32,
        far: f32,
    },
    /// Symmetric box `zoom` units tall (half-height), widened by the aspect ratio.
    Orthographic { zoom: f32, near: f32, far: f32 },
}

/// Right-handed camera looking from `eye` at `target`.
#[derive(Clone, Debug, PartialEq)]
pub struct Camera {
    pub projection: Projection,
    pub eye: Vec3,
    pub target: Vec3,
    pub up: Vec3,
    pub aspect: f32,
}

impl Camera {
    pub fn perspective(fov_y_degrees: f32, near: f32, far: f32, eye: Vec3, target: Vec3) -> Self {
        Self {
            projection: Projection::Perspective {
                fov_y_degrees,
                near,
                far,
            },
            eye,
            target,
            up: Vec3::Y,
            aspect: 1.0,
        }
    }

    pub fn orthographic(zoom: f32, near: f32, far: f32, eye: Vec3, target: Vec3) -> Self {
        Self {
            projection: Projection::Orthographic { zoom, near, far },
            eye,
            target,
            up: Vec3::Y,
            aspect: 1.0,
        }
    }

    /// Follow the viewport aspect ratio. Same viewport in, same camera out.
    pub fn resize(&mut self, viewport: &Viewport) {
        self.aspect = viewport.aspect();
    }

    /// Compute the clip-space projection matrix (wgpu depth range 0..1).
    pub fn projection_matrix(&self) -> Mat4 {
        match self.projection {
            Projection::Perspective {
                fov_y_degrees,
                near,
                far,
            } => Mat4::perspective_rh(fov_y_degrees.to_radians(), self.aspect, near, far),
            Projection::Orthographic { zoom, near, far } => Mat4::orthographic_rh(
                -zoom * self.aspect,
                zoom * self.aspect,
                -zoom,
                zoom,
                near,
                far,
            ),
        }
    }

    /// Compute the view matrix that transforms world to view space.
    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.eye, self.target, self.up)
    }

    pub fn uniforms(&self) -> CameraUniforms {
        CameraUniforms {
            projection: self.projection_matrix().to_cols_array_2d(),
            view: self.view_matrix().to_cols_array_2d(),
            position: self.eye.extend(1.0).to_array(),
        }
    }
}

/// Resize input from the driver: logical size plus device pixel ratio.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Viewport {
    pub pixel_ratio: f32,
    pub width: f32,
    pub height: f32,
}

impl Viewport {
    pub fn new(pixel_ratio: f32, width: f32, height: f32) -> Self {
        Self {
            pixel_ratio,
            width,
            height,
        }
    }

    /// Zero-area viewports (minimized windows) carry no usable aspect ratio.
    pub fn is_empty(&self) -> bool {
        self.width <= 0.0 || self.height <= 0.0 || self.pixel_ratio <= 0.0
    }

    pub fn aspect(&self) -> f32 {
        if self.height > 0.0 {
            self.width / self.height
        } else {
            1.0
        }
    }

    /// Backing-store size in device pixels, at least 1x1.
    pub fn physical_size(&self) -> (u32, u32) {
        let w = (self.width * self.pixel_ratio).round().max(1.0) as u32;
        let h = (self.height * self.pixel_ratio).round().max(1.0) as u32;
        (w, h)
    }
}
