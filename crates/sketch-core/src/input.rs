use glam::Vec2;

/// Pointer events forwarded by the front-end. Coordinates are in the same
/// pixel space as `width`/`height`, origin top-left.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum InputEvent {
    PointerMoved {
        x: f32,
        y: f32,
        width: f32,
        height: f32,
    },
}

/// Latest input, read synchronously by `render`.
#[derive(Default, Clone, Copy, Debug, PartialEq)]
pub struct InputState {
    /// Normalized device coordinates, -1..1 on both axes, +Y up.
    pub pointer: Vec2,
}

impl InputState {
    pub fn apply(&mut self, event: InputEvent) {
        match event {
            InputEvent::PointerMoved {
                x,
                y,
                width,
                height,
            } => {
                if width > 0.0 && height > 0.0 {
                    self.pointer = pointer_ndc(x, y, width, height);
                }
            }
        }
    }
}

#[inline]
pub fn pointer_ndc(x: f32, y: f32, width: f32, height: f32) -> Vec2 {
    Vec2::new(
        ((x / width) * 2.0 - 1.0).clamp(-1.0, 1.0),
        (-(y / height) * 2.0 + 1.0).clamp(-1.0, 1.0),
    )
}
