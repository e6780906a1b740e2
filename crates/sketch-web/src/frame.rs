use std::cell::RefCell;
use std::rc::Rc;

use instant::Instant;
use sketch_core::{FramePacer, LifecycleState, Playback, Sketch};
use sketch_gpu::GpuContext;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

/// Everything the animation loop and the DOM listeners share.
pub struct FrameContext {
    pub gpu: GpuContext<'static>,
    pub sketch: Sketch,
    pub playback: Playback,
    pub pacer: FramePacer,
}

impl FrameContext {
    /// One requestAnimationFrame tick. Returns false once the loop should stop.
    pub fn frame(&mut self) -> bool {
        if !self.pacer.should_tick(Instant::now()) {
            return self.sketch.state() != LifecycleState::Unloaded;
        }
        match self.sketch.tick(&mut self.gpu, self.playback.frame_now()) {
            Ok(running) => running,
            Err(e) => {
                log::error!("render failed: {e}");
                false
            }
        }
    }

    pub fn unload(&mut self) {
        if let Err(e) = self.sketch.unload(&mut self.gpu) {
            log::warn!("unload: {e}");
        }
    }
}

pub fn start_loop(frame_ctx: Rc<RefCell<FrameContext>>) {
    let tick: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
    let tick_clone = tick.clone();
    *tick.borrow_mut() = Some(Closure::wrap(Box::new(move || {
        if !frame_ctx.borrow_mut().frame() {
            log::info!("animation loop stopped");
            return;
        }
        request_frame(&tick_clone);
    }) as Box<dyn FnMut()>));
    request_frame(&tick);
}

fn request_frame(tick: &Rc<RefCell<Option<Closure<dyn FnMut()>>>>) {
    if let (Some(w), Some(cb)) = (web::window(), tick.borrow().as_ref()) {
        let _ = w.request_animation_frame(cb.as_ref().unchecked_ref());
    }
}
