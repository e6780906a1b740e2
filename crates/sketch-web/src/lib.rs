#![cfg(target_arch = "wasm32")]
//! Browser front-end: finds `#sketch-canvas`, picks the sketch from the URL,
//! and drives it from requestAnimationFrame.

use std::cell::RefCell;
use std::rc::Rc;

use sketch_core::{FramePacer, InputEvent, Playback, Sketch, SketchKind};
use sketch_gpu::GpuContext;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::spawn_local;
use web_sys as web;

mod dom;
mod frame;

use frame::FrameContext;

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Info).ok();
    log::info!("sketch-web starting");

    spawn_local(async move {
        if let Err(e) = init().await {
            log::error!("init error: {:?}", e);
        }
    });
    Ok(())
}

async fn init() -> anyhow::Result<()> {
    let window = web::window().ok_or_else(|| anyhow::anyhow!("no window"))?;
    let document = window
        .document()
        .ok_or_else(|| anyhow::anyhow!("no document"))?;
    let canvas = dom::find_canvas(&document)?;
    let params = dom::page_params(&window);
    let kind = params.sketch.unwrap_or(SketchKind::Explodahedron);

    let viewport = dom::sync_canvas_backing_size(&canvas);
    let (width, height) = viewport.physical_size();
    let mut gpu = GpuContext::new(wgpu::SurfaceTarget::Canvas(canvas.clone()), width, height)
        .await
        .map_err(|e| anyhow::anyhow!("{e}"))?;
    let mut sketch = Sketch::setup(&mut gpu, kind.build(), params.seed)
        .map_err(|e| anyhow::anyhow!("{e}"))?;
    sketch
        .resize(&mut gpu, viewport)
        .map_err(|e| anyhow::anyhow!("{e}"))?;

    let playback = Playback::new(sketch.settings());
    let pacer = FramePacer::new(sketch.settings().fps);
    let ctx = Rc::new(RefCell::new(FrameContext {
        gpu,
        sketch,
        playback,
        pacer,
    }));

    add_listeners(&window, &canvas, &ctx);
    frame::start_loop(ctx);
    Ok(())
}

fn add_listeners(
    window: &web::Window,
    canvas: &web::HtmlCanvasElement,
    ctx: &Rc<RefCell<FrameContext>>,
) {
    {
        let ctx = ctx.clone();
        let canvas_resize = canvas.clone();
        let closure = Closure::wrap(Box::new(move || {
            let viewport = dom::sync_canvas_backing_size(&canvas_resize);
            let mut c = ctx.borrow_mut();
            let FrameContext { gpu, sketch, .. } = &mut *c;
            if let Err(e) = sketch.resize(gpu, viewport) {
                log::warn!("resize: {e}");
            }
        }) as Box<dyn FnMut()>);
        window
            .add_event_listener_with_callback("resize", closure.as_ref().unchecked_ref())
            .ok();
        closure.forget();
    }
    {
        let ctx = ctx.clone();
        let canvas_move = canvas.clone();
        let closure = Closure::wrap(Box::new(move |ev: web::PointerEvent| {
            let [x, y, width, height] = dom::pointer_in_canvas(&ev, &canvas_move);
            ctx.borrow_mut().sketch.on_input(InputEvent::PointerMoved {
                x,
                y,
                width,
                height,
            });
        }) as Box<dyn FnMut(web::PointerEvent)>);
        canvas
            .add_event_listener_with_callback("pointermove", closure.as_ref().unchecked_ref())
            .ok();
        closure.forget();
    }
    {
        let ctx = ctx.clone();
        let closure = Closure::wrap(Box::new(move || {
            ctx.borrow_mut().unload();
        }) as Box<dyn FnMut()>);
        window
            .add_event_listener_with_callback("pagehide", closure.as_ref().unchecked_ref())
            .ok();
        closure.forget();
    }
}
