use sketch_core::{SketchKind, Viewport};
use wasm_bindgen::JsCast;
use web_sys as web;

pub const CANVAS_ID: &str = "sketch-canvas";

/// `?sketch=` and `?seed=` from the page URL.
#[derive(Debug, Default, Clone, Copy)]
pub struct PageParams {
    pub sketch: Option<SketchKind>,
    pub seed: Option<u64>,
}

pub fn page_params(window: &web::Window) -> PageParams {
    let search = window.location().search().unwrap_or_default();
    let Ok(params) = web::UrlSearchParams::new_with_str(&search) else {
        return PageParams::default();
    };
    let sketch = params.get("sketch").and_then(|s| match s.parse() {
        Ok(kind) => Some(kind),
        Err(e) => {
            log::warn!("{e}; using default sketch");
            None
        }
    });
    let seed = params.get("seed").and_then(|s| s.parse().ok());
    PageParams { sketch, seed }
}

pub fn find_canvas(document: &web::Document) -> anyhow::Result<web::HtmlCanvasElement> {
    document
        .get_element_by_id(CANVAS_ID)
        .ok_or_else(|| anyhow::anyhow!("missing #{CANVAS_ID}"))?
        .dyn_into::<web::HtmlCanvasElement>()
        .map_err(|e| anyhow::anyhow!(format!("{:?}", e)))
}

/// CSS size and device pixel ratio of the canvas.
pub fn canvas_viewport(canvas: &web::HtmlCanvasElement) -> Viewport {
    let dpr = web::window().map(|w| w.device_pixel_ratio()).unwrap_or(1.0);
    let rect = canvas.get_bounding_client_rect();
    Viewport::new(dpr as f32, rect.width() as f32, rect.height() as f32)
}

/// Match the canvas backing store to its CSS size times devicePixelRatio.
pub fn sync_canvas_backing_size(canvas: &web::HtmlCanvasElement) -> Viewport {
    let viewport = canvas_viewport(canvas);
    let (w, h) = viewport.physical_size();
    canvas.set_width(w);
    canvas.set_height(h);
    viewport
}

/// Pointer position in CSS pixels relative to the canvas, plus the canvas CSS size.
pub fn pointer_in_canvas(ev: &web::PointerEvent, canvas: &web::HtmlCanvasElement) -> [f32; 4] {
    let rect = canvas.get_bounding_client_rect();
    [
        ev.client_x() as f32 - rect.left() as f32,
        ev.client_y() as f32 - rect.top() as f32,
        rect.width() as f32,
        rect.height() as f32,
    ]
}
