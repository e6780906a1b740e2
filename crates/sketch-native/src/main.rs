use clap::Parser;
use instant::Instant;
use sketch_core::{FramePacer, InputEvent, LifecycleState, Playback, Sketch, SketchKind, Viewport};
use sketch_gpu::GpuContext;
use winit::{
    dpi::LogicalSize,
    event::*,
    event_loop::{ControlFlow, EventLoop},
    window::{Window, WindowBuilder},
};

/// Run one shader sketch in a desktop window.
#[derive(Parser, Debug)]
#[command(name = "sketch-native", version, about)]
struct Args {
    /// explodahedron, dots, skyline or dashes
    #[arg(long, default_value = "explodahedron")]
    sketch: SketchKind,

    /// Seed for procedural attributes; random when omitted
    #[arg(long)]
    seed: Option<u64>,

    /// Window width in logical pixels (defaults to the sketch's own size)
    #[arg(long)]
    width: Option<u32>,

    /// Window height in logical pixels
    #[arg(long)]
    height: Option<u32>,
}

fn viewport_of(window: &Window) -> Viewport {
    let scale = window.scale_factor() as f32;
    let size = window.inner_size();
    Viewport::new(scale, size.width as f32 / scale, size.height as f32 / scale)
}

fn main() -> anyhow::Result<()> {
    env_logger::builder()
        .filter_level(log::LevelFilter::Info)
        .parse_default_env()
        .init();
    let args = Args::parse();

    let program = args.sketch.build();
    let settings = program.settings();
    let width = args.width.unwrap_or(settings.dimensions[0]);
    let height = args.height.unwrap_or(settings.dimensions[1]);

    let event_loop = EventLoop::new()?;
    let window = WindowBuilder::new()
        .with_title(format!("{} (native)", args.sketch))
        .with_inner_size(LogicalSize::new(width, height))
        .build(&event_loop)?;
    let window = &window;

    let size = window.inner_size();
    let mut gpu = pollster::block_on(GpuContext::new(window, size.width, size.height))?;
    let mut sketch = Sketch::setup(&mut gpu, program, args.seed)?;
    sketch.resize(&mut gpu, viewport_of(window))?;

    let playback = Playback::new(sketch.settings());
    let mut pacer = FramePacer::new(sketch.settings().fps);

    event_loop.run(move |event, elwt| match event {
        Event::WindowEvent { event, .. } => match event {
            WindowEvent::Resized(_) | WindowEvent::ScaleFactorChanged { .. } => {
                if let Err(e) = sketch.resize(&mut gpu, viewport_of(window)) {
                    log::warn!("resize: {e}");
                }
            }
            WindowEvent::CursorMoved { position, .. } => {
                let size = window.inner_size();
                sketch.on_input(InputEvent::PointerMoved {
                    x: position.x as f32,
                    y: position.y as f32,
                    width: size.width as f32,
                    height: size.height as f32,
                });
            }
            WindowEvent::CloseRequested => {
                if let Err(e) = sketch.unload(&mut gpu) {
                    log::warn!("unload: {e}");
                }
                elwt.exit();
            }
            _ => {}
        },
        Event::AboutToWait => {
            let now = Instant::now();
            if pacer.should_tick(now) {
                match sketch.tick(&mut gpu, playback.frame_now()) {
                    Ok(true) => {}
                    Ok(false) => return,
                    Err(e) => {
                        log::error!("render failed: {e}");
                        elwt.exit();
                        return;
                    }
                }
            }
            elwt.set_control_flow(ControlFlow::WaitUntil(now + pacer.interval()));
        }
        Event::LoopExiting => {
            if sketch.state() != LifecycleState::Unloaded {
                let _ = sketch.unload(&mut gpu);
            }
        }
        _ => {}
    })?;
    Ok(())
}
