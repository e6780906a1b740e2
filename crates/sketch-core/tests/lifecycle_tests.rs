// Lifecycle tests against a recording render context.

use std::f32::consts::FRAC_PI_2;

use sketch_core::playback::FrameState;
use sketch_core::sketches::{Dashes, Explodahedron, ProximityDots, Skyline};
use sketch_core::{
    FrameUniforms, InputEvent, LifecycleState, RenderContext, SceneResources, Sketch, SketchError,
    SketchKind, SketchProgram, Viewport,
};

#[derive(Default)]
struct RecordingContext {
    uploads: usize,
    resizes: Vec<Viewport>,
    draws: usize,
    releases: usize,
    last_objects: usize,
    last_time: Option<f32>,
    program_labels: Vec<&'static str>,
    draw_order: Vec<usize>,
    fail_upload: bool,
}

impl RenderContext for RecordingContext {
    fn upload(&mut self, resources: &SceneResources) -> sketch_core::Result<()> {
        if self.fail_upload {
            return Err(SketchError::ContextUnavailable("no adapter".into()));
        }
        self.uploads += 1;
        self.program_labels = resources.programs.iter().map(|p| p.label()).collect();
        self.draw_order = resources.draw_order.clone();
        Ok(())
    }

    fn resize(&mut self, viewport: &Viewport) {
        self.resizes.push(*viewport);
    }

    fn draw(&mut self, frame: &FrameUniforms<'_>) -> sketch_core::Result<()> {
        self.draws += 1;
        self.last_objects = frame.objects.len();
        self.last_time = frame.objects.first().map(|o| o.time);
        Ok(())
    }

    fn release(&mut self) {
        self.releases += 1;
    }
}

fn frame(time: f32, playhead: f32) -> FrameState {
    FrameState { time, playhead }
}

fn setup(ctx: &mut RecordingContext, program: Box<dyn SketchProgram>) -> Sketch {
    Sketch::setup(ctx, program, Some(11)).unwrap()
}

#[test]
fn setup_uploads_once() {
    let mut ctx = RecordingContext::default();
    let sketch = setup(&mut ctx, Box::new(Explodahedron::new()));
    assert_eq!(ctx.uploads, 1);
    assert_eq!(ctx.draws, 0);
    assert_eq!(sketch.state(), LifecycleState::Ready);
    assert_eq!(sketch.scene().object_count(), 2);
    assert_eq!(ctx.program_labels, ["explode", "mesh_normal"]);
}

#[test]
fn first_frame_at_time_zero_draws() {
    let mut ctx = RecordingContext::default();
    let mut sketch = setup(&mut ctx, Box::new(Explodahedron::new()));
    sketch.render(&mut ctx, frame(0.0, 0.0)).unwrap();
    assert_eq!(ctx.draws, 1);
    assert_eq!(ctx.last_time, Some(0.0));
    assert_eq!(sketch.state(), LifecycleState::Rendering);
}

#[test]
fn render_after_unload_is_an_error() {
    let mut ctx = RecordingContext::default();
    let mut sketch = setup(&mut ctx, Box::new(ProximityDots::new()));
    sketch.render(&mut ctx, frame(0.5, 0.1)).unwrap();
    sketch.unload(&mut ctx).unwrap();

    assert_eq!(
        sketch.render(&mut ctx, frame(1.0, 0.2)),
        Err(SketchError::AfterUnload { operation: "render" })
    );
    assert_eq!(
        sketch.resize(&mut ctx, Viewport::new(1.0, 100.0, 100.0)),
        Err(SketchError::AfterUnload { operation: "resize" })
    );
    assert_eq!(ctx.draws, 1);
}

#[test]
fn unload_releases_exactly_once() {
    let mut ctx = RecordingContext::default();
    let mut sketch = setup(&mut ctx, Box::new(Skyline::new()));
    sketch.unload(&mut ctx).unwrap();
    assert_eq!(sketch.unload(&mut ctx), Err(SketchError::AlreadyUnloaded));
    assert_eq!(ctx.releases, 1);
    assert_eq!(sketch.state(), LifecycleState::Unloaded);
}

#[test]
fn repeated_resize_gives_same_camera() {
    let mut ctx = RecordingContext::default();
    let mut sketch = setup(&mut ctx, Box::new(ProximityDots::new()));
    let viewport = Viewport::new(2.0, 800.0, 600.0);
    sketch.resize(&mut ctx, viewport).unwrap();
    let first = sketch.scene().camera.uniforms();
    sketch.resize(&mut ctx, viewport).unwrap();
    assert_eq!(sketch.scene().camera.uniforms(), first);
    assert_eq!(sketch.viewport(), Some(viewport));
    assert_eq!(ctx.resizes.len(), 2);
}

#[test]
fn empty_viewport_is_ignored() {
    let mut ctx = RecordingContext::default();
    let mut sketch = setup(&mut ctx, Box::new(ProximityDots::new()));
    sketch
        .resize(&mut ctx, Viewport::new(1.0, 0.0, 600.0))
        .unwrap();
    assert!(ctx.resizes.is_empty());
    assert_eq!(sketch.viewport(), None);
}

#[test]
fn object_count_is_stable_across_frames() {
    let mut ctx = RecordingContext::default();
    let mut sketch = setup(&mut ctx, Box::new(Skyline::new()));
    let objects = sketch.scene().object_count();
    assert_eq!(objects, 50);
    for i in 0..120 {
        let t = i as f32 / 60.0;
        sketch.render(&mut ctx, frame(t, (t % 8.0) / 8.0)).unwrap();
        assert_eq!(ctx.last_objects, objects);
    }
    assert_eq!(ctx.uploads, 1);
    assert_eq!(sketch.frame_count(), 120);
}

#[test]
fn dots_instances_share_one_program() {
    let mut ctx = RecordingContext::default();
    let sketch = setup(&mut ctx, Box::new(ProximityDots::new()));
    assert_eq!(ctx.program_labels, ["proximity"]);
    assert_eq!(sketch.scene().object_count(), 2);
}

#[test]
fn time_reaches_every_object() {
    let mut ctx = RecordingContext::default();
    let mut sketch = setup(&mut ctx, Box::new(ProximityDots::new()));
    sketch.render(&mut ctx, frame(FRAC_PI_2, 0.25)).unwrap();
    assert!(sketch.scene().objects().iter().all(|o| o.time == FRAC_PI_2));
}

#[test]
fn pointer_turns_the_dashes() {
    let mut ctx = RecordingContext::default();
    let mut sketch = setup(&mut ctx, Box::new(Dashes::new()));
    assert_eq!(ctx.program_labels, ["lines"]);
    sketch.render(&mut ctx, frame(0.0, 0.0)).unwrap();
    assert_eq!(sketch.scene().root.rotation, glam::Quat::IDENTITY);

    sketch.on_input(InputEvent::PointerMoved {
        x: 800.0,
        y: 0.0,
        width: 800.0,
        height: 600.0,
    });
    assert_eq!(sketch.input().pointer, glam::Vec2::new(1.0, 1.0));
    sketch.render(&mut ctx, frame(0.0, 0.0)).unwrap();
    assert_eq!(sketch.scene().root.rotation, glam::Quat::from_rotation_y(1.0));
}

#[test]
fn pointer_leaves_other_sketches_alone() {
    for program in [
        Box::new(ProximityDots::new()) as Box<dyn SketchProgram>,
        Box::new(Explodahedron::new()),
    ] {
        let mut ctx = RecordingContext::default();
        let mut sketch = setup(&mut ctx, program);
        sketch.on_input(InputEvent::PointerMoved {
            x: 0.0,
            y: 0.0,
            width: 800.0,
            height: 600.0,
        });
        sketch.render(&mut ctx, frame(0.0, 0.0)).unwrap();
        assert_eq!(sketch.scene().root.rotation, glam::Quat::IDENTITY);
    }
}

#[test]
fn tick_stops_after_unload_without_drawing() {
    let mut ctx = RecordingContext::default();
    let mut sketch = setup(&mut ctx, Box::new(Dashes::new()));
    assert_eq!(sketch.tick(&mut ctx, frame(0.0, 0.0)), Ok(true));
    sketch.unload(&mut ctx).unwrap();
    assert_eq!(sketch.tick(&mut ctx, frame(0.1, 0.0)), Ok(false));
    assert_eq!(ctx.draws, 1);
    assert_eq!(sketch.frame_count(), 1);
}

#[test]
fn skyline_draws_short_boxes_first() {
    let mut ctx = RecordingContext::default();
    let sketch = setup(&mut ctx, Box::new(Skyline::new()));
    let heights: Vec<f32> = ctx
        .draw_order
        .iter()
        .map(|&i| sketch.scene().objects()[i].transform.scale.y)
        .collect();
    assert_eq!(heights.len(), 50);
    assert!(heights.windows(2).all(|w| w[0] <= w[1]));
}

#[test]
fn failed_upload_aborts_setup() {
    let mut ctx = RecordingContext {
        fail_upload: true,
        ..Default::default()
    };
    let err = Sketch::setup(&mut ctx, SketchKind::Explodahedron.build(), None).unwrap_err();
    assert!(matches!(err, SketchError::ContextUnavailable(_)));
}

#[test]
fn explodahedron_camera_dollies_until_limit() {
    let mut ctx = RecordingContext::default();
    let mut sketch = setup(&mut ctx, Box::new(Explodahedron::new()));
    sketch.render(&mut ctx, frame(0.0, 0.0)).unwrap();
    // -(|sin 0 * pi| - 1.5) * 2
    assert!((sketch.scene().camera.eye.z - 3.0).abs() < 1e-5);
}

#[test]
fn every_kind_builds_and_renders() {
    for kind in SketchKind::ALL {
        let mut ctx = RecordingContext::default();
        let mut sketch = Sketch::setup(&mut ctx, kind.build(), Some(5)).unwrap();
        assert_eq!(sketch.name(), kind.name());
        assert_eq!(kind.name().parse::<SketchKind>(), Ok(kind));
        sketch.render(&mut ctx, frame(1.0, 0.5)).unwrap();
        sketch.unload(&mut ctx).unwrap();
    }
    assert!("nope".parse::<SketchKind>().is_err());
}
