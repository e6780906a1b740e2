// Frame clock and camera math.

use std::time::Duration;

use glam::Vec3;
use sketch_core::{Camera, FramePacer, Playback, Settings, Viewport};

#[test]
fn playhead_wraps_each_loop() {
    let settings = Settings {
        duration: 4.0,
        ..Settings::default()
    };
    let playback = Playback::new(&settings);
    assert_eq!(playback.frame_at(0.0).playhead, 0.0);
    assert!((playback.frame_at(1.0).playhead - 0.25).abs() < 1e-6);
    assert!((playback.frame_at(5.0).playhead - 0.25).abs() < 1e-6);
    assert_eq!(playback.frame_at(5.0).time, 5.0);
}

#[test]
fn still_sketch_stays_at_zero() {
    let settings = Settings {
        animate: false,
        ..Settings::default()
    };
    let frame = Playback::new(&settings).frame_at(3.0);
    assert_eq!(frame.time, 0.0);
    assert_eq!(frame.playhead, 0.0);
}

#[test]
fn pacer_holds_to_the_interval() {
    let mut pacer = FramePacer::new(60);
    let start = instant::Instant::now();
    assert!(pacer.should_tick(start));
    assert!(!pacer.should_tick(start + Duration::from_millis(5)));
    assert!(pacer.should_tick(start + Duration::from_millis(17)));
    assert!(!pacer.should_tick(start + Duration::from_millis(18)));
}

#[test]
fn resize_only_changes_aspect() {
    let mut camera = Camera::perspective(50.0, 0.01, 100.0, Vec3::new(0.0, 0.0, -4.0), Vec3::ZERO);
    let view = camera.view_matrix();
    camera.resize(&Viewport::new(2.0, 1600.0, 800.0));
    assert_eq!(camera.aspect, 2.0);
    assert_eq!(camera.view_matrix(), view);
}

#[test]
fn viewport_backing_size() {
    let viewport = Viewport::new(2.0, 400.5, 300.0);
    assert_eq!(viewport.physical_size(), (801, 600));
    assert!(Viewport::new(1.0, 0.0, 10.0).is_empty());
}
