//! Run-loop settings and the reference frame clock used by the front-ends.

use std::time::Duration;

use instant::Instant;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ContextKind {
    WebGl,
}

/// How the driver should run a sketch.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Settings {
    pub animate: bool,
    /// Logical canvas size in pixels.
    pub dimensions: [u32; 2],
    pub fps: u32,
    /// Loop length in seconds; `playhead` wraps every `duration`.
    pub duration: f32,
    pub context: ContextKind,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            animate: true,
            dimensions: [720, 720],
            fps: 60,
            duration: 8.0,
            context: ContextKind::WebGl,
        }
    }
}

/// Clock values handed to `render`.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct FrameState {
    /// Seconds since playback started.
    pub time: f32,
    /// Position within the current loop, `[0, 1)`.
    pub playhead: f32,
}

#[derive(Clone, Debug)]
pub struct Playback {
    start: Instant,
    duration: f32,
    animate: bool,
}

impl Playback {
    pub fn new(settings: &Settings) -> Self {
        Self {
            start: Instant::now(),
            duration: settings.duration,
            animate: settings.animate,
        }
    }

    /// Clock values `elapsed` seconds into playback.
    pub fn frame_at(&self, elapsed: f32) -> FrameState {
        if !self.animate {
            return FrameState::default();
        }
        let time = elapsed.max(0.0);
        let playhead = if self.duration > 0.0 {
            (time % self.duration) / self.duration
        } else {
            0.0
        };
        FrameState { time, playhead }
    }

    pub fn frame_now(&self) -> FrameState {
        self.frame_at(self.start.elapsed().as_secs_f32())
    }
}

/// Gates ticks to a fixed rate; a driver calls `render` only when this says so.
#[derive(Clone, Debug)]
pub struct FramePacer {
    interval: Duration,
    last: Option<Instant>,
}

impl FramePacer {
    pub fn new(fps: u32) -> Self {
        Self {
            interval: Duration::from_secs_f64(1.0 / f64::from(fps.max(1))),
            last: None,
        }
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    pub fn should_tick(&mut self, now: Instant) -> bool {
        match self.last {
            None => {
                self.last = Some(now);
                true
            }
            Some(last) => {
                if now <= last {
                    return false;
                }
                let since = now.duration_since(last);
                if since < self.interval {
                    return false;
                }
                // after a long stall resync instead of bursting to catch up
                self.last = Some(if since > self.interval * 4 {
                    now
                } else {
                    last + self.interval
                });
                true
            }
        }
    }
}
