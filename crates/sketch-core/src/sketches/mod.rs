//! Built-in sketches. Each one is a [`SketchProgram`] choosing a geometry
//! source, an attribute strategy and shader variants; the lifecycle around
//! them is shared.

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

use crate::lifecycle::SketchProgram;

mod dashes;
mod dots;
mod explodahedron;
mod palettes;
mod skyline;

pub use dashes::{dash_segments, Dashes};
pub use dots::ProximityDots;
pub use explodahedron::Explodahedron;
pub use palettes::{palette_color, PALETTES};
pub use skyline::Skyline;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SketchKind {
    Explodahedron,
    Dots,
    Skyline,
    Dashes,
}

impl SketchKind {
    pub const ALL: [SketchKind; 4] = [
        SketchKind::Explodahedron,
        SketchKind::Dots,
        SketchKind::Skyline,
        SketchKind::Dashes,
    ];

    pub fn name(self) -> &'static str {
        match self {
            SketchKind::Explodahedron => "explodahedron",
            SketchKind::Dots => "dots",
            SketchKind::Skyline => "skyline",
            SketchKind::Dashes => "dashes",
        }
    }

    pub fn build(self) -> Box<dyn SketchProgram> {
        match self {
            SketchKind::Explodahedron => Box::new(Explodahedron::new()),
            SketchKind::Dots => Box::new(ProximityDots::new()),
            SketchKind::Skyline => Box::new(Skyline::new()),
            SketchKind::Dashes => Box::new(Dashes::new()),
        }
    }
}

impl fmt::Display for SketchKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("unknown sketch `{0}` (expected explodahedron, dots, skyline or dashes)")]
pub struct UnknownSketch(pub String);

impl FromStr for SketchKind {
    type Err = UnknownSketch;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SketchKind::ALL
            .into_iter()
            .find(|k| k.name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| UnknownSketch(s.to_owned()))
    }
}
