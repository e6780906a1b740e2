//! Per-triangle random direction/strength attributes.
//!
//! One direction and one strength are drawn per triangle and repeated on its
//! three vertices, so the vertex shader moves each face as a rigid shard.
//! Generation happens once per geometry; the arrays are never re-randomized.

use glam::Vec3;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::constants::{
    DIRECTION_COMPONENT_MAX, DIRECTION_COMPONENT_MIN, STRENGTH_MAX, STRENGTH_MIN,
};
use crate::error::{Result, SketchError};
use crate::geometry::Geometry;
use crate::shader::ExplodeVertex;

#[derive(Clone, Debug, PartialEq)]
pub struct ExplodeAttributes {
    /// Unit vectors, `randDirection` in the vertex stage.
    pub directions: Vec<Vec3>,
    /// Scalars in `[0, 10)`, `randStrength` in the vertex stage.
    pub strengths: Vec<f32>,
}

impl ExplodeAttributes {
    /// Draw one direction and one strength per triangle of `geometry`.
    pub fn generate<R: Rng + ?Sized>(geometry: &Geometry, rng: &mut R) -> Self {
        let vertex_count = geometry.vertex_count();
        let mut directions = Vec::with_capacity(vertex_count);
        let mut strengths = Vec::with_capacity(vertex_count);
        for _ in 0..geometry.triangle_count() {
            let dir = random_direction(rng);
            let strength = rng.gen_range(STRENGTH_MIN..STRENGTH_MAX);
            directions.extend([dir; 3]);
            strengths.extend([strength; 3]);
        }
        log::debug!(
            "generated explode attributes for {} triangles",
            geometry.triangle_count()
        );
        Self {
            directions,
            strengths,
        }
    }

    /// Seeded generation is reproducible; `None` draws the seed from entropy.
    pub fn from_seed(geometry: &Geometry, seed: Option<u64>) -> Self {
        let mut rng = match seed {
            Some(s) => StdRng::seed_from_u64(s),
            None => StdRng::from_entropy(),
        };
        Self::generate(geometry, &mut rng)
    }

    /// Check both arrays against the geometry's vertex count.
    pub fn validate(&self, geometry: &Geometry) -> Result<()> {
        let expected = geometry.vertex_count();
        if self.directions.len() != expected {
            return Err(SketchError::AttributeLengthMismatch {
                attribute: "randDirection",
                expected,
                actual: self.directions.len(),
            });
        }
        if self.strengths.len() != expected {
            return Err(SketchError::AttributeLengthMismatch {
                attribute: "randStrength",
                expected,
                actual: self.strengths.len(),
            });
        }
        Ok(())
    }

    /// Interleave positions and attributes into the explode vertex stream.
    pub fn interleave(&self, geometry: &Geometry) -> Result<Vec<ExplodeVertex>> {
        self.validate(geometry)?;
        Ok(geometry
            .positions()
            .iter()
            .zip(&self.directions)
            .zip(&self.strengths)
            .map(|((p, d), s)| ExplodeVertex {
                position: p.to_array(),
                rand_direction: d.to_array(),
                rand_strength: *s,
            })
            .collect())
    }
}

/// Uniform cube sample in `[-1, 1)^3`, normalized. Zero-length (or otherwise
/// non-normalizable) candidates are thrown away and redrawn.
pub fn random_direction<R: Rng + ?Sized>(rng: &mut R) -> Vec3 {
    loop {
        let candidate = Vec3::new(
            rng.gen_range(DIRECTION_COMPONENT_MIN..DIRECTION_COMPONENT_MAX),
            rng.gen_range(DIRECTION_COMPONENT_MIN..DIRECTION_COMPONENT_MAX),
            rng.gen_range(DIRECTION_COMPONENT_MIN..DIRECTION_COMPONENT_MAX),
        );
        if let Some(dir) = candidate.try_normalize() {
            return dir;
        }
        log::warn!("degenerate direction sample, resampling");
    }
}
