//! Background star field
//!
//! Stars are scattered once at startup and never move or disappear.

use glam::Vec3;
use rand::Rng;
use serde::{Deserialize, Serialize};

/// A static decorative star
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StarBody {
    pub pos: Vec3,
}

/// Uniform sample in `[-extent/2, extent/2]` per axis
pub fn spread_point<R: Rng>(rng: &mut R, extent: f32) -> Vec3 {
    let half = extent / 2.0;
    Vec3::new(
        rng.random_range(-half..=half),
        rng.random_range(-half..=half),
        rng.random_range(-half..=half),
    )
}

#[derive(Debug, Clone, Default)]
pub struct StarField {
    pub stars: Vec<StarBody>,
}

impl StarField {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add `count` stars. Not idempotent: a second call adds another batch.
    pub fn populate<R: Rng>(&mut self, count: usize, extent: f32, rng: &mut R) {
        self.stars.reserve(count);
        for _ in 0..count {
            self.stars.push(StarBody {
                pos: spread_point(rng, extent),
            });
        }
        log::info!("Star field populated: {} stars", self.stars.len());
    }
}
