//! Measurement jitter for the simulated PING and IR sensors.
//!
//! Real readings wobble around the true value; the mock reproduces that
//! with zero-mean Gaussian jitter drawn from a seeded generator, so a
//! given world and seed always yield the same raster.

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use rand_distr::Normal;

/// Seeded source of zero-mean Gaussian jitter.
#[derive(Clone)]
pub struct NoiseGenerator {
    rng: SmallRng,
}

impl NoiseGenerator {
    /// Seed 0 draws from OS entropy; any other seed is reproducible.
    pub fn new(seed: u64) -> Self {
        let rng = match seed {
            0 => SmallRng::from_entropy(),
            s => SmallRng::seed_from_u64(s),
        };
        Self { rng }
    }

    /// One jitter sample with the given spread.
    ///
    /// A spread of zero models an ideal sensor and consumes no randomness,
    /// keeping the stream stable when only one channel is noisy.
    pub fn gaussian(&mut self, stddev: f32) -> f32 {
        if stddev == 0.0 {
            return 0.0;
        }
        match Normal::new(0.0, stddev) {
            Ok(dist) => self.rng.sample(dist),
            Err(_) => 0.0,
        }
    }
}
