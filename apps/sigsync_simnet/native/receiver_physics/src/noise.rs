//! Circular complex Gaussian noise
//!
//! Box-Muller pairs feed I and Q, each carrying half the total power.

use num_complex::Complex32;
use rand::Rng;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use std::f64::consts::PI;

/// Complex AWGN generator with configurable total power E[|n|²]
pub struct ComplexNoise {
    /// Per-component standard deviation, sqrt(power / 2)
    std_dev: f64,
    rng: ChaCha8Rng,
}

impl ComplexNoise {
    pub fn new(power: f64, seed_rng: &mut ChaCha8Rng) -> Self {
        // Derived seed keeps receivers independent but reproducible
        let seed: u64 = seed_rng.gen();
        Self {
            std_dev: (power.max(0.0) / 2.0).sqrt(),
            rng: ChaCha8Rng::seed_from_u64(seed),
        }
    }

    pub fn set_power(&mut self, power: f64) {
        self.std_dev = (power.max(0.0) / 2.0).sqrt();
    }

    pub fn power(&self) -> f64 {
        2.0 * self.std_dev * self.std_dev
    }

    /// Next noise sample; both Box-Muller outputs are used, one per axis
    pub fn next_sample(&mut self) -> Complex32 {
        let u1: f64 = self.rng.gen::<f64>().max(1e-10);
        let u2: f64 = self.rng.gen();

        let r = (-2.0 * u1.ln()).sqrt();
        let theta = 2.0 * PI * u2;

        Complex32::new(
            (r * theta.cos() * self.std_dev) as f32,
            (r * theta.sin() * self.std_dev) as f32,
        )
    }
}
