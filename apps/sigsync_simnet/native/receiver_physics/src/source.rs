//! Broadband test source
//!
//! Random unit-power QPSK at one sample per symbol. White spectrum, so the
//! circular autocorrelation has a single sharp peak.

use num_complex::Complex32;
use rand::Rng;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use std::f32::consts::FRAC_1_SQRT_2;

/// Seeded QPSK sample generator
pub struct QpskSource {
    rng: ChaCha8Rng,
}

impl QpskSource {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
        }
    }

    pub fn next_sample(&mut self) -> Complex32 {
        let bits: u8 = self.rng.gen_range(0..4);
        let i = if bits & 1 == 0 { FRAC_1_SQRT_2 } else { -FRAC_1_SQRT_2 };
        let q = if bits & 2 == 0 { FRAC_1_SQRT_2 } else { -FRAC_1_SQRT_2 };
        Complex32::new(i, q)
    }

    pub fn next_frame(&mut self, len: usize) -> Vec<Complex32> {
        (0..len).map(|_| self.next_sample()).collect()
    }
}
