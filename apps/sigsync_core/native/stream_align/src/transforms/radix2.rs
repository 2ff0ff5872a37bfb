//! Iterative radix-2 Cooley-Tukey transform
//!
//! Decimation-in-time with a precomputed bit-reversal permutation and
//! twiddle table. Power-of-two lengths only.

use std::f64::consts::PI;

use rustfft::num_complex::Complex;

use crate::error::{AlignError, AlignResult};
use crate::traits::Transform;

/// In-place radix-2 DFT for power-of-two lengths
#[derive(Debug, Clone)]
pub struct Radix2Transform {
    size: usize,
    /// e^{-j2πk/N} for k in 0..N/2
    twiddles: Vec<Complex<f64>>,
    bit_reversed: Vec<usize>,
}

impl Radix2Transform {
    pub const NAME: &'static str = "radix2";

    pub fn new(size: usize) -> AlignResult<Self> {
        if size == 0 || !size.is_power_of_two() {
            return Err(AlignError::UnsupportedTransformSize {
                size,
                backend: Self::NAME,
                reason: "size must be a positive power of two",
            });
        }

        let bits = size.trailing_zeros();
        let bit_reversed = (0..size)
            .map(|i| {
                if bits == 0 {
                    0
                } else {
                    i.reverse_bits() >> (usize::BITS - bits)
                }
            })
            .collect();

        let twiddles = (0..size / 2)
            .map(|k| Complex::from_polar(1.0, -2.0 * PI * k as f64 / size as f64))
            .collect();

        Ok(Self {
            size,
            twiddles,
            bit_reversed,
        })
    }

    fn butterflies(&self, buf: &mut [Complex<f64>], inverse: bool) {
        debug_assert_eq!(buf.len(), self.size);
        let n = self.size;

        for i in 0..n {
            let j = self.bit_reversed[i];
            if j > i {
                buf.swap(i, j);
            }
        }

        let mut span = 2;
        while span <= n {
            let half = span / 2;
            let stride = n / span;
            for start in (0..n).step_by(span) {
                for k in 0..half {
                    let w = if inverse {
                        self.twiddles[k * stride].conj()
                    } else {
                        self.twiddles[k * stride]
                    };
                    let u = buf[start + k];
                    let v = buf[start + k + half] * w;
                    buf[start + k] = u + v;
                    buf[start + k + half] = u - v;
                }
            }
            span <<= 1;
        }
    }
}

impl Transform for Radix2Transform {
    fn len(&self) -> usize {
        self.size
    }

    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn forward(&mut self, buf: &mut [Complex<f64>]) {
        self.butterflies(buf, false);
    }

    fn inverse(&mut self, buf: &mut [Complex<f64>]) {
        self.butterflies(buf, true);
    }
}
