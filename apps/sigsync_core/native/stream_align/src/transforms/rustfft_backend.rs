//! Library-backed transform
//!
//! Mixed-radix planning from rustfft, so any non-zero length works.

use std::sync::Arc;

use rustfft::num_complex::Complex;
use rustfft::{Fft, FftPlanner};

use crate::error::{AlignError, AlignResult};
use crate::traits::Transform;

/// rustfft forward/inverse pair planned for one length
pub struct RustFftTransform {
    size: usize,
    forward: Arc<dyn Fft<f64>>,
    inverse: Arc<dyn Fft<f64>>,
    scratch: Vec<Complex<f64>>,
}

impl RustFftTransform {
    pub const NAME: &'static str = "rustfft";

    /// Plan both directions for `size` samples
    pub fn new(size: usize) -> AlignResult<Self> {
        if size == 0 {
            return Err(AlignError::UnsupportedTransformSize {
                size,
                backend: Self::NAME,
                reason: "size must be non-zero",
            });
        }

        let mut planner = FftPlanner::<f64>::new();
        let forward = planner.plan_fft_forward(size);
        let inverse = planner.plan_fft_inverse(size);
        let scratch_len = forward
            .get_inplace_scratch_len()
            .max(inverse.get_inplace_scratch_len());

        Ok(Self {
            size,
            forward,
            inverse,
            scratch: vec![Complex::new(0.0, 0.0); scratch_len],
        })
    }
}

impl Transform for RustFftTransform {
    fn len(&self) -> usize {
        self.size
    }

    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn forward(&mut self, buf: &mut [Complex<f64>]) {
        debug_assert_eq!(buf.len(), self.size);
        self.forward.process_with_scratch(buf, &mut self.scratch);
    }

    fn inverse(&mut self, buf: &mut [Complex<f64>]) {
        debug_assert_eq!(buf.len(), self.size);
        self.inverse.process_with_scratch(buf, &mut self.scratch);
    }
}
