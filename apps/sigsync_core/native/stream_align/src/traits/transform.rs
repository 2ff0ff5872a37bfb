//! Transform trait - Forward/inverse complex DFT
//!
//! Defines the spectral transform the correlator is built on.
//! Pure math - no knowledge of ports, frames or estimates.

use rustfft::num_complex::Complex;

/// Fixed-size complex DFT
///
/// Implementations are planned once for a single length and reused every
/// cycle. Buffers passed in must be exactly `len()` samples long.
pub trait Transform: Send {
    /// Transform length in samples
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Short backend name for logs and errors
    fn name(&self) -> &'static str;

    /// In-place forward DFT
    fn forward(&mut self, buf: &mut [Complex<f64>]);

    /// In-place inverse DFT, unnormalized (scaled by `len()`)
    fn inverse(&mut self, buf: &mut [Complex<f64>]);
}

impl<T: Transform + ?Sized> Transform for Box<T> {
    fn len(&self) -> usize {
        (**self).len()
    }

    fn name(&self) -> &'static str {
        (**self).name()
    }

    fn forward(&mut self, buf: &mut [Complex<f64>]) {
        (**self).forward(buf)
    }

    fn inverse(&mut self, buf: &mut [Complex<f64>]) {
        (**self).inverse(buf)
    }
}
