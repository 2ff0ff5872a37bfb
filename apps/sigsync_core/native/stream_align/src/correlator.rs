//! Spectral Correlator
//!
//! Circular cross-correlation by spectral multiplication:
//!
//!   C[k] = Σ_n conj(a[n]) · b[(n + k) mod N] = IFFT(conj(A) · B)
//!
//! The peak of |C| gives the integer circular delay of `b` relative to `a`,
//! and arg(C) at the peak gives the residual carrier phase of `b` relative
//! to `a`. Both come out of one forward/inverse pass, O(N log N).
//!
//! ## Conventions
//!
//! - Peak search is argmax |C[i]|², ties resolved to the smallest index
//! - The raw index is unwrapped to a signed lag in (-N/2, N/2]
//! - Positive lag: `b` lags `a` by `lag` samples
//! - Either input with negligible energy yields `lag = 0, phase = 0`

use rustfft::num_complex::Complex;

use crate::error::{AlignError, AlignResult};
use crate::frame::Sample;
use crate::traits::Transform;
use crate::utils::{lag_to_index, unwrap_lag};

/// Energy at or below which a sequence is treated as silent
pub const NEGLIGIBLE_ENERGY: f64 = 1e-30;

/// Delay and phase of one stream relative to another
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct AlignmentEstimate {
    /// Signed circular delay in samples, in (-N/2, N/2]
    pub lag: isize,
    /// Carrier phase offset in radians, in [-π, π]
    pub phase: f64,
}

impl AlignmentEstimate {
    pub const ZERO: Self = Self { lag: 0, phase: 0.0 };

    pub fn new(lag: isize, phase: f64) -> Self {
        Self { lag, phase }
    }
}

/// Full correlation result, estimate plus peak quality
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Correlation {
    pub estimate: AlignmentEstimate,
    /// |C| at the peak, normalized by sqrt(E_a · E_b). 1.0 for a perfect match
    pub peak: f64,
}

impl Correlation {
    fn degenerate() -> Self {
        Self {
            estimate: AlignmentEstimate::ZERO,
            peak: 0.0,
        }
    }
}

/// Forward spectrum of a reference sequence, computed once per cycle
#[derive(Debug, Clone)]
pub struct ReferenceSpectrum {
    spectrum: Vec<Complex<f64>>,
    energy: f64,
}

impl ReferenceSpectrum {
    pub fn len(&self) -> usize {
        self.spectrum.len()
    }

    pub fn is_empty(&self) -> bool {
        self.spectrum.is_empty()
    }

    pub fn energy(&self) -> f64 {
        self.energy
    }
}

/// Cross-correlator over a fixed transform length
pub struct SpectralCorrelator<T: Transform> {
    transform: T,
    work: Vec<Complex<f64>>,
}

impl<T: Transform> SpectralCorrelator<T> {
    pub fn new(transform: T) -> Self {
        let n = transform.len();
        Self {
            transform,
            work: vec![Complex::new(0.0, 0.0); n],
        }
    }

    /// Transform length N
    pub fn len(&self) -> usize {
        self.transform.len()
    }

    pub fn is_empty(&self) -> bool {
        self.transform.is_empty()
    }

    pub fn backend(&self) -> &'static str {
        self.transform.name()
    }

    /// Correlate `b` against `a`, both N samples
    pub fn correlate(&mut self, a: &[Sample], b: &[Sample]) -> AlignResult<Correlation> {
        let reference = self.prepare_reference(a)?;
        self.correlate_prepared(&reference, b)
    }

    /// Forward-transform the reference once for several secondaries
    pub fn prepare_reference(&mut self, a: &[Sample]) -> AlignResult<ReferenceSpectrum> {
        self.check_len(0, a.len())?;
        let energy = self.load(a);
        self.transform.forward(&mut self.work);
        Ok(ReferenceSpectrum {
            spectrum: self.work.clone(),
            energy,
        })
    }

    /// Correlate a secondary sequence against a prepared reference
    pub fn correlate_prepared(
        &mut self,
        reference: &ReferenceSpectrum,
        b: &[Sample],
    ) -> AlignResult<Correlation> {
        self.check_len(1, b.len())?;
        if reference.len() != self.len() {
            return Err(AlignError::FrameSizeMismatch {
                port: 0,
                expected: self.len(),
                actual: reference.len(),
            });
        }

        let energy_b = self.load(b);
        if reference.energy <= NEGLIGIBLE_ENERGY || energy_b <= NEGLIGIBLE_ENERGY {
            return Ok(Correlation::degenerate());
        }

        self.transform.forward(&mut self.work);
        for (w, r) in self.work.iter_mut().zip(reference.spectrum.iter()) {
            *w *= r.conj();
        }
        self.transform.inverse(&mut self.work);

        let n = self.work.len();
        let (index, power) = peak_index(&self.work);
        if power == 0.0 {
            return Ok(Correlation::degenerate());
        }

        let lag = unwrap_lag(index, n);
        // Inverse is unnormalized
        let c = self.work[lag_to_index(lag, n)] / n as f64;

        Ok(Correlation {
            estimate: AlignmentEstimate::new(lag, c.arg()),
            peak: c.norm() / (reference.energy * energy_b).sqrt(),
        })
    }

    /// Copy samples into the f64 work buffer, returning their energy
    fn load(&mut self, input: &[Sample]) -> f64 {
        let mut energy = 0.0;
        for (w, s) in self.work.iter_mut().zip(input.iter()) {
            *w = Complex::new(s.re as f64, s.im as f64);
            energy += w.norm_sqr();
        }
        energy
    }

    fn check_len(&self, port: usize, actual: usize) -> AlignResult<()> {
        if actual != self.len() {
            return Err(AlignError::FrameSizeMismatch {
                port,
                expected: self.len(),
                actual,
            });
        }
        Ok(())
    }
}

/// Index and power of max |c|². Strict comparison keeps the smallest index on ties
fn peak_index(corr: &[Complex<f64>]) -> (usize, f64) {
    let mut index = 0;
    let mut power = 0.0;
    for (i, c) in corr.iter().enumerate() {
        let p = c.norm_sqr();
        if p > power {
            power = p;
            index = i;
        }
    }
    (index, power)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transforms::{Radix2Transform, RustFftTransform};
    use std::f64::consts::PI;

    fn impulse(n: usize, at: usize) -> Vec<Sample> {
        let mut v = vec![Sample::new(0.0, 0.0); n];
        v[at] = Sample::new(1.0, 0.0);
        v
    }

    /// Deterministic broadband test sequence
    fn chirp(n: usize) -> Vec<Sample> {
        (0..n)
            .map(|i| {
                let t = i as f64;
                let phase = PI * t * t / n as f64;
                Sample::new(phase.cos() as f32, phase.sin() as f32)
            })
            .collect()
    }

    fn shift(x: &[Sample], k: isize) -> Vec<Sample> {
        let n = x.len();
        (0..n).map(|i| x[lag_to_index(i as isize - k, n)]).collect()
    }

    fn rotate(x: &[Sample], theta: f64) -> Vec<Sample> {
        let w = Complex::from_polar(1.0f32, theta as f32);
        x.iter().map(|&s| s * w).collect()
    }

    fn correlator(n: usize) -> SpectralCorrelator<RustFftTransform> {
        SpectralCorrelator::new(RustFftTransform::new(n).unwrap())
    }

    #[test]
    fn test_zero_lag_identity() {
        let mut corr = correlator(64);
        let f = chirp(64);
        let result = corr.correlate(&f, &f).unwrap();
        assert_eq!(result.estimate.lag, 0);
        assert!(result.estimate.phase.abs() < 1e-6, "phase {}", result.estimate.phase);
        assert!((result.peak - 1.0).abs() < 1e-5, "peak {}", result.peak);
    }

    #[test]
    fn test_impulse_shift_by_three() {
        let mut corr = correlator(8);
        let result = corr.correlate(&impulse(8, 0), &impulse(8, 3)).unwrap();
        assert_eq!(result.estimate.lag, 3);
        assert!(result.estimate.phase.abs() < 1e-9);
    }

    #[test]
    fn test_quarter_turn_phase() {
        let mut corr = correlator(4);
        let a = impulse(4, 0);
        let b = rotate(&a, PI / 2.0);
        let result = corr.correlate(&a, &b).unwrap();
        assert_eq!(result.estimate.lag, 0);
        assert!((result.estimate.phase - PI / 2.0).abs() < 1e-6);
    }

    #[test]
    fn test_known_shifts_recovered() {
        let n = 128;
        let mut corr = correlator(n);
        let f = chirp(n);
        for k in [-63isize, -17, -1, 1, 5, 40, 63] {
            let result = corr.correlate(&f, &shift(&f, k)).unwrap();
            assert_eq!(result.estimate.lag, k, "shift {}", k);
        }
    }

    #[test]
    fn test_known_phases_recovered() {
        let mut corr = correlator(64);
        let f = chirp(64);
        for theta in [-3.0, -1.2, 0.3, 1.0, 2.9] {
            let result = corr.correlate(&f, &rotate(&f, theta)).unwrap();
            assert_eq!(result.estimate.lag, 0);
            assert!(
                (result.estimate.phase - theta).abs() < 1e-3,
                "theta {} recovered {}",
                theta,
                result.estimate.phase
            );
        }
    }

    #[test]
    fn test_shift_and_phase_together() {
        let mut corr = correlator(256);
        let f = chirp(256);
        let b = rotate(&shift(&f, -42), 0.75);
        let result = corr.correlate(&f, &b).unwrap();
        assert_eq!(result.estimate.lag, -42);
        assert!((result.estimate.phase - 0.75).abs() < 1e-3);
    }

    #[test]
    fn test_half_length_shift_unwraps_positive() {
        let mut corr = correlator(8);
        let result = corr.correlate(&impulse(8, 0), &impulse(8, 4)).unwrap();
        assert_eq!(result.estimate.lag, 4);

        let result = corr.correlate(&impulse(8, 0), &impulse(8, 5)).unwrap();
        assert_eq!(result.estimate.lag, -3);
    }

    #[test]
    fn test_ties_take_smallest_index() {
        let c = [
            Complex::new(0.0, 0.0),
            Complex::new(0.0, 2.0),
            Complex::new(0.5, 0.0),
            Complex::new(-2.0, 0.0),
        ];
        assert_eq!(peak_index(&c), (1, 4.0));

        let zeros = [Complex::new(0.0, 0.0); 4];
        assert_eq!(peak_index(&zeros), (0, 0.0));
    }

    #[test]
    fn test_zero_signal_convention() {
        let mut corr = correlator(16);
        let zeros = vec![Sample::new(0.0, 0.0); 16];
        let f = chirp(16);

        for (a, b) in [(&zeros, &f), (&f, &zeros), (&zeros, &zeros)] {
            let result = corr.correlate(a, b).unwrap();
            assert_eq!(result.estimate, AlignmentEstimate::ZERO);
            assert_eq!(result.peak, 0.0);
        }
    }

    #[test]
    fn test_length_mismatch_rejected() {
        let mut corr = correlator(8);
        let err = corr.correlate(&impulse(8, 0), &impulse(7, 0)).unwrap_err();
        assert_eq!(
            err,
            AlignError::FrameSizeMismatch {
                port: 1,
                expected: 8,
                actual: 7
            }
        );
    }

    #[test]
    fn test_prepared_reference_matches_one_shot() {
        let mut corr = correlator(32);
        let f = chirp(32);
        let b = rotate(&shift(&f, 9), -0.4);

        let one_shot = corr.correlate(&f, &b).unwrap();
        let reference = corr.prepare_reference(&f).unwrap();
        assert_eq!(reference.len(), corr.len());
        assert!(!reference.is_empty() && !corr.is_empty());
        let prepared = corr.correlate_prepared(&reference, &b).unwrap();
        assert_eq!(one_shot, prepared);
    }

    #[test]
    fn test_radix2_backend_matches_rustfft() {
        let f = chirp(64);
        let b = rotate(&shift(&f, -11), 2.2);

        let mut fast = correlator(64);
        let mut radix = SpectralCorrelator::new(Radix2Transform::new(64).unwrap());

        let x = fast.correlate(&f, &b).unwrap();
        let y = radix.correlate(&f, &b).unwrap();
        assert_eq!(x.estimate.lag, y.estimate.lag);
        assert!((x.estimate.phase - y.estimate.phase).abs() < 1e-9);
    }

    #[test]
    fn test_deterministic() {
        let mut corr = correlator(64);
        let f = chirp(64);
        let b = rotate(&shift(&f, 7), 1.1);
        let first = corr.correlate(&f, &b).unwrap();
        for _ in 0..5 {
            assert_eq!(corr.correlate(&f, &b).unwrap(), first);
        }
    }
}
