//! Delay and phase compensation
//!
//! Undo an estimate: advance the stream by `lag` samples (circularly) and
//! rotate every sample by `-phase`. Magnitudes are preserved.

use rustfft::num_complex::Complex;

use crate::correlator::AlignmentEstimate;
use crate::frame::{Frame, Sample};
use crate::utils::lag_to_index;

/// Circular realignment: out[i] = input[(i + lag) mod N]
pub fn realign(input: &[Sample], lag: isize) -> Frame {
    let mut out = input.to_vec();
    if lag != 0 && !out.is_empty() {
        out.rotate_left(lag_to_index(lag, input.len()));
    }
    out
}

/// Rotate every sample by `phase` radians in place
pub fn rotate_in_place(buf: &mut [Sample], phase: f64) {
    let (sin, cos) = phase.sin_cos();
    let w = Complex::new(cos, sin);
    for s in buf.iter_mut() {
        let x = Complex::new(s.re as f64, s.im as f64) * w;
        *s = Sample::new(x.re as f32, x.im as f32);
    }
}

/// Apply the inverse of `estimate` to one frame
///
/// Rotation is skipped when |phase| <= `epsilon`.
pub fn compensate(input: &[Sample], estimate: AlignmentEstimate, epsilon: f64) -> Frame {
    let mut out = realign(input, estimate.lag);
    if estimate.phase.abs() > epsilon {
        rotate_in_place(&mut out, -estimate.phase);
    }
    out
}
