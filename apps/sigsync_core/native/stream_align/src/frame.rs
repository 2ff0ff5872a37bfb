//! Sample and frame types
//!
//! Frames are owned `Vec`s of single-precision I/Q samples. Fixed-point
//! streams come in as interleaved sc16 (I0, Q0, I1, Q1, ...).

use rustfft::num_complex::Complex;

use crate::error::{AlignError, AlignResult};
use crate::utils::{clamp_i16, SC16_SCALE};

/// One complex baseband sample
pub type Sample = Complex<f32>;

/// One fixed-size block of samples for one port
pub type Frame = Vec<Sample>;

/// Convert interleaved sc16 I/Q into a frame, scaled to [-1, 1)
pub fn frame_from_sc16(interleaved: &[i16]) -> AlignResult<Frame> {
    if interleaved.len() % 2 != 0 {
        return Err(AlignError::OddInterleavedLength(interleaved.len()));
    }

    Ok(interleaved
        .chunks_exact(2)
        .map(|iq| Sample::new(iq[0] as f32 / SC16_SCALE, iq[1] as f32 / SC16_SCALE))
        .collect())
}

/// Convert a frame back to interleaved sc16 with saturation
pub fn frame_to_sc16(frame: &[Sample]) -> Vec<i16> {
    let mut out = Vec::with_capacity(frame.len() * 2);
    for s in frame {
        out.push(clamp_i16(s.re * SC16_SCALE));
        out.push(clamp_i16(s.im * SC16_SCALE));
    }
    out
}

/// Total energy Σ|x|² of a frame
pub fn frame_energy(frame: &[Sample]) -> f64 {
    frame.iter().map(|s| s.norm_sqr() as f64).sum()
}
