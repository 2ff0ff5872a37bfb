//! Clamping utilities for fixed-point I/Q

/// Full-scale factor used in both directions between f32 and sc16.
/// +1.0 saturates to 32767 through `clamp_i16`.
pub const SC16_SCALE: f32 = 32768.0;

/// Clamp a floating point value to i16 range with saturation
#[inline]
pub fn clamp_i16(val: f32) -> i16 {
    if val.is_nan() {
        0
    } else if val >= 32767.0 {
        32767
    } else if val <= -32768.0 {
        -32768
    } else {
        val.round() as i16
    }
}
