//! Small DSP math helpers

use std::f64::consts::PI;

/// Wrap an angle to (-π, π]
#[inline]
pub fn wrap_phase(angle: f64) -> f64 {
    let mut a = angle % (2.0 * PI);
    if a <= -PI {
        a += 2.0 * PI;
    } else if a > PI {
        a -= 2.0 * PI;
    }
    a
}

/// Smallest absolute angular distance between two phases
#[inline]
pub fn phase_distance(a: f64, b: f64) -> f64 {
    wrap_phase(a - b).abs()
}

/// Map a raw circular peak index into the signed range (-n/2, n/2]
#[inline]
pub fn unwrap_lag(index: usize, n: usize) -> isize {
    if index <= n / 2 {
        index as isize
    } else {
        index as isize - n as isize
    }
}

/// Map a signed lag back to a buffer index in [0, n)
#[inline]
pub fn lag_to_index(lag: isize, n: usize) -> usize {
    lag.rem_euclid(n as isize) as usize
}
