//! Utility functions for DSP operations

mod clamp;
mod math;

pub use clamp::{clamp_i16, SC16_SCALE};
pub use math::*;
