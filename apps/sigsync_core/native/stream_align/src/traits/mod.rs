//! Core DSP traits for the alignment engine
//!
//! These traits define mathematical behavior, not host framework glue.

mod transform;

pub use transform::Transform;
