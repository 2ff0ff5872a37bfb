//! Receiver Physics for SigSync SimNet
//!
//! Simulates a source observed by several spatially separated receivers:
//! per-receiver circular delay, local-oscillator phase, gain and AWGN.
//! All randomness comes from seeded ChaCha streams, so every scenario is
//! reproducible.

pub mod array;
pub mod noise;
pub mod receiver;
pub mod source;

pub use array::ReceiverArray;
pub use noise::ComplexNoise;
pub use receiver::{Receiver, ReceiverParams};
pub use source::QpskSource;
