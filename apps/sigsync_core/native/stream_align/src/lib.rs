//! Stream Align - Delay/phase alignment engine for multi-receiver I/Q
//!
//! Given P frames of the same signal captured at separated receivers, this
//! crate estimates each secondary stream's integer circular delay and
//! carrier phase relative to port 0 by FFT cross-correlation, and
//! compensates for them sample by sample. Frame scheduling and host
//! framework glue live outside this crate.
//!
//! ```
//! use stream_align::{AlignerConfig, Sample, StreamAligner};
//!
//! let mut aligner = StreamAligner::new(AlignerConfig::new(8, 2).with_recalibrate(true))?;
//!
//! let mut reference = vec![Sample::new(0.0, 0.0); 8];
//! reference[0] = Sample::new(1.0, 0.0);
//! let mut delayed = vec![Sample::new(0.0, 0.0); 8];
//! delayed[3] = Sample::new(1.0, 0.0);
//!
//! let out = aligner.process(&[reference.clone(), delayed])?;
//! assert_eq!(out.reports[0].estimate.lag, 3);
//! assert!((out.frames[1][0] - reference[0]).norm() < 1e-6);
//! # Ok::<(), stream_align::AlignError>(())
//! ```

pub mod aligner;
pub mod config;
pub mod correlator;
pub mod error;
pub mod frame;
pub mod traits;
pub mod transforms;
mod utils;

// Re-export core types for convenience
pub use aligner::{CycleOutput, PortReport, PortState, RecalibrationSwitch, StreamAligner};
pub use config::AlignerConfig;
pub use correlator::{AlignmentEstimate, Correlation, SpectralCorrelator};
pub use error::{AlignError, AlignResult};
pub use frame::{frame_energy, frame_from_sc16, frame_to_sc16, Frame, Sample};
pub use traits::Transform;
pub use transforms::{build_transform, Radix2Transform, RustFftTransform, TransformKind};
pub use utils::{phase_distance, wrap_phase};
