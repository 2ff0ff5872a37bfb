//! Engine error types

use thiserror::Error;

/// Errors raised by the alignment engine
///
/// Configuration variants abort construction. Frame variants abort only
/// the cycle that raised them; the estimate table is left untouched.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum AlignError {
    /// Transform backend cannot run at the requested size
    #[error("Unsupported transform size {size} for {backend} backend: {reason}")]
    UnsupportedTransformSize {
        size: usize,
        backend: &'static str,
        reason: &'static str,
    },

    /// Fewer than two ports configured
    #[error("At least 2 ports are required (reference + secondary), got {0}")]
    TooFewPorts(usize),

    /// Any other rejected configuration value
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Config file could not be read
    #[error("Failed to read config file {path}: {reason}")]
    ConfigRead { path: String, reason: String },

    /// Config file is not valid YAML for `AlignerConfig`
    #[error("Failed to parse config: {0}")]
    ConfigParse(String),

    /// A delivered frame does not match the transform size
    #[error("Frame size mismatch on port {port}: expected {expected} samples, got {actual}")]
    FrameSizeMismatch {
        port: usize,
        expected: usize,
        actual: usize,
    },

    /// Wrong number of frames delivered for one cycle
    #[error("Port count mismatch: expected {expected} frames, got {actual}")]
    PortCountMismatch { expected: usize, actual: usize },

    /// Interleaved I/Q buffer is missing its last Q value
    #[error("Interleaved I/Q buffer has odd length {0}")]
    OddInterleavedLength(usize),
}

impl AlignError {
    /// True for errors that can only come out of engine construction
    pub fn is_configuration(&self) -> bool {
        matches!(
            self,
            Self::UnsupportedTransformSize { .. }
                | Self::TooFewPorts(_)
                | Self::InvalidConfig(_)
                | Self::ConfigRead { .. }
                | Self::ConfigParse(_)
        )
    }
}

/// Result type for engine operations
pub type AlignResult<T> = Result<T, AlignError>;
