//! Engine configuration
//!
//! Everything the aligner needs at construction. Loaded from YAML or built
//! in code; `StreamAligner::new` runs `validate()` before building anything.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{AlignError, AlignResult};
use crate::transforms::TransformKind;

/// Default residual phase below which no rotation is applied (radians)
pub const DEFAULT_PHASE_EPSILON: f64 = 0.001;

/// Alignment engine configuration
///
/// ```yaml
/// fft_size: 4096
/// num_ports: 4
/// recalibrate: true
/// backend: radix2
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AlignerConfig {
    /// Transform size N, also the required frame length
    /// Default: 1024
    pub fft_size: usize,

    /// Number of ports P, port 0 is the reference
    /// Default: 2
    pub num_ports: usize,

    /// Initial state of the recalibration flag
    /// Default: false
    pub recalibrate: bool,

    /// Phase offsets at or below this magnitude are not corrected
    /// Default: 0.001 rad
    pub phase_epsilon: f64,

    /// Log estimates on the first and then every Nth recalibration cycle.
    /// 0 disables estimate logging.
    /// Default: 100
    pub report_interval: u64,

    /// Transform backend
    /// Default: rustfft
    pub backend: TransformKind,
}

impl Default for AlignerConfig {
    fn default() -> Self {
        Self {
            fft_size: 1024,
            num_ports: 2,
            recalibrate: false,
            phase_epsilon: DEFAULT_PHASE_EPSILON,
            report_interval: 100,
            backend: TransformKind::RustFft,
        }
    }
}

impl AlignerConfig {
    /// Config with the given size and port count, defaults elsewhere
    pub fn new(fft_size: usize, num_ports: usize) -> Self {
        Self {
            fft_size,
            num_ports,
            ..Self::default()
        }
    }

    pub fn with_recalibrate(mut self, recalibrate: bool) -> Self {
        self.recalibrate = recalibrate;
        self
    }

    pub fn with_backend(mut self, backend: TransformKind) -> Self {
        self.backend = backend;
        self
    }

    pub fn with_report_interval(mut self, interval: u64) -> Self {
        self.report_interval = interval;
        self
    }

    /// Check values the backend does not check itself
    pub fn validate(&self) -> AlignResult<()> {
        if self.num_ports < 2 {
            return Err(AlignError::TooFewPorts(self.num_ports));
        }
        if !self.phase_epsilon.is_finite() || self.phase_epsilon < 0.0 {
            return Err(AlignError::InvalidConfig(format!(
                "phase_epsilon must be finite and non-negative, got {}",
                self.phase_epsilon
            )));
        }
        Ok(())
    }

    pub fn from_yaml_str(contents: &str) -> AlignResult<Self> {
        serde_yaml::from_str(contents).map_err(|e| AlignError::ConfigParse(e.to_string()))
    }

    pub fn to_yaml_string(&self) -> AlignResult<String> {
        serde_yaml::to_string(self).map_err(|e| AlignError::ConfigParse(e.to_string()))
    }

    /// Load and parse a YAML config file
    pub fn load(path: impl AsRef<Path>) -> AlignResult<Self> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path).map_err(|e| AlignError::ConfigRead {
            path: path.display().to_string(),
            reason: e.to_string(),
        })?;
        let config = Self::from_yaml_str(&contents)?;
        log::info!(
            "loaded aligner config from {}: N={}, P={}, backend={}",
            path.display(),
            config.fft_size,
            config.num_ports,
            config.backend.name()
        );
        Ok(config)
    }
}
