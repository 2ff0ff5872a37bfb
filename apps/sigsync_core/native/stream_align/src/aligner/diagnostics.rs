//! Rate-limited estimate logging
//!
//! Observational only. Nothing here feeds back into alignment.

use crate::correlator::AlignmentEstimate;

pub(crate) const LOG_TARGET: &str = "stream_align::diag";

/// Decides which recalibration cycles get their estimates logged
#[derive(Debug, Clone)]
pub struct DiagnosticReporter {
    interval: u64,
    recalibrations: u64,
}

impl DiagnosticReporter {
    /// `interval == 0` never reports
    pub fn new(interval: u64) -> Self {
        Self {
            interval,
            recalibrations: 0,
        }
    }

    /// Count one recalibration cycle; true if it should be reported.
    /// Reports the first cycle, then every `interval`th.
    pub fn tick(&mut self) -> bool {
        let n = self.recalibrations;
        self.recalibrations += 1;
        self.interval != 0 && n % self.interval == 0
    }

    pub fn report(&self, cycle: u64, port: usize, estimate: AlignmentEstimate, peak: f64) {
        log::info!(
            target: LOG_TARGET,
            "cycle {} port {}: lag {} samples, phase {:.4} rad, peak {:.3}",
            cycle,
            port,
            estimate.lag,
            estimate.phase,
            peak
        );
    }

    pub fn recalibrations(&self) -> u64 {
        self.recalibrations
    }
}
