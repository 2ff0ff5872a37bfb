//! Stream Aligner
//!
//! Owns one alignment estimate per secondary port and applies it to every
//! frame. Port 0 is the reference and always passes through unchanged.
//!
//! ## Cycle
//!
//! 1. Validate port count and frame lengths (abort with no output on error)
//! 2. Read the recalibration flag once
//! 3. If set: correlate every secondary against the reference and commit
//!    all new estimates together
//! 4. Compensate each `Locked` port; `Stale` ports pass through untouched
//!
//! The flag lives behind an atomic so a controller on another thread can
//! flip it through a `RecalibrationSwitch` while cycles are running.

mod compensate;
mod diagnostics;
mod estimate;

pub use compensate::{compensate, realign, rotate_in_place};
pub use diagnostics::DiagnosticReporter;
pub use estimate::{EstimateTable, PortState};

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use crate::config::AlignerConfig;
use crate::correlator::{AlignmentEstimate, Correlation, SpectralCorrelator};
use crate::error::{AlignError, AlignResult};
use crate::frame::{Frame, Sample};
use crate::traits::Transform;
use crate::transforms::build_transform;

/// Shared handle to the recalibration flag
#[derive(Debug, Clone)]
pub struct RecalibrationSwitch(Arc<AtomicBool>);

impl RecalibrationSwitch {
    fn new(initial: bool) -> Self {
        Self(Arc::new(AtomicBool::new(initial)))
    }

    /// Takes effect at the start of the next cycle
    pub fn set(&self, recalibrate: bool) {
        self.0.store(recalibrate, Ordering::Release);
    }

    pub fn get(&self) -> bool {
        self.0.load(Ordering::Acquire)
    }
}

/// Per-port diagnostic metadata returned with every cycle
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PortReport {
    pub port: usize,
    pub state: PortState,
    pub estimate: AlignmentEstimate,
    /// Normalized correlation peak from the last recalibration (0 if none)
    pub peak: f64,
    /// Recalibrations applied to this port since construction or `reset`
    pub recalibrations: u64,
}

/// Result of one processing cycle
#[derive(Debug, Clone)]
pub struct CycleOutput {
    /// One corrected frame per port, port 0 first
    pub frames: Vec<Frame>,
    /// One report per secondary port, in port order
    pub reports: Vec<PortReport>,
    /// Whether this cycle recomputed estimates
    pub recalibrated: bool,
    /// Zero-based index of this cycle
    pub cycle: u64,
}

/// Multi-port delay/phase aligner
pub struct StreamAligner {
    config: AlignerConfig,
    correlator: SpectralCorrelator<Box<dyn Transform>>,
    table: EstimateTable,
    switch: RecalibrationSwitch,
    last_flag: bool,
    reporter: DiagnosticReporter,
    cycle: u64,
}

impl StreamAligner {
    /// Build an aligner with the backend named in `config`
    pub fn new(config: AlignerConfig) -> AlignResult<Self> {
        config.validate()?;
        let transform = build_transform(config.backend, config.fft_size)?;
        Self::from_parts(config, transform)
    }

    /// Build an aligner around a caller-supplied transform
    ///
    /// `config.backend` is ignored; the transform length must equal
    /// `config.fft_size`.
    pub fn with_transform<T: Transform + 'static>(
        config: AlignerConfig,
        transform: T,
    ) -> AlignResult<Self> {
        config.validate()?;
        Self::from_parts(config, Box::new(transform))
    }

    fn from_parts(config: AlignerConfig, transform: Box<dyn Transform>) -> AlignResult<Self> {
        if transform.len() != config.fft_size {
            return Err(AlignError::InvalidConfig(format!(
                "{} transform length {} does not match fft_size {}",
                transform.name(),
                transform.len(),
                config.fft_size
            )));
        }

        log::debug!(
            "stream aligner: N={}, P={}, backend={}, recalibrate={}",
            config.fft_size,
            config.num_ports,
            transform.name(),
            config.recalibrate
        );

        Ok(Self {
            table: EstimateTable::new(config.num_ports),
            switch: RecalibrationSwitch::new(config.recalibrate),
            last_flag: config.recalibrate,
            reporter: DiagnosticReporter::new(config.report_interval),
            correlator: SpectralCorrelator::new(transform),
            cycle: 0,
            config,
        })
    }

    /// Run one cycle over exactly one frame per port
    pub fn process<F: AsRef<[Sample]>>(&mut self, frames: &[F]) -> AlignResult<CycleOutput> {
        self.validate_frames(frames)?;

        let recalibrate = self.switch.get();
        if recalibrate != self.last_flag {
            log::info!(
                "recalibration {} at cycle {}",
                if recalibrate { "enabled" } else { "disabled" },
                self.cycle
            );
            self.last_flag = recalibrate;
        }

        let cycle = self.cycle;
        if recalibrate {
            self.recalibrate(frames, cycle)?;
        }

        let mut out = Vec::with_capacity(frames.len());
        out.push(frames[0].as_ref().to_vec());
        for (port, frame) in frames.iter().enumerate().skip(1) {
            let frame = frame.as_ref();
            let corrected = match (self.table.state(port), self.table.estimate(port)) {
                (Some(PortState::Locked), Some(estimate)) => {
                    compensate(frame, estimate, self.config.phase_epsilon)
                }
                _ => frame.to_vec(),
            };
            out.push(corrected);
        }

        self.cycle += 1;
        Ok(CycleOutput {
            frames: out,
            reports: self.reports(),
            recalibrated: recalibrate,
            cycle,
        })
    }

    /// Correlate all secondaries first, then commit every estimate at once
    fn recalibrate<F: AsRef<[Sample]>>(&mut self, frames: &[F], cycle: u64) -> AlignResult<()> {
        let reference = self.correlator.prepare_reference(frames[0].as_ref())?;
        let results = frames[1..]
            .iter()
            .map(|f| self.correlator.correlate_prepared(&reference, f.as_ref()))
            .collect::<AlignResult<Vec<Correlation>>>()?;

        let report = self.reporter.tick();
        for (i, result) in results.into_iter().enumerate() {
            let port = i + 1;
            self.table.store(port, result.estimate, result.peak);
            if report {
                self.reporter.report(cycle, port, result.estimate, result.peak);
            }
        }
        Ok(())
    }

    fn validate_frames<F: AsRef<[Sample]>>(&self, frames: &[F]) -> AlignResult<()> {
        if frames.len() != self.config.num_ports {
            let err = AlignError::PortCountMismatch {
                expected: self.config.num_ports,
                actual: frames.len(),
            };
            log::warn!("cycle {} aborted: {}", self.cycle, err);
            return Err(err);
        }

        for (port, frame) in frames.iter().enumerate() {
            let actual = frame.as_ref().len();
            if actual != self.config.fft_size {
                let err = AlignError::FrameSizeMismatch {
                    port,
                    expected: self.config.fft_size,
                    actual,
                };
                log::warn!("cycle {} aborted: {}", self.cycle, err);
                return Err(err);
            }
        }
        Ok(())
    }

    fn reports(&self) -> Vec<PortReport> {
        (1..self.config.num_ports)
            .map(|port| PortReport {
                port,
                state: self.table.state(port).unwrap_or(PortState::Stale),
                estimate: self.table.estimate(port).unwrap_or_default(),
                peak: self.table.peak(port).unwrap_or(0.0),
                recalibrations: self.table.recalibrations(port).unwrap_or(0),
            })
            .collect()
    }

    /// Takes effect on the next cycle
    pub fn set_recalibration(&self, recalibrate: bool) {
        self.switch.set(recalibrate);
    }

    pub fn recalibration(&self) -> bool {
        self.switch.get()
    }

    /// Cloneable handle for controllers on other threads
    pub fn recalibration_switch(&self) -> RecalibrationSwitch {
        self.switch.clone()
    }

    /// Current estimate; `None` for the reference or unknown ports
    pub fn estimate(&self, port: usize) -> Option<AlignmentEstimate> {
        self.table.estimate(port)
    }

    pub fn port_state(&self, port: usize) -> Option<PortState> {
        self.table.state(port)
    }

    /// Recalibrations applied to `port`; `None` for the reference or unknown ports
    pub fn recalibrations(&self, port: usize) -> Option<u64> {
        self.table.recalibrations(port)
    }

    /// Forget every estimate. The recalibration flag is left as is
    pub fn reset(&mut self) {
        log::debug!("estimate table reset at cycle {}", self.cycle);
        self.table.reset();
    }

    pub fn fft_size(&self) -> usize {
        self.config.fft_size
    }

    pub fn num_ports(&self) -> usize {
        self.config.num_ports
    }

    pub fn config(&self) -> &AlignerConfig {
        &self.config
    }

    pub fn backend(&self) -> &'static str {
        self.correlator.backend()
    }

    /// Cycles completed so far
    pub fn cycles(&self) -> u64 {
        self.cycle
    }
}
