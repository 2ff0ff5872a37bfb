//! Per-port estimate table
//!
//! One slot per secondary port. Written only by the recalibration commit,
//! read by every compensation pass.

use crate::correlator::AlignmentEstimate;

/// Lock state of one secondary port
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PortState {
    /// No estimate computed yet, input passes through untouched
    Stale,
    /// Estimate computed at least once
    Locked,
}

#[derive(Debug, Clone, Copy)]
struct PortSlot {
    estimate: AlignmentEstimate,
    state: PortState,
    peak: f64,
    recalibrations: u64,
}

impl PortSlot {
    const STALE: Self = Self {
        estimate: AlignmentEstimate::ZERO,
        state: PortState::Stale,
        peak: 0.0,
        recalibrations: 0,
    };
}

/// Alignment estimates for ports 1..P
#[derive(Debug, Clone)]
pub struct EstimateTable {
    slots: Vec<PortSlot>,
}

impl EstimateTable {
    /// Table for `num_ports` ports (the reference gets no slot)
    pub fn new(num_ports: usize) -> Self {
        Self {
            slots: vec![PortSlot::STALE; num_ports.saturating_sub(1)],
        }
    }

    fn slot(&self, port: usize) -> Option<&PortSlot> {
        port.checked_sub(1).and_then(|i| self.slots.get(i))
    }

    pub fn estimate(&self, port: usize) -> Option<AlignmentEstimate> {
        self.slot(port).map(|s| s.estimate)
    }

    pub fn state(&self, port: usize) -> Option<PortState> {
        self.slot(port).map(|s| s.state)
    }

    /// Normalized correlation peak from the last recalibration
    pub fn peak(&self, port: usize) -> Option<f64> {
        self.slot(port).map(|s| s.peak)
    }

    pub fn recalibrations(&self, port: usize) -> Option<u64> {
        self.slot(port).map(|s| s.recalibrations)
    }

    /// Overwrite the estimate for `port` and lock it
    ///
    /// # Panics
    /// Panics if `port` is 0 or out of range
    pub fn store(&mut self, port: usize, estimate: AlignmentEstimate, peak: f64) {
        assert!(
            port >= 1 && port <= self.slots.len(),
            "port {} has no estimate slot",
            port
        );
        let slot = &mut self.slots[port - 1];
        slot.estimate = estimate;
        slot.peak = peak;
        slot.state = PortState::Locked;
        slot.recalibrations += 1;
    }

    /// Drop every estimate, all ports back to `Stale`
    pub fn reset(&mut self) {
        for slot in &mut self.slots {
            *slot = PortSlot::STALE;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initially_stale() {
        let table = EstimateTable::new(3);
        for port in 1..3 {
            assert_eq!(table.state(port), Some(PortState::Stale));
            assert_eq!(table.estimate(port), Some(AlignmentEstimate::ZERO));
            assert_eq!(table.recalibrations(port), Some(0));
        }
    }

    #[test]
    fn test_reference_and_out_of_range_have_no_slot() {
        let table = EstimateTable::new(3);
        assert_eq!(table.estimate(0), None);
        assert_eq!(table.state(3), None);
    }

    #[test]
    fn test_store_locks_and_counts() {
        let mut table = EstimateTable::new(2);
        table.store(1, AlignmentEstimate::new(5, 0.25), 0.9);
        table.store(1, AlignmentEstimate::new(-2, 1.0), 0.8);

        assert_eq!(table.state(1), Some(PortState::Locked));
        assert_eq!(table.estimate(1), Some(AlignmentEstimate::new(-2, 1.0)));
        assert_eq!(table.peak(1), Some(0.8));
        assert_eq!(table.recalibrations(1), Some(2));
    }

    #[test]
    fn test_reset() {
        let mut table = EstimateTable::new(2);
        table.store(1, AlignmentEstimate::new(5, 0.25), 1.0);
        table.reset();
        assert_eq!(table.state(1), Some(PortState::Stale));
        assert_eq!(table.estimate(1), Some(AlignmentEstimate::ZERO));
    }

    #[test]
    #[should_panic(expected = "has no estimate slot")]
    fn test_store_reference_panics() {
        let mut table = EstimateTable::new(2);
        table.store(0, AlignmentEstimate::ZERO, 0.0);
    }
}
