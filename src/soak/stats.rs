//! Soak test statistics
//!
//! Each verification iteration ends in exactly one [`IterationOutcome`]; the
//! counters in [`SoakStats`] only ever grow.

use crate::platform::PlatformError;

/// Result of one verification iteration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "pico2_w", derive(defmt::Format))]
pub enum IterationOutcome {
    /// Read back the marker
    Match,
    /// Read succeeded but returned another byte
    Mismatch {
        /// Byte actually read
        read: u8,
    },
    /// Address write failed; no read was attempted
    WriteFailed(PlatformError),
    /// Read failed
    ReadFailed(PlatformError),
}

impl IterationOutcome {
    /// True if the iteration counts as a failure
    pub fn is_failure(&self) -> bool {
        !matches!(self, IterationOutcome::Match)
    }
}

/// Failure counters accumulated across a run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "pico2_w", derive(defmt::Format))]
pub struct SoakStats {
    /// Iterations completed
    pub iterations: u32,
    /// Address writes that failed
    pub write_failures: u32,
    /// Reads that failed
    pub read_failures: u32,
    /// Reads that returned the wrong byte
    pub mismatches: u32,
}

impl SoakStats {
    /// Count one iteration
    pub fn record(&mut self, outcome: &IterationOutcome) {
        self.iterations = self.iterations.saturating_add(1);
        match outcome {
            IterationOutcome::Match => {}
            IterationOutcome::Mismatch { .. } => {
                self.mismatches = self.mismatches.saturating_add(1)
            }
            IterationOutcome::WriteFailed(_) => {
                self.write_failures = self.write_failures.saturating_add(1)
            }
            IterationOutcome::ReadFailed(_) => {
                self.read_failures = self.read_failures.saturating_add(1)
            }
        }
    }

    /// Sum of all three failure counters
    pub fn total_failures(&self) -> u32 {
        self.write_failures
            .saturating_add(self.read_failures)
            .saturating_add(self.mismatches)
    }

    /// True when no iteration failed
    pub fn passed(&self) -> bool {
        self.total_failures() == 0
    }
}
