//! Soak test errors
//!
//! Only failures that end a run live here. Per-iteration bus errors are
//! absorbed into [`SoakStats`](super::SoakStats).

use crate::platform::PlatformError;
use core::fmt;

/// Errors that abort a soak run before or during verification
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "pico2_w", derive(defmt::Format))]
pub enum SoakError {
    /// The driver rejected the bus frequency
    Frequency(PlatformError),
    /// The marker write failed
    SetupWrite(PlatformError),
    /// The device never acknowledged after the marker write
    WriteCycleTimeout {
        /// Probes issued
        attempts: u32,
        /// Time spent polling
        elapsed_us: u64,
    },
    /// The delay primitive failed
    Timer(PlatformError),
}

impl SoakError {
    /// Underlying platform error, if any
    pub fn platform_error(&self) -> Option<PlatformError> {
        match self {
            SoakError::Frequency(e) | SoakError::SetupWrite(e) | SoakError::Timer(e) => Some(*e),
            SoakError::WriteCycleTimeout { .. } => None,
        }
    }

    /// True if the failing step already logged its own error line
    pub fn logged_at_source(&self) -> bool {
        matches!(self, SoakError::SetupWrite(_))
    }
}

impl fmt::Display for SoakError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SoakError::Frequency(e) => write!(f, "Bus frequency rejected: {}", e),
            SoakError::SetupWrite(e) => write!(
                f,
                "Unable to write data to EEPROM (i2c_stat = {})",
                e.status_code()
            ),
            SoakError::WriteCycleTimeout {
                attempts,
                elapsed_us,
            } => write!(
                f,
                "Setup did not complete: no ACK after {} polls in {} us",
                attempts, elapsed_us
            ),
            SoakError::Timer(e) => write!(f, "Delay failed: {}", e),
        }
    }
}
