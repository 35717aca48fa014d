//! RP2350 Timer implementation
//!
//! Delays and the monotonic clock come from `embassy-time`, backed by the
//! RP2350 64-bit microsecond timer (`time-driver` feature of `embassy-rp`).

use crate::platform::{traits::TimerInterface, Result};
use embassy_time::{block_for, Duration, Instant};

/// RP2350 Timer implementation
///
/// Delays spin on the calling context; nothing else runs meanwhile.
#[derive(Debug, Default)]
pub struct Rp2350Timer;

impl Rp2350Timer {
    /// Create a new RP2350 Timer instance
    pub fn new() -> Self {
        Self
    }
}

impl TimerInterface for Rp2350Timer {
    fn delay_us(&mut self, us: u32) -> Result<()> {
        block_for(Duration::from_micros(us as u64));
        Ok(())
    }

    fn delay_ms(&mut self, ms: u32) -> Result<()> {
        block_for(Duration::from_millis(ms as u64));
        Ok(())
    }

    fn now_us(&self) -> u64 {
        Instant::now().as_micros()
    }
}
