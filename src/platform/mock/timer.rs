//! Mock Timer implementation for testing

use crate::platform::{traits::TimerInterface, PlatformError, Result, TimerError};
use core::cell::Cell;

/// Mock Timer implementation
///
/// Uses simulated time for delays in test environment. Reading the clock can
/// optionally advance it, so that loops bounded by elapsed time terminate.
#[derive(Debug)]
pub struct MockTimer {
    now_us: Cell<u64>,
    tick_per_read_us: u64,
    delay_calls: u32,
    delayed_us: u64,
    fail_after: Option<u32>,
}

impl MockTimer {
    /// Create a new mock timer
    pub fn new() -> Self {
        Self {
            now_us: Cell::new(0),
            tick_per_read_us: 0,
            delay_calls: 0,
            delayed_us: 0,
            fail_after: None,
        }
    }

    /// Advance the clock by `us` every time `now_us` is read
    pub fn with_tick_per_read(mut self, us: u64) -> Self {
        self.tick_per_read_us = us;
        self
    }

    /// Let `n` delays succeed, then fail every later one with `Overflow`
    pub fn fail_after(mut self, n: u32) -> Self {
        self.fail_after = Some(n);
        self
    }

    /// Number of `delay_us`/`delay_ms` calls so far
    pub fn delay_calls(&self) -> u32 {
        self.delay_calls
    }

    /// Total time spent in delays
    pub fn delayed_us(&self) -> u64 {
        self.delayed_us
    }
}

impl Default for MockTimer {
    fn default() -> Self {
        Self::new()
    }
}

impl TimerInterface for MockTimer {
    fn delay_us(&mut self, us: u32) -> Result<()> {
        if self.fail_after.is_some_and(|n| self.delay_calls >= n) {
            return Err(PlatformError::Timer(TimerError::Overflow));
        }
        self.delay_calls += 1;
        self.delayed_us += us as u64;
        self.now_us.set(self.now_us.get().wrapping_add(us as u64));
        Ok(())
    }

    fn delay_ms(&mut self, ms: u32) -> Result<()> {
        self.delay_us(ms.saturating_mul(1000))
    }

    fn now_us(&self) -> u64 {
        let now = self.now_us.get();
        self.now_us.set(now.wrapping_add(self.tick_per_read_us));
        now
    }
}
