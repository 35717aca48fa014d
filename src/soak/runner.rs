//! EEPROM soak test procedure
//!
//! One run:
//! 1. Set the bus frequency
//! 2. Write the marker byte at the memory address
//! 3. ACK poll until the EEPROM finishes its internal write cycle
//! 4. Repeat N times: set the address pointer (no STOP), optionally wait,
//!    read one byte, compare against the marker
//!
//! Per iteration:
//!
//! ```text
//! WRITE_ADDR --fail--> COUNT_WRITE_FAIL
//!     |ok
//! DELAY -> READ --fail--> COUNT_READ_FAIL
//!            |ok
//!         COMPARE --mismatch--> COUNT_MISMATCH
//! ```

use super::{IterationOutcome, SoakConfig, SoakError, SoakStats};
use crate::core::{HexByte, HexWord};
use crate::platform::traits::{CompletionReporter, I2cInterface, TimerInterface};
use crate::{log_debug, log_error, log_info, log_warn};

/// Iterations between progress lines in verbose mode
pub const PROGRESS_INTERVAL: u32 = 1000;

/// Outcome of a completed run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "pico2_w", derive(defmt::Format))]
pub struct SoakReport {
    /// Failure counters
    pub stats: SoakStats,
    /// Address probes needed before the EEPROM acknowledged the marker write
    pub ack_polls: u32,
}

impl SoakReport {
    /// True when no iteration failed
    pub fn passed(&self) -> bool {
        self.stats.passed()
    }

    /// Log the verdict, and the statistics block on failure
    pub fn log(&self) {
        let verdict = if self.passed() { "OK" } else { "FAIL" };
        log_info!("EEPROM: Test result ... [{}]", verdict);

        if !self.passed() {
            log_info!("Test Statistics:");
            log_info!("    Total tests:     {}", self.stats.iterations);
            log_info!("    Failed at write: {}", self.stats.write_failures);
            log_info!("    Failed at read:  {}", self.stats.read_failures);
            log_info!("    Data mismatch:   {}", self.stats.mismatches);
            log_info!("    Total failures:  {}", self.stats.total_failures());
        }
    }
}

/// Soak test bound to a bus and a timer
///
/// The bus is borrowed exclusively for the whole run.
pub struct EepromSoakTest<'a, I: I2cInterface, T: TimerInterface> {
    i2c: &'a mut I,
    timer: &'a mut T,
    config: SoakConfig,
}

impl<'a, I: I2cInterface, T: TimerInterface> EepromSoakTest<'a, I, T> {
    /// Create a soak test; nothing touches the bus until [`setup`](Self::setup)
    pub fn new(i2c: &'a mut I, timer: &'a mut T, config: SoakConfig) -> Self {
        Self { i2c, timer, config }
    }

    /// Configuration of this run
    pub fn config(&self) -> &SoakConfig {
        &self.config
    }

    /// Configure the bus, write the marker and wait for the write cycle
    ///
    /// Returns the number of address probes the ACK poll needed.
    ///
    /// # Errors
    ///
    /// - `SoakError::Frequency` if the driver rejects the frequency
    /// - `SoakError::SetupWrite` if the marker write fails
    /// - `SoakError::WriteCycleTimeout` if the EEPROM never acknowledges
    pub fn setup(&mut self) -> Result<u32, SoakError> {
        let config = self.config;

        self.i2c
            .set_frequency(config.frequency_hz)
            .map_err(SoakError::Frequency)?;
        log_info!("I2C: I2C Frequency: {} Hz", config.frequency_hz);

        log_info!(
            "I2C: Write {} at address {} test ...",
            HexByte(config.marker),
            HexWord(config.memory_address)
        );
        let [addr_hi, addr_lo] = config.memory_address.to_be_bytes();
        if let Err(e) = self
            .i2c
            .write(config.device_address, &[addr_hi, addr_lo, config.marker])
        {
            log_error!(
                "Unable to write data to EEPROM (i2c_stat = {}), aborting",
                e.status_code()
            );
            return Err(SoakError::SetupWrite(e));
        }

        let polls = self.wait_write_cycle()?;
        if config.verbose {
            log_debug!("EEPROM: write cycle finished after {} polls", polls);
        }
        Ok(polls)
    }

    /// ACK poll with zero-length writes until the device answers
    fn wait_write_cycle(&mut self) -> Result<u32, SoakError> {
        let policy = self.config.ack_poll;
        let start_us = self.timer.now_us();
        let mut attempts: u32 = 0;

        loop {
            attempts = attempts.saturating_add(1);
            if self.i2c.write(self.config.device_address, &[]).is_ok() {
                return Ok(attempts);
            }

            let elapsed_us = self.timer.now_us().wrapping_sub(start_us);
            if attempts >= policy.max_attempts || elapsed_us >= policy.timeout_us {
                log_warn!(
                    "EEPROM: no ACK after {} polls in {} us",
                    attempts,
                    elapsed_us
                );
                return Err(SoakError::WriteCycleTimeout {
                    attempts,
                    elapsed_us,
                });
            }

            if policy.interval_us != 0 {
                self.timer
                    .delay_us(policy.interval_us)
                    .map_err(SoakError::Timer)?;
            }
        }
    }

    /// Run one verification iteration
    ///
    /// Bus failures are returned as outcomes, not errors.
    ///
    /// # Errors
    ///
    /// Returns `SoakError::Timer` if the configured delay fails.
    pub fn run_iteration(&mut self, index: u32) -> Result<IterationOutcome, SoakError> {
        let config = self.config;

        let address = config.memory_address.to_be_bytes();
        if let Err(e) = self.i2c.write_no_stop(config.device_address, &address) {
            log_warn!(
                "Test {} failed at write, i2c_stat is {}",
                index,
                e.status_code()
            );
            return Ok(IterationOutcome::WriteFailed(e));
        }

        if config.delay_us != 0 {
            self.timer
                .delay_us(config.delay_us)
                .map_err(SoakError::Timer)?;
        }

        let mut data = [0u8; 1];
        if let Err(e) = self.i2c.read(config.device_address, &mut data) {
            log_warn!(
                "Test {} failed at read, i2c_stat is {}",
                index,
                e.status_code()
            );
            return Ok(IterationOutcome::ReadFailed(e));
        }

        if data[0] != config.marker {
            log_warn!("Test {} failed at data match", index);
            return Ok(IterationOutcome::Mismatch { read: data[0] });
        }

        if config.verbose {
            log_debug!("Test {} read {}", index, HexByte(data[0]));
        }
        Ok(IterationOutcome::Match)
    }

    /// Full run: setup followed by all verification iterations
    ///
    /// # Errors
    ///
    /// Any setup failure, or a timer failure during the loop. No iterations
    /// run when setup fails.
    pub fn run(&mut self) -> Result<SoakReport, SoakError> {
        let ack_polls = self.setup()?;

        let config = self.config;
        log_info!(
            "I2C: Read data from address {} test ...",
            HexWord(config.memory_address)
        );

        let mut stats = SoakStats::default();
        for index in 0..config.iterations {
            let outcome = self.run_iteration(index)?;
            stats.record(&outcome);

            if config.verbose && (index + 1) % PROGRESS_INTERVAL == 0 {
                log_debug!(
                    "EEPROM: {}/{} iterations, {} failures",
                    index + 1,
                    config.iterations,
                    stats.total_failures()
                );
            }
        }

        let report = SoakReport { stats, ack_polls };
        report.log();
        Ok(report)
    }
}

/// Run a soak test and deliver the verdict
///
/// The reporter is notified exactly once: `true` only if setup succeeded and
/// every iteration matched. Returns the same verdict.
pub fn execute<I, T, R>(i2c: &mut I, timer: &mut T, reporter: &mut R, config: SoakConfig) -> bool
where
    I: I2cInterface,
    T: TimerInterface,
    R: CompletionReporter,
{
    let passed = match EepromSoakTest::new(i2c, timer, config).run() {
        Ok(report) => report.passed(),
        Err(e) => {
            if !e.logged_at_source() {
                log_error!("EEPROM: Test aborted: {}", e);
            }
            false
        }
    };
    reporter.notify_completion(passed);
    passed
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::platform::mock::{I2cTransaction, MockI2c, MockReporter, MockTimer};
    use crate::platform::traits::I2cConfig;
    use crate::platform::{I2cError, PlatformError, TimerError};
    use crate::soak::AckPollConfig;

    fn eeprom() -> MockI2c {
        MockI2c::new(I2cConfig::default()).with_write_cycle_polls(3)
    }

    fn config(iterations: u32) -> SoakConfig {
        SoakConfig {
            iterations,
            ..Default::default()
        }
    }

    fn count_no_stop_writes(transactions: &[I2cTransaction]) -> usize {
        transactions
            .iter()
            .filter(|t| matches!(t, I2cTransaction::WriteNoStop { .. }))
            .count()
    }

    #[test]
    fn test_setup_writes_marker_and_polls() {
        let mut i2c = eeprom();
        let mut timer = MockTimer::new();
        let polls = EepromSoakTest::new(&mut i2c, &mut timer, config(1))
            .setup()
            .unwrap();

        // Three NACKed probes, then the ACK
        assert_eq!(polls, 4);
        assert_eq!(i2c.frequency(), 400_000);
        assert_eq!(i2c.memory_at(0x0000), 0x66);
        assert_eq!(
            i2c.transactions()[0],
            I2cTransaction::Write {
                addr: 0x50,
                data: vec![0x00, 0x00, 0x66]
            }
        );
        assert!(i2c.transactions()[1..].iter().all(|t| t.is_probe()));
    }

    #[test]
    fn test_all_iterations_match() {
        let mut i2c = eeprom();
        let mut timer = MockTimer::new();
        let mut reporter = MockReporter::new();

        let report = EepromSoakTest::new(&mut i2c, &mut timer, SoakConfig::default())
            .run()
            .unwrap();

        assert_eq!(report.stats.iterations, 10_000);
        assert_eq!(report.stats.write_failures, 0);
        assert_eq!(report.stats.read_failures, 0);
        assert_eq!(report.stats.mismatches, 0);
        assert!(report.passed());

        let mut i2c = eeprom();
        let mut timer = MockTimer::new();
        assert!(execute(
            &mut i2c,
            &mut timer,
            &mut reporter,
            SoakConfig::default()
        ));
        assert_eq!(reporter.verdicts(), &[true]);
    }

    #[test]
    fn test_write_failure_skips_read() {
        let mut i2c = eeprom();
        let mut writes = 0u32;
        i2c.set_fault_hook(move |t| match t {
            I2cTransaction::WriteNoStop { .. } => {
                writes += 1;
                (writes == 500).then_some(I2cError::Nack)
            }
            _ => None,
        });
        let mut timer = MockTimer::new();
        let mut reporter = MockReporter::new();

        let report = EepromSoakTest::new(&mut i2c, &mut timer, SoakConfig::default())
            .run()
            .unwrap();

        assert_eq!(report.stats.write_failures, 1);
        assert_eq!(report.stats.read_failures, 0);
        assert_eq!(report.stats.mismatches, 0);
        assert!(!report.passed());

        // The failed (500th) address write is followed directly by the next one
        let transactions = i2c.transactions();
        let failed = transactions
            .iter()
            .enumerate()
            .filter(|(_, t)| matches!(t, I2cTransaction::WriteNoStop { .. }))
            .nth(499)
            .map(|(i, _)| i)
            .unwrap();
        assert!(matches!(
            transactions[failed + 1],
            I2cTransaction::WriteNoStop { .. }
        ));
        assert_eq!(count_no_stop_writes(transactions), 10_000);

        let mut i2c = eeprom();
        let mut writes = 0u32;
        i2c.set_fault_hook(move |t| match t {
            I2cTransaction::WriteNoStop { .. } => {
                writes += 1;
                (writes == 500).then_some(I2cError::Nack)
            }
            _ => None,
        });
        let mut timer = MockTimer::new();
        assert!(!execute(
            &mut i2c,
            &mut timer,
            &mut reporter,
            SoakConfig::default()
        ));
        assert_eq!(reporter.verdicts(), &[false]);
    }

    #[test]
    fn test_every_read_mismatches() {
        let mut i2c = eeprom();
        i2c.fill(0x00);
        i2c.set_write_protect(true);
        let mut timer = MockTimer::new();

        let report = EepromSoakTest::new(&mut i2c, &mut timer, SoakConfig::default())
            .run()
            .unwrap();

        assert_eq!(report.stats.mismatches, 10_000);
        assert_eq!(report.stats.write_failures, 0);
        assert_eq!(report.stats.read_failures, 0);
        assert_eq!(report.stats.total_failures(), 10_000);
        assert!(!report.passed());
    }

    #[test]
    fn test_setup_write_failure_aborts() {
        let mut i2c = eeprom();
        i2c.set_fault_hook(|t| match t {
            I2cTransaction::Write { data, .. } if data.len() == 3 => Some(I2cError::Status(0x02)),
            _ => None,
        });
        let mut timer = MockTimer::new();
        let mut reporter = MockReporter::new();

        let result = EepromSoakTest::new(&mut i2c, &mut timer, SoakConfig::default()).run();
        let error = result.unwrap_err();
        assert_eq!(
            error,
            SoakError::SetupWrite(PlatformError::I2c(I2cError::Status(0x02)))
        );
        assert_eq!(
            format!("{}", error),
            "Unable to write data to EEPROM (i2c_stat = 0x02)"
        );

        // Only the failed marker write reached the bus
        assert_eq!(i2c.transactions().len(), 1);
        assert_eq!(count_no_stop_writes(i2c.transactions()), 0);

        assert!(!execute(
            &mut i2c,
            &mut timer,
            &mut reporter,
            SoakConfig::default()
        ));
        assert_eq!(reporter.verdicts(), &[false]);
        assert_eq!(count_no_stop_writes(i2c.transactions()), 0);
    }

    #[test]
    fn test_read_failure_is_not_a_mismatch() {
        let mut i2c = eeprom();
        let mut reads = 0u32;
        i2c.set_fault_hook(move |t| match t {
            I2cTransaction::Read { .. } => {
                reads += 1;
                (reads % 4 == 0).then_some(I2cError::BusError)
            }
            _ => None,
        });
        let mut timer = MockTimer::new();

        let report = EepromSoakTest::new(&mut i2c, &mut timer, config(100))
            .run()
            .unwrap();

        assert_eq!(report.stats.read_failures, 25);
        assert_eq!(report.stats.mismatches, 0);
        assert_eq!(report.stats.write_failures, 0);
    }

    #[test]
    fn test_outcomes_are_exclusive_and_counters_monotonic() {
        let mut i2c = eeprom();
        let mut n = 0u32;
        i2c.set_fault_hook(move |t| {
            n += 1;
            match t {
                I2cTransaction::WriteNoStop { .. } if n % 7 == 0 => Some(I2cError::Nack),
                I2cTransaction::Read { .. } if n % 5 == 0 => Some(I2cError::Timeout),
                _ => None,
            }
        });
        i2c.set_read_data(&[0x66, 0x65, 0x66, 0x00]);
        let mut timer = MockTimer::new();
        let mut test = EepromSoakTest::new(&mut i2c, &mut timer, config(300));
        test.setup().unwrap();

        let mut stats = SoakStats::default();
        for index in 0..300 {
            let before = stats;
            let outcome = test.run_iteration(index).unwrap();
            stats.record(&outcome);

            let bumped = (stats.write_failures - before.write_failures)
                + (stats.read_failures - before.read_failures)
                + (stats.mismatches - before.mismatches);
            assert_eq!(bumped, outcome.is_failure() as u32);
            assert!(stats.total_failures() <= stats.iterations);
        }
        assert!(stats.write_failures > 0);
        assert!(stats.read_failures > 0);
    }

    #[test]
    fn test_delay_applied_only_after_successful_write() {
        let mut i2c = eeprom();
        let mut writes = 0u32;
        i2c.set_fault_hook(move |t| match t {
            I2cTransaction::WriteNoStop { .. } => {
                writes += 1;
                (writes % 10 == 0).then_some(I2cError::Nack)
            }
            _ => None,
        });
        let mut timer = MockTimer::new();
        let config = SoakConfig {
            iterations: 100,
            delay_us: 25,
            ..Default::default()
        };

        let report = EepromSoakTest::new(&mut i2c, &mut timer, config)
            .run()
            .unwrap();

        assert_eq!(report.stats.write_failures, 10);
        assert_eq!(timer.delay_calls(), 90);
        assert_eq!(timer.delayed_us(), 90 * 25);
    }

    #[test]
    fn test_no_delay_by_default() {
        let mut i2c = eeprom();
        let mut timer = MockTimer::new();
        EepromSoakTest::new(&mut i2c, &mut timer, config(50))
            .run()
            .unwrap();
        assert_eq!(timer.delay_calls(), 0);
    }

    #[test]
    fn test_ack_poll_attempt_budget() {
        let mut i2c = MockI2c::new(I2cConfig::default()).with_write_cycle_polls(u32::MAX);
        let mut timer = MockTimer::new();
        let config = SoakConfig {
            ack_poll: AckPollConfig {
                max_attempts: 20,
                ..Default::default()
            },
            ..Default::default()
        };

        let result = EepromSoakTest::new(&mut i2c, &mut timer, config).run();
        assert_eq!(
            result,
            Err(SoakError::WriteCycleTimeout {
                attempts: 20,
                elapsed_us: 0
            })
        );
        assert_eq!(count_no_stop_writes(i2c.transactions()), 0);
    }

    #[test]
    fn test_ack_poll_timeout() {
        let mut i2c = MockI2c::new(I2cConfig::default()).with_write_cycle_polls(u32::MAX);
        let mut timer = MockTimer::new().with_tick_per_read(100);

        let result = EepromSoakTest::new(&mut i2c, &mut timer, config(10)).setup();
        match result {
            Err(SoakError::WriteCycleTimeout {
                attempts,
                elapsed_us,
            }) => {
                assert!(elapsed_us >= 50_000);
                assert!(attempts < 10_000);
            }
            other => panic!("expected timeout, got {:?}", other),
        }
    }

    #[test]
    fn test_ack_poll_interval_uses_timer() {
        let mut i2c = eeprom();
        let mut timer = MockTimer::new();
        let config = SoakConfig {
            ack_poll: AckPollConfig {
                interval_us: 100,
                ..Default::default()
            },
            ..config(1)
        };

        let polls = EepromSoakTest::new(&mut i2c, &mut timer, config)
            .setup()
            .unwrap();
        assert_eq!(polls, 4);
        // A pause after each of the three NACKed probes
        assert_eq!(timer.delay_calls(), 3);
    }

    #[test]
    fn test_timer_failure_aborts_run() {
        let mut i2c = eeprom();
        let mut timer = MockTimer::new().fail_after(3);
        let config = SoakConfig {
            delay_us: 50,
            ..config(10)
        };

        let result = EepromSoakTest::new(&mut i2c, &mut timer, config).run();
        assert_eq!(
            result,
            Err(SoakError::Timer(PlatformError::Timer(TimerError::Overflow)))
        );
        // Three delayed iterations, then the fourth address write hits the failing delay
        assert_eq!(count_no_stop_writes(i2c.transactions()), 4);
        assert_eq!(timer.delay_calls(), 3);
    }

    #[test]
    fn test_timer_failure_reports_failure() {
        let mut i2c = eeprom();
        let mut timer = MockTimer::new().fail_after(0);
        let mut reporter = MockReporter::new();
        let config = SoakConfig {
            delay_us: 50,
            ..config(10)
        };

        assert!(!execute(&mut i2c, &mut timer, &mut reporter, config));
        assert_eq!(reporter.verdicts(), &[false]);
        assert_eq!(count_no_stop_writes(i2c.transactions()), 1);
    }

    #[test]
    fn test_timer_failure_during_ack_poll() {
        let mut i2c = eeprom();
        let mut timer = MockTimer::new().fail_after(1);
        let config = SoakConfig {
            ack_poll: AckPollConfig {
                interval_us: 100,
                ..Default::default()
            },
            ..config(1)
        };

        let result = EepromSoakTest::new(&mut i2c, &mut timer, config).setup();
        assert_eq!(
            result,
            Err(SoakError::Timer(PlatformError::Timer(TimerError::Overflow)))
        );
        assert_eq!(count_no_stop_writes(i2c.transactions()), 0);
    }

    #[test]
    fn test_verbose_run_passes() {
        let mut i2c = eeprom();
        let mut timer = MockTimer::new();
        let mut reporter = MockReporter::new();
        let config = SoakConfig {
            verbose: true,
            ..config(2 * PROGRESS_INTERVAL + 1)
        };

        assert!(execute(&mut i2c, &mut timer, &mut reporter, config));
        assert_eq!(reporter.verdicts(), &[true]);
        assert_eq!(
            count_no_stop_writes(i2c.transactions()),
            (2 * PROGRESS_INTERVAL + 1) as usize
        );
    }

    #[test]
    fn test_frequency_rejected() {
        let mut i2c = eeprom();
        let mut timer = MockTimer::new();
        let config = SoakConfig {
            frequency_hz: 0,
            ..config(1)
        };

        let result = EepromSoakTest::new(&mut i2c, &mut timer, config).run();
        assert_eq!(
            result,
            Err(SoakError::Frequency(PlatformError::InvalidConfig))
        );
        assert!(i2c.transactions().is_empty());
    }

    #[test]
    fn test_custom_address_and_marker() {
        let mut i2c = MockI2c::new(I2cConfig::default()).with_device_address(0x57);
        let mut timer = MockTimer::new();
        let config = SoakConfig {
            device_address: 0x57,
            memory_address: 0x1234,
            marker: 0xC3,
            iterations: 10,
            frequency_hz: 100_000,
            ..Default::default()
        };

        let report = EepromSoakTest::new(&mut i2c, &mut timer, config)
            .run()
            .unwrap();
        assert!(report.passed());
        assert_eq!(i2c.memory_at(0x1234), 0xC3);
        assert_eq!(i2c.frequency(), 100_000);
        assert_eq!(
            i2c.transactions().last(),
            Some(&I2cTransaction::Read { addr: 0x57, len: 1 })
        );
    }

    #[test]
    fn test_wrong_device_counts_write_failures() {
        // Marker lands, then the device drops off the bus
        let mut i2c = eeprom();
        let mut timer = MockTimer::new();
        let mut test = EepromSoakTest::new(&mut i2c, &mut timer, config(5));
        test.setup().unwrap();
        drop(test);

        i2c.set_fault_hook(|_| Some(I2cError::Nack));
        let mut test = EepromSoakTest::new(&mut i2c, &mut timer, config(5));
        for index in 0..5 {
            assert_eq!(
                test.run_iteration(index).unwrap(),
                IterationOutcome::WriteFailed(PlatformError::I2c(I2cError::Nack))
            );
        }
    }
}
