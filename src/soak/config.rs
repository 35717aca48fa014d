//! Soak test configuration
//!
//! Defaults reproduce the classic 24LC256 soak: marker `0x66` at address
//! `0x0000`, 10000 iterations at 400 kHz with no write-to-read delay.
//! Build-time overrides are captured by `build.rs`:
//! - `EEPROM_SOAK_ITERATIONS` - number of verification iterations
//! - `EEPROM_SOAK_FREQ_HZ` - bus frequency in Hz
//! - `EEPROM_SOAK_DELAY_US` - delay between address write and read (0 disables)
//! - `EEPROM_SOAK_VERBOSE` - extra diagnostics (true/false)
//! - `EEPROM_SOAK_BOARD` - board identifier for the I2C pin table

use crate::platform::traits::board::{find_board, BoardI2cPins, PinError};
use core::fmt;

/// 7-bit address of a 24LCxx EEPROM with A2..A0 tied low (`0xA0` in 8-bit form)
pub const DEFAULT_DEVICE_ADDRESS: u8 = 0x50;
/// Memory address the marker is written to
pub const DEFAULT_MEMORY_ADDRESS: u16 = 0x0000;
/// Marker byte written once and read back on every iteration
pub const DEFAULT_MARKER: u8 = 0x66;
/// Number of verification iterations
pub const DEFAULT_ITERATIONS: u32 = 10_000;
/// Bus frequency (Fast-mode)
pub const DEFAULT_FREQUENCY_HZ: u32 = 400_000;
/// Delay between the address write and the read; 0 disables it
pub const DEFAULT_DELAY_US: u32 = 0;
/// Highest bus frequency accepted (Fast-mode Plus)
pub const MAX_FREQUENCY_HZ: u32 = 1_000_000;
/// Lowest bus frequency accepted
///
/// The RP2350 SCL low-count register is 16 bits wide; at a 150 MHz
/// peripheral clock anything below ~1.4 kHz cannot be programmed.
pub const MIN_FREQUENCY_HZ: u32 = 10_000;

/// Bounds for ACK polling after the marker write
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "pico2_w", derive(defmt::Format))]
pub struct AckPollConfig {
    /// Maximum number of address probes (at least one probe is always made)
    pub max_attempts: u32,
    /// Give up once this much time has passed since the first probe
    pub timeout_us: u64,
    /// Pause between probes; 0 polls back to back
    pub interval_us: u32,
}

impl Default for AckPollConfig {
    fn default() -> Self {
        // 24LC256 write cycle is 5 ms max; allow ten times that
        Self {
            max_attempts: 10_000,
            timeout_us: 50_000,
            interval_us: 0,
        }
    }
}

/// Complete configuration of one soak run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "pico2_w", derive(defmt::Format))]
pub struct SoakConfig {
    /// 7-bit device address
    pub device_address: u8,
    /// Memory address under test (sent big-endian)
    pub memory_address: u16,
    /// Expected byte
    pub marker: u8,
    /// Number of verification iterations
    pub iterations: u32,
    /// Bus frequency in Hz
    pub frequency_hz: u32,
    /// Delay between address write and read in microseconds
    pub delay_us: u32,
    /// Extra diagnostics (per-iteration and progress lines)
    pub verbose: bool,
    /// Board identifier for the I2C pin table (empty selects the default)
    pub board: &'static str,
    /// ACK polling bounds
    pub ack_poll: AckPollConfig,
}

impl Default for SoakConfig {
    fn default() -> Self {
        Self {
            device_address: DEFAULT_DEVICE_ADDRESS,
            memory_address: DEFAULT_MEMORY_ADDRESS,
            marker: DEFAULT_MARKER,
            iterations: DEFAULT_ITERATIONS,
            frequency_hz: DEFAULT_FREQUENCY_HZ,
            delay_us: DEFAULT_DELAY_US,
            verbose: false,
            board: "",
            ack_poll: AckPollConfig::default(),
        }
    }
}

/// Configuration errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "pico2_w", derive(defmt::Format))]
pub enum ConfigError {
    /// Not a usable 7-bit address (8-bit form or reserved range)
    InvalidDeviceAddress(u8),
    /// At least one iteration is required
    ZeroIterations,
    /// Frequency is outside 10 kHz..=1 MHz
    InvalidFrequency(u32),
    /// Board lookup or pin validation failed
    Board(PinError),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidDeviceAddress(addr) => {
                write!(f, "Invalid 7-bit device address: {:#04x}", addr)
            }
            ConfigError::ZeroIterations => write!(f, "Iteration count must be nonzero"),
            ConfigError::InvalidFrequency(hz) => write!(f, "Invalid bus frequency: {} Hz", hz),
            ConfigError::Board(e) => write!(f, "Board pin configuration error: {:?}", e),
        }
    }
}

impl SoakConfig {
    /// Defaults with build-time environment overrides applied
    pub fn from_build_env() -> Self {
        Self::default().with_overrides(
            env!("EEPROM_SOAK_ITERATIONS"),
            env!("EEPROM_SOAK_FREQ_HZ"),
            env!("EEPROM_SOAK_DELAY_US"),
            env!("EEPROM_SOAK_VERBOSE"),
            env!("EEPROM_SOAK_BOARD"),
        )
    }

    /// Apply textual overrides
    ///
    /// Empty or unparsable values keep the current setting.
    pub fn with_overrides(
        mut self,
        iterations: &str,
        frequency_hz: &str,
        delay_us: &str,
        verbose: &str,
        board: &'static str,
    ) -> Self {
        if let Ok(value) = iterations.trim().parse::<u32>() {
            self.iterations = value;
        }
        if let Ok(value) = frequency_hz.trim().parse::<u32>() {
            self.frequency_hz = value;
        }
        if let Ok(value) = delay_us.trim().parse::<u32>() {
            self.delay_us = value;
        }
        if let Some(value) = parse_flag(verbose) {
            self.verbose = value;
        }
        let board = board.trim();
        if !board.is_empty() {
            self.board = board;
        }
        self
    }

    /// 8-bit (write) form of the device address, as on the wire
    pub fn device_address_8bit(&self) -> u8 {
        self.device_address << 1
    }

    /// Pin assignment for the configured board
    pub fn board_pins(&self) -> Result<&'static BoardI2cPins, ConfigError> {
        let pins = find_board(self.board).map_err(ConfigError::Board)?;
        pins.validate().map_err(ConfigError::Board)?;
        Ok(pins)
    }

    /// Check the configuration before touching the bus
    ///
    /// # Errors
    ///
    /// - `InvalidDeviceAddress` for addresses above 0x7F or in the reserved
    ///   ranges 0x00..=0x07 and 0x78..=0x7F
    /// - `ZeroIterations` if no iterations are requested
    /// - `InvalidFrequency` outside `MIN_FREQUENCY_HZ..=MAX_FREQUENCY_HZ`
    /// - `Board` if the board is unknown or its pins are invalid
    ///
    /// Returns the validated pin assignment of the configured board.
    pub fn validate(&self) -> Result<&'static BoardI2cPins, ConfigError> {
        if !(0x08..=0x77).contains(&self.device_address) {
            return Err(ConfigError::InvalidDeviceAddress(self.device_address));
        }
        if self.iterations == 0 {
            return Err(ConfigError::ZeroIterations);
        }
        if !(MIN_FREQUENCY_HZ..=MAX_FREQUENCY_HZ).contains(&self.frequency_hz) {
            return Err(ConfigError::InvalidFrequency(self.frequency_hz));
        }
        self.board_pins()
    }
}

fn parse_flag(value: &str) -> Option<bool> {
    let value = value.trim();
    let truthy = ["1", "true", "yes", "on"];
    let falsy = ["0", "false", "no", "off"];
    if truthy.iter().any(|t| value.eq_ignore_ascii_case(t)) {
        Some(true)
    } else if falsy.iter().any(|f| value.eq_ignore_ascii_case(f)) {
        Some(false)
    } else {
        None
    }
}
