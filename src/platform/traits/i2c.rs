//! I2C interface trait
//!
//! This module defines the I2C bus master interface the soak test drives.

use crate::platform::Result;

/// I2C configuration
#[derive(Debug, Clone, Copy)]
pub struct I2cConfig {
    /// Bus frequency in Hz (typically 100_000 or 400_000)
    pub frequency: u32,
}

impl Default for I2cConfig {
    fn default() -> Self {
        Self {
            frequency: 100_000, // 100 kHz standard mode
        }
    }
}

/// I2C bus master interface
///
/// Every method blocks until the transaction has finished on the bus.
///
/// # Safety Invariants
///
/// - I2C peripheral must be initialized before use
/// - Only one owner per I2C bus instance
/// - Address must be 7-bit (valid range: 0x00..=0x7F)
pub trait I2cInterface {
    /// Write data to I2C device
    ///
    /// Performs a complete I2C write transaction:
    /// START - ADDR(W) - DATA - STOP
    ///
    /// An empty `data` slice is an address probe: it succeeds only if the
    /// device acknowledges its address. EEPROMs use this for ACK polling.
    ///
    /// # Errors
    ///
    /// Returns `PlatformError::I2c` if:
    /// - Device does not acknowledge (NACK)
    /// - Bus error occurs
    /// - Timeout expires
    fn write(&mut self, addr: u8, data: &[u8]) -> Result<()>;

    /// Write data without releasing the bus
    ///
    /// START - ADDR(W) - DATA, with no STOP, so that the next `read` is issued
    /// as a repeated START. Drivers whose controller cannot hold the bus
    /// between calls fall back to a complete `write`; devices with an address
    /// pointer (EEPROMs) keep it across the STOP.
    fn write_no_stop(&mut self, addr: u8, data: &[u8]) -> Result<()> {
        self.write(addr, data)
    }

    /// Read data from I2C device
    ///
    /// Performs a complete I2C read transaction:
    /// START - ADDR(R) - DATA - STOP
    ///
    /// # Errors
    ///
    /// Returns `PlatformError::I2c` if:
    /// - Device does not acknowledge (NACK)
    /// - Bus error occurs
    /// - Timeout expires
    fn read(&mut self, addr: u8, buffer: &mut [u8]) -> Result<()>;

    /// Write then read from I2C device
    ///
    /// Performs a combined write-read transaction with a repeated START:
    /// START - ADDR(W) - WRITE_DATA - REPEATED_START - ADDR(R) - READ_DATA - STOP
    fn write_read(&mut self, addr: u8, write_data: &[u8], read_buffer: &mut [u8]) -> Result<()>;

    /// Set I2C bus frequency
    ///
    /// # Errors
    ///
    /// Returns `PlatformError::I2c` or `PlatformError::InvalidConfig` if the
    /// frequency cannot be achieved with the current clock configuration.
    fn set_frequency(&mut self, frequency: u32) -> Result<()>;
}
