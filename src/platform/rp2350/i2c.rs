//! RP2350 I2C implementation
//!
//! Blocking I2C master over Embassy's `embassy-rp` crate.
//!
//! # Controller limitations
//!
//! The RP2350 I2C block cannot issue an address-only transaction, and the
//! Embassy driver always finishes a write with STOP unless it is part of
//! `write_read`. The adapter therefore:
//! - issues zero-length writes (ACK polling) as a one-byte read probe, which
//!   a busy EEPROM NACKs the same way
//! - issues `write_no_stop` as a complete write; serial EEPROMs keep the
//!   address pointer across the STOP, so the following read still returns the
//!   byte at that address
//!
//! # Example
//!
//! ```no_run
//! use embassy_rp::i2c::{Config as EmbassyI2cConfig, I2c};
//! use i2c_eeprom_soak::platform::{rp2350::Rp2350I2c, traits::{I2cConfig, I2cInterface}};
//!
//! let p = embassy_rp::init(Default::default());
//!
//! // I2C0 on GPIO 4 (SDA) and GPIO 5 (SCL), reconfigured to 400 kHz afterwards
//! let i2c = I2c::new_blocking(p.I2C0, p.PIN_5, p.PIN_4, EmbassyI2cConfig::default());
//! let mut i2c = Rp2350I2c::new(i2c, I2cConfig::default());
//! i2c.set_frequency(400_000).unwrap();
//!
//! let mut buffer = [0u8; 1];
//! i2c.write_read(0x50, &[0x00, 0x00], &mut buffer).unwrap();
//! ```

use crate::platform::{
    error::{I2cError, PlatformError},
    traits::{I2cConfig, I2cInterface},
    Result,
};
use embassy_embedded_hal::SetConfig;
use embassy_rp::i2c::{Blocking, Config as EmbassyI2cConfig, I2c as EmbassyI2c, Instance};
use embedded_hal::i2c::I2c as BlockingI2c;

/// Highest bus frequency the controller supports (Fast-mode Plus)
const MAX_FREQUENCY_HZ: u32 = 1_000_000;

/// RP2350 I2C implementation using the Embassy blocking driver
///
/// # Type Parameters
///
/// * `T` - I2C peripheral instance (I2C0 or I2C1)
pub struct Rp2350I2c<'d, T: Instance> {
    i2c: EmbassyI2c<'d, T, Blocking>,
    config: I2cConfig,
}

impl<'d, T: Instance> Rp2350I2c<'d, T> {
    /// Create a new RP2350 I2C instance
    ///
    /// # Arguments
    ///
    /// * `i2c` - The Embassy I2C peripheral (configured via `I2c::new_blocking`)
    /// * `config` - I2C configuration; `frequency` should match the one the
    ///   peripheral was created with (`I2cConfig::default()` for the Embassy
    ///   default config)
    pub fn new(i2c: EmbassyI2c<'d, T, Blocking>, config: I2cConfig) -> Self {
        Self { i2c, config }
    }

    /// Currently configured bus frequency
    pub fn frequency(&self) -> u32 {
        self.config.frequency
    }
}

impl<'d, T: Instance> I2cInterface for Rp2350I2c<'d, T> {
    fn write(&mut self, addr: u8, data: &[u8]) -> Result<()> {
        if data.is_empty() {
            let mut probe = [0u8; 1];
            return BlockingI2c::read(&mut self.i2c, addr, &mut probe).map_err(map_embassy_error);
        }
        BlockingI2c::write(&mut self.i2c, addr, data).map_err(map_embassy_error)
    }

    fn read(&mut self, addr: u8, buffer: &mut [u8]) -> Result<()> {
        BlockingI2c::read(&mut self.i2c, addr, buffer).map_err(map_embassy_error)
    }

    fn write_read(&mut self, addr: u8, write_data: &[u8], read_buffer: &mut [u8]) -> Result<()> {
        BlockingI2c::write_read(&mut self.i2c, addr, write_data, read_buffer)
            .map_err(map_embassy_error)
    }

    fn set_frequency(&mut self, frequency: u32) -> Result<()> {
        if frequency == 0 || frequency > MAX_FREQUENCY_HZ {
            return Err(PlatformError::InvalidConfig);
        }

        let mut embassy_config = EmbassyI2cConfig::default();
        embassy_config.frequency = frequency;
        SetConfig::set_config(&mut self.i2c, &embassy_config)
            .map_err(|_| PlatformError::InvalidConfig)?;

        self.config.frequency = frequency;
        Ok(())
    }
}

/// Map Embassy I2C errors to platform I2C errors
#[allow(deprecated)]
fn map_embassy_error(error: embassy_rp::i2c::Error) -> PlatformError {
    use embassy_rp::i2c::{AbortReason, Error};

    match error {
        Error::Abort(abort_reason) => match abort_reason {
            AbortReason::NoAcknowledge => PlatformError::I2c(I2cError::Nack),
            AbortReason::ArbitrationLoss => PlatformError::I2c(I2cError::ArbitrationLost),
            _ => PlatformError::I2c(I2cError::BusError),
        },
        Error::InvalidReadBufferLength | Error::InvalidWriteBufferLength => {
            PlatformError::I2c(I2cError::BusError)
        }
        Error::AddressOutOfRange(_) | Error::AddressReserved(_) => {
            PlatformError::I2c(I2cError::InvalidAddress)
        }
    }
}
