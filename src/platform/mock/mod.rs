//! Mock platform implementation for testing
//!
//! This module provides mock implementations of platform traits that can be used
//! for unit testing without requiring actual hardware.
//!
//! # Feature Gate
//!
//! This module is available in two contexts:
//! - During test builds (`#[cfg(test)]`)
//! - When the `mock` feature is enabled
//!
//! # Example
//!
//! ```ignore
//! use i2c_eeprom_soak::platform::mock::MockI2c;
//! use i2c_eeprom_soak::platform::traits::{I2cConfig, I2cInterface};
//!
//! let mut i2c = MockI2c::new(I2cConfig::default());
//! i2c.write(0x50, &[0x00, 0x00, 0x66]).unwrap();
//! assert_eq!(i2c.memory_at(0x0000), 0x66);
//! ```

#![cfg(any(test, feature = "mock"))]

mod completion;
mod i2c;
mod timer;

pub use completion::MockReporter;
pub use i2c::{FaultHook, I2cTransaction, MockI2c, DEFAULT_EEPROM_ADDR, EEPROM_CAPACITY};
pub use timer::MockTimer;
