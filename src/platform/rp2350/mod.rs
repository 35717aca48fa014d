//! RP2350 platform implementation for Raspberry Pi Pico 2 W
//!
//! This module provides concrete implementations of the platform abstraction
//! traits for the RP2350 microcontroller using the `embassy-rp` crate.
//!
//! # Feature Gate
//!
//! This module is only available when the `pico2_w` feature is enabled:
//!
//! ```toml
//! [dependencies]
//! i2c_eeprom_soak = { version = "0.1", features = ["pico2_w"] }
//! ```

mod completion;
mod i2c;
mod timer;

pub use completion::DefmtReporter;
pub use i2c::Rp2350I2c;
pub use timer::Rp2350Timer;
