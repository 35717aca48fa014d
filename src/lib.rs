#![cfg_attr(not(test), no_std)]

//! i2c_eeprom_soak - I2C EEPROM soak test for Raspberry Pi Pico 2 W
//!
//! Writes a marker byte to an external serial EEPROM once, then reads it back
//! thousands of times and counts write failures, read failures and data
//! mismatches. Used to reproduce intermittent I2C driver faults at a given bus
//! frequency and write-to-read delay.

// The mock platform needs std outside of test builds too
#[cfg(all(not(test), feature = "mock"))]
extern crate std;

// Core infrastructure (logging macros, hex rendering)
pub mod core;

// Platform abstraction layer: bus, timer, completion reporting, board pins
pub mod platform;

// The soak test procedure
pub mod soak;
