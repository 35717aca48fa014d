//! I2C EEPROM soak test
//!
//! Writes a marker byte once, then reads it back many times through the
//! address-set/read sequence that exposes bus driver timing faults, and
//! classifies every iteration as a write failure, read failure, data
//! mismatch, or match.

pub mod config;
pub mod error;
pub mod runner;
pub mod stats;

pub use config::{AckPollConfig, ConfigError, SoakConfig};
pub use error::SoakError;
pub use runner::{execute, EepromSoakTest, SoakReport, PROGRESS_INTERVAL};
pub use stats::{IterationOutcome, SoakStats};
