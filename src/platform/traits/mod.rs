//! Platform abstraction traits
//!
//! This module defines the traits that platform implementations must provide.

pub mod board;
pub mod completion;
pub mod i2c;
pub mod timer;

// Re-export trait interfaces
pub use board::{find_board, BoardI2cPins, PinError, I2C_BOARDS};
pub use completion::CompletionReporter;
pub use i2c::{I2cConfig, I2cInterface};
pub use timer::TimerInterface;
