//! Platform error types
//!
//! This module defines error types for platform operations.

use crate::core::HexByte;
use core::fmt;

/// Result type for platform operations
pub type Result<T> = core::result::Result<T, PlatformError>;

/// Platform-level errors
///
/// All platform implementations map their HAL-specific errors to these variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "pico2_w", derive(defmt::Format))]
pub enum PlatformError {
    /// I2C operation failed
    I2c(I2cError),
    /// Timer operation failed
    Timer(TimerError),
    /// Invalid configuration provided
    InvalidConfig,
}

impl PlatformError {
    /// One-byte status code for diagnostics output
    ///
    /// I2C errors use [`I2cError::status_code`]; other platform failures
    /// share the generic code `0xFF`. Never zero.
    pub fn status_code(&self) -> StatusCode {
        match self {
            PlatformError::I2c(e) => e.status_code(),
            _ => StatusCode(0xFF),
        }
    }
}

/// I2C-specific errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "pico2_w", derive(defmt::Format))]
pub enum I2cError {
    /// Bus error occurred
    BusError,
    /// No acknowledgment received
    Nack,
    /// Arbitration lost
    ArbitrationLost,
    /// Timeout occurred
    Timeout,
    /// Invalid address
    InvalidAddress,
    /// Driver-specific status code with no finer classification
    Status(u8),
}

impl I2cError {
    /// Status code reported for this error
    ///
    /// `Status(code)` passes the driver's code through unchanged; a zero
    /// driver code is reported as `0xFF` so that a failure never reads as
    /// success.
    pub fn status_code(&self) -> StatusCode {
        let code = match self {
            I2cError::BusError => 0x01,
            I2cError::Nack => 0x02,
            I2cError::ArbitrationLost => 0x03,
            I2cError::Timeout => 0x04,
            I2cError::InvalidAddress => 0x05,
            I2cError::Status(0) => 0xFF,
            I2cError::Status(code) => *code,
        };
        StatusCode(code)
    }
}

/// Timer-specific errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "pico2_w", derive(defmt::Format))]
pub enum TimerError {
    /// Timer overflow
    Overflow,
    /// Invalid duration
    InvalidDuration,
}

/// Nonzero bus transaction status, rendered as `0xNN`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatusCode(pub u8);

impl fmt::Display for StatusCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", HexByte(self.0))
    }
}

#[cfg(feature = "pico2_w")]
impl defmt::Format for StatusCode {
    fn format(&self, f: defmt::Formatter) {
        defmt::write!(f, "{}", HexByte(self.0))
    }
}

impl fmt::Display for PlatformError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PlatformError::I2c(e) => write!(f, "I2C error: {:?} ({})", e, e.status_code()),
            PlatformError::Timer(e) => write!(f, "Timer error: {:?}", e),
            PlatformError::InvalidConfig => write!(f, "Invalid configuration"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_code_formatting() {
        assert_eq!(format!("{}", StatusCode(0x02)), "0x02");
        assert_eq!(format!("{}", StatusCode(0xAB)), "0xAB");
    }

    #[test]
    fn test_i2c_status_codes_are_nonzero() {
        let errors = [
            I2cError::BusError,
            I2cError::Nack,
            I2cError::ArbitrationLost,
            I2cError::Timeout,
            I2cError::InvalidAddress,
            I2cError::Status(0),
            I2cError::Status(0x42),
        ];
        for e in errors {
            assert_ne!(e.status_code().0, 0, "{:?}", e);
        }
    }

    #[test]
    fn test_opaque_status_passes_through() {
        assert_eq!(I2cError::Status(0x42).status_code(), StatusCode(0x42));
        assert_eq!(
            PlatformError::I2c(I2cError::Nack).status_code(),
            StatusCode(0x02)
        );
        assert_eq!(PlatformError::InvalidConfig.status_code(), StatusCode(0xFF));
    }

    #[test]
    fn test_platform_error_display() {
        let e = PlatformError::I2c(I2cError::Nack);
        assert_eq!(format!("{}", e), "I2C error: Nack (0x02)");
    }
}
