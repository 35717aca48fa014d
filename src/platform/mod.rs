//! Platform abstraction layer
//!
//! This module provides hardware abstraction for the bus, timer and
//! completion reporting the soak test depends on. All platform-specific code
//! is isolated here.

pub mod error;
pub mod traits;

// Platform implementations (feature-gated)
#[cfg(feature = "pico2_w")]
pub mod rp2350;

#[cfg(any(test, feature = "mock"))]
pub mod mock;

// Re-export commonly used types
pub use error::{I2cError, PlatformError, Result, StatusCode, TimerError};
pub use traits::{CompletionReporter, I2cInterface, TimerInterface};
