//! Core infrastructure shared by the platform layer and the soak test
//!
//! Logging macros (`log_info!`, `log_warn!`, `log_error!`, `log_debug!`) are
//! exported at the crate root via `#[macro_export]` in [`logging`].

pub mod hex;
pub mod logging;

pub use hex::{HexByte, HexWord};
