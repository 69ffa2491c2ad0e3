//! # Meridian Telemetry
//!
//! Structured logging setup for Meridian hosts.
//!
//! The resolution crates emit `tracing` events (which security tier matched,
//! servers dropped for being malformed). This crate installs the subscriber
//! that renders them, as JSON for production or pretty output for local use.
//!
//! # Example
//!
//! ```rust,ignore
//! use meridian_config::ConfigLoader;
//!
//! let config = ConfigLoader::new().with_env_prefix("MERIDIAN").load()?;
//! meridian_telemetry::init_from_config(&config.telemetry)?;
//! ```

#![doc(html_root_url = "https://docs.rs/meridian-telemetry/0.1.0")]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

pub mod error;
pub mod logging;

pub use error::TelemetryError;
pub use logging::{create_env_filter, fields, init_logging, LogConfig};

use meridian_config::TelemetryConfig;

/// Result type for telemetry operations.
pub type TelemetryResult<T> = Result<T, TelemetryError>;

/// Initializes logging from the `[telemetry]` configuration section.
///
/// # Errors
///
/// Returns `TelemetryError` if the filter is invalid or a subscriber is
/// already installed.
pub fn init_from_config(config: &TelemetryConfig) -> TelemetryResult<()> {
    init_logging(&LogConfig::from(config))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init_from_disabled_config() {
        let mut config = TelemetryConfig::default();
        config.logging.enabled = false;
        assert!(init_from_config(&config).is_ok());
    }
}
