//! Typed configuration system for Meridian.
//!
//! This crate provides a strongly-typed configuration system with support for:
//! - TOML and JSON configuration files
//! - Environment variable overrides
//! - Strict validation (fails on unknown fields)
//! - Layered configuration (defaults → file → env)
//!
//! # Overview
//!
//! The configuration system is built around the [`MeridianConfig`] struct:
//!
//! - [`NavigationConfig`] - Sidebar ordering, root id, models visibility
//! - [`ServersConfig`] - Base server URL and fallback origin
//! - [`TelemetryConfig`] - Logging settings
//!
//! # Example
//!
//! ```no_run
//! use meridian_config::ConfigLoader;
//!
//! # fn main() -> Result<(), meridian_config::ConfigError> {
//! let config = ConfigLoader::new()
//!     .with_defaults()
//!     .with_optional_file("meridian.toml")?
//!     .with_env_prefix("MERIDIAN")
//!     .load()?;
//!
//! println!("Tag ordering: {}", config.navigation.tags_sorter);
//! # Ok(())
//! # }
//! ```
//!
//! # Configuration File Format
//!
//! ```toml
//! [navigation]
//! document_id = "petstore"
//! tags_sorter = "alpha"
//! operations_sorter = "method"
//! hide_models = false
//!
//! [servers]
//! base_server_url = "https://docs.example.com"
//! default_origin = "http://localhost:3000"
//!
//! [telemetry]
//! service_name = "meridian"
//!
//! [telemetry.logging]
//! level = "info"
//! format = "json"
//! ```
//!
//! # Environment Variable Overrides
//!
//! Values can be overridden via environment variables using the format
//! `PREFIX__SECTION__KEY`. For example:
//!
//! - `MERIDIAN__NAVIGATION__TAGS_SORTER=alpha`
//! - `MERIDIAN__SERVERS__BASE_SERVER_URL=https://docs.example.com`
//! - `MERIDIAN__TELEMETRY__LOGGING__LEVEL=debug`

#![doc(html_root_url = "https://docs.rs/meridian-config/0.1.0")]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod config;
mod error;
mod loader;
mod schema;

pub use config::*;
pub use error::ConfigError;
pub use loader::ConfigLoader;
pub use schema::*;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = MeridianConfig::default();
        assert_eq!(config.navigation.tags_sorter, "none");
        assert!(config.servers.base_server_url.is_none());
        assert_eq!(config.telemetry.logging.level, "info");
    }

    #[test]
    fn test_config_builder() {
        let config = MeridianConfig::builder()
            .telemetry(TelemetryConfig {
                service_name: "docs-portal".to_string(),
                ..Default::default()
            })
            .build();

        assert_eq!(config.telemetry.service_name, "docs-portal");
    }
}
