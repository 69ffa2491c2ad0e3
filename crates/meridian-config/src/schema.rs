//! Configuration schema types.
//!
//! This module defines the structure of all configuration sections.

use serde::{Deserialize, Serialize};

/// Tag sorter names accepted in `navigation.tags_sorter`.
pub const TAG_SORTERS: &[&str] = &["none", "alpha"];

/// Operation sorter names accepted in `navigation.operations_sorter`.
pub const OPERATION_SORTERS: &[&str] = &["none", "alpha", "method"];

/// Navigation configuration section.
///
/// Controls how the sidebar tree is built from a document.
///
/// # Example
///
/// ```
/// use meridian_config::NavigationConfig;
///
/// let config = NavigationConfig {
///     tags_sorter: "alpha".to_string(),
///     ..Default::default()
/// };
/// assert_eq!(config.operations_sorter, "none");
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct NavigationConfig {
    /// Id given to the root of the traversed tree.
    #[serde(default = "default_document_id")]
    pub document_id: String,

    /// Tag ordering (`none` or `alpha`).
    #[serde(default = "default_sorter")]
    pub tags_sorter: String,

    /// Operation ordering within a tag (`none`, `alpha` or `method`).
    #[serde(default = "default_sorter")]
    pub operations_sorter: String,

    /// Leave the models section out of the tree.
    #[serde(default)]
    pub hide_models: bool,
}

impl Default for NavigationConfig {
    fn default() -> Self {
        Self {
            document_id: default_document_id(),
            tags_sorter: default_sorter(),
            operations_sorter: default_sorter(),
            hide_models: false,
        }
    }
}

fn default_document_id() -> String {
    "document".to_string()
}

fn default_sorter() -> String {
    "none".to_string()
}

/// Server resolution configuration section.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(deny_unknown_fields)]
pub struct ServersConfig {
    /// Base URL that relative server URLs are combined with. Takes
    /// precedence over the document URL.
    #[serde(default)]
    pub base_server_url: Option<String>,

    /// Origin used when neither a base URL nor a document URL is known.
    /// Hosts without an ambient page origin set this.
    #[serde(default)]
    pub default_origin: Option<String>,
}

/// Log format.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// JSON formatted logs (production).
    #[default]
    Json,
    /// Human-readable pretty format (development).
    Pretty,
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct LoggingConfig {
    /// Enable logging.
    #[serde(default = "default_true")]
    pub enabled: bool,

    /// Log level (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Log output format.
    #[serde(default)]
    pub format: LogFormat,

    /// Include ANSI color codes in output.
    #[serde(default)]
    pub ansi_enabled: bool,

    /// Include source file and line in logs.
    #[serde(default)]
    pub include_location: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            level: default_log_level(),
            format: LogFormat::default(),
            ansi_enabled: false,
            include_location: false,
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_true() -> bool {
    true
}

/// Telemetry configuration section.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct TelemetryConfig {
    /// Service name attached to log output.
    #[serde(default = "default_service_name")]
    pub service_name: String,

    /// Logging configuration.
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Default for TelemetryConfig {
    fn default() -> Self {
        Self {
            service_name: default_service_name(),
            logging: LoggingConfig::default(),
        }
    }
}

fn default_service_name() -> String {
    "meridian".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_navigation_config_default() {
        let config = NavigationConfig::default();
        assert_eq!(config.document_id, "document");
        assert_eq!(config.tags_sorter, "none");
        assert_eq!(config.operations_sorter, "none");
        assert!(!config.hide_models);
    }

    #[test]
    fn test_navigation_config_partial_toml() {
        let config: NavigationConfig = toml::from_str(r#"tags_sorter = "alpha""#).unwrap();
        assert_eq!(config.tags_sorter, "alpha");
        assert_eq!(config.document_id, "document");
    }

    #[test]
    fn test_navigation_config_rejects_unknown_field() {
        let result = toml::from_str::<NavigationConfig>("sort_tags = true");
        assert!(result.is_err());
    }

    #[test]
    fn test_servers_config_default() {
        let config = ServersConfig::default();
        assert!(config.base_server_url.is_none());
        assert!(config.default_origin.is_none());
    }

    #[test]
    fn test_logging_config_default() {
        let config = LoggingConfig::default();
        assert!(config.enabled);
        assert_eq!(config.level, "info");
        assert_eq!(config.format, LogFormat::Json);
    }

    #[test]
    fn test_log_format_serde() {
        let format: LogFormat = serde_json::from_str(r#""json""#).unwrap();
        assert_eq!(format, LogFormat::Json);

        let format: LogFormat = serde_json::from_str(r#""pretty""#).unwrap();
        assert_eq!(format, LogFormat::Pretty);
    }

    #[test]
    fn test_telemetry_config_default() {
        let config = TelemetryConfig::default();
        assert_eq!(config.service_name, "meridian");
        assert_eq!(config.logging, LoggingConfig::default());
    }

    #[test]
    fn test_sorter_names() {
        assert!(TAG_SORTERS.contains(&"alpha"));
        assert!(!TAG_SORTERS.contains(&"method"));
        assert!(OPERATION_SORTERS.contains(&"method"));
    }
}
