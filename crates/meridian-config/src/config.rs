//! Main configuration types.
//!
//! This module provides the top-level [`MeridianConfig`] struct and its builder.

use serde::{Deserialize, Serialize};
use url::Url;

use crate::{
    ConfigError, NavigationConfig, ServersConfig, TelemetryConfig, OPERATION_SORTERS, TAG_SORTERS,
};

/// Complete Meridian configuration.
///
/// This is the root configuration type that contains all configuration sections.
/// Use [`ConfigLoader`](crate::ConfigLoader) to load configuration from files
/// and environment variables.
///
/// # Example
///
/// ```
/// use meridian_config::MeridianConfig;
///
/// let config = MeridianConfig::default();
/// assert_eq!(config.navigation.tags_sorter, "none");
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(deny_unknown_fields)]
pub struct MeridianConfig {
    /// Sidebar and tree construction.
    #[serde(default)]
    pub navigation: NavigationConfig,

    /// Server URL resolution.
    #[serde(default)]
    pub servers: ServersConfig,

    /// Telemetry configuration (logging).
    #[serde(default)]
    pub telemetry: TelemetryConfig,
}

impl MeridianConfig {
    /// Create a new configuration builder.
    ///
    /// # Example
    ///
    /// ```
    /// use meridian_config::{MeridianConfig, ServersConfig};
    ///
    /// let config = MeridianConfig::builder()
    ///     .servers(ServersConfig {
    ///         base_server_url: Some("https://docs.example.com".to_string()),
    ///         ..Default::default()
    ///     })
    ///     .build();
    ///
    /// assert!(config.servers.base_server_url.is_some());
    /// ```
    #[must_use]
    pub fn builder() -> MeridianConfigBuilder {
        MeridianConfigBuilder::new()
    }

    /// Validate the configuration.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidValue` if:
    /// - The document id is empty
    /// - A sorter name is not recognised
    /// - A server base URL or default origin is not an absolute http(s) URL
    /// - The log level is empty
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.navigation.document_id.trim().is_empty() {
            return Err(ConfigError::invalid_value(
                "navigation.document_id",
                "must not be empty",
            ));
        }

        if !TAG_SORTERS.contains(&self.navigation.tags_sorter.as_str()) {
            return Err(ConfigError::invalid_value(
                "navigation.tags_sorter",
                format!(
                    "unknown sorter '{}', expected one of: {}",
                    self.navigation.tags_sorter,
                    TAG_SORTERS.join(", ")
                ),
            ));
        }

        if !OPERATION_SORTERS.contains(&self.navigation.operations_sorter.as_str()) {
            return Err(ConfigError::invalid_value(
                "navigation.operations_sorter",
                format!(
                    "unknown sorter '{}', expected one of: {}",
                    self.navigation.operations_sorter,
                    OPERATION_SORTERS.join(", ")
                ),
            ));
        }

        if let Some(url) = &self.servers.base_server_url {
            validate_http_url("servers.base_server_url", url)?;
        }
        if let Some(origin) = &self.servers.default_origin {
            validate_http_url("servers.default_origin", origin)?;
        }

        if self.telemetry.logging.level.trim().is_empty() {
            return Err(ConfigError::invalid_value(
                "telemetry.logging.level",
                "must not be empty",
            ));
        }

        Ok(())
    }

    /// Create a development configuration preset.
    ///
    /// Pretty, colored debug logs with source locations.
    ///
    /// # Example
    ///
    /// ```
    /// use meridian_config::MeridianConfig;
    ///
    /// let config = MeridianConfig::development();
    /// assert_eq!(config.telemetry.logging.level, "debug");
    /// ```
    #[must_use]
    pub fn development() -> Self {
        let mut config = Self::default();

        config.telemetry.logging.level = "debug".to_string();
        config.telemetry.logging.format = crate::LogFormat::Pretty;
        config.telemetry.logging.ansi_enabled = true;
        config.telemetry.logging.include_location = true;

        config
    }

    /// Create a production configuration preset.
    ///
    /// JSON logs at `info` and alphabetical tag ordering.
    ///
    /// # Example
    ///
    /// ```
    /// use meridian_config::MeridianConfig;
    ///
    /// let config = MeridianConfig::production();
    /// assert_eq!(config.telemetry.logging.format, meridian_config::LogFormat::Json);
    /// ```
    #[must_use]
    pub fn production() -> Self {
        let mut config = Self::default();

        config.telemetry.logging.level = "info".to_string();
        config.telemetry.logging.format = crate::LogFormat::Json;
        config.telemetry.logging.ansi_enabled = false;

        config.navigation.tags_sorter = "alpha".to_string();

        config
    }
}

fn validate_http_url(field: &str, value: &str) -> Result<(), ConfigError> {
    let url = Url::parse(value)
        .map_err(|e| ConfigError::invalid_value(field, format!("invalid URL '{value}': {e}")))?;

    match url.scheme() {
        "http" | "https" => Ok(()),
        scheme => Err(ConfigError::invalid_value(
            field,
            format!("unsupported scheme '{scheme}', expected http or https"),
        )),
    }
}

/// Builder for [`MeridianConfig`].
#[derive(Debug, Default)]
pub struct MeridianConfigBuilder {
    navigation: Option<NavigationConfig>,
    servers: Option<ServersConfig>,
    telemetry: Option<TelemetryConfig>,
}

impl MeridianConfigBuilder {
    /// Create a new builder with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the navigation configuration.
    #[must_use]
    pub fn navigation(mut self, navigation: NavigationConfig) -> Self {
        self.navigation = Some(navigation);
        self
    }

    /// Set the server resolution configuration.
    #[must_use]
    pub fn servers(mut self, servers: ServersConfig) -> Self {
        self.servers = Some(servers);
        self
    }

    /// Set the telemetry configuration.
    #[must_use]
    pub fn telemetry(mut self, telemetry: TelemetryConfig) -> Self {
        self.telemetry = Some(telemetry);
        self
    }

    /// Build the configuration.
    ///
    /// Any unset sections will use their default values.
    #[must_use]
    pub fn build(self) -> MeridianConfig {
        MeridianConfig {
            navigation: self.navigation.unwrap_or_default(),
            servers: self.servers.unwrap_or_default(),
            telemetry: self.telemetry.unwrap_or_default(),
        }
    }

    /// Build and validate the configuration.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if validation fails.
    pub fn build_validated(self) -> Result<MeridianConfig, ConfigError> {
        let config = self.build();
        config.validate()?;
        Ok(config)
    }
}
