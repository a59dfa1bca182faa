//! Configuration management for the retina admin console

use serde::{Deserialize, Serialize};

/// Main configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Console HTTP server configuration
    #[serde(default)]
    pub server: ServerConfig,

    /// Backend admin API configuration
    #[serde(default)]
    pub backend: BackendConfig,

    /// Operator session configuration
    #[serde(default)]
    pub session: SessionConfig,

    /// Analytics view configuration
    #[serde(default)]
    pub analytics: AnalyticsConfig,

    /// Audit log view configuration
    #[serde(default)]
    pub audit: AuditConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Host to bind to
    #[serde(default = "default_host")]
    pub host: String,

    /// Port to listen on
    #[serde(default = "default_port")]
    pub port: u16,
}

/// Backend admin API configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BackendConfig {
    /// Base URL of the backend, without a trailing slash
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Request timeout in seconds
    #[serde(default = "default_request_timeout")]
    pub request_timeout_secs: u64,
}

/// Session configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionConfig {
    /// Name of the session cookie
    #[serde(default = "default_cookie_name")]
    pub cookie_name: String,

    /// Session lifetime in minutes
    #[serde(default = "default_ttl_minutes")]
    pub ttl_minutes: u64,

    /// Mark the session cookie `Secure`
    #[serde(default)]
    pub secure_cookie: bool,
}

/// Analytics view configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalyticsConfig {
    /// Length of the default date range in days
    #[serde(default = "default_range_days")]
    pub default_range_days: u32,
}

/// Audit log view configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuditConfig {
    /// Page size used when the request does not name one
    #[serde(default = "default_page_size")]
    pub default_page_size: u32,

    /// Largest page size an operator may request
    #[serde(default = "default_max_page_size")]
    pub max_page_size: u32,
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Log format (json or text)
    #[serde(default = "default_log_format")]
    pub format: String,
}

// Default value functions
fn default_host() -> String {
    "0.0.0.0".to_string()
}

const fn default_port() -> u16 {
    8090
}

fn default_base_url() -> String {
    "http://localhost:5000".to_string()
}

const fn default_request_timeout() -> u64 {
    30
}

fn default_cookie_name() -> String {
    "retina_console_session".to_string()
}

const fn default_ttl_minutes() -> u64 {
    480
}

const fn default_range_days() -> u32 {
    30
}

const fn default_page_size() -> u32 {
    20
}

const fn default_max_page_size() -> u32 {
    100
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "json".to_string()
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            request_timeout_secs: default_request_timeout(),
        }
    }
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            cookie_name: default_cookie_name(),
            ttl_minutes: default_ttl_minutes(),
            secure_cookie: false,
        }
    }
}

impl Default for AnalyticsConfig {
    fn default() -> Self {
        Self {
            default_range_days: default_range_days(),
        }
    }
}

impl Default for AuditConfig {
    fn default() -> Self {
        Self {
            default_page_size: default_page_size(),
            max_page_size: default_max_page_size(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

impl Config {
    /// Load configuration from `console.toml` (optional) and `RETINA_CONSOLE__*` variables
    ///
    /// # Errors
    ///
    /// Returns an error if configuration cannot be loaded, parsed or validated.
    pub fn load() -> crate::Result<Self> {
        let config = config::Config::builder()
            .add_source(config::File::with_name("console").required(false))
            .add_source(config::Environment::with_prefix("RETINA_CONSOLE").separator("__"))
            .build()?;

        let config: Self = config.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    /// Check cross-field constraints
    ///
    /// # Errors
    ///
    /// Returns a configuration error naming the first violated constraint.
    pub fn validate(&self) -> crate::Result<()> {
        if self.backend.base_url.trim().is_empty() {
            return Err(crate::Error::configuration("backend.base_url must not be empty"));
        }
        if self.audit.default_page_size == 0 || self.audit.max_page_size == 0 {
            return Err(crate::Error::configuration("audit page sizes must be positive"));
        }
        if self.audit.default_page_size > self.audit.max_page_size {
            return Err(crate::Error::configuration(
                "audit.default_page_size exceeds audit.max_page_size",
            ));
        }
        if self.analytics.default_range_days == 0 {
            return Err(crate::Error::configuration(
                "analytics.default_range_days must be positive",
            ));
        }
        if self.session.cookie_name.is_empty() {
            return Err(crate::Error::configuration("session.cookie_name must not be empty"));
        }
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_config_default() {
        let config = Config::default();

        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.server.port, 8090);
        assert_eq!(config.backend.base_url, "http://localhost:5000");
        assert_eq!(config.backend.request_timeout_secs, 30);
        assert_eq!(config.session.cookie_name, "retina_console_session");
        assert_eq!(config.session.ttl_minutes, 480);
        assert!(!config.session.secure_cookie);
        assert_eq!(config.analytics.default_range_days, 30);
        assert_eq!(config.audit.default_page_size, 20);
        assert_eq!(config.audit.max_page_size, 100);
        assert_eq!(config.logging.level, "info");
        assert_eq!(config.logging.format, "json");

        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_config_deserialization() {
        let json_str = r#"{
            "backend": {"base_url": "https://api.example.org/"},
            "audit": {"default_page_size": 50}
        }"#;

        let config: Config = serde_json::from_str(json_str).unwrap();

        assert_eq!(config.backend.base_url, "https://api.example.org/");
        assert_eq!(config.backend.request_timeout_secs, 30); // Uses default
        assert_eq!(config.audit.default_page_size, 50);
        assert_eq!(config.audit.max_page_size, 100); // Uses default
        assert_eq!(config.server.port, 8090);
    }

    #[test]
    fn test_validate_rejects_empty_base_url() {
        let mut config = Config::default();
        config.backend.base_url = "  ".to_string();

        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("backend.base_url"));
    }

    #[test]
    fn test_validate_rejects_page_size_above_max() {
        let mut config = Config::default();
        config.audit.default_page_size = 500;

        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("exceeds"));
    }

    #[test]
    fn test_validate_rejects_zero_values() {
        let mut config = Config::default();
        config.audit.max_page_size = 0;
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config.analytics.default_range_days = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_config_serialization() {
        let config = Config::default();

        let serialized = serde_json::to_string(&config).unwrap();
        let deserialized: Config = serde_json::from_str(&serialized).unwrap();

        assert_eq!(deserialized.server.port, config.server.port);
        assert_eq!(deserialized.backend.base_url, config.backend.base_url);
        assert_eq!(deserialized.session.ttl_minutes, config.session.ttl_minutes);
        assert_eq!(deserialized.logging.format, config.logging.format);
    }
}
