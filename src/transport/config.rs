//! HTTP transport configuration.
//!
//! TOML-deserializable settings for the reqwest-backed transport,
//! including the optional TLS client certificate used by
//! certificate-style credentials.

use std::time::Duration;

use serde::Deserialize;

use crate::error::{NvpError, Result};

/// HTTP transport configuration.
///
/// # Examples
///
/// ```toml
/// [http]
/// timeout_secs = 60
/// connect_timeout_secs = 15
/// ```
#[derive(Debug, Clone, Deserialize)]
pub struct HttpConfig {
    /// Request timeout in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Connection timeout in seconds.
    #[serde(default = "default_connect_timeout_secs")]
    pub connect_timeout_secs: u64,

    /// Maximum idle connections per host.
    #[serde(default = "default_pool_max_idle")]
    pub pool_max_idle_per_host: usize,

    /// TLS client certificate and key, PEM-encoded.
    ///
    /// Required for certificate-style credentials; the certificate
    /// authenticates the connection out of band from the NVP fields.
    #[serde(default)]
    pub client_certificate: Option<String>,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            timeout_secs: default_timeout_secs(),
            connect_timeout_secs: default_connect_timeout_secs(),
            pool_max_idle_per_host: default_pool_max_idle(),
            client_certificate: None,
        }
    }
}

impl HttpConfig {
    /// Validates configuration values are within acceptable bounds.
    ///
    /// # Errors
    ///
    /// Returns an error if timeout values are outside valid ranges:
    /// - `timeout_secs`: must be 1-300 seconds
    /// - `connect_timeout_secs`: must be 1-60 seconds
    pub fn validate(&self) -> Result<()> {
        if self.timeout_secs == 0 || self.timeout_secs > 300 {
            return Err(NvpError::TransportError(
                "timeout_secs must be between 1 and 300".to_owned(),
            ));
        }
        if self.connect_timeout_secs == 0 || self.connect_timeout_secs > 60 {
            return Err(NvpError::TransportError(
                "connect_timeout_secs must be between 1 and 60".to_owned(),
            ));
        }
        Ok(())
    }

    /// Returns the request timeout as a [`Duration`].
    #[must_use]
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Returns the connect timeout as a [`Duration`].
    #[must_use]
    pub fn connect_timeout(&self) -> Duration {
        Duration::from_secs(self.connect_timeout_secs)
    }
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_connect_timeout_secs() -> u64 {
    10
}

fn default_pool_max_idle() -> usize {
    100
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_http_config_default() {
        let config = HttpConfig::default();
        assert_eq!(config.timeout_secs, 30);
        assert_eq!(config.connect_timeout_secs, 10);
        assert_eq!(config.pool_max_idle_per_host, 100);
        assert!(config.client_certificate.is_none());
    }

    #[test]
    fn test_http_config_durations() {
        let config = HttpConfig::default();
        assert_eq!(config.timeout(), Duration::from_secs(30));
        assert_eq!(config.connect_timeout(), Duration::from_secs(10));
    }

    #[test]
    fn test_http_config_from_toml_with_defaults() {
        let toml = "timeout_secs = 60";

        let config: HttpConfig = toml::from_str(toml).unwrap();
        assert_eq!(config.timeout_secs, 60);
        assert_eq!(config.connect_timeout_secs, 10); // default
        assert_eq!(config.pool_max_idle_per_host, 100); // default
    }

    #[test]
    fn test_http_config_from_toml_with_certificate() {
        let toml = r#"
            timeout_secs = 45
            client_certificate = "-----BEGIN CERTIFICATE-----"
        "#;

        let config: HttpConfig = toml::from_str(toml).unwrap();
        assert_eq!(config.timeout_secs, 45);
        assert_eq!(config.client_certificate.as_deref(), Some("-----BEGIN CERTIFICATE-----"));
    }

    #[test]
    fn test_http_config_empty_toml_uses_all_defaults() {
        let config: HttpConfig = toml::from_str("").unwrap();
        assert_eq!(config.timeout_secs, 30);
        assert_eq!(config.connect_timeout_secs, 10);
    }

    #[test]
    fn test_validate_default() {
        assert!(HttpConfig::default().validate().is_ok());
    }

    #[test]
    fn test_validate_bounds() {
        let config = HttpConfig { timeout_secs: 1, connect_timeout_secs: 1, ..Default::default() };
        assert!(config.validate().is_ok());

        let config =
            HttpConfig { timeout_secs: 300, connect_timeout_secs: 60, ..Default::default() };
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_zero_timeout() {
        let config = HttpConfig { timeout_secs: 0, ..Default::default() };
        let result = config.validate();
        assert!(matches!(result.unwrap_err(), NvpError::TransportError(_)));
    }

    #[test]
    fn test_validate_rejects_oversized_timeout() {
        let config = HttpConfig { timeout_secs: 301, ..Default::default() };
        assert!(config.validate().is_err());

        let config = HttpConfig { connect_timeout_secs: 61, ..Default::default() };
        assert!(config.validate().is_err());
    }
}
