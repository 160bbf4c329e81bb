//! HTTP transport implementation over reqwest.

use std::sync::LazyLock;
use std::time::Duration;

use reqwest::{Client, Identity};
use tracing::instrument;

use super::config::HttpConfig;
use crate::error::{NvpError, Result};
use crate::transport::NvpTransport;

/// User agent identifying this client on the wire.
const USER_AGENT: &str = concat!("paypal-nvp/", env!("CARGO_PKG_VERSION"));

/// Shared HTTP client for default transports.
///
/// One pooled client backs every `HttpTransport::new()` so sequential
/// NVP calls reuse connections instead of re-handshaking.
static DEFAULT_HTTP_CLIENT: LazyLock<Client> = LazyLock::new(|| {
    Client::builder()
        .user_agent(USER_AGENT)
        .pool_max_idle_per_host(100)
        .timeout(Duration::from_secs(30))
        .connect_timeout(Duration::from_secs(10))
        .build()
        .expect("Failed to create default HTTP client")
});

/// HTTP/1.1 transport using reqwest.
///
/// Default instances share one pooled client; configured instances own
/// their own, which is required when a TLS client certificate must be
/// presented (certificate-style credentials).
///
/// # Examples
///
/// ```rust,no_run
/// use paypal_nvp::transport::{HttpConfig, HttpTransport};
///
/// let transport = HttpTransport::new();
///
/// let config = HttpConfig { timeout_secs: 60, ..Default::default() };
/// let custom = HttpTransport::with_config(&config).unwrap();
/// ```
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: Client,
}

impl Default for HttpTransport {
    fn default() -> Self {
        Self::new()
    }
}

impl HttpTransport {
    /// Creates an HTTP transport sharing the pooled default client.
    ///
    /// Default configuration: 30 second request timeout, 10 second
    /// connect timeout, 100 idle connections per host.
    #[must_use]
    pub fn new() -> Self {
        Self { client: DEFAULT_HTTP_CLIENT.clone() }
    }

    /// Creates an HTTP transport from configuration.
    ///
    /// When `client_certificate` is set, the PEM is attached as a TLS
    /// client identity so the connection authenticates the way
    /// certificate-style credentials require.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is out of bounds, the PEM is
    /// not parseable, or the HTTP client cannot be built.
    pub fn with_config(config: &HttpConfig) -> Result<Self> {
        config.validate()?;

        let mut builder = Client::builder()
            .user_agent(USER_AGENT)
            .pool_max_idle_per_host(config.pool_max_idle_per_host)
            .timeout(config.timeout())
            .connect_timeout(config.connect_timeout());

        if let Some(pem) = &config.client_certificate {
            let identity = Identity::from_pem(pem.as_bytes()).map_err(NvpError::HttpError)?;
            builder = builder.identity(identity);
        }

        let client = builder.build().map_err(NvpError::HttpError)?;

        Ok(Self { client })
    }

    /// Creates an HTTP transport presenting a TLS client certificate.
    ///
    /// Convenience over [`with_config`](Self::with_config) for wiring a
    /// [`CertificateCredential`](crate::CertificateCredential)'s PEM bytes
    /// straight into the connection.
    ///
    /// # Errors
    ///
    /// Returns an error if the PEM is not parseable or the HTTP client
    /// cannot be built.
    pub fn with_identity(certificate_pem: &[u8]) -> Result<Self> {
        let identity = Identity::from_pem(certificate_pem).map_err(NvpError::HttpError)?;

        let client = Client::builder()
            .user_agent(USER_AGENT)
            .pool_max_idle_per_host(100)
            .timeout(Duration::from_secs(30))
            .connect_timeout(Duration::from_secs(10))
            .identity(identity)
            .build()
            .map_err(NvpError::HttpError)?;

        Ok(Self { client })
    }
}

impl NvpTransport for HttpTransport {
    #[instrument(skip(self, body))]
    async fn post<'a>(&'a self, url: &'a str, body: String) -> Result<String> {
        let response = self
            .client
            .post(url)
            .header("Content-Type", "application/x-www-form-urlencoded")
            .body(body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(NvpError::RequestError(format!(
                "PayPal returned HTTP status {status}"
            )));
        }

        let text = response.text().await.map_err(NvpError::HttpError)?;
        Ok(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transport_new_uses_singleton() {
        let _transport = HttpTransport::new();
        let _client = &*DEFAULT_HTTP_CLIENT;
    }

    #[test]
    fn test_transport_default_matches_new() {
        let _transport = HttpTransport::default();
    }

    #[test]
    fn test_with_config_default_bounds() {
        let transport = HttpTransport::with_config(&HttpConfig::default());
        assert!(transport.is_ok());
    }

    #[test]
    fn test_with_config_rejects_invalid_bounds() {
        let config = HttpConfig { timeout_secs: 0, ..Default::default() };
        let result = HttpTransport::with_config(&config);
        assert!(matches!(result.unwrap_err(), NvpError::TransportError(_)));
    }

    #[test]
    fn test_with_config_rejects_garbage_certificate() {
        let config = HttpConfig {
            client_certificate: Some("not a pem".to_owned()),
            ..Default::default()
        };
        let result = HttpTransport::with_config(&config);
        assert!(result.is_err());
    }

    #[test]
    fn test_with_identity_rejects_garbage_pem() {
        let result = HttpTransport::with_identity(b"definitely not pem bytes");
        assert!(result.is_err());
    }

    #[test]
    fn test_user_agent_names_crate_and_version() {
        assert!(USER_AGENT.starts_with("paypal-nvp/"));
        assert!(USER_AGENT.contains(env!("CARGO_PKG_VERSION")));
    }

    #[tokio::test]
    async fn test_post_invalid_url_is_http_error() {
        let transport = HttpTransport::new();
        let result = transport.post("not-a-url", String::new()).await;
        assert!(result.is_err());
    }
}
