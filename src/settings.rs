//! Merchant settings layer.
//!
//! TOML-deserializable settings carrying the environment selector, one
//! credential set per environment, and the HTTP transport table. This is
//! the crate-native rendition of the storefront's persisted options: the
//! gateway keeps separate live and sandbox credentials and switches
//! between them with a single environment toggle.
//!
//! # Examples
//!
//! ```
//! use paypal_nvp::Settings;
//!
//! let toml = r#"
//!     environment = "sandbox"
//!
//!     [sandbox]
//!     api_username = "merchant_api1.example.com"
//!     api_password = "api-password"
//!     api_signature = "AFcWxV21C7fd0v3bYYYRCpSSRl31A..."
//! "#;
//!
//! let settings = Settings::from_toml(toml).unwrap();
//! let credential = settings.active_credentials().unwrap();
//! assert_eq!(credential.username(), "merchant_api1.example.com");
//! ```

use std::fmt;

use serde::Deserialize;

use crate::credential::{CertificateCredential, Credential, SignatureCredential};
use crate::error::{NvpError, Result};
use crate::transport::{HttpConfig, HttpTransport};

/// PayPal environment selector.
#[derive(Debug, Clone, Copy, Default, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    /// Production API hosts.
    #[default]
    Live,
    /// Sandbox API hosts.
    Sandbox,
}

impl Environment {
    /// Returns the wire-level environment string.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Live => "live",
            Self::Sandbox => "sandbox",
        }
    }
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<Environment> for String {
    fn from(environment: Environment) -> Self {
        environment.as_str().to_owned()
    }
}

/// One environment's API credential set, as persisted.
///
/// Signature-style when `api_signature` is present, certificate-style
/// when `api_certificate` is; signature wins if both are configured.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CredentialConfig {
    /// API username.
    pub api_username: String,

    /// API password.
    pub api_password: String,

    /// API signature, for signature-style credentials.
    #[serde(default)]
    pub api_signature: Option<String>,

    /// Client certificate and key PEM, for certificate-style credentials.
    #[serde(default)]
    pub api_certificate: Option<String>,

    /// API subject, the "act on behalf of" account identifier.
    #[serde(default)]
    pub api_subject: Option<String>,
}

impl CredentialConfig {
    /// Builds the credential this configuration describes.
    ///
    /// # Errors
    ///
    /// Returns an error when username or password is empty, or when
    /// neither a signature nor a certificate is configured.
    pub fn to_credential(&self) -> Result<Credential> {
        if self.api_username.is_empty() || self.api_password.is_empty() {
            return Err(NvpError::SettingsError(
                "api_username and api_password are required".to_owned(),
            ));
        }

        let subject = self.api_subject.clone().unwrap_or_default();

        if let Some(signature) = &self.api_signature {
            let credential =
                SignatureCredential::new(&self.api_username, &self.api_password, signature)
                    .with_subject(subject);
            return Ok(Credential::Signature(credential));
        }

        if let Some(certificate) = &self.api_certificate {
            let credential = CertificateCredential::new(
                &self.api_username,
                &self.api_password,
                certificate.as_bytes().to_vec(),
            )
            .with_subject(subject);
            return Ok(Credential::Certificate(credential));
        }

        Err(NvpError::SettingsError(
            "either api_signature or api_certificate is required".to_owned(),
        ))
    }
}

/// Root merchant settings.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Settings {
    /// Selected environment. Defaults to live.
    #[serde(default)]
    environment: Environment,

    /// Live API credentials.
    #[serde(default)]
    live: Option<CredentialConfig>,

    /// Sandbox API credentials.
    #[serde(default)]
    sandbox: Option<CredentialConfig>,

    /// HTTP transport configuration.
    #[serde(default)]
    http: HttpConfig,
}

impl Settings {
    /// Parses settings from a TOML document.
    ///
    /// # Errors
    ///
    /// Returns an error on malformed TOML or out-of-bounds transport
    /// values.
    pub fn from_toml(toml: &str) -> Result<Self> {
        let settings: Self =
            toml::from_str(toml).map_err(|e| NvpError::SettingsError(e.to_string()))?;
        settings.http.validate()?;
        Ok(settings)
    }

    /// Returns the selected environment.
    #[must_use]
    pub fn environment(&self) -> Environment {
        self.environment
    }

    /// Returns the HTTP transport configuration.
    #[must_use]
    pub fn http(&self) -> &HttpConfig {
        &self.http
    }

    /// Builds the credential for the selected environment.
    ///
    /// # Errors
    ///
    /// Returns an error when no credential set is configured for the
    /// environment or the configured set is unusable.
    pub fn active_credentials(&self) -> Result<Credential> {
        let config = match self.environment {
            Environment::Live => self.live.as_ref(),
            Environment::Sandbox => self.sandbox.as_ref(),
        };

        config
            .ok_or_else(|| {
                NvpError::SettingsError(format!(
                    "no API credentials configured for the {} environment",
                    self.environment
                ))
            })?
            .to_credential()
    }

    /// Builds the transport for a credential under these settings.
    ///
    /// Certificate-style credentials take precedence over any
    /// `client_certificate` in the `[http]` table: the PEM on the
    /// credential is the one presented to PayPal.
    ///
    /// # Errors
    ///
    /// Returns an error when the transport cannot be built.
    pub fn build_transport(&self, credential: &Credential) -> Result<HttpTransport> {
        match credential {
            Credential::Certificate(cert) => {
                let config = HttpConfig {
                    client_certificate: Some(
                        String::from_utf8_lossy(cert.certificate_pem()).into_owned(),
                    ),
                    ..self.http.clone()
                };
                HttpTransport::with_config(&config)
            }
            Credential::Signature(_) => HttpTransport::with_config(&HttpConfig {
                client_certificate: None,
                ..self.http.clone()
            }),
        }
    }
}
