//! Error types for the NVP client.
//!
//! All fallible construction and transport APIs in this crate return
//! [`Result`]. Errors never cross the [`Client`](crate::Client) operation
//! boundary, however: the request primitive converts every [`NvpError`]
//! into the synthesized NVP failure mapping (`ACK=Failure` plus the
//! `L_ERRORCODE0`/`L_LONGMESSAGE0` family), so callers inspect one
//! response shape regardless of outcome.
//!
//! # Error Codes
//!
//! Each variant maps to the numeric code placed in `L_ERRORCODE0`:
//!
//! | Code | Variant | Detected |
//! |------|---------|----------|
//! | 1 | [`NvpError::InvalidCredential`] | before any network I/O |
//! | 2 | [`NvpError::InvalidEnvironment`] | before any network I/O |
//! | 3 | [`NvpError::RequestError`], [`NvpError::HttpError`], [`NvpError::MalformedResponse`] | at the transport boundary |

use thiserror::Error;

/// Result type alias for NVP client operations.
///
/// Used by construction, configuration, and transport APIs. The five
/// public NVP operations do not return this type - they always yield an
/// [`NvpResponse`](crate::NvpResponse).
pub type Result<T> = std::result::Result<T, NvpError>;

/// Errors that can occur while configuring or issuing NVP requests.
#[must_use = "errors should be handled, propagated, or explicitly panicked"]
#[derive(Debug, Error)]
pub enum NvpError {
    /// The client has no usable credential.
    ///
    /// Raised when the credential is absent, or when its username or
    /// password is empty. Detected before any network call is made.
    #[error("invalid API credential: {0}")]
    InvalidCredential(String),

    /// The configured environment is neither `live` nor `sandbox`.
    ///
    /// Environments come from persisted settings, so an out-of-range
    /// value must be reportable rather than unrepresentable. Detected
    /// before any network call is made.
    #[error("invalid environment: {0}")]
    InvalidEnvironment(String),

    /// The transport completed but the exchange failed.
    ///
    /// Covers non-2xx HTTP statuses and any failure the transport
    /// reports with its own message.
    #[error("an error occurred while trying to connect to PayPal: {0}")]
    RequestError(String),

    /// The underlying HTTP request failed.
    ///
    /// Wraps [`reqwest::Error`]: timeouts, connection refusals, DNS and
    /// TLS failures.
    #[error("HTTP request failed: {0}")]
    HttpError(#[from] reqwest::Error),

    /// The response body decoded to a mapping without an `ACK` key.
    ///
    /// `ACK` presence is the sole structural validity check this client
    /// performs on responses.
    #[error("malformed response received from PayPal")]
    MalformedResponse,

    /// Settings were structurally valid TOML but semantically unusable.
    #[error("invalid settings: {0}")]
    SettingsError(String),

    /// Transport configuration was outside acceptable bounds.
    #[error("invalid transport configuration: {0}")]
    TransportError(String),
}

impl NvpError {
    /// Returns the numeric classification used in `L_ERRORCODE0`.
    ///
    /// Settings and transport-configuration errors are construction-time
    /// failures; if one ever reaches the request boundary it is reported
    /// as a request error.
    #[must_use]
    pub fn code(&self) -> u32 {
        match self {
            Self::InvalidCredential(_) => 1,
            Self::InvalidEnvironment(_) => 2,
            Self::RequestError(_)
            | Self::HttpError(_)
            | Self::MalformedResponse
            | Self::SettingsError(_)
            | Self::TransportError(_) => 3,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let error = NvpError::InvalidCredential("missing credential".into());
        assert_eq!(error.to_string(), "invalid API credential: missing credential");
    }

    #[test]
    fn test_request_error_display_includes_detail() {
        let error = NvpError::RequestError("connection reset".into());
        assert!(error.to_string().contains("connection reset"));
        assert!(error.to_string().contains("PayPal"));
    }

    #[test]
    fn test_malformed_response_display() {
        let error = NvpError::MalformedResponse;
        assert_eq!(error.to_string(), "malformed response received from PayPal");
    }

    #[test]
    fn test_error_codes() {
        assert_eq!(NvpError::InvalidCredential(String::new()).code(), 1);
        assert_eq!(NvpError::InvalidEnvironment("staging".into()).code(), 2);
        assert_eq!(NvpError::RequestError(String::new()).code(), 3);
        assert_eq!(NvpError::MalformedResponse.code(), 3);
        assert_eq!(NvpError::SettingsError(String::new()).code(), 3);
        assert_eq!(NvpError::TransportError(String::new()).code(), 3);
    }
}
