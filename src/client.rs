//! PayPal NVP API client.
//!
//! [`Client`] owns one credential and an environment selector and exposes
//! the five classic Express Checkout operations. Every operation is a
//! thin parameter-builder over a single request primitive, and every
//! outcome - success, precondition failure, transport failure, malformed
//! response - comes back as one [`NvpResponse`] shape. Callers branch on
//! the `ACK` field and nothing else.
//!
//! # Examples
//!
//! ```rust,no_run
//! use paypal_nvp::{Client, Credential, Environment, NvpRequest, SignatureCredential};
//!
//! # async fn example() {
//! let credential = Credential::Signature(SignatureCredential::new(
//!     "merchant_api1.example.com",
//!     "api-password",
//!     "AFcWxV21C7fd0v3bYYYRCpSSRl31A...",
//! ));
//! let client = Client::new(Some(credential), Environment::Sandbox).unwrap();
//!
//! let mut params = NvpRequest::new();
//! params.set("RETURNURL", "https://store.example.com/ok");
//! params.set("CANCELURL", "https://store.example.com/cancel");
//! params.set("PAYMENTREQUEST_0_AMT", "24.99");
//!
//! let response = client.set_express_checkout(params).await;
//! match response.ack() {
//!     Some("Success") => println!("token: {}", response.get("TOKEN").unwrap_or("")),
//!     _ => eprintln!("{}", response.get("L_LONGMESSAGE0").unwrap_or("unknown error")),
//! }
//! # }
//! ```

use tracing::{debug, instrument, warn};

use crate::credential::Credential;
use crate::error::{NvpError, Result};
use crate::nvp::{NvpRequest, NvpResponse};
use crate::settings::Settings;
use crate::transport::{HttpTransport, NvpTransport};

/// NVP API version sent with every operation.
const API_VERSION: &str = "120.0";

/// The two recognized environment strings.
const ENVIRONMENTS: [&str; 2] = ["live", "sandbox"];

/// PayPal NVP API client.
///
/// One client per active credential set; reusable for sequential calls,
/// stateless between them. Generic over the transport so tests can
/// substitute stubs; production code uses the [`HttpTransport`] default.
#[derive(Debug, Clone)]
pub struct Client<T = HttpTransport> {
    credential: Option<Credential>,
    environment: String,
    transport: T,
}

impl Client<HttpTransport> {
    /// Creates a client over the default HTTP transport.
    ///
    /// For certificate-style credentials the PEM is attached to the
    /// transport as a TLS client identity; signature credentials share
    /// the pooled default client.
    ///
    /// The environment accepts anything stringly typed because it comes
    /// from persisted settings; out-of-range values are reported per
    /// request as a code-2 synthesized failure, not at construction.
    ///
    /// # Errors
    ///
    /// Returns an error only when a certificate credential's PEM cannot
    /// be loaded into the TLS stack.
    pub fn new(
        credential: Option<Credential>,
        environment: impl Into<String>,
    ) -> Result<Self> {
        let transport = match &credential {
            Some(Credential::Certificate(cert)) => {
                HttpTransport::with_identity(cert.certificate_pem())?
            }
            _ => HttpTransport::new(),
        };

        Ok(Self { credential, environment: environment.into(), transport })
    }

    /// Creates a client from validated settings.
    ///
    /// Picks the credential for the configured environment and wires the
    /// `[http]` table into the transport.
    ///
    /// # Errors
    ///
    /// Returns an error if the settings hold no usable credential for the
    /// environment or the transport cannot be built.
    pub fn from_settings(settings: &Settings) -> Result<Self> {
        let credential = settings.active_credentials()?;
        let transport = settings.build_transport(&credential)?;

        Ok(Self {
            credential: Some(credential),
            environment: settings.environment().to_string(),
            transport,
        })
    }
}

impl<T: NvpTransport> Client<T> {
    /// Creates a client over a caller-supplied transport.
    pub fn with_transport(
        credential: Option<Credential>,
        environment: impl Into<String>,
        transport: T,
    ) -> Self {
        Self { credential, environment: environment.into(), transport }
    }

    /// Returns the configured environment string.
    #[must_use]
    pub fn environment(&self) -> &str {
        &self.environment
    }

    /// Returns the credential, if any.
    #[must_use]
    pub fn credential(&self) -> Option<&Credential> {
        self.credential.as_ref()
    }

    /// Resolves the NVP endpoint URL for this client.
    ///
    /// `https://{subdomain}.paypal.com/nvp` in live,
    /// `https://{subdomain}.sandbox.paypal.com/nvp` in sandbox, where the
    /// subdomain is credential-variant-defined.
    ///
    /// # Errors
    ///
    /// Returns an error when the credential is missing or the environment
    /// is unrecognized.
    pub fn endpoint(&self) -> Result<String> {
        let credential = self.usable_credential()?;
        self.check_environment()?;

        Ok(format!(
            "https://{}{}.paypal.com/nvp",
            credential.endpoint_subdomain(),
            if self.environment == "sandbox" { ".sandbox" } else { "" },
        ))
    }

    fn usable_credential(&self) -> Result<&Credential> {
        let credential = self
            .credential
            .as_ref()
            .ok_or_else(|| NvpError::InvalidCredential("missing credential".to_owned()))?;

        if !credential.is_usable() {
            return Err(NvpError::InvalidCredential(
                "credential is missing a username or password".to_owned(),
            ));
        }

        Ok(credential)
    }

    fn check_environment(&self) -> Result<()> {
        if !ENVIRONMENTS.contains(&self.environment.as_str()) {
            return Err(NvpError::InvalidEnvironment(self.environment.clone()));
        }
        Ok(())
    }

    /// Builds the outbound field set for an operation.
    ///
    /// Credential parameters are merged in after the caller's, replacing
    /// any colliding key: authentication fields are never shadowed.
    fn build_request(&self, mut params: NvpRequest) -> Result<NvpRequest> {
        let credential = self.usable_credential()?;
        for (name, value) in credential.request_params() {
            params.set(name, value);
        }
        Ok(params)
    }

    async fn try_request(&self, params: NvpRequest) -> Result<NvpResponse> {
        let endpoint = self.endpoint()?;
        let body = self.build_request(params)?.encode();

        let response_body = self.transport.post(&endpoint, body).await?;

        let response = NvpResponse::decode(&response_body);
        if response.ack().is_none() {
            return Err(NvpError::MalformedResponse);
        }

        debug!(ack = response.ack(), "NVP exchange completed");
        Ok(response)
    }

    /// Issues one NVP request and returns the response mapping.
    ///
    /// Preconditions (usable credential, recognized environment) are
    /// checked before any network I/O. On success the decoded mapping is
    /// returned verbatim; on any classified failure a synthesized mapping
    /// with `ACK=Failure` and `L_ERRORCODE0` ∈ {1, 2, 3} is returned
    /// instead. This method never panics and never surfaces an error
    /// value.
    #[instrument(skip(self, params), fields(method = params.get("METHOD").unwrap_or("request")))]
    pub async fn request(&self, params: NvpRequest) -> NvpResponse {
        let context = params.get("METHOD").unwrap_or("request").to_owned();

        match self.try_request(params).await {
            Ok(response) => response,
            Err(error) => {
                warn!(code = error.code(), %error, "NVP request failed");
                NvpResponse::failure(error.code(), &context, &error.to_string())
            }
        }
    }

    /// Initiates an Express Checkout transaction.
    ///
    /// On success the response carries a `TOKEN` identifying the checkout
    /// session.
    pub async fn set_express_checkout(&self, mut params: NvpRequest) -> NvpResponse {
        params.set("METHOD", "SetExpressCheckout");
        params.set("VERSION", API_VERSION);

        self.request(params).await
    }

    /// Fetches buyer and session details for a checkout token.
    pub async fn get_express_checkout_details(&self, token: &str) -> NvpResponse {
        let params = NvpRequest::from_pairs([
            ("METHOD", "GetExpressCheckoutDetails"),
            ("VERSION", API_VERSION),
            ("TOKEN", token),
        ]);

        self.request(params).await
    }

    /// Completes an Express Checkout transaction.
    ///
    /// If the `SetExpressCheckout` call set up a billing agreement, it is
    /// created as part of this operation.
    pub async fn do_express_checkout_payment(&self, mut params: NvpRequest) -> NvpResponse {
        params.set("METHOD", "DoExpressCheckoutPayment");
        params.set("VERSION", API_VERSION);

        self.request(params).await
    }

    /// Obtains the PayPal-assigned merchant account number (Pal ID) and
    /// related account information.
    pub async fn get_pal_details(&self) -> NvpResponse {
        let params =
            NvpRequest::from_pairs([("METHOD", "GetPalDetails"), ("VERSION", API_VERSION)]);

        self.request(params).await
    }

    /// Issues a refund against a prior transaction.
    pub async fn refund_transaction(&self, mut params: NvpRequest) -> NvpResponse {
        params.set("METHOD", "RefundTransaction");
        params.set("VERSION", API_VERSION);

        self.request(params).await
    }

    /// Verifies the credential by fetching the merchant's Pal ID.
    ///
    /// On success the Pal ID is written back onto the owned credential as
    /// its payer ID and returned. Returns `None` when the call fails or
    /// the response carries no `PAL` field.
    pub async fn test_api_credentials(&mut self) -> Option<String> {
        let response = self.get_pal_details().await;
        let pal = response.get("PAL")?.to_owned();

        if let Some(credential) = self.credential.as_mut() {
            credential.set_payer_id(pal.clone());
        }

        Some(pal)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::credential::SignatureCredential;
    use crate::settings::Environment;

    fn signature_credential() -> Credential {
        Credential::Signature(SignatureCredential::new("u", "p", "s"))
    }

    fn client(environment: &str) -> Client<HttpTransport> {
        Client::with_transport(Some(signature_credential()), environment, HttpTransport::new())
    }

    #[test]
    fn test_endpoint_live() {
        assert_eq!(client("live").endpoint().unwrap(), "https://api.paypal.com/nvp");
    }

    #[test]
    fn test_endpoint_sandbox() {
        assert_eq!(client("sandbox").endpoint().unwrap(), "https://api.sandbox.paypal.com/nvp");
    }

    #[test]
    fn test_endpoint_rejects_unknown_environment() {
        let result = client("staging").endpoint();
        assert!(matches!(result.unwrap_err(), NvpError::InvalidEnvironment(_)));
    }

    #[test]
    fn test_endpoint_requires_credential() {
        let client: Client<HttpTransport> =
            Client::with_transport(None, "live", HttpTransport::new());
        let result = client.endpoint();
        assert!(matches!(result.unwrap_err(), NvpError::InvalidCredential(_)));
    }

    #[test]
    fn test_build_request_credential_fields_win() {
        let mut params = NvpRequest::new();
        params.set("USER", "attacker");
        params.set("RETURNURL", "https://x/ok");

        let built = client("live").build_request(params).unwrap();
        assert_eq!(built.get("USER"), Some("u"));
        assert_eq!(built.get("PWD"), Some("p"));
        assert_eq!(built.get("SIGNATURE"), Some("s"));
        assert_eq!(built.get("RETURNURL"), Some("https://x/ok"));

        // No duplicate USER entry left behind by the merge.
        let user_count = built.pairs().iter().filter(|(k, _)| k == "USER").count();
        assert_eq!(user_count, 1);
    }

    #[test]
    fn test_build_request_rejects_empty_password() {
        let credential = Credential::Signature(SignatureCredential::new("u", "", "s"));
        let client = Client::with_transport(Some(credential), "live", HttpTransport::new());
        let result = client.build_request(NvpRequest::new());
        assert!(matches!(result.unwrap_err(), NvpError::InvalidCredential(_)));
    }

    #[test]
    fn test_environment_accessor() {
        assert_eq!(client("sandbox").environment(), "sandbox");
    }

    #[test]
    fn test_new_with_environment_enum() {
        let client = Client::new(Some(signature_credential()), Environment::Sandbox).unwrap();
        assert_eq!(client.environment(), "sandbox");
    }
}
