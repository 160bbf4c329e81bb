//! API credentials for NVP authentication.
//!
//! PayPal's classic API supports two credential styles. Signature
//! credentials authenticate entirely through NVP fields (`USER`, `PWD`,
//! `SIGNATURE`); certificate credentials send only `USER`/`PWD` and
//! authenticate the connection itself with a TLS client certificate. The
//! certificate therefore never appears in the request body - it is wired
//! into the transport when the [`Client`](crate::Client) is built.
//!
//! # Examples
//!
//! ```
//! use paypal_nvp::{Credential, SignatureCredential};
//!
//! let credential = Credential::Signature(SignatureCredential::new(
//!     "merchant_api1.example.com",
//!     "api-password",
//!     "AFcWxV21C7fd0v3bYYYRCpSSRl31A...",
//! ));
//!
//! let params = credential.request_params();
//! assert_eq!(params[0], ("USER".to_owned(), "merchant_api1.example.com".to_owned()));
//! ```

/// Signature-style API credential.
///
/// Authenticates via the `USER`/`PWD`/`SIGNATURE` NVP fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignatureCredential {
    username: String,
    password: String,
    signature: String,
    subject: String,
    payer_id: String,
}

impl SignatureCredential {
    /// Creates a signature credential with no subject.
    #[must_use]
    pub fn new(
        username: impl Into<String>,
        password: impl Into<String>,
        signature: impl Into<String>,
    ) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
            signature: signature.into(),
            subject: String::new(),
            payer_id: String::new(),
        }
    }

    /// Sets the API subject, the "act on behalf of" account identifier.
    #[must_use]
    pub fn with_subject(mut self, subject: impl Into<String>) -> Self {
        self.subject = subject.into();
        self
    }

    /// Returns the API signature.
    #[must_use]
    pub fn signature(&self) -> &str {
        &self.signature
    }
}

/// Certificate-style API credential.
///
/// Authenticates via `USER`/`PWD` NVP fields plus a client-side TLS
/// certificate presented during the handshake. The PEM bytes carried here
/// are attached to the HTTP client by
/// [`HttpTransport::with_identity`](crate::transport::HttpTransport::with_identity).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CertificateCredential {
    username: String,
    password: String,
    certificate_pem: Vec<u8>,
    subject: String,
    payer_id: String,
}

impl CertificateCredential {
    /// Creates a certificate credential with no subject.
    ///
    /// `certificate_pem` holds the concatenated client certificate and
    /// private key in PEM format, exactly as PayPal issues them.
    #[must_use]
    pub fn new(
        username: impl Into<String>,
        password: impl Into<String>,
        certificate_pem: impl Into<Vec<u8>>,
    ) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
            certificate_pem: certificate_pem.into(),
            subject: String::new(),
            payer_id: String::new(),
        }
    }

    /// Sets the API subject, the "act on behalf of" account identifier.
    #[must_use]
    pub fn with_subject(mut self, subject: impl Into<String>) -> Self {
        self.subject = subject.into();
        self
    }

    /// Returns the client certificate PEM bytes.
    #[must_use]
    pub fn certificate_pem(&self) -> &[u8] {
        &self.certificate_pem
    }
}

/// API credential, either signature- or certificate-style.
///
/// Both variants share the same accessor set; they differ in which extra
/// authentication material they carry and in how the HTTP connection is
/// established. A credential is immutable after construction except for
/// the single [`set_payer_id`](Self::set_payer_id) write-back performed
/// after a successful identity check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Credential {
    /// `USER`/`PWD`/`SIGNATURE` authentication.
    Signature(SignatureCredential),
    /// `USER`/`PWD` plus TLS client certificate authentication.
    Certificate(CertificateCredential),
}

impl Credential {
    /// Returns the API username.
    #[must_use]
    pub fn username(&self) -> &str {
        match self {
            Self::Signature(c) => &c.username,
            Self::Certificate(c) => &c.username,
        }
    }

    /// Returns the API password.
    #[must_use]
    pub fn password(&self) -> &str {
        match self {
            Self::Signature(c) => &c.password,
            Self::Certificate(c) => &c.password,
        }
    }

    /// Returns the API subject, empty when unset.
    #[must_use]
    pub fn subject(&self) -> &str {
        match self {
            Self::Signature(c) => &c.subject,
            Self::Certificate(c) => &c.subject,
        }
    }

    /// Returns the payer ID, empty until a verification call has set it.
    #[must_use]
    pub fn payer_id(&self) -> &str {
        match self {
            Self::Signature(c) => &c.payer_id,
            Self::Certificate(c) => &c.payer_id,
        }
    }

    /// Overwrites the payer ID.
    ///
    /// Written back after a successful `GetPalDetails` identity check; the
    /// payer ID is never sent as a request parameter.
    pub fn set_payer_id(&mut self, payer_id: impl Into<String>) {
        let payer_id = payer_id.into();
        match self {
            Self::Signature(c) => c.payer_id = payer_id,
            Self::Certificate(c) => c.payer_id = payer_id,
        }
    }

    /// Returns the endpoint subdomain for this credential style.
    ///
    /// Used to build `https://{subdomain}[.sandbox].paypal.com/nvp`. Both
    /// variants currently target the merchant API host; the seam exists
    /// per variant so other API families can diverge.
    #[must_use]
    pub fn endpoint_subdomain(&self) -> &'static str {
        match self {
            Self::Signature(_) => "api",
            Self::Certificate(_) => "api",
        }
    }

    /// Returns the credentialing NVP parameters for this credential.
    ///
    /// Always contains `USER` and `PWD`; contains `SUBJECT` only when the
    /// subject is non-empty; contains `SIGNATURE` only for the signature
    /// variant. Certificate authentication happens at the TLS layer and
    /// contributes no extra fields here.
    #[must_use]
    pub fn request_params(&self) -> Vec<(String, String)> {
        let mut params = vec![
            ("USER".to_owned(), self.username().to_owned()),
            ("PWD".to_owned(), self.password().to_owned()),
        ];

        if let Self::Signature(c) = self {
            params.push(("SIGNATURE".to_owned(), c.signature.clone()));
        }

        if !self.subject().is_empty() {
            params.push(("SUBJECT".to_owned(), self.subject().to_owned()));
        }

        params
    }

    /// Checks that the credential is usable for requests.
    ///
    /// Username and password are always required and must be non-empty.
    #[must_use]
    pub fn is_usable(&self) -> bool {
        !self.username().is_empty() && !self.password().is_empty()
    }
}
