//! NVP request and response types.
//!
//! PayPal's classic API exchanges flat, URL-encoded name/value mappings
//! over HTTP. [`NvpRequest`] is the outbound field set; [`NvpResponse`] is
//! the decoded reply. Both preserve field order - requests so the encoded
//! body is deterministic, responses so callers see fields in wire order.
//!
//! Encoding and decoding go through [`url::form_urlencoded`], the same
//! `application/x-www-form-urlencoded` codec the rest of the HTTP stack
//! uses.

use std::fmt;

use url::form_urlencoded;

/// Ordered outbound NVP field set.
///
/// Keys are uppercase NVP field names. [`set`](Self::set) replaces an
/// existing key in place, preserving its position, or appends a new one.
///
/// # Examples
///
/// ```
/// use paypal_nvp::NvpRequest;
///
/// let mut params = NvpRequest::new();
/// params.set("RETURNURL", "https://store.example.com/ok");
/// params.set("CANCELURL", "https://store.example.com/cancel");
/// assert_eq!(params.get("RETURNURL"), Some("https://store.example.com/ok"));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NvpRequest {
    pairs: Vec<(String, String)>,
}

impl NvpRequest {
    /// Creates an empty request.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a request from existing name/value pairs, in order.
    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self { pairs: pairs.into_iter().map(|(k, v)| (k.into(), v.into())).collect() }
    }

    /// Sets a field, replacing an existing value for the same name.
    pub fn set(&mut self, name: impl Into<String>, value: impl Into<String>) {
        let name = name.into();
        let value = value.into();
        match self.pairs.iter_mut().find(|(k, _)| *k == name) {
            Some(pair) => pair.1 = value,
            None => self.pairs.push((name, value)),
        }
    }

    /// Returns the value for a field name, if present.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&str> {
        self.pairs.iter().find(|(k, _)| k == name).map(|(_, v)| v.as_str())
    }

    /// Returns all pairs in insertion order.
    #[must_use]
    pub fn pairs(&self) -> &[(String, String)] {
        &self.pairs
    }

    /// Encodes the field set as an `application/x-www-form-urlencoded` body.
    #[must_use]
    pub fn encode(&self) -> String {
        let mut serializer = form_urlencoded::Serializer::new(String::new());
        for (name, value) in &self.pairs {
            serializer.append_pair(name, value);
        }
        serializer.finish()
    }
}

impl fmt::Display for NvpRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.encode())
    }
}

/// Decoded NVP response mapping.
///
/// Successful exchanges carry whatever fields PayPal supplied, verbatim
/// and in wire order. Classified failures are represented with the same
/// type through [`failure`](Self::failure), so callers branch on
/// [`ack`](Self::ack) alone.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NvpResponse {
    pairs: Vec<(String, String)>,
}

impl NvpResponse {
    /// Decodes a URL-encoded response body.
    ///
    /// Every `name=value` pair is kept, including duplicates; this type
    /// performs no interpretation beyond percent-decoding.
    #[must_use]
    pub fn decode(body: &str) -> Self {
        let pairs = form_urlencoded::parse(body.as_bytes())
            .map(|(k, v)| (k.into_owned(), v.into_owned()))
            .collect();
        Self { pairs }
    }

    /// Builds the synthesized failure mapping for a classified error.
    ///
    /// The shape mirrors PayPal's own error list fields so callers need
    /// exactly one error-handling path:
    ///
    /// ```text
    /// ACK             = Failure
    /// L_ERRORCODE0    = 1 | 2 | 3
    /// L_SHORTMESSAGE0 = Error in <context>
    /// L_LONGMESSAGE0  = <detail>
    /// L_SEVERITYCODE0 = Error
    /// ```
    #[must_use]
    pub fn failure(code: u32, context: &str, detail: &str) -> Self {
        Self {
            pairs: vec![
                ("ACK".to_owned(), "Failure".to_owned()),
                ("L_ERRORCODE0".to_owned(), code.to_string()),
                ("L_SHORTMESSAGE0".to_owned(), format!("Error in {context}")),
                ("L_LONGMESSAGE0".to_owned(), detail.to_owned()),
                ("L_SEVERITYCODE0".to_owned(), "Error".to_owned()),
            ],
        }
    }

    /// Returns the value for a field name, if present.
    ///
    /// For duplicate names the first occurrence wins.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&str> {
        self.pairs.iter().find(|(k, _)| k == name).map(|(_, v)| v.as_str())
    }

    /// Returns the `ACK` field, if present.
    ///
    /// Interpreting `Success` versus `SuccessWithWarning` versus `Failure`
    /// is the caller's responsibility.
    #[must_use]
    pub fn ack(&self) -> Option<&str> {
        self.get("ACK")
    }

    /// Returns all pairs in wire order.
    #[must_use]
    pub fn pairs(&self) -> &[(String, String)] {
        &self.pairs
    }
}
