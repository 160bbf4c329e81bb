//! Transport abstraction for NVP requests.
//!
//! The client issues exactly one kind of exchange: a POST of an
//! URL-encoded body that yields a text body back. [`NvpTransport`]
//! captures that single operation so the HTTP stack is swappable -
//! production code uses [`HttpTransport`] over reqwest, tests substitute
//! call-counting stubs.
//!
//! Unlike richer transport layers, the trait is deliberately open: the
//! NVP client's contract treats the POST primitive as caller-suppliable.
//!
//! # Examples
//!
//! ```rust,no_run
//! use paypal_nvp::transport::{HttpTransport, NvpTransport};
//!
//! # async fn example() -> paypal_nvp::Result<()> {
//! let transport = HttpTransport::new();
//! let body = transport
//!     .post("https://api.sandbox.paypal.com/nvp", "METHOD=GetPalDetails".to_owned())
//!     .await?;
//! println!("{body}");
//! # Ok(())
//! # }
//! ```

use std::future::Future;

use crate::error::Result;

pub mod config;
mod http;

pub use config::HttpConfig;
pub use http::HttpTransport;

/// Single-operation transport over which NVP requests travel.
///
/// Implementations must treat any non-successful HTTP status as an error:
/// the client distinguishes only "got a body back" from "transport
/// failed", and classifies the latter as a request error.
pub trait NvpTransport: Send + Sync {
    /// POSTs an `application/x-www-form-urlencoded` body and returns the
    /// response body as text.
    ///
    /// # Errors
    ///
    /// Returns an error on connection failure, timeout, TLS failure, or a
    /// non-2xx response status.
    fn post<'a>(
        &'a self,
        url: &'a str,
        body: String,
    ) -> impl Future<Output = Result<String>> + Send + 'a;
}
