//! PayPal legacy NVP (Name-Value-Pair) API client.
//!
//! This crate implements the classic PayPal Express Checkout client: a
//! credential-polymorphic HTTP request builder/parser with a fixed set of
//! typed operations and a uniform error-to-response mapping.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────┐
//! │  Checkout handler   │  settings test, refund hook, signup flow
//! └─────────┬───────────┘
//!           │ NvpRequest
//! ┌─────────▼───────────────────────────────────┐
//! │            Client (this crate)              │
//! │  ┌──────────────┐      ┌─────────────────┐  │
//! │  │  Credential  │──────│  NVP codec      │  │
//! │  │  (signature/ │      │  (urlencoded    │  │
//! │  │  certificate)│      │   key/values)   │  │
//! │  └──────────────┘      └─────────────────┘  │
//! └─────────┬───────────────────────────────────┘
//!           │ HTTPS POST
//! ┌─────────▼───────────┐
//! │  PayPal NVP API     │  api[.sandbox].paypal.com/nvp
//! └─────────────────────┘
//! ```
//!
//! # Quick Start
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
//! if response.ack() == Some("Success") {
//!     println!("redirect with token {}", response.get("TOKEN").unwrap_or(""));
//! } else {
//!     eprintln!("{}", response.get("L_LONGMESSAGE0").unwrap_or("unknown error"));
//! }
//! # }
//! ```
//!
//! # One Response Shape
//!
//! The five operations ([`Client::set_express_checkout`],
//! [`Client::get_express_checkout_details`],
//! [`Client::do_express_checkout_payment`], [`Client::get_pal_details`],
//! [`Client::refund_transaction`]) never return an error value. Successful
//! exchanges yield PayPal's mapping verbatim; precondition and transport
//! failures yield a synthesized mapping with `ACK=Failure`,
//! `L_ERRORCODE0` (1 = invalid credential, 2 = invalid environment,
//! 3 = request error) and a populated `L_LONGMESSAGE0`. Callers branch on
//! `ACK` and nothing else.
//!
//! # Module Organization
//!
//! - [`client`]: the request primitive and the five NVP operations
//! - [`credential`]: signature- and certificate-style API credentials
//! - [`nvp`]: ordered NVP field sets and the urlencoded codec
//! - [`settings`]: TOML settings with per-environment credential sets
//! - [`transport`]: the POST primitive and its reqwest implementation
//! - [`error`]: error taxonomy behind the synthesized failure mapping
//!
//! # Concurrency
//!
//! A [`Client`] is stateless between calls and may be reused for
//! sequential requests. It holds no locks; for concurrent use, share one
//! client per logical credential set or clone it.

#![warn(missing_docs)]
#![warn(missing_debug_implementations)]

pub mod client;
pub mod credential;
pub mod error;
pub mod nvp;
pub mod settings;
pub mod transport;

pub use client::Client;
pub use credential::{CertificateCredential, Credential, SignatureCredential};
pub use error::{NvpError, Result};
pub use nvp::{NvpRequest, NvpResponse};
pub use settings::{CredentialConfig, Environment, Settings};
pub use transport::{HttpConfig, HttpTransport, NvpTransport};
