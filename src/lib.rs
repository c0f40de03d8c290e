//! # fiberpay-rs
//!
//! A Rust client for the FiberPay payments API.
//!
//! The client covers the four FiberPay products (split payments, collect
//! orders, direct transfers and forwarded transfers) and takes care of the
//! request authentication the API requires. Responses are returned as raw
//! strings; decoding them is left to the caller.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use fiberpay_rs::{FiberPayClient, DEFAULT_CURRENCY};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let client = FiberPayClient::new("api-key", "api-secret", true);
//!
//! let order = client.create_split(DEFAULT_CURRENCY).await?;
//! println!("Created: {}", order);
//! # Ok(())
//! # }
//! ```
//!
//! ## Request Signing
//!
//! Every request carries five headers:
//!
//! - `Content-Type: application/json`
//! - `X-API-Key`: the API key
//! - `X-API-Nonce`: a wall-clock nonce (see [`nonce`])
//! - `X-API-Route`: the route, e.g. `POST /1.0/orders/split`
//! - `X-API-Signature`: hex HMAC-SHA512 of `route ++ nonce ++ api_key ++ body`,
//!   keyed by the API secret
//!
//! The body is serialized once and the same string is signed and sent. GET and
//! PUT requests carry no body and are signed over the empty string.
//!
//! ## Errors
//!
//! Connection failures, authentication rejections (401/403) and other
//! non-success statuses are distinct [`FiberPayError`] variants. Nothing is
//! retried.

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

pub mod client;
pub mod errors;
pub mod nonce;
pub mod orders;
pub mod signing;
pub mod types;

// Re-export commonly used items
pub use client::{FiberPayClient, SignedRequest};
pub use errors::{FiberPayError, Result};
pub use nonce::{NonceSource, SystemClock};
pub use types::{Callback, Environment, HttpMethod, API_VERSION, DEFAULT_CURRENCY};
