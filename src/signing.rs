//! Request signing.
//!
//! Every request carries the API key, a nonce, the canonical route and an
//! HMAC-SHA512 signature keyed by the API secret over
//! `route ++ nonce ++ api_key ++ body`, where `body` is the exact string put
//! on the wire (empty when nothing is sent).

use crate::errors::Result;
use crate::types::{is_empty_value, HttpMethod};
use hmac::{Hmac, Mac};
use serde_json::Value;
use sha2::Sha512;

type HmacSha512 = Hmac<Sha512>;

/// Header carrying the API key.
pub const API_KEY_HEADER: &str = "X-API-Key";
/// Header carrying the nonce.
pub const NONCE_HEADER: &str = "X-API-Nonce";
/// Header carrying the signed route.
pub const ROUTE_HEADER: &str = "X-API-Route";
/// Header carrying the hex signature.
pub const SIGNATURE_HEADER: &str = "X-API-Signature";

/// Builds the canonical route, e.g. `POST /1.0/orders/split`.
pub fn route(method: HttpMethod, uri_path: &str) -> String {
    format!("{} {}", method.as_str(), uri_path)
}

/// Serializes a request body once, for both signing and sending.
///
/// Absent bodies, `null` and empty mappings all become the empty string.
///
/// # Examples
///
/// ```
/// use fiberpay_rs::signing::canonical_body;
/// use serde_json::json;
///
/// assert_eq!(canonical_body(None).unwrap(), "");
/// assert_eq!(canonical_body(Some(&json!({}))).unwrap(), "");
/// assert_eq!(canonical_body(Some(&json!({"currency": "PLN"}))).unwrap(), r#"{"currency":"PLN"}"#);
/// ```
pub fn canonical_body(body: Option<&Value>) -> Result<String> {
    match body {
        Some(value) if !is_empty_value(value) => Ok(serde_json::to_string(value)?),
        _ => Ok(String::new()),
    }
}

/// Computes the lowercase hex HMAC-SHA512 signature of a request.
///
/// # Examples
///
/// ```
/// use fiberpay_rs::signing::sign;
///
/// let signature = sign("GET /1.0/orders/split/SPL1", "170000000012345600", "key", "", "secret");
/// assert_eq!(signature.len(), 128);
/// ```
pub fn sign(route: &str, nonce: &str, api_key: &str, body: &str, api_secret: &str) -> String {
    let mut mac =
        HmacSha512::new_from_slice(api_secret.as_bytes()).expect("HMAC accepts any key length");
    mac.update(route.as_bytes());
    mac.update(nonce.as_bytes());
    mac.update(api_key.as_bytes());
    mac.update(body.as_bytes());
    hex::encode(mac.finalize().into_bytes())
}

/// Authentication headers of one request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignedHeaders {
    /// API key
    pub api_key: String,
    /// Nonce used in the signature
    pub nonce: String,
    /// Canonical route
    pub route: String,
    /// Hex signature
    pub signature: String,
}

impl SignedHeaders {
    /// Signs a request for the given credentials.
    pub fn new(
        route: String,
        nonce: String,
        api_key: &str,
        body: &str,
        api_secret: &str,
    ) -> Self {
        let signature = sign(&route, &nonce, api_key, body, api_secret);
        Self {
            api_key: api_key.to_string(),
            nonce,
            route,
            signature,
        }
    }

    /// Header name/value pairs in the order they are sent.
    pub fn pairs(&self) -> [(&'static str, &str); 5] {
        [
            ("Content-Type", "application/json"),
            (API_KEY_HEADER, &self.api_key),
            (NONCE_HEADER, &self.nonce),
            (ROUTE_HEADER, &self.route),
            (SIGNATURE_HEADER, &self.signature),
        ]
    }
}
