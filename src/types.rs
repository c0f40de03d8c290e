//! Core type definitions for the FiberPay API.
//!
//! Request bodies are serialized with camelCase field names in declaration
//! order, which is also the order they are signed and sent in.

use rust_decimal::Decimal;
use serde::Serialize;
use serde_json::Value;
use std::fmt;

/// Version prefix of every API path.
pub const API_VERSION: &str = "1.0";

/// Currency used when the caller has no reason to pick another one.
pub const DEFAULT_CURRENCY: &str = "PLN";

/// Production endpoint.
pub const PRODUCTION_URL: &str = "https://api.fiberpay.pl";

/// Test (sandbox) endpoint.
pub const TEST_URL: &str = "https://apitest.fiberpay.pl";

/// API environment a client talks to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Environment {
    /// Live API
    #[default]
    Production,
    /// Sandbox API
    Test,
}

impl Environment {
    /// Maps the "use test environment" flag to an environment.
    pub fn from_test_flag(use_test_environment: bool) -> Self {
        if use_test_environment {
            Environment::Test
        } else {
            Environment::Production
        }
    }

    /// Base URL of the environment, without a trailing slash.
    pub fn base_url(&self) -> &'static str {
        match self {
            Environment::Production => PRODUCTION_URL,
            Environment::Test => TEST_URL,
        }
    }
}

/// HTTP methods used by the API.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    /// Read a resource
    Get,
    /// Create a resource; the only method that carries a body
    Post,
    /// State transition on an existing resource, sent without a body
    Put,
}

impl HttpMethod {
    /// Uppercase wire name, as used in the signed route.
    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
            HttpMethod::Put => "PUT",
        }
    }

    /// Whether requests with this method transmit a body.
    pub fn allows_body(&self) -> bool {
        matches!(self, HttpMethod::Post)
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<HttpMethod> for reqwest::Method {
    fn from(method: HttpMethod) -> Self {
        match method {
            HttpMethod::Get => reqwest::Method::GET,
            HttpMethod::Post => reqwest::Method::POST,
            HttpMethod::Put => reqwest::Method::PUT,
        }
    }
}

/// Webhook the API calls when an order changes state.
///
/// # Examples
///
/// ```
/// use fiberpay_rs::types::Callback;
/// use serde_json::json;
///
/// let callback = Callback::new("https://shop.example.com/hooks/fiberpay")
///     .with_params(json!({"orderId": 42}));
/// assert_eq!(callback.params, Some(json!({"orderId": 42})));
/// ```
#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct Callback {
    /// URL the API posts notifications to
    #[serde(rename = "callbackUrl")]
    pub url: String,

    /// Opaque value echoed back in notifications
    #[serde(rename = "callbackParams", skip_serializing_if = "Option::is_none")]
    pub params: Option<Value>,
}

impl Callback {
    /// Creates a callback without parameters.
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            params: None,
        }
    }

    /// Attaches parameters to the callback.
    pub fn with_params(mut self, params: Value) -> Self {
        self.params = Some(params);
        self
    }

    /// Drops a callback with an empty URL, and empty parameters of a kept one.
    pub(crate) fn normalize(callback: Option<Callback>) -> Option<Callback> {
        let mut callback = callback.filter(|c| !c.url.is_empty())?;
        if callback.params.as_ref().is_some_and(is_empty_value) {
            callback.params = None;
        }
        Some(callback)
    }
}

/// Null, empty strings, empty arrays and empty objects count as "no value".
pub(crate) fn is_empty_value(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::String(s) => s.is_empty(),
        Value::Array(items) => items.is_empty(),
        Value::Object(map) => map.is_empty(),
        _ => false,
    }
}

/// Body of `POST /1.0/orders/split`.
#[derive(Serialize, Debug, Clone)]
pub struct CreateSplitRequest {
    /// Currency of the split order
    pub currency: String,
}

/// Body of `POST /1.0/orders/split/item`.
#[derive(Serialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct SplitItemRequest {
    /// Amount transferred to the recipient
    pub amount: Decimal,
    /// Currency of the amount
    pub currency: String,
    /// Code of the split order this item belongs to
    pub parent_code: String,
    /// Recipient name
    pub to_name: String,
    /// Recipient IBAN
    pub to_iban: String,
    /// Transfer title
    pub description: String,
    /// Optional webhook
    #[serde(flatten)]
    pub callback: Option<Callback>,
}

/// Body of `POST /1.0/orders/collect`.
#[derive(Serialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct CreateCollectRequest {
    /// Currency of the collect order
    pub currency: String,
    /// Name of the account collecting the funds
    pub to_name: String,
    /// IBAN of the account collecting the funds
    pub to_iban: String,
}

/// Body of `POST /1.0/orders/collect/item`.
#[derive(Serialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct CollectItemRequest {
    /// Amount to collect
    pub amount: Decimal,
    /// Currency of the amount
    pub currency: String,
    /// Transfer title
    pub description: String,
    /// Code of the collect order this item belongs to
    pub parent_order: String,
    /// Optional webhook
    #[serde(flatten)]
    pub callback: Option<Callback>,
}

/// Body of `POST /1.0/orders/direct` and `POST /1.0/orders/forward`.
#[derive(Serialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct TransferRequest {
    /// Amount transferred to the recipient
    pub amount: Decimal,
    /// Currency of the amount
    pub currency: String,
    /// Recipient name
    pub to_name: String,
    /// Recipient IBAN
    pub to_iban: String,
    /// Transfer title
    pub description: String,
    /// Optional webhook
    #[serde(flatten)]
    pub callback: Option<Callback>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::str::FromStr;

    #[test]
    fn test_environment_urls() {
        assert_eq!(Environment::from_test_flag(false), Environment::Production);
        assert_eq!(Environment::from_test_flag(true), Environment::Test);
        assert_eq!(Environment::Production.base_url(), "https://api.fiberpay.pl");
        assert_eq!(Environment::Test.base_url(), "https://apitest.fiberpay.pl");
        assert_eq!(Environment::default(), Environment::Production);
    }

    #[test]
    fn test_http_method_names() {
        assert_eq!(HttpMethod::Get.to_string(), "GET");
        assert_eq!(HttpMethod::Post.as_str(), "POST");
        assert_eq!(reqwest::Method::from(HttpMethod::Put), reqwest::Method::PUT);
        assert!(HttpMethod::Post.allows_body());
        assert!(!HttpMethod::Get.allows_body());
        assert!(!HttpMethod::Put.allows_body());
    }

    #[test]
    fn test_callback_normalization() {
        assert_eq!(Callback::normalize(None), None);
        assert_eq!(Callback::normalize(Some(Callback::new(""))), None);

        let kept = Callback::normalize(Some(Callback::new("https://x").with_params(json!({}))));
        assert_eq!(kept, Some(Callback::new("https://x")));

        let kept = Callback::normalize(Some(Callback::new("https://x").with_params(json!(0))));
        assert_eq!(kept.and_then(|c| c.params), Some(json!(0)));
    }

    #[test]
    fn test_split_item_field_order() {
        let request = SplitItemRequest {
            amount: Decimal::from_str("10.50").unwrap(),
            currency: "PLN".to_string(),
            parent_code: "SPL1".to_string(),
            to_name: "Jan".to_string(),
            to_iban: "PL61109010140000071219812874".to_string(),
            description: "Rent".to_string(),
            callback: None,
        };

        let json = serde_json::to_string(&request).unwrap();
        assert_eq!(
            json,
            r#"{"amount":"10.50","currency":"PLN","parentCode":"SPL1","toName":"Jan","toIban":"PL61109010140000071219812874","description":"Rent"}"#
        );
    }

    #[test]
    fn test_transfer_request_with_callback() {
        let request = TransferRequest {
            amount: Decimal::new(100, 0),
            currency: "EUR".to_string(),
            to_name: "Anna".to_string(),
            to_iban: "DE89370400440532013000".to_string(),
            description: "Invoice 7".to_string(),
            callback: Some(Callback::new("https://x").with_params(json!({"a": 1}))),
        };

        let value = serde_json::to_value(&request).unwrap();
        assert_eq!(value["callbackUrl"], json!("https://x"));
        assert_eq!(value["callbackParams"], json!({"a": 1}));
        assert_eq!(value["toIban"], json!("DE89370400440532013000"));
    }
}
