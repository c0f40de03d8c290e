//! Signed HTTP client for the FiberPay API.
//!
//! [`FiberPayClient::call`] is the single path every endpoint goes through:
//! it serializes the body once, signs it, sends it, and returns the raw
//! response body.

use crate::errors::{FiberPayError, Result};
use crate::nonce::{NonceSource, SystemClock};
use crate::signing::{canonical_body, route, SignedHeaders};
use crate::types::{Environment, HttpMethod};
use reqwest::Client;
use serde_json::Value;
use std::fmt;
use std::sync::Arc;
use tracing::{debug, warn};
use url::Url;

#[derive(Clone)]
struct Credentials {
    api_key: String,
    api_secret: String,
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("api_key", &self.api_key)
            .field("api_secret", &"<redacted>")
            .finish()
    }
}

/// A fully signed request, ready to be sent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignedRequest {
    /// HTTP method
    pub method: HttpMethod,
    /// Absolute request URL
    pub url: String,
    /// Authentication headers
    pub headers: SignedHeaders,
    /// Serialized body; the exact string that was signed. Only POST sends it.
    pub body: String,
}

/// Client for the FiberPay API.
///
/// Cloning is cheap and clones share the underlying connection pool.
#[derive(Clone)]
pub struct FiberPayClient {
    credentials: Credentials,
    environment: Environment,
    base_url: String,
    http_client: Client,
    nonce_source: Arc<dyn NonceSource>,
}

impl fmt::Debug for FiberPayClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FiberPayClient")
            .field("credentials", &self.credentials)
            .field("environment", &self.environment)
            .field("base_url", &self.base_url)
            .finish_non_exhaustive()
    }
}

impl FiberPayClient {
    /// Creates a new client.
    ///
    /// # Arguments
    ///
    /// * `api_key` - Public API key
    /// * `api_secret` - Secret used to sign requests; never sent
    /// * `use_test_environment` - Talk to the sandbox instead of production
    ///
    /// # Examples
    ///
    /// ```
    /// use fiberpay_rs::client::FiberPayClient;
    ///
    /// let client = FiberPayClient::new("my-key", "my-secret", true);
    /// assert_eq!(client.base_url(), "https://apitest.fiberpay.pl");
    /// ```
    pub fn new(
        api_key: impl Into<String>,
        api_secret: impl Into<String>,
        use_test_environment: bool,
    ) -> Self {
        let environment = Environment::from_test_flag(use_test_environment);
        Self {
            credentials: Credentials {
                api_key: api_key.into(),
                api_secret: api_secret.into(),
            },
            environment,
            base_url: environment.base_url().to_string(),
            http_client: Client::new(),
            nonce_source: Arc::new(SystemClock),
        }
    }

    /// Switches to another environment, resetting the base URL to its endpoint.
    pub fn with_environment(mut self, environment: Environment) -> Self {
        self.environment = environment;
        self.base_url = environment.base_url().to_string();
        self
    }

    /// Overrides the base URL, e.g. to go through a proxy.
    pub fn with_base_url(mut self, base_url: &str) -> Result<Self> {
        let url = Url::parse(base_url)?;
        self.base_url = url.as_str().trim_end_matches('/').to_string();
        Ok(self)
    }

    /// Sets a custom HTTP client.
    pub fn with_client(mut self, client: Client) -> Self {
        self.http_client = client;
        self
    }

    /// Sets a custom nonce source.
    pub fn with_nonce_source(mut self, nonce_source: Arc<dyn NonceSource>) -> Self {
        self.nonce_source = nonce_source;
        self
    }

    /// API key sent with every request.
    pub fn api_key(&self) -> &str {
        &self.credentials.api_key
    }

    /// Environment selected at construction.
    pub fn environment(&self) -> Environment {
        self.environment
    }

    /// Base URL requests are sent to.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Builds and signs a request without sending it.
    ///
    /// GET and PUT requests carry no body, so passing a non-empty one fails
    /// with [`FiberPayError::BodyNotAllowed`] instead of signing data the
    /// server never receives.
    pub fn prepare(
        &self,
        method: HttpMethod,
        uri_path: &str,
        body: Option<&Value>,
    ) -> Result<SignedRequest> {
        let body = canonical_body(body)?;
        if !body.is_empty() && !method.allows_body() {
            return Err(FiberPayError::BodyNotAllowed(method));
        }

        let headers = SignedHeaders::new(
            route(method, uri_path),
            self.nonce_source.nonce(),
            &self.credentials.api_key,
            &body,
            &self.credentials.api_secret,
        );

        Ok(SignedRequest {
            method,
            url: format!("{}{}", self.base_url, uri_path),
            headers,
            body,
        })
    }

    /// Signs and sends a request, returning the raw response body.
    ///
    /// Non-success statuses are errors; 401 and 403 map to
    /// [`FiberPayError::Unauthorized`].
    pub async fn call(
        &self,
        method: HttpMethod,
        uri_path: &str,
        body: Option<&Value>,
    ) -> Result<String> {
        let request = self.prepare(method, uri_path, body)?;
        self.send(request).await
    }

    async fn send(&self, request: SignedRequest) -> Result<String> {
        let mut builder = self
            .http_client
            .request(request.method.into(), request.url.as_str());

        for (name, value) in request.headers.pairs() {
            builder = builder.header(name, value);
        }

        if request.method.allows_body() {
            builder = builder.body(request.body);
        }

        debug!(
            route = %request.headers.route,
            nonce = %request.headers.nonce,
            "Sending FiberPay request"
        );

        let response = builder.send().await?;
        let status = response.status();
        let text = response.text().await?;

        if !status.is_success() {
            warn!(route = %request.headers.route, %status, "FiberPay request failed");
            return Err(FiberPayError::from_status(status, text));
        }

        Ok(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::signing::sign;
    use serde_json::json;

    struct FixedNonce(&'static str);

    impl NonceSource for FixedNonce {
        fn nonce(&self) -> String {
            self.0.to_string()
        }
    }

    fn client() -> FiberPayClient {
        FiberPayClient::new("key1", "secret1", false)
            .with_nonce_source(Arc::new(FixedNonce("123456789.987654")))
    }

    #[test]
    fn test_client_creation() {
        let client = FiberPayClient::new("key", "secret", false);
        assert_eq!(client.api_key(), "key");
        assert_eq!(client.environment(), Environment::Production);
        assert_eq!(client.base_url(), "https://api.fiberpay.pl");

        let client = client.with_environment(Environment::Test);
        assert_eq!(client.base_url(), "https://apitest.fiberpay.pl");
    }

    #[test]
    fn test_base_url_override() {
        let client = client().with_base_url("http://127.0.0.1:8080/").unwrap();
        assert_eq!(client.base_url(), "http://127.0.0.1:8080");

        let request = client.prepare(HttpMethod::Get, "/1.0/orders/split/S1", None).unwrap();
        assert_eq!(request.url, "http://127.0.0.1:8080/1.0/orders/split/S1");

        assert!(matches!(
            FiberPayClient::new("k", "s", false).with_base_url("not a url"),
            Err(FiberPayError::UrlParse(_))
        ));
    }

    #[test]
    fn test_debug_redacts_secret() {
        let output = format!("{:?}", client());
        assert!(output.contains("key1"));
        assert!(!output.contains("secret1"));
    }

    #[test]
    fn test_prepare_post_matches_reference_vector() {
        let request = client()
            .prepare(HttpMethod::Post, "/1.0/orders/split", Some(&json!({"currency": "PLN"})))
            .unwrap();

        assert_eq!(request.body, r#"{"currency":"PLN"}"#);
        assert_eq!(request.headers.route, "POST /1.0/orders/split");
        assert_eq!(request.headers.nonce, "123456789.987654");
        assert_eq!(
            request.headers.signature,
            sign("POST /1.0/orders/split", "123456789.987654", "key1", r#"{"currency":"PLN"}"#, "secret1")
        );
    }

    #[test]
    fn test_get_signs_empty_body() {
        let request = client().prepare(HttpMethod::Get, "/1.0/orders/split/S1", None).unwrap();

        assert_eq!(request.body, "");
        assert_eq!(
            request.headers.signature,
            sign("GET /1.0/orders/split/S1", "123456789.987654", "key1", "", "secret1")
        );
    }

    #[test]
    fn test_empty_post_body_is_treated_as_absent() {
        let empty = client()
            .prepare(HttpMethod::Post, "/1.0/orders/split", Some(&json!({})))
            .unwrap();
        let absent = client().prepare(HttpMethod::Post, "/1.0/orders/split", None).unwrap();

        assert_eq!(empty.body, "");
        assert_eq!(empty, absent);
    }

    #[test]
    fn test_put_and_get_reject_bodies() {
        let body = json!({"a": 1});
        assert!(matches!(
            client().prepare(HttpMethod::Put, "/1.0/orders/split/S1/define", Some(&body)),
            Err(FiberPayError::BodyNotAllowed(HttpMethod::Put))
        ));

        let result = tokio_test::block_on(client().call(
            HttpMethod::Get,
            "/1.0/orders/split/S1",
            Some(&body),
        ));
        assert!(matches!(result, Err(FiberPayError::BodyNotAllowed(HttpMethod::Get))));
    }
}
