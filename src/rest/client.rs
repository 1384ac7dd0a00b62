//! CoinSpot REST API client implementation.

use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use std::task::{Context, Poll};

use futures_util::StreamExt;
use reqwest::header::{CONTENT_TYPE, HeaderMap, HeaderValue, USER_AGENT};
use reqwest_middleware::{ClientBuilder, ClientWithMiddleware, RequestBuilder};
use reqwest_tracing::TracingMiddleware;
use serde_json::Value;
use tokio::sync::oneshot;
use url::Url;

use crate::auth::{Authenticator, CredentialsProvider, Envelope, NonceProvider, Payload};
use crate::error::{ApiError, CoinSpotError};
use crate::rest::endpoints::{Access, COINSPOT_BASE_URL, Endpoint};
use crate::rest::tls::TrustPolicy;

/// Header carrying the public API key.
pub const KEY_HEADER: &str = "key";
/// Header carrying the hex signature.
pub const SIGN_HEADER: &str = "sign";

/// Longest body excerpt quoted in protocol errors.
const BODY_EXCERPT_LEN: usize = 200;

/// The CoinSpot REST API client.
///
/// The client signs payloads with its [`Authenticator`], dispatches them over
/// HTTPS, and decodes CoinSpot's JSON answers. It is cheap to clone and all
/// clones share one nonce sequence.
///
/// # Example
///
/// ```rust,no_run
/// use coinspot_api_client::rest::CoinSpotClient;
/// use coinspot_api_client::auth::StaticCredentials;
/// use std::sync::Arc;
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let credentials = Arc::new(StaticCredentials::new("api_key", "api_secret"));
///     let client = CoinSpotClient::builder()
///         .credentials(credentials)
///         .build()?;
///
///     let btc = client.balance("btc").await?;
///     println!("BTC balance: {btc}");
///
///     Ok(())
/// }
/// ```
#[derive(Clone)]
pub struct CoinSpotClient {
    http_client: ClientWithMiddleware,
    base_url: Url,
    public_base_url: Option<Url>,
    authenticator: Option<Authenticator>,
}

impl CoinSpotClient {
    /// Create a client for public endpoints with default settings.
    ///
    /// Use [`CoinSpotClient::builder()`] to configure credentials.
    pub fn new() -> Result<Self, CoinSpotError> {
        Self::builder().build()
    }

    /// Create a new client builder.
    pub fn builder() -> CoinSpotClientBuilder {
        CoinSpotClientBuilder::new()
    }

    /// The authenticator used for signed endpoints.
    pub fn authenticator(&self) -> Result<&Authenticator, CoinSpotError> {
        self.authenticator
            .as_ref()
            .ok_or(CoinSpotError::MissingCredentials)
    }

    /// Sign a payload with this client's credentials and nonce sequence.
    pub fn sign(&self, payload: Option<Payload>) -> Result<Envelope, CoinSpotError> {
        Ok(self.authenticator()?.sign(payload))
    }

    /// Send a signed envelope to an endpoint and return the raw response text.
    ///
    /// POST requests carry `envelope.body` byte for byte; GET requests carry
    /// no body but still send the `key` and `sign` headers. The response is
    /// not decoded and its HTTP status is not interpreted.
    ///
    /// A transport failure yields an error and never a partial body.
    pub async fn execute(
        &self,
        envelope: &Envelope,
        endpoint: &Endpoint,
    ) -> Result<String, CoinSpotError> {
        let url = self.resolve_url(endpoint)?;
        let mut request = self
            .http_client
            .request(endpoint.method.as_reqwest(), url.clone())
            .header(CONTENT_TYPE, "application/json")
            .header(KEY_HEADER, &envelope.key)
            .header(SIGN_HEADER, &envelope.sign);

        if endpoint.method.sends_body() {
            request = request.body(envelope.body.clone());
        }

        self.send(endpoint, &url, request).await
    }

    /// Send an unsigned GET request to a public endpoint.
    pub async fn fetch_public(&self, endpoint: &Endpoint) -> Result<String, CoinSpotError> {
        let url = self.resolve_url(endpoint)?;
        let request = self
            .http_client
            .request(endpoint.method.as_reqwest(), url.clone())
            .header(CONTENT_TYPE, "application/json");

        self.send(endpoint, &url, request).await
    }

    /// Run [`execute`](Self::execute) as a background task.
    ///
    /// The returned [`Completion`] resolves exactly once, with either the
    /// response text or the error. Must be called within a Tokio runtime.
    pub fn execute_detached(&self, envelope: Envelope, endpoint: Endpoint) -> Completion {
        let (sender, receiver) = oneshot::channel();
        let client = self.clone();

        tokio::spawn(async move {
            let outcome = client.execute(&envelope, &endpoint).await;
            if sender.send(outcome).is_err() {
                tracing::debug!(endpoint = endpoint.name, "completion receiver dropped");
            }
        });

        Completion { receiver }
    }

    /// Sign, send, decode and project a call described by an endpoint row.
    ///
    /// The payload must match the endpoint's shape. Responses whose `status`
    /// is not `"ok"` become [`CoinSpotError::Api`].
    pub async fn call(&self, endpoint: &Endpoint, payload: Payload) -> Result<Value, CoinSpotError> {
        endpoint.shape.validate(endpoint.name, &payload)?;

        let body = match endpoint.access {
            Access::Signed => {
                let envelope = self.sign(Some(payload))?;
                self.execute(&envelope, endpoint).await?
            }
            Access::Public => self.fetch_public(endpoint).await?,
        };

        let response = decode_response(endpoint, &body)?;
        endpoint.projection.apply(endpoint.name, response)
    }

    fn resolve_url(&self, endpoint: &Endpoint) -> Result<Url, CoinSpotError> {
        if !endpoint.is_absolute() {
            return Ok(self.base_url.join(&endpoint.path)?);
        }

        let url = Url::parse(&endpoint.path)?;
        match &self.public_base_url {
            Some(origin) => Ok(origin.join(url.path())?),
            None => Ok(url),
        }
    }

    async fn send(
        &self,
        endpoint: &Endpoint,
        url: &Url,
        request: RequestBuilder,
    ) -> Result<String, CoinSpotError> {
        let response = request.send().await?;
        let status = response.status();

        let mut stream = response.bytes_stream();
        let mut buffer = Vec::new();
        while let Some(chunk) = stream.next().await {
            buffer.extend_from_slice(&chunk?);
        }

        tracing::debug!(
            endpoint = endpoint.name,
            method = %endpoint.method,
            url = %url,
            status = status.as_u16(),
            bytes = buffer.len(),
            "CoinSpot request completed"
        );

        String::from_utf8(buffer)
            .map_err(|e| CoinSpotError::InvalidResponse(format!("response is not UTF-8: {e}")))
    }
}

/// Decode a response body and check CoinSpot's `status` field.
fn decode_response(endpoint: &Endpoint, body: &str) -> Result<Value, CoinSpotError> {
    let response: Value = serde_json::from_str(body).map_err(|e| {
        CoinSpotError::InvalidResponse(format!(
            "failed to parse {} response: {e}. Body: {}",
            endpoint.name,
            excerpt(body)
        ))
    })?;

    let status = response
        .get("status")
        .and_then(Value::as_str)
        .map(str::to_string);
    match status.as_deref() {
        None | Some("ok") => Ok(response),
        Some(status) => {
            let message = response
                .get("message")
                .and_then(Value::as_str)
                .unwrap_or("no message")
                .to_string();
            tracing::warn!(endpoint = endpoint.name, status, %message, "CoinSpot returned an error");
            Err(CoinSpotError::Api(ApiError::new(status, message)))
        }
    }
}

fn excerpt(body: &str) -> &str {
    match body.char_indices().nth(BODY_EXCERPT_LEN) {
        Some((index, _)) => &body[..index],
        None => body,
    }
}

impl std::fmt::Debug for CoinSpotClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CoinSpotClient")
            .field("base_url", &self.base_url.as_str())
            .field("has_credentials", &self.authenticator.is_some())
            .finish()
    }
}

/// Outcome of a request started with [`CoinSpotClient::execute_detached`].
///
/// Resolves to the response text or the error that ended the request.
#[derive(Debug)]
pub struct Completion {
    receiver: oneshot::Receiver<Result<String, CoinSpotError>>,
}

impl Future for Completion {
    type Output = Result<String, CoinSpotError>;

    fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        Pin::new(&mut self.receiver).poll(cx).map(|received| match received {
            Ok(outcome) => outcome,
            Err(_) => Err(CoinSpotError::CompletionDropped),
        })
    }
}

/// Builder for [`CoinSpotClient`].
pub struct CoinSpotClientBuilder {
    base_url: String,
    public_base_url: Option<String>,
    credentials: Option<Arc<dyn CredentialsProvider>>,
    nonce_provider: Option<Arc<dyn NonceProvider>>,
    user_agent: Option<String>,
    trust_policy: TrustPolicy,
}

impl CoinSpotClientBuilder {
    /// Create a new builder with default settings.
    pub fn new() -> Self {
        Self {
            base_url: COINSPOT_BASE_URL.to_string(),
            public_base_url: None,
            credentials: None,
            nonce_provider: None,
            user_agent: None,
            trust_policy: TrustPolicy::default(),
        }
    }

    /// Set the base URL for relative endpoint paths (useful with a mock server).
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Redirect endpoints with absolute URLs to another origin, keeping their path.
    pub fn public_base_url(mut self, url: impl Into<String>) -> Self {
        self.public_base_url = Some(url.into());
        self
    }

    /// Set the credentials provider for signed requests.
    pub fn credentials(mut self, credentials: Arc<dyn CredentialsProvider>) -> Self {
        self.credentials = Some(credentials);
        self
    }

    /// Set a custom nonce provider.
    pub fn nonce_provider(mut self, provider: Arc<dyn NonceProvider>) -> Self {
        self.nonce_provider = Some(provider);
        self
    }

    /// Set a custom user agent.
    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = Some(user_agent.into());
        self
    }

    /// Set the certificate trust policy.
    pub fn trust_policy(mut self, policy: TrustPolicy) -> Self {
        self.trust_policy = policy;
        self
    }

    /// Build the client.
    ///
    /// Fails if a URL does not parse or the trust policy's certificates are invalid.
    pub fn build(self) -> Result<CoinSpotClient, CoinSpotError> {
        let mut headers = HeaderMap::new();
        let user_agent = self
            .user_agent
            .unwrap_or_else(|| format!("coinspot-api-client/{}", env!("CARGO_PKG_VERSION")));
        let header_value = HeaderValue::from_str(&user_agent)
            .unwrap_or_else(|_| HeaderValue::from_static("coinspot-api-client"));
        headers.insert(USER_AGENT, header_value);

        let reqwest_client = self
            .trust_policy
            .apply(reqwest::Client::builder().default_headers(headers))?
            .build()?;

        let client = ClientBuilder::new(reqwest_client)
            .with(TracingMiddleware::default())
            .build();

        let authenticator = self.credentials.map(|credentials| match self.nonce_provider {
            Some(nonce_provider) => Authenticator::with_nonce_provider(credentials, nonce_provider),
            None => Authenticator::new(credentials),
        });

        Ok(CoinSpotClient {
            http_client: client,
            base_url: Url::parse(&self.base_url)?,
            public_base_url: self
                .public_base_url
                .as_deref()
                .map(Url::parse)
                .transpose()?,
            authenticator,
        })
    }
}

impl Default for CoinSpotClientBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::StaticCredentials;
    use crate::rest::endpoints::{HttpMethod, private, public};

    fn signed_client(base_url: &str) -> CoinSpotClient {
        CoinSpotClient::builder()
            .base_url(base_url)
            .credentials(Arc::new(StaticCredentials::new("K", "S")))
            .build()
            .unwrap()
    }

    #[test]
    fn test_resolve_relative_path() {
        let client = signed_client("https://www.coinspot.com.au");
        let url = client.resolve_url(&private::BALANCES).unwrap();
        assert_eq!(url.as_str(), "https://www.coinspot.com.au/api/my/balances");
    }

    #[test]
    fn test_resolve_absolute_path() {
        let client = signed_client("https://example.invalid");
        let url = client.resolve_url(&public::LATEST).unwrap();
        assert_eq!(url.as_str(), "https://www.coinspot.com.au/pubapi/latest");
    }

    #[test]
    fn test_resolve_absolute_path_with_public_override() {
        let client = CoinSpotClient::builder()
            .public_base_url("http://127.0.0.1:8080")
            .build()
            .unwrap();
        let url = client.resolve_url(&public::LATEST).unwrap();
        assert_eq!(url.as_str(), "http://127.0.0.1:8080/pubapi/latest");
    }

    #[test]
    fn test_sign_without_credentials() {
        let client = CoinSpotClient::new().unwrap();
        assert!(matches!(
            client.sign(None),
            Err(CoinSpotError::MissingCredentials)
        ));
    }

    #[test]
    fn test_invalid_base_url() {
        let result = CoinSpotClient::builder().base_url("not a url").build();
        assert!(matches!(result, Err(CoinSpotError::Url(_))));
    }

    #[test]
    fn test_decode_error_status() {
        let body = r#"{"status":"error","message":"Invalid amount"}"#;
        match decode_response(&private::BUY, body) {
            Err(CoinSpotError::Api(error)) => assert_eq!(error.message, "Invalid amount"),
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[test]
    fn test_decode_html_body() {
        let body = format!("<html>{}</html>", "x".repeat(500));
        match decode_response(&private::BALANCES, &body) {
            Err(CoinSpotError::InvalidResponse(message)) => {
                assert!(message.contains("<html>"));
                assert!(message.len() < 400);
            }
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[test]
    fn test_debug_hides_credentials() {
        let client = CoinSpotClient::builder()
            .credentials(Arc::new(StaticCredentials::new("K", "topsecret")))
            .build()
            .unwrap();
        let debug_str = format!("{client:?}");
        assert!(debug_str.contains("has_credentials: true"));
        assert!(!debug_str.contains("topsecret"));
    }

    #[test]
    fn test_execute_connection_refused() {
        let client = signed_client("http://127.0.0.1:1");
        let envelope = client.sign(None).unwrap();
        let endpoint = Endpoint::custom("/api/my/balances", HttpMethod::Post);

        let result = tokio_test::block_on(client.execute(&envelope, &endpoint));
        match result {
            Err(error) => assert!(error.is_transport()),
            Ok(body) => panic!("expected transport error, got body {body:?}"),
        }
    }
}
