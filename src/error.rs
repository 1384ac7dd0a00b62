//! Error types for the CoinSpot client library.

use thiserror::Error;

/// The main error type for all CoinSpot client operations.
#[derive(Error, Debug)]
pub enum CoinSpotError {
    /// HTTP request failed
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// HTTP request with middleware failed
    #[error("HTTP request failed: {0}")]
    HttpMiddleware(#[from] reqwest_middleware::Error),

    /// JSON serialization/deserialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// URL parsing error
    #[error("URL parsing error: {0}")]
    Url(#[from] url::ParseError),

    /// CoinSpot API returned an error status
    #[error("CoinSpot API error: {0}")]
    Api(ApiError),

    /// Invalid response from the API
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// The request payload does not match the endpoint it was sent to
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// TLS trust material could not be loaded
    #[error("TLS configuration error: {0}")]
    Tls(String),

    /// Missing required credentials
    #[error("Missing credentials: API key and secret required for signed endpoints")]
    MissingCredentials,

    /// A detached request task ended without reporting its outcome
    #[error("Request task ended before delivering a result")]
    CompletionDropped,
}

impl CoinSpotError {
    /// Check if this error was raised by the transport (DNS, connect, TLS, socket).
    ///
    /// Transport errors never carry a response body.
    pub fn is_transport(&self) -> bool {
        matches!(self, Self::Http(_) | Self::HttpMiddleware(_))
    }

    /// Check if the exchange answered but the answer could not be used.
    pub fn is_protocol(&self) -> bool {
        matches!(self, Self::Json(_) | Self::InvalidResponse(_))
    }
}

/// Error reported by CoinSpot in a response body.
///
/// CoinSpot answers failed calls with `{"status": "error", "message": "..."}`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiError {
    /// The status string returned by CoinSpot (normally `"error"`)
    pub status: String,
    /// Human-readable error message
    pub message: String,
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.status, self.message)
    }
}

impl ApiError {
    /// Create a new API error from status and message.
    pub fn new(status: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            status: status.into(),
            message: message.into(),
        }
    }

    /// Check if this is an invalid nonce error.
    pub fn is_invalid_nonce(&self) -> bool {
        self.message.to_ascii_lowercase().contains("nonce")
    }

    /// Check if this is an invalid key or signature error.
    pub fn is_invalid_signature(&self) -> bool {
        let message = self.message.to_ascii_lowercase();
        message.contains("invalid key") || message.contains("signature")
    }

    /// Check if this is an insufficient funds error.
    pub fn is_insufficient_funds(&self) -> bool {
        self.message.to_ascii_lowercase().contains("insufficient")
    }
}
