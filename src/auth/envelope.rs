//! Signed request envelopes.
//!
//! An [`Envelope`] is what CoinSpot needs to authenticate a call: the API key,
//! the canonical JSON body (with an injected `nonce`), and the hex signature of
//! exactly that body. The body is serialized once, and the same string is
//! both signed and transmitted.

use std::sync::Arc;

use serde_json::{Map, Value};

use crate::auth::{CredentialsProvider, IncreasingNonce, NonceProvider, sign_body};

/// Request payload: a JSON object whose field order is kept as inserted.
pub type Payload = Map<String, Value>;

/// Name of the freshness field injected into every signed payload.
pub const NONCE_FIELD: &str = "nonce";

/// A signed request, ready for dispatch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Envelope {
    /// Public API key, sent in the `key` header.
    pub key: String,
    /// Canonical JSON body. Sent verbatim for POST requests.
    pub body: String,
    /// Lowercase hex HMAC-SHA512 of `body`, sent in the `sign` header.
    pub sign: String,
}

/// Binds request payloads to a credential pair.
///
/// # Example
///
/// ```rust
/// use std::sync::Arc;
/// use coinspot_api_client::auth::{Authenticator, StaticCredentials};
///
/// let authenticator = Authenticator::new(Arc::new(StaticCredentials::new("K", "S")));
/// let envelope = authenticator.sign(None);
///
/// assert_eq!(envelope.key, "K");
/// assert_eq!(envelope.sign.len(), 128);
/// assert!(envelope.body.starts_with(r#"{"nonce":"#));
/// ```
#[derive(Clone)]
pub struct Authenticator {
    credentials: Arc<dyn CredentialsProvider>,
    nonce_provider: Arc<dyn NonceProvider>,
}

impl Authenticator {
    /// Create an authenticator with a fresh [`IncreasingNonce`].
    pub fn new(credentials: Arc<dyn CredentialsProvider>) -> Self {
        Self::with_nonce_provider(credentials, Arc::new(IncreasingNonce::new()))
    }

    /// Create an authenticator with a custom nonce provider.
    ///
    /// Share one provider between every authenticator using the same API key.
    pub fn with_nonce_provider(
        credentials: Arc<dyn CredentialsProvider>,
        nonce_provider: Arc<dyn NonceProvider>,
    ) -> Self {
        Self {
            credentials,
            nonce_provider,
        }
    }

    /// The public API key requests are signed for.
    pub fn api_key(&self) -> &str {
        &self.credentials.get_credentials().api_key
    }

    /// Sign a payload with the next nonce.
    ///
    /// `None` is treated as an empty payload.
    pub fn sign(&self, payload: Option<Payload>) -> Envelope {
        self.sign_with_nonce(payload, self.nonce_provider.next_nonce())
    }

    /// Sign a payload with an explicit nonce.
    ///
    /// The nonce is appended as the last field. A `nonce` already present in
    /// the payload is replaced.
    pub fn sign_with_nonce(&self, payload: Option<Payload>, nonce: u64) -> Envelope {
        let mut payload = payload.unwrap_or_default();
        if payload.shift_remove(NONCE_FIELD).is_some() {
            tracing::warn!("payload already contained a nonce field; replacing it");
        }
        payload.insert(NONCE_FIELD.to_string(), Value::from(nonce));

        let body = Value::Object(payload).to_string();
        let credentials = self.credentials.get_credentials();
        let sign = sign_body(credentials, &body);

        Envelope {
            key: credentials.api_key.clone(),
            body,
            sign,
        }
    }
}

impl std::fmt::Debug for Authenticator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Authenticator")
            .field("api_key", &self.api_key())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::StaticCredentials;
    use serde_json::json;

    fn authenticator(key: &str, secret: &str) -> Authenticator {
        Authenticator::new(Arc::new(StaticCredentials::new(key, secret)))
    }

    fn payload(value: Value) -> Payload {
        match value {
            Value::Object(map) => map,
            other => panic!("expected object, got {other}"),
        }
    }

    #[test]
    fn test_empty_payload_envelope() {
        let envelope = authenticator("K", "S").sign(None);

        assert_eq!(envelope.key, "K");
        assert_eq!(envelope.sign.len(), 128);

        let decoded: Payload = serde_json::from_str(&envelope.body).unwrap();
        assert_eq!(decoded.len(), 1);
        let nonce = decoded[NONCE_FIELD].as_u64().unwrap();
        assert!(nonce > 0);
    }

    #[test]
    fn test_body_is_payload_plus_nonce() {
        let original = payload(json!({"cointype": "btc", "amount": 0.5, "rate": 41000}));
        let envelope = authenticator("K", "S").sign(Some(original.clone()));

        let mut decoded: Payload = serde_json::from_str(&envelope.body).unwrap();
        assert!(decoded.shift_remove(NONCE_FIELD).is_some());
        assert_eq!(decoded, original);
    }

    #[test]
    fn test_nonce_is_last_field() {
        let original = payload(json!({"cointype": "btc", "amount": 0.5}));
        let envelope = authenticator("key", "secret").sign_with_nonce(Some(original), 1700000000001);

        assert_eq!(
            envelope.body,
            r#"{"cointype":"btc","amount":0.5,"nonce":1700000000001}"#
        );
        assert_eq!(
            envelope.sign,
            "de1e5b6e1319c020ed0ff6282a1c95463c15bd0523f3015c2f56103b070ce719\
             6bc4a8ce889a4b424d581b3f31d6b937832580601be0ce5ec58db7961b0fc529"
        );
    }

    #[test]
    fn test_existing_nonce_replaced_and_moved_last() {
        let original = payload(json!({"nonce": 1, "id": "abc"}));
        let envelope = authenticator("K", "S").sign_with_nonce(Some(original), 42);

        assert_eq!(envelope.body, r#"{"id":"abc","nonce":42}"#);
    }

    #[test]
    fn test_regression_vector() {
        let original = payload(json!({"a": 1}));
        let envelope = authenticator("K", "s").sign_with_nonce(Some(original), 1700000000000);

        assert_eq!(envelope.body, r#"{"a":1,"nonce":1700000000000}"#);
        assert_eq!(
            envelope.sign,
            "b7003527312413e363ec3a0e8a8499400d68c431ea3b6e112f032a3453e220f0\
             205157620b4ec6ec0f2a4325ea60772289f57db642aeb13e480f2d382a3e146b"
        );
    }

    #[test]
    fn test_successive_signatures_differ() {
        let authenticator = authenticator("K", "S");
        let first = authenticator.sign(Some(Payload::new()));
        let second = authenticator.sign(Some(Payload::new()));

        assert_ne!(first.body, second.body);
        assert_ne!(first.sign, second.sign);
    }

    #[test]
    fn test_different_secret_different_sign() {
        let first = authenticator("K", "one").sign_with_nonce(None, 7);
        let second = authenticator("K", "two").sign_with_nonce(None, 7);

        assert_eq!(first.body, second.body);
        assert_ne!(first.sign, second.sign);
    }

    #[test]
    fn test_debug_hides_secret() {
        let debug_str = format!("{:?}", authenticator("visible_key", "hidden_secret"));
        assert!(debug_str.contains("visible_key"));
        assert!(!debug_str.contains("hidden_secret"));
    }
}
