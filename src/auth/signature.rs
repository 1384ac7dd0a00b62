//! HMAC-SHA512 signature generation for CoinSpot API authentication.
//!
//! CoinSpot signed endpoints require a signature computed as:
//! ```text
//! hex(HMAC-SHA512(request_body, api_secret))
//! ```
//!
//! The signature is sent in the `sign` header next to the `key` header.
//! The secret is used as raw bytes, and the MAC covers the exact body bytes
//! sent on the wire.

use hmac::{Hmac, Mac};
use sha2::Sha512;

use crate::auth::Credentials;

type HmacSha512 = Hmac<Sha512>;

/// Length of a hex-encoded signature (64 byte digest).
pub const SIGNATURE_HEX_LEN: usize = 128;

/// Sign a request body for CoinSpot's private API.
///
/// # Returns
///
/// Lowercase hex-encoded HMAC-SHA512 of `body`, keyed with the API secret.
///
/// # Example
///
/// ```rust
/// use coinspot_api_client::auth::{Credentials, sign_body};
///
/// let credentials = Credentials::new("api_key", "api_secret");
/// let signature = sign_body(&credentials, r#"{"nonce":1700000000000}"#);
/// assert_eq!(signature.len(), 128);
/// ```
pub fn sign_body(credentials: &Credentials, body: &str) -> String {
    let mut mac = HmacSha512::new_from_slice(credentials.expose_secret().as_bytes())
        .expect("HMAC can take key of any size");
    mac.update(body.as_bytes());
    hex::encode(mac.finalize().into_bytes())
}
