//! Authentication module for CoinSpot API.
//!
//! This module provides:
//! - Credential management with secure secret storage
//! - Nonce generation for replay attack prevention
//! - HMAC-SHA512 signature generation for authenticated requests
//! - Signed request envelopes

mod credentials;
mod envelope;
mod nonce;
mod signature;

pub use credentials::{
    API_KEY_VAR, API_SECRET_VAR, Credentials, CredentialsProvider, EnvCredentials,
    StaticCredentials,
};
pub use envelope::{Authenticator, Envelope, NONCE_FIELD, Payload};
pub use nonce::{IncreasingNonce, NonceProvider};
pub use signature::{SIGNATURE_HEX_LEN, sign_body};
