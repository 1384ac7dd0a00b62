//! CoinSpot REST API client.
//!
//! Signed calls go through two steps: [`Authenticator::sign`](crate::auth::Authenticator::sign)
//! turns a payload into an [`Envelope`](crate::auth::Envelope), and
//! [`CoinSpotClient::execute`] sends it. The typed methods in [`private`] and
//! [`public`] are driven by the endpoint table in [`endpoints`].
//!
//! # Trait-based API
//!
//! The [`CoinSpotApi`] trait abstracts the typed operations, enabling:
//! - Mock implementations for testing
//! - Decorators around the real client

mod client;
pub mod endpoints;
pub mod private;
pub mod public;
mod tls;
mod traits;

pub use client::{CoinSpotClient, CoinSpotClientBuilder, Completion, KEY_HEADER, SIGN_HEADER};
pub use endpoints::{Access, Endpoint, HttpMethod, PayloadShape, Projection};
pub use tls::TrustPolicy;
pub use traits::CoinSpotApi;
