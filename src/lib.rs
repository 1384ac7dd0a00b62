//! # CoinSpot Client
//!
//! An async Rust client library for the CoinSpot exchange REST API.
//!
//! ## Features
//!
//! - HMAC-SHA512 request signing with strictly increasing nonces
//! - Signed dispatch over HTTPS with a configurable trust policy
//! - Typed balance, price, quote, order and deposit operations
//! - Financial precision with `rust_decimal`
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use coinspot_api_client::rest::CoinSpotClient;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = CoinSpotClient::new()?;
//!     let btc = client.latest_price("btc").await?;
//!     println!("BTC: {:?}", btc);
//!     Ok(())
//! }
//! ```

pub mod auth;
pub mod error;
pub mod rest;
pub mod types;

// Re-export commonly used types at crate root
pub use error::CoinSpotError;
pub use rest::{CoinSpotClient, CoinSpotClientBuilder};
pub use types::Side;

/// Result type alias using CoinSpotError
pub type Result<T> = std::result::Result<T, CoinSpotError>;
