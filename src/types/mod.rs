//! Common types used across the CoinSpot client library.

pub mod common;
pub mod serde_helpers;

pub use common::*;
