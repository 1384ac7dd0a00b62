//! Types for public REST API endpoints.

use rust_decimal::Decimal;
use serde::Deserialize;

use crate::types::serde_helpers::json_decimal;

/// Latest bid, ask and last traded price of a coin, in AUD.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct LatestPrice {
    /// Best bid.
    #[serde(with = "json_decimal")]
    pub bid: Decimal,
    /// Best ask.
    #[serde(with = "json_decimal")]
    pub ask: Decimal,
    /// Last traded price.
    #[serde(with = "json_decimal")]
    pub last: Decimal,
}
