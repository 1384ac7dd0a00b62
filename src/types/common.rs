//! Common domain types for the CoinSpot API.

use serde::{Deserialize, Serialize};

/// Buy or sell side of an order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    /// Buy order
    Buy,
    /// Sell order
    Sell,
}

impl std::fmt::Display for Side {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Side::Buy => write!(f, "buy"),
            Side::Sell => write!(f, "sell"),
        }
    }
}

/// Normalize a coin symbol the way CoinSpot keys it (`"BTC"` -> `"btc"`).
pub fn coin_symbol(coin: &str) -> String {
    coin.trim().to_ascii_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_side_serialization() {
        assert_eq!(serde_json::to_string(&Side::Buy).unwrap(), r#""buy""#);
        assert_eq!(Side::Sell.to_string(), "sell");
    }

    #[test]
    fn test_coin_symbol_normalized() {
        assert_eq!(coin_symbol(" BTC "), "btc");
        assert_eq!(coin_symbol("doge"), "doge");
    }
}
