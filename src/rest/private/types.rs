//! Types for signed REST API endpoints.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::auth::Payload;
use crate::error::CoinSpotError;
use crate::types::coin_symbol;
use crate::types::serde_helpers::{json_decimal, option_json_decimal, string_or_number};

/// Convert a request struct into an ordered payload.
pub(crate) fn into_payload<T: Serialize>(request: &T) -> Result<Payload, CoinSpotError> {
    match serde_json::to_value(request)? {
        serde_json::Value::Object(payload) => Ok(payload),
        other => Err(CoinSpotError::InvalidRequest(format!(
            "request must serialize to an object, got {other}"
        ))),
    }
}

/// Request naming a single coin.
#[derive(Debug, Clone, Serialize)]
pub struct CoinRequest {
    /// Coin symbol, lower case.
    pub cointype: String,
}

impl CoinRequest {
    /// Create a request for `coin`.
    pub fn new(coin: &str) -> Self {
        Self {
            cointype: coin_symbol(coin),
        }
    }
}

/// Request for a quick buy/sell quote.
#[derive(Debug, Clone, Serialize)]
pub struct QuoteRequest {
    /// Coin symbol, lower case.
    pub cointype: String,
    /// Amount of the coin.
    #[serde(with = "json_decimal")]
    pub amount: Decimal,
}

impl QuoteRequest {
    /// Create a quote request.
    pub fn new(coin: &str, amount: Decimal) -> Self {
        Self {
            cointype: coin_symbol(coin),
            amount,
        }
    }
}

/// Request to place a limit order.
#[derive(Debug, Clone, Serialize)]
pub struct PlaceOrderRequest {
    /// Coin symbol, lower case.
    pub cointype: String,
    /// Amount of the coin.
    #[serde(with = "json_decimal")]
    pub amount: Decimal,
    /// Rate in AUD per coin.
    #[serde(with = "json_decimal")]
    pub rate: Decimal,
}

impl PlaceOrderRequest {
    /// Create an order request.
    pub fn new(coin: &str, amount: Decimal, rate: Decimal) -> Self {
        Self {
            cointype: coin_symbol(coin),
            amount,
            rate,
        }
    }
}

/// Request to cancel an order.
#[derive(Debug, Clone, Serialize)]
pub struct CancelOrderRequest {
    /// Order id.
    pub id: String,
}

impl CancelOrderRequest {
    /// Create a cancel request.
    pub fn new(id: impl Into<String>) -> Self {
        Self { id: id.into() }
    }
}

/// One of your open orders.
#[derive(Debug, Clone, Deserialize)]
pub struct MyOrder {
    /// Order id.
    #[serde(deserialize_with = "string_or_number::deserialize")]
    pub id: String,
    /// Coin symbol.
    #[serde(default)]
    pub coin: Option<String>,
    /// Market, e.g. `BTC/AUD`.
    #[serde(default)]
    pub market: Option<String>,
    /// Amount of the coin.
    #[serde(with = "json_decimal")]
    pub amount: Decimal,
    /// Rate per coin.
    #[serde(with = "json_decimal")]
    pub rate: Decimal,
    /// Total value of the order.
    #[serde(default, deserialize_with = "option_json_decimal::deserialize")]
    pub total: Option<Decimal>,
    /// Creation time as sent by CoinSpot.
    #[serde(default)]
    pub created: Option<String>,
}

/// Your open buy and sell orders.
#[derive(Debug, Clone, Deserialize)]
pub struct MyOrders {
    /// Open buy orders.
    #[serde(default)]
    pub buyorders: Vec<MyOrder>,
    /// Open sell orders.
    #[serde(default)]
    pub sellorders: Vec<MyOrder>,
}

/// An open order on the market.
#[derive(Debug, Clone, Deserialize)]
pub struct MarketOrder {
    /// Amount of the coin.
    #[serde(with = "json_decimal")]
    pub amount: Decimal,
    /// Rate per coin.
    #[serde(with = "json_decimal")]
    pub rate: Decimal,
    /// Total value of the order.
    #[serde(default, deserialize_with = "option_json_decimal::deserialize")]
    pub total: Option<Decimal>,
    /// Coin symbol.
    #[serde(default)]
    pub coin: Option<String>,
    /// Market, e.g. `BTC/AUD`.
    #[serde(default)]
    pub market: Option<String>,
}

/// Open market orders for a coin.
#[derive(Debug, Clone, Deserialize)]
pub struct MarketOrders {
    /// Open buy orders.
    #[serde(default)]
    pub buyorders: Vec<MarketOrder>,
    /// Open sell orders.
    #[serde(default)]
    pub sellorders: Vec<MarketOrder>,
}

/// A completed market order.
#[derive(Debug, Clone, Deserialize)]
pub struct CompletedOrder {
    /// Amount of the coin.
    #[serde(with = "json_decimal")]
    pub amount: Decimal,
    /// Rate per coin.
    #[serde(with = "json_decimal")]
    pub rate: Decimal,
    /// Total value of the order.
    #[serde(default, deserialize_with = "option_json_decimal::deserialize")]
    pub total: Option<Decimal>,
    /// Coin symbol.
    #[serde(default)]
    pub coin: Option<String>,
    /// Market, e.g. `BTC/AUD`.
    #[serde(default)]
    pub market: Option<String>,
    /// Time the order completed, as sent by CoinSpot.
    #[serde(default)]
    pub solddate: Option<String>,
}

/// Quick buy or sell quote.
#[derive(Debug, Clone, Deserialize)]
pub struct Quote {
    /// Quoted rate per coin.
    #[serde(with = "json_decimal")]
    pub quote: Decimal,
    /// Estimated time frame in days.
    #[serde(default, deserialize_with = "option_json_decimal::deserialize")]
    pub timeframe: Option<Decimal>,
}

/// Acknowledgement of a placed order.
#[derive(Debug, Clone, Deserialize)]
pub struct OrderAck {
    /// Response status, `"ok"` on success.
    pub status: String,
    /// Order id, when CoinSpot returns one.
    #[serde(default, deserialize_with = "string_or_number::deserialize_option")]
    pub id: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_order_request_field_order() {
        let request = PlaceOrderRequest::new("BTC", Decimal::new(5, 1), Decimal::new(41000, 0));
        let payload = into_payload(&request).unwrap();

        let keys: Vec<&str> = payload.keys().map(String::as_str).collect();
        assert_eq!(keys, ["cointype", "amount", "rate"]);
        assert_eq!(
            serde_json::Value::Object(payload).to_string(),
            r#"{"cointype":"btc","amount":0.5,"rate":41000}"#
        );
    }

    #[test]
    fn test_my_orders_numeric_id() {
        let json = r#"{
            "buyorders": [{"id": 12, "coin": "BTC", "amount": 0.1, "rate": 40000, "total": 4000}],
            "sellorders": []
        }"#;
        let orders: MyOrders = serde_json::from_str(json).unwrap();

        assert_eq!(orders.buyorders[0].id, "12");
        assert_eq!(orders.buyorders[0].total, Some(Decimal::new(4000, 0)));
        assert!(orders.sellorders.is_empty());
    }

    #[test]
    fn test_quote_without_timeframe() {
        let quote: Quote = serde_json::from_str(r#"{"quote": "41000.5"}"#).unwrap();
        assert_eq!(quote.quote, Decimal::new(410005, 1));
        assert!(quote.timeframe.is_none());
    }

    #[test]
    fn test_order_ack_without_id() {
        let ack: OrderAck = serde_json::from_str(r#"{"status": "ok"}"#).unwrap();
        assert_eq!(ack.status, "ok");
        assert!(ack.id.is_none());
    }
}
