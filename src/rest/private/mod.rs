//! Signed REST API endpoints (authentication required).
//!
//! These endpoints require API credentials to be configured on the client.
//! Each method builds its payload, then hands the matching row of
//! [`endpoints::private`](crate::rest::endpoints::private) to
//! [`CoinSpotClient::call`].

mod types;

pub use types::*;

use std::collections::HashMap;

use rust_decimal::Decimal;

use crate::auth::Payload;
use crate::error::CoinSpotError;
use crate::rest::CoinSpotClient;
use crate::rest::endpoints::private;
use crate::types::serde_helpers::json_decimal_map;
use crate::types::{Side, coin_symbol};

impl CoinSpotClient {
    /// Get all account balances, keyed by lower-case coin symbol.
    pub async fn balances(&self) -> Result<HashMap<String, Decimal>, CoinSpotError> {
        let balance = self.call(&private::BALANCES, Payload::new()).await?;
        Ok(json_decimal_map::deserialize(balance)?)
    }

    /// Get the balance of one coin.
    ///
    /// A coin absent from the account's balance map has a balance of zero.
    ///
    /// # Example
    ///
    /// ```rust,no_run
    /// use coinspot_api_client::rest::CoinSpotClient;
    /// use coinspot_api_client::auth::StaticCredentials;
    /// use std::sync::Arc;
    ///
    /// #[tokio::main]
    /// async fn main() -> Result<(), Box<dyn std::error::Error>> {
    ///     let credentials = Arc::new(StaticCredentials::new("key", "secret"));
    ///     let client = CoinSpotClient::builder().credentials(credentials).build()?;
    ///
    ///     let balance = client.balance("BTC").await?;
    ///     println!("BTC: {}", balance);
    ///     Ok(())
    /// }
    /// ```
    pub async fn balance(&self, coin: &str) -> Result<Decimal, CoinSpotError> {
        let balances = self.balances().await?;
        Ok(balances
            .get(&coin_symbol(coin))
            .copied()
            .unwrap_or(Decimal::ZERO))
    }

    /// Get your open buy and sell orders.
    pub async fn my_orders(&self) -> Result<MyOrders, CoinSpotError> {
        let response = self.call(&private::MY_ORDERS, Payload::new()).await?;
        Ok(serde_json::from_value(response)?)
    }

    /// Get open market orders for a coin.
    pub async fn orders(&self, coin: &str) -> Result<MarketOrders, CoinSpotError> {
        let payload = into_payload(&CoinRequest::new(coin))?;
        let response = self.call(&private::ORDERS, payload).await?;
        Ok(serde_json::from_value(response)?)
    }

    /// Get completed market orders for a coin.
    pub async fn order_history(&self, coin: &str) -> Result<Vec<CompletedOrder>, CoinSpotError> {
        let payload = into_payload(&CoinRequest::new(coin))?;
        let orders = self.call(&private::ORDER_HISTORY, payload).await?;
        Ok(serde_json::from_value(orders)?)
    }

    /// Get the deposit address for a coin.
    pub async fn deposit_address(&self, coin: &str) -> Result<String, CoinSpotError> {
        let payload = into_payload(&CoinRequest::new(coin))?;
        match self.call(&private::DEPOSIT_ADDRESS, payload).await? {
            serde_json::Value::String(address) => Ok(address),
            other => Err(CoinSpotError::InvalidResponse(format!(
                "deposit address is not a string: {other}"
            ))),
        }
    }

    /// Get a quick quote for buying `amount` of a coin.
    pub async fn quote_buy(&self, coin: &str, amount: Decimal) -> Result<Quote, CoinSpotError> {
        self.quote(Side::Buy, coin, amount).await
    }

    /// Get a quick quote for selling `amount` of a coin.
    pub async fn quote_sell(&self, coin: &str, amount: Decimal) -> Result<Quote, CoinSpotError> {
        self.quote(Side::Sell, coin, amount).await
    }

    /// Get a quick quote for either side.
    pub async fn quote(
        &self,
        side: Side,
        coin: &str,
        amount: Decimal,
    ) -> Result<Quote, CoinSpotError> {
        let endpoint = match side {
            Side::Buy => &private::QUOTE_BUY,
            Side::Sell => &private::QUOTE_SELL,
        };
        let payload = into_payload(&QuoteRequest::new(coin, amount))?;
        let response = self.call(endpoint, payload).await?;
        Ok(serde_json::from_value(response)?)
    }

    /// Place a buy order for `amount` of a coin at `rate`.
    pub async fn place_buy(
        &self,
        coin: &str,
        amount: Decimal,
        rate: Decimal,
    ) -> Result<OrderAck, CoinSpotError> {
        self.place_order(Side::Buy, &PlaceOrderRequest::new(coin, amount, rate))
            .await
    }

    /// Place a sell order for `amount` of a coin at `rate`.
    pub async fn place_sell(
        &self,
        coin: &str,
        amount: Decimal,
        rate: Decimal,
    ) -> Result<OrderAck, CoinSpotError> {
        self.place_order(Side::Sell, &PlaceOrderRequest::new(coin, amount, rate))
            .await
    }

    /// Place an order on either side.
    pub async fn place_order(
        &self,
        side: Side,
        request: &PlaceOrderRequest,
    ) -> Result<OrderAck, CoinSpotError> {
        let endpoint = match side {
            Side::Buy => &private::BUY,
            Side::Sell => &private::SELL,
        };
        let response = self.call(endpoint, into_payload(request)?).await?;
        Ok(serde_json::from_value(response)?)
    }

    /// Cancel a buy order.
    pub async fn cancel_buy(&self, id: &str) -> Result<(), CoinSpotError> {
        self.cancel_order(Side::Buy, &CancelOrderRequest::new(id))
            .await
    }

    /// Cancel a sell order.
    pub async fn cancel_sell(&self, id: &str) -> Result<(), CoinSpotError> {
        self.cancel_order(Side::Sell, &CancelOrderRequest::new(id))
            .await
    }

    /// Cancel an order on either side.
    pub async fn cancel_order(
        &self,
        side: Side,
        request: &CancelOrderRequest,
    ) -> Result<(), CoinSpotError> {
        let endpoint = match side {
            Side::Buy => &private::CANCEL_BUY,
            Side::Sell => &private::CANCEL_SELL,
        };
        self.call(endpoint, into_payload(request)?).await?;
        Ok(())
    }
}
