//! Trait definition for the CoinSpot REST API client.
//!
//! The `CoinSpotApi` trait abstracts the typed operations, so application code
//! can be tested against a mock or wrapped with decorators.
//!
//! # Example
//!
//! ```rust,ignore
//! use coinspot_api_client::rest::CoinSpotApi;
//!
//! async fn report<C: CoinSpotApi>(client: &C) -> Result<(), coinspot_api_client::CoinSpotError> {
//!     let btc = client.balance("btc").await?;
//!     println!("BTC: {btc}");
//!     Ok(())
//! }
//! ```

use std::collections::HashMap;
use std::future::Future;

use rust_decimal::Decimal;

use crate::error::CoinSpotError;
use crate::rest::CoinSpotClient;
use crate::rest::private::{CompletedOrder, MarketOrders, MyOrders, OrderAck, Quote};
use crate::rest::public::LatestPrice;

/// Trait defining the CoinSpot REST API operations.
///
/// All methods are async and return `Result<T, CoinSpotError>`.
pub trait CoinSpotApi: Send + Sync {
    // ========== Public Endpoints ==========

    /// Get the latest prices of every coin.
    fn latest_prices(
        &self,
    ) -> impl Future<Output = Result<HashMap<String, LatestPrice>, CoinSpotError>> + Send;

    /// Get the latest price of one coin.
    fn latest_price(
        &self,
        coin: &str,
    ) -> impl Future<Output = Result<Option<LatestPrice>, CoinSpotError>> + Send;

    // ========== Signed Endpoints - Account ==========

    /// Get all account balances.
    fn balances(
        &self,
    ) -> impl Future<Output = Result<HashMap<String, Decimal>, CoinSpotError>> + Send;

    /// Get the balance of one coin, zero when absent.
    fn balance(&self, coin: &str) -> impl Future<Output = Result<Decimal, CoinSpotError>> + Send;

    /// Get your open orders.
    fn my_orders(&self) -> impl Future<Output = Result<MyOrders, CoinSpotError>> + Send;

    /// Get the deposit address for a coin.
    fn deposit_address(
        &self,
        coin: &str,
    ) -> impl Future<Output = Result<String, CoinSpotError>> + Send;

    // ========== Signed Endpoints - Market ==========

    /// Get open market orders for a coin.
    fn orders(&self, coin: &str) -> impl Future<Output = Result<MarketOrders, CoinSpotError>> + Send;

    /// Get completed market orders for a coin.
    fn order_history(
        &self,
        coin: &str,
    ) -> impl Future<Output = Result<Vec<CompletedOrder>, CoinSpotError>> + Send;

    /// Get a quick buy quote.
    fn quote_buy(
        &self,
        coin: &str,
        amount: Decimal,
    ) -> impl Future<Output = Result<Quote, CoinSpotError>> + Send;

    /// Get a quick sell quote.
    fn quote_sell(
        &self,
        coin: &str,
        amount: Decimal,
    ) -> impl Future<Output = Result<Quote, CoinSpotError>> + Send;

    // ========== Signed Endpoints - Trading ==========

    /// Place a buy order.
    fn place_buy(
        &self,
        coin: &str,
        amount: Decimal,
        rate: Decimal,
    ) -> impl Future<Output = Result<OrderAck, CoinSpotError>> + Send;

    /// Place a sell order.
    fn place_sell(
        &self,
        coin: &str,
        amount: Decimal,
        rate: Decimal,
    ) -> impl Future<Output = Result<OrderAck, CoinSpotError>> + Send;

    /// Cancel a buy order.
    fn cancel_buy(&self, id: &str) -> impl Future<Output = Result<(), CoinSpotError>> + Send;

    /// Cancel a sell order.
    fn cancel_sell(&self, id: &str) -> impl Future<Output = Result<(), CoinSpotError>> + Send;
}

impl CoinSpotApi for CoinSpotClient {
    async fn latest_prices(&self) -> Result<HashMap<String, LatestPrice>, CoinSpotError> {
        CoinSpotClient::latest_prices(self).await
    }

    async fn latest_price(&self, coin: &str) -> Result<Option<LatestPrice>, CoinSpotError> {
        CoinSpotClient::latest_price(self, coin).await
    }

    async fn balances(&self) -> Result<HashMap<String, Decimal>, CoinSpotError> {
        CoinSpotClient::balances(self).await
    }

    async fn balance(&self, coin: &str) -> Result<Decimal, CoinSpotError> {
        CoinSpotClient::balance(self, coin).await
    }

    async fn my_orders(&self) -> Result<MyOrders, CoinSpotError> {
        CoinSpotClient::my_orders(self).await
    }

    async fn deposit_address(&self, coin: &str) -> Result<String, CoinSpotError> {
        CoinSpotClient::deposit_address(self, coin).await
    }

    async fn orders(&self, coin: &str) -> Result<MarketOrders, CoinSpotError> {
        CoinSpotClient::orders(self, coin).await
    }

    async fn order_history(&self, coin: &str) -> Result<Vec<CompletedOrder>, CoinSpotError> {
        CoinSpotClient::order_history(self, coin).await
    }

    async fn quote_buy(&self, coin: &str, amount: Decimal) -> Result<Quote, CoinSpotError> {
        CoinSpotClient::quote_buy(self, coin, amount).await
    }

    async fn quote_sell(&self, coin: &str, amount: Decimal) -> Result<Quote, CoinSpotError> {
        CoinSpotClient::quote_sell(self, coin, amount).await
    }

    async fn place_buy(
        &self,
        coin: &str,
        amount: Decimal,
        rate: Decimal,
    ) -> Result<OrderAck, CoinSpotError> {
        CoinSpotClient::place_buy(self, coin, amount, rate).await
    }

    async fn place_sell(
        &self,
        coin: &str,
        amount: Decimal,
        rate: Decimal,
    ) -> Result<OrderAck, CoinSpotError> {
        CoinSpotClient::place_sell(self, coin, amount, rate).await
    }

    async fn cancel_buy(&self, id: &str) -> Result<(), CoinSpotError> {
        CoinSpotClient::cancel_buy(self, id).await
    }

    async fn cancel_sell(&self, id: &str) -> Result<(), CoinSpotError> {
        CoinSpotClient::cancel_sell(self, id).await
    }
}
