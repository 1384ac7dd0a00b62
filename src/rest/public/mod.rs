//! Public REST API endpoints (no authentication required).
//!
//! The latest-price endpoint lives outside the signed API and is fetched
//! without the `key` and `sign` headers.

mod types;

pub use types::*;

use std::collections::HashMap;

use crate::auth::Payload;
use crate::error::CoinSpotError;
use crate::rest::CoinSpotClient;
use crate::rest::endpoints::public;
use crate::types::coin_symbol;

impl CoinSpotClient {
    /// Get the latest prices of every coin, keyed by lower-case symbol.
    ///
    /// # Example
    ///
    /// ```rust,no_run
    /// use coinspot_api_client::rest::CoinSpotClient;
    ///
    /// #[tokio::main]
    /// async fn main() -> Result<(), Box<dyn std::error::Error>> {
    ///     let client = CoinSpotClient::new()?;
    ///     let prices = client.latest_prices().await?;
    ///     if let Some(btc) = prices.get("btc") {
    ///         println!("BTC last: {}", btc.last);
    ///     }
    ///     Ok(())
    /// }
    /// ```
    pub async fn latest_prices(&self) -> Result<HashMap<String, LatestPrice>, CoinSpotError> {
        let prices = self.call(&public::LATEST, Payload::new()).await?;
        let prices: HashMap<String, LatestPrice> = serde_json::from_value(prices)?;
        Ok(prices
            .into_iter()
            .map(|(coin, price)| (coin.to_ascii_lowercase(), price))
            .collect())
    }

    /// Get the latest price of one coin, or `None` if CoinSpot does not list it.
    pub async fn latest_price(&self, coin: &str) -> Result<Option<LatestPrice>, CoinSpotError> {
        let mut prices = self.latest_prices().await?;
        Ok(prices.remove(&coin_symbol(coin)))
    }
}
