//! Example: Public latest prices.
//!
//! Run with: cargo run --example latest_prices

use coinspot_api_client::rest::CoinSpotClient;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt::init();

    let client = CoinSpotClient::new()?;
    let prices = client.latest_prices().await?;

    let mut coins: Vec<_> = prices.keys().cloned().collect();
    coins.sort();
    for coin in coins.iter().take(10) {
        let price = &prices[coin];
        println!(
            "{coin:>6}  bid {:<14} ask {:<14} last {}",
            price.bid, price.ask, price.last
        );
    }

    Ok(())
}
