//! Example: Signed account endpoints.
//!
//! Run with: cargo run --example account

use std::sync::Arc;

use coinspot_api_client::auth::{EnvCredentials, IncreasingNonce};
use coinspot_api_client::rest::CoinSpotClient;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();
    let _ = dotenv::dotenv();

    let credentials = match EnvCredentials::try_from_env() {
        Some(creds) => Arc::new(creds),
        None => {
            println!("Set COINSPOT_API_KEY and COINSPOT_API_SECRET to run this example.");
            return Ok(());
        }
    };

    let client = CoinSpotClient::builder()
        .credentials(credentials)
        .nonce_provider(Arc::new(IncreasingNonce::new()))
        .user_agent("coinspot-api-client-examples/account")
        .build()?;

    println!("=== Balances ===");
    let balances = client.balances().await?;
    for (coin, amount) in &balances {
        println!("{coin}: {amount}");
    }

    println!("\n=== Open Orders ===");
    let orders = client.my_orders().await?;
    println!(
        "Buy orders: {}, sell orders: {}",
        orders.buyorders.len(),
        orders.sellorders.len()
    );

    println!("\n=== BTC Deposit Address ===");
    match client.deposit_address("btc").await {
        Ok(address) => println!("{address}"),
        Err(e) => println!("Deposit address unavailable: {e}"),
    }

    Ok(())
}
