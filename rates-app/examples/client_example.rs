//! Client example demonstrating the rates API against a running server.
//!
//! Run with: cargo run -p rates-app --example client_example
//!
//! Contacts the real upstream providers; without network access the server
//! answers with fallback rates and the manual refresh reports failure.

use rates_client::{ClientError, RatesClient};
use rates_hex::{HttpRateFetcher, RateService, inbound::HttpServer};
use rates_types::CurrencyCode;
use std::net::SocketAddr;
use tokio::net::TcpListener;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt().with_env_filter("info").init();

    // Find an available port
    let listener = TcpListener::bind("127.0.0.1:0").await?;
    let addr: SocketAddr = listener.local_addr()?;
    let port = addr.port();
    drop(listener);

    println!("🚀 Starting server on port {port}...");

    let service = RateService::new(HttpRateFetcher::new());
    let server = HttpServer::new(service);
    let server_addr = format!("127.0.0.1:{port}");
    tokio::spawn(async move {
        if let Err(e) = server.run(&server_addr).await {
            eprintln!("server error: {e}");
        }
    });

    let client = RatesClient::new(format!("http://127.0.0.1:{port}"));

    // Wait for the server to come up
    for _ in 0..50 {
        if client.health().await.unwrap_or(false) {
            break;
        }
        tokio::time::sleep(std::time::Duration::from_millis(100)).await;
    }

    println!("\n📈 Fetching rates...");
    let rates = client.get_rates().await?;
    println!("   source: {}", rates.source);
    println!("   date:   {}", rates.date);
    for code in [CurrencyCode::EUR, CurrencyCode::GBP, CurrencyCode::INR] {
        if let Some(rate) = rates.rates.get(&code) {
            println!("   1 USD = {rate} {code}");
        }
    }

    println!("\n🔄 Forcing a refresh...");
    match client.refresh_rates().await {
        Ok(refreshed) => println!("   {}", refreshed.message),
        Err(ClientError::Api { status, message }) => {
            println!("   refresh failed ({status}): {message}")
        }
        Err(e) => return Err(e.into()),
    }

    println!("\n✅ Done");
    Ok(())
}
