//! Rates CLI
//!
//! Command-line interface for the exchange-rate API.

use anyhow::Result;
use clap::{Parser, Subcommand};

use rates_client::RatesClient;
use rates_types::{CurrencyCode, RatesResponse};

#[derive(Parser)]
#[command(name = "rates")]
#[command(author, version, about = "Exchange-rate API CLI client", long_about = None)]
struct Cli {
    /// Base URL of the exchange-rate API
    #[arg(long, env = "RATES_API_URL", default_value = "http://localhost:3000")]
    api_url: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show current USD-based rates
    Get {
        /// Only show these currencies (comma-separated, e.g. EUR,INR)
        #[arg(long, value_delimiter = ',')]
        currency: Vec<String>,
    },
    /// Force the server to refetch rates, bypassing its cache
    Refresh,
    /// List the supported currency codes
    Currencies,
    /// Check API health
    Health,
}

fn parse_currencies(codes: &[String]) -> Result<Vec<CurrencyCode>> {
    codes
        .iter()
        .filter(|c| !c.trim().is_empty())
        .map(|c| {
            c.trim().parse::<CurrencyCode>().map_err(|e| {
                let supported: Vec<_> = CurrencyCode::all().iter().map(|c| c.code()).collect();
                anyhow::anyhow!("{}. Supported: {}", e, supported.join(", "))
            })
        })
        .collect()
}

/// Drops every rate not in `only`; an empty filter keeps everything.
fn filter_rates(mut rates: RatesResponse, only: &[CurrencyCode]) -> RatesResponse {
    if !only.is_empty() {
        rates.rates.retain(|code, _| only.contains(code));
    }
    rates
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    let client = RatesClient::new(&cli.api_url);

    match cli.command {
        Commands::Health => {
            let healthy = client.health().await?;
            if healthy {
                println!("✓ API is healthy");
            } else {
                println!("✗ API is not healthy");
                std::process::exit(1);
            }
        }

        Commands::Get { currency } => {
            let only = parse_currencies(&currency)?;
            let rates = filter_rates(client.get_rates().await?, &only);
            if rates.source == "fallback" {
                eprintln!("⚠ No provider reachable, showing fallback rates");
            }
            println!("{}", serde_json::to_string_pretty(&rates)?);
        }

        Commands::Refresh => {
            let refreshed = client.refresh_rates().await?;
            println!("✓ {}", refreshed.message);
            println!("{}", serde_json::to_string_pretty(&refreshed.rates)?);
        }

        Commands::Currencies => {
            for code in CurrencyCode::all() {
                println!("{}", code);
            }
        }
    }

    Ok(())
}
