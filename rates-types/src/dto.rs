//! Data Transfer Objects (DTOs) for the rates HTTP surface.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use exchange_rates::{CurrencyCode, RateTable};

use crate::domain::RateSnapshot;

// ─────────────────────────────────────────────────────────────────────────────
// Rate DTOs
// ─────────────────────────────────────────────────────────────────────────────

/// Current USD-based exchange rates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RatesResponse {
    pub base: CurrencyCode,
    /// When the rates were produced (ISO 8601)
    #[schema(value_type = String, example = "2025-01-15T12:00:00Z")]
    pub date: DateTime<Utc>,
    /// Units of each currency per 1 USD
    #[schema(value_type = Object, example = json!({"USD": 1.0, "EUR": 0.92, "INR": 83.15}))]
    pub rates: RateTable,
    /// Provider name, or "fallback"
    #[schema(example = "ExchangeRate-API")]
    pub source: String,
    /// Endpoint the rates were fetched from
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_url: Option<String>,
    /// Present and true when produced by a manual refresh
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub refreshed: bool,
}

impl From<&RateSnapshot> for RatesResponse {
    fn from(snapshot: &RateSnapshot) -> Self {
        Self {
            base: snapshot.base(),
            date: snapshot.generated_at(),
            rates: snapshot.rates().clone(),
            source: snapshot.source().to_string(),
            api_url: snapshot.origin_endpoint().map(String::from),
            refreshed: snapshot.was_forced_refresh(),
        }
    }
}

/// Response after a successful manual refresh.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct RefreshResponse {
    pub success: bool,
    #[schema(example = "Rates refreshed from ExchangeRate-API")]
    pub message: String,
    #[serde(flatten)]
    pub rates: RatesResponse,
}

impl From<&RateSnapshot> for RefreshResponse {
    fn from(snapshot: &RateSnapshot) -> Self {
        Self {
            success: true,
            message: format!("Rates refreshed from {}", snapshot.source()),
            rates: snapshot.into(),
        }
    }
}

/// Response when a manual refresh could not reach any provider.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct RefreshFailure {
    pub success: bool,
    #[schema(example = "All currency APIs failed during manual refresh")]
    pub message: String,
    pub fallback: bool,
}

impl RefreshFailure {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: message.into(),
            fallback: true,
        }
    }
}
