//! Rate snapshot domain model.

use std::fmt;

use chrono::{DateTime, Utc};
use exchange_rates::{BASE_CURRENCY, CurrencyCode, ProviderDescriptor, RateTable, fallback_table};

/// Where the rates in a snapshot came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RateSource {
    /// A live upstream provider, by display name.
    Provider(String),
    /// Static fallback data, or real rates that could not be refreshed.
    Fallback,
}

impl RateSource {
    pub fn as_str(&self) -> &str {
        match self {
            RateSource::Provider(name) => name,
            RateSource::Fallback => "fallback",
        }
    }

    pub fn is_fallback(&self) -> bool {
        matches!(self, RateSource::Fallback)
    }
}

impl fmt::Display for RateSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One USD-based rate table plus its metadata.
///
/// Snapshots are never mutated. Refreshing, degrading and marking a snapshot
/// as forced all produce a new value.
///
/// # Invariants
/// - `rates[USD] == 1.0`
/// - every key belongs to the supported currency set (guaranteed by `CurrencyCode`)
#[derive(Debug, Clone, PartialEq)]
pub struct RateSnapshot {
    generated_at: DateTime<Utc>,
    rates: RateTable,
    source: RateSource,
    origin_endpoint: Option<String>,
    was_forced_refresh: bool,
}

impl RateSnapshot {
    /// Builds a snapshot from a provider's normalized table.
    pub fn from_provider(
        provider: &ProviderDescriptor,
        mut rates: RateTable,
        generated_at: DateTime<Utc>,
    ) -> Self {
        rates.insert(BASE_CURRENCY, 1.0);
        Self {
            generated_at,
            rates,
            source: RateSource::Provider(provider.name.to_string()),
            origin_endpoint: Some(provider.endpoint.to_string()),
            was_forced_refresh: false,
        }
    }

    /// Builds a snapshot from the static fallback table.
    pub fn fallback(generated_at: DateTime<Utc>) -> Self {
        Self {
            generated_at,
            rates: fallback_table(),
            source: RateSource::Fallback,
            origin_endpoint: None,
            was_forced_refresh: false,
        }
    }

    /// Carries these rates forward under a fresh timestamp, tagged as fallback.
    ///
    /// Used when every provider failed but earlier rates are still available:
    /// the rates survive, the claim that they are live does not.
    pub fn degrade(&self, at: DateTime<Utc>) -> Self {
        Self {
            generated_at: at,
            rates: self.rates.clone(),
            source: RateSource::Fallback,
            origin_endpoint: None,
            was_forced_refresh: false,
        }
    }

    /// Marks the snapshot as produced by an explicit refresh.
    pub fn into_forced(self) -> Self {
        Self {
            was_forced_refresh: true,
            ..self
        }
    }

    pub fn base(&self) -> CurrencyCode {
        BASE_CURRENCY
    }

    pub fn generated_at(&self) -> DateTime<Utc> {
        self.generated_at
    }

    pub fn rates(&self) -> &RateTable {
        &self.rates
    }

    pub fn rate(&self, currency: CurrencyCode) -> Option<f64> {
        self.rates.get(&currency).copied()
    }

    pub fn source(&self) -> &RateSource {
        &self.source
    }

    pub fn origin_endpoint(&self) -> Option<&str> {
        self.origin_endpoint.as_deref()
    }

    pub fn was_forced_refresh(&self) -> bool {
        self.was_forced_refresh
    }
}
