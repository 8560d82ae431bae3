//! Projects a provider's raw JSON response onto the supported currency set.

use serde_json::Value;

use crate::{BASE_CURRENCY, CurrencyCode, ProviderDescriptor, RateTable};

/// Failure to extract a rate table from a provider response.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum NormalizationError {
    #[error("Rate table not found at path '{path}'")]
    MissingPath { path: String },
}

/// Extracts the provider's rate table and builds a standardized one.
///
/// The output always contains `USD -> 1.0`. Every other supported code found
/// in the provider table is copied verbatim; codes the provider lacks are
/// omitted. Entries that are not positive finite numbers are skipped.
pub fn normalize(
    body: &Value,
    provider: &ProviderDescriptor,
) -> Result<RateTable, NormalizationError> {
    let table = lookup_path(body, provider.rates_path)
        .and_then(Value::as_object)
        .ok_or_else(|| NormalizationError::MissingPath {
            path: provider.rates_path.to_string(),
        })?;

    let mut rates = RateTable::new();
    rates.insert(BASE_CURRENCY, 1.0);

    for &currency in CurrencyCode::all() {
        if currency == BASE_CURRENCY {
            continue;
        }
        let Some(entry) = table.get(currency.code()) else {
            continue;
        };
        match entry_rate(entry, provider.value_key) {
            Some(rate) => {
                rates.insert(currency, rate);
            }
            None => {
                tracing::debug!(provider = provider.name, %currency, "skipping unusable rate entry");
            }
        }
    }

    Ok(rates)
}

fn lookup_path<'a>(body: &'a Value, path: &str) -> Option<&'a Value> {
    path.split('.')
        .filter(|segment| !segment.is_empty())
        .try_fold(body, |node, segment| node.get(segment))
}

fn entry_rate(entry: &Value, value_key: Option<&str>) -> Option<f64> {
    let number = match (entry, value_key) {
        (Value::Object(_), Some(key)) => entry.get(key)?,
        _ => entry,
    };
    // a rate at or below zero is never valid, so it counts as missing
    number.as_f64().filter(|rate| rate.is_finite() && *rate > 0.0)
}
