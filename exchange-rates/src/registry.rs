//! Upstream exchange-rate providers, in priority order.
//!
//! The order here is the fallback order. Callers must try providers strictly
//! in this order and never reorder them based on past results.

use serde::Serialize;

/// Static description of one upstream provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ProviderDescriptor {
    /// Display name, reported as the snapshot `source`.
    pub name: &'static str,
    /// Full URL queried with a plain GET.
    pub endpoint: &'static str,
    /// Dotted path to the rate table inside the JSON body (e.g. `"rates"`).
    pub rates_path: &'static str,
    /// Field holding the number when table entries are objects rather than numbers.
    pub value_key: Option<&'static str>,
}

impl ProviderDescriptor {
    pub const fn new(name: &'static str, endpoint: &'static str, rates_path: &'static str) -> Self {
        Self {
            name,
            endpoint,
            rates_path,
            value_key: None,
        }
    }

    pub const fn with_value_key(mut self, key: &'static str) -> Self {
        self.value_key = Some(key);
        self
    }
}

const REGISTRY: &[ProviderDescriptor] = &[
    ProviderDescriptor::new(
        "ExchangeRate-API",
        "https://api.exchangerate-api.com/v4/latest/USD",
        "rates",
    ),
    ProviderDescriptor::new(
        "Open Exchange Rates",
        "https://open.er-api.com/v6/latest/USD",
        "rates",
    ),
    ProviderDescriptor::new(
        "ExchangeRate-Host",
        "https://api.exchangerate.host/latest?base=USD",
        "rates",
    ),
    ProviderDescriptor::new(
        "FXRates API",
        "https://api.fxratesapi.com/latest?base=USD",
        "rates",
    ),
    ProviderDescriptor::new(
        "CurrencyAPI",
        "https://api.currencyapi.com/v3/latest?apikey=free&currencies=INR,EUR,GBP,JPY,CAD,AUD,CNY,SGD,CHF,AED,ZAR,BRL,MXN,HKD,SEK,NZD,THB,IDR,MYR,PHP,SAR,KRW,VND&base_currency=USD",
        "data",
    )
    .with_value_key("value"),
];

/// Returns the provider registry in fallback priority order.
pub fn providers() -> Vec<ProviderDescriptor> {
    REGISTRY.to_vec()
}
