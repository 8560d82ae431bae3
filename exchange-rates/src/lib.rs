//! Supported currencies, static fallback rates and upstream provider plumbing.
//!
//! This crate owns everything about exchange rates that does not need IO:
//! - the supported currency set, generated by the `define_currencies!` macro
//! - the compiled-in fallback table served when every provider is down
//! - the ordered provider registry
//! - the normalizer that projects a provider's JSON onto the supported set
//!
//! # Adding a New Currency
//! Add a line to the `define_currencies!` invocation with its fallback rate
//! (units of the currency per 1 USD):
//! ```ignore
//! define_currencies! {
//!     // ... existing currencies ...
//!     TRY => ("TRY", 32.10),
//! }
//! ```
//!
//! # Example
//! ```
//! use exchange_rates::{CurrencyCode, fallback_table};
//!
//! let table = fallback_table();
//! assert_eq!(table[&CurrencyCode::USD], 1.0);
//! assert_eq!("eur".parse::<CurrencyCode>().unwrap(), CurrencyCode::EUR);
//! ```

use std::collections::BTreeMap;

pub mod normalize;
pub mod registry;

pub use normalize::{NormalizationError, normalize};
pub use registry::{ProviderDescriptor, providers};

/// A standardized rate table: units of each currency per 1 USD.
pub type RateTable = BTreeMap<CurrencyCode, f64>;

// ─────────────────────────────────────────────────────────────────────────────
// THE MACRO: Defines the CurrencyCode enum and the fallback table
// ─────────────────────────────────────────────────────────────────────────────

/// Macro to define the supported currency set.
///
/// # Syntax
/// ```ignore
/// define_currencies! {
///     Name => ("CODE", fallback_rate_per_usd),
/// }
/// ```
///
/// Declaration order is the order of `CurrencyCode::all()` and of every
/// serialized rate table.
#[macro_export]
macro_rules! define_currencies {
    (
        $(
            $name:ident => ($code:literal, $fallback:expr)
        ),* $(,)?
    ) => {
        #[derive(
            Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash,
            serde::Serialize, serde::Deserialize, utoipa::ToSchema,
        )]
        #[serde(rename_all = "UPPERCASE")]
        pub enum CurrencyCode {
            $($name),*
        }

        impl CurrencyCode {
            pub fn code(&self) -> &'static str {
                match self {
                    $(CurrencyCode::$name => $code),*
                }
            }

            /// Static rate used when no provider can be reached.
            pub fn fallback_rate(&self) -> f64 {
                match self {
                    $(CurrencyCode::$name => $fallback),*
                }
            }

            pub fn all() -> &'static [CurrencyCode] {
                &[$(CurrencyCode::$name),*]
            }
        }

        impl std::fmt::Display for CurrencyCode {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.code())
            }
        }

        impl std::str::FromStr for CurrencyCode {
            type Err = String;
            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s.to_uppercase().as_str() {
                    $($code => Ok(CurrencyCode::$name),)*
                    _ => Err(format!("Unknown currency: {}", s)),
                }
            }
        }
    };
}

// ─────────────────────────────────────────────────────────────────────────────
// CURRENCY DEFINITIONS - Add new currencies here!
// Fallback rates are market rates as of January 2025.
// ─────────────────────────────────────────────────────────────────────────────

define_currencies! {
    USD => ("USD", 1.0),
    INR => ("INR", 83.15),
    EUR => ("EUR", 0.92),
    GBP => ("GBP", 0.79),
    JPY => ("JPY", 150.25),
    CAD => ("CAD", 1.37),
    AUD => ("AUD", 1.51),
    CNY => ("CNY", 7.15),
    SGD => ("SGD", 1.35),
    CHF => ("CHF", 0.90),
    AED => ("AED", 3.67),
    ZAR => ("ZAR", 18.39),
    BRL => ("BRL", 5.14),
    MXN => ("MXN", 17.04),
    HKD => ("HKD", 7.81),
    SEK => ("SEK", 10.58),
    NZD => ("NZD", 1.64),
    THB => ("THB", 36.25),
    IDR => ("IDR", 15928.30),
    MYR => ("MYR", 4.72),
    PHP => ("PHP", 56.25),
    SAR => ("SAR", 3.75),
    KRW => ("KRW", 1362.26),
    VND => ("VND", 25162.50),
}

/// The base currency every rate table is quoted against.
pub const BASE_CURRENCY: CurrencyCode = CurrencyCode::USD;

/// Builds the static fallback table covering the whole supported set.
pub fn fallback_table() -> RateTable {
    CurrencyCode::all()
        .iter()
        .map(|&c| (c, c.fallback_rate()))
        .collect()
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
