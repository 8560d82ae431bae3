//! Domain models for the exchange-rate service.

pub mod snapshot;

pub use snapshot::{RateSnapshot, RateSource};
