//! Port traits (interfaces for adapters).
//!
//! The aggregator depends on these traits, not on reqwest or the wall clock.

mod clock;
mod fetcher;

pub use clock::{Clock, SystemClock};
pub use fetcher::RateFetcher;
