//! # Rates Hex
//!
//! Application service layer and adapters for the exchange-rate service.
//!
//! ## Architecture
//!
//! - `cache/` - Single-snapshot rate cache
//! - `service/` - Aggregator (provider chain, fallback, forced refresh)
//! - `outbound/` - reqwest adapter for upstream providers
//! - `inbound/` - HTTP adapter (Axum server)
//!
//! The service is generic over `F: RateFetcher`, allowing a scripted
//! fetcher to be injected in tests.

pub mod cache;
pub mod inbound;
mod openapi;
pub mod outbound;
pub mod service;


pub use cache::RateCache;
pub use openapi::ApiDoc;
pub use outbound::HttpRateFetcher;
pub use service::{RateService, RatesConfig};
