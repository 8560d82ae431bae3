//! # Rates Types
//!
//! Domain types and port traits for the exchange-rate service.
//! This crate has ZERO external IO dependencies - only data structures
//! and trait definitions.
//!
//! ## Architecture
//!
//! - `domain/` - Rate snapshot and its source tag
//! - `ports/` - Trait definitions that adapters must implement
//! - `dto/` - Data Transfer Objects for API boundaries
//! - `error/` - Provider, aggregator and application error types

pub mod domain;
pub mod dto;
pub mod error;
pub mod ports;

// Re-export commonly used types
pub use domain::{RateSnapshot, RateSource};
pub use dto::*;
pub use error::{AppError, ProviderError, RateError};
pub use exchange_rates::{CurrencyCode, ProviderDescriptor, RateTable};
pub use ports::{Clock, RateFetcher, SystemClock};
