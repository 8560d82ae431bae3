//! Outbound adapters (upstream provider clients).

mod http;

pub use http::HttpRateFetcher;
