//! Upstream rate fetcher port.
//!
//! Implementations can be HTTP clients, scripted test doubles, etc.

use std::time::Duration;

use exchange_rates::ProviderDescriptor;

use crate::error::ProviderError;

/// Port trait for retrieving one provider's raw response body.
#[async_trait::async_trait]
pub trait RateFetcher: Send + Sync + 'static {
    /// Fetches the provider's JSON body, giving up after `timeout`.
    ///
    /// Any non-success status, transport error or undecodable body is an
    /// error; normalization happens in the caller.
    async fn fetch(
        &self,
        provider: &ProviderDescriptor,
        timeout: Duration,
    ) -> Result<serde_json::Value, ProviderError>;
}
