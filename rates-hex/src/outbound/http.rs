//! reqwest-backed rate fetcher.

use std::time::Duration;

use reqwest::Client;
use tracing::instrument;

use rates_types::{ProviderDescriptor, ProviderError, RateFetcher};

/// Fetches provider bodies over HTTPS with a per-request timeout.
#[derive(Debug, Clone, Default)]
pub struct HttpRateFetcher {
    client: Client,
}

impl HttpRateFetcher {
    pub fn new() -> Self {
        Self {
            client: Client::new(),
        }
    }
}

#[async_trait::async_trait]
impl RateFetcher for HttpRateFetcher {
    #[instrument(skip(self, provider), fields(provider = provider.name))]
    async fn fetch(
        &self,
        provider: &ProviderDescriptor,
        timeout: Duration,
    ) -> Result<serde_json::Value, ProviderError> {
        let resp = self
            .client
            .get(provider.endpoint)
            .timeout(timeout)
            .send()
            .await
            .map_err(|e| classify(e, timeout))?;

        let status = resp.status();
        if !status.is_success() {
            return Err(ProviderError::Status(status.as_u16()));
        }

        resp.json::<serde_json::Value>().await.map_err(|e| {
            if e.is_timeout() {
                ProviderError::Timeout(timeout)
            } else {
                ProviderError::Decode(e.to_string())
            }
        })
    }
}

fn classify(err: reqwest::Error, timeout: Duration) -> ProviderError {
    if err.is_timeout() {
        ProviderError::Timeout(timeout)
    } else {
        ProviderError::Transport(err.to_string())
    }
}
