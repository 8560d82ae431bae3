//! Error types for the exchange-rate service.

use std::time::Duration;

use exchange_rates::NormalizationError;

/// A single provider failed. Always recovered by moving to the next provider.
#[derive(Debug, thiserror::Error)]
pub enum ProviderError {
    #[error("Transport error: {0}")]
    Transport(String),

    #[error("Timed out after {0:?}")]
    Timeout(Duration),

    #[error("Unexpected HTTP status {0}")]
    Status(u16),

    #[error("Invalid response body: {0}")]
    Decode(String),

    #[error(transparent)]
    Normalization(#[from] NormalizationError),
}

/// Aggregator-level errors.
#[derive(Debug, thiserror::Error)]
pub enum RateError {
    #[error("All {attempted} currency providers failed")]
    AllProvidersExhausted { attempted: usize },
}

/// Application-level errors (for HTTP responses).
///
/// Maps cleanly to HTTP status codes.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Refresh failed: {0}")]
    RefreshFailed(String),

    #[error("Rate limit exceeded. Please try again later.")]
    TooManyRequests { retry_after_secs: u64 },
}

impl From<RateError> for AppError {
    fn from(err: RateError) -> Self {
        match err {
            RateError::AllProvidersExhausted { .. } => {
                AppError::RefreshFailed("All currency APIs failed during manual refresh".into())
            }
        }
    }
}
