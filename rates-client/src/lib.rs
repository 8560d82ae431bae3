//! # Rates Client SDK
//!
//! A typed Rust client for the exchange-rate API.

use rates_types::{RatesResponse, RefreshResponse};
use reqwest::Client;
use serde::de::DeserializeOwned;

/// Error type for client operations.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error: {status} - {message}")]
    Api { status: u16, message: String },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Exchange-rate API client.
pub struct RatesClient {
    base_url: String,
    http: Client,
}

impl RatesClient {
    /// Creates a new client.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            http: Client::new(),
        }
    }

    /// Checks if the API is healthy.
    pub async fn health(&self) -> Result<bool, ClientError> {
        let resp = self
            .http
            .get(format!("{}/health", self.base_url))
            .send()
            .await?;
        Ok(resp.status().is_success())
    }

    /// Gets the current (possibly cached) rates.
    pub async fn get_rates(&self) -> Result<RatesResponse, ClientError> {
        let resp = self
            .http
            .get(format!("{}/api/currency/rates", self.base_url))
            .send()
            .await?;
        self.handle_response(resp).await
    }

    /// Forces the server to refetch rates from its providers.
    pub async fn refresh_rates(&self) -> Result<RefreshResponse, ClientError> {
        let resp = self
            .http
            .post(format!("{}/api/currency/refresh", self.base_url))
            .send()
            .await?;
        self.handle_response(resp).await
    }

    async fn handle_response<T: DeserializeOwned>(
        &self,
        resp: reqwest::Response,
    ) -> Result<T, ClientError> {
        let status = resp.status();
        let body = resp.text().await?;
        if status.is_success() {
            Ok(serde_json::from_str(&body)?)
        } else {
            Err(ClientError::Api {
                status: status.as_u16(),
                message: error_message(&body),
            })
        }
    }
}

/// Pulls a readable message out of an error body.
///
/// Refresh failures carry `message`; other errors carry `error`.
fn error_message(body: &str) -> String {
    serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|v| {
            ["error", "message"]
                .iter()
                .find_map(|key| v.get(*key).and_then(|e| e.as_str()).map(String::from))
        })
        .unwrap_or_else(|| body.to_string())
}
