//! Helpers shared by the HTTP integration tests.

#![allow(dead_code)]

use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use axum::body::Body;
use http_body_util::BodyExt;
use serde_json::Value;

use rates_hex::RateService;
use rates_types::{ProviderDescriptor, ProviderError, RateFetcher};

pub const PRIMARY: ProviderDescriptor =
    ProviderDescriptor::new("Primary", "https://primary.test/latest", "rates");
pub const SECONDARY: ProviderDescriptor =
    ProviderDescriptor::new("Secondary", "https://secondary.test/latest", "rates");

/// Answers every provider with the same body, or fails when none is set.
pub struct StaticFetcher {
    body: Mutex<Option<Value>>,
    calls: AtomicUsize,
}

impl StaticFetcher {
    pub fn responding(body: Value) -> Self {
        Self {
            body: Mutex::new(Some(body)),
            calls: AtomicUsize::new(0),
        }
    }

    pub fn failing() -> Self {
        Self {
            body: Mutex::new(None),
            calls: AtomicUsize::new(0),
        }
    }

    pub fn set_body(&self, body: Option<Value>) {
        *self.body.lock().unwrap() = body;
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl RateFetcher for StaticFetcher {
    async fn fetch(
        &self,
        _provider: &ProviderDescriptor,
        _timeout: Duration,
    ) -> Result<Value, ProviderError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.body
            .lock()
            .unwrap()
            .clone()
            .ok_or_else(|| ProviderError::Status(503))
    }
}

/// Service over the two test providers.
pub fn service(fetcher: StaticFetcher) -> RateService<StaticFetcher> {
    RateService::new(fetcher).with_providers(vec![PRIMARY, SECONDARY])
}

pub async fn json_body(body: Body) -> Value {
    let bytes = body.collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}
