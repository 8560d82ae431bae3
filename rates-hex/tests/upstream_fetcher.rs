//! End-to-end tests for the reqwest fetcher against local fake providers.

use std::time::Duration;

use axum::{Json, Router, http::StatusCode, routing::get};
use serde_json::json;
use tokio::net::TcpListener;

use rates_hex::{HttpRateFetcher, RateService, RatesConfig};
use rates_types::{CurrencyCode, ProviderDescriptor, ProviderError, RateFetcher, RateSource};

/// Starts a fake upstream and returns its base URL.
async fn spawn_upstream() -> String {
    let app = Router::new()
        .route(
            "/v4/latest/USD",
            get(|| async { Json(json!({ "base": "USD", "rates": { "EUR": 0.92, "INR": 83.15 } })) }),
        )
        .route(
            "/v3/latest",
            get(|| async {
                Json(json!({ "data": { "EUR": { "code": "EUR", "value": 0.91 } } }))
            }),
        )
        .route(
            "/down",
            get(|| async { (StatusCode::SERVICE_UNAVAILABLE, "maintenance") }),
        )
        .route("/html", get(|| async { "<html>not json</html>" }))
        .route(
            "/slow",
            get(|| async {
                tokio::time::sleep(Duration::from_secs(5)).await;
                Json(json!({ "rates": {} }))
            }),
        );

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{}", addr)
}

fn provider(name: &'static str, base: &str, path: &str, rates_path: &'static str) -> ProviderDescriptor {
    // Descriptors are 'static; leaking is fine in tests.
    let endpoint: &'static str = Box::leak(format!("{}{}", base, path).into_boxed_str());
    ProviderDescriptor::new(name, endpoint, rates_path)
}

#[tokio::test]
async fn test_fetches_json_body() {
    let base = spawn_upstream().await;
    let fetcher = HttpRateFetcher::new();

    let body = fetcher
        .fetch(&provider("Up", &base, "/v4/latest/USD", "rates"), Duration::from_secs(2))
        .await
        .unwrap();

    assert_eq!(body["rates"]["EUR"], 0.92);
}

#[tokio::test]
async fn test_non_success_status_is_error() {
    let base = spawn_upstream().await;
    let err = HttpRateFetcher::new()
        .fetch(&provider("Down", &base, "/down", "rates"), Duration::from_secs(2))
        .await
        .unwrap_err();

    assert!(matches!(err, ProviderError::Status(503)));
}

#[tokio::test]
async fn test_non_json_body_is_decode_error() {
    let base = spawn_upstream().await;
    let err = HttpRateFetcher::new()
        .fetch(&provider("Html", &base, "/html", "rates"), Duration::from_secs(2))
        .await
        .unwrap_err();

    assert!(matches!(err, ProviderError::Decode(_)));
}

#[tokio::test]
async fn test_slow_provider_times_out() {
    let base = spawn_upstream().await;
    let err = HttpRateFetcher::new()
        .fetch(&provider("Slow", &base, "/slow", "rates"), Duration::from_millis(200))
        .await
        .unwrap_err();

    assert!(matches!(err, ProviderError::Timeout(_)));
}

#[tokio::test]
async fn test_connection_refused_is_transport_error() {
    // Bind and drop to get a port nobody listens on.
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let err = HttpRateFetcher::new()
        .fetch(
            &provider("Gone", &format!("http://{}", addr), "/", "rates"),
            Duration::from_secs(2),
        )
        .await
        .unwrap_err();

    assert!(matches!(err, ProviderError::Transport(_)));
}

#[tokio::test]
async fn test_service_walks_real_http_chain() {
    let base = spawn_upstream().await;
    let service = RateService::new(HttpRateFetcher::new())
        .with_providers(vec![
            provider("Down", &base, "/down", "rates"),
            provider("Slow", &base, "/slow", "rates"),
            provider("Html", &base, "/html", "rates"),
            provider("CurrencyAPI", &base, "/v3/latest", "data").with_value_key("value"),
            provider("ExchangeRate-API", &base, "/v4/latest/USD", "rates"),
        ])
        .with_config(RatesConfig {
            provider_timeout: Duration::from_millis(200),
            ..RatesConfig::default()
        });

    let snapshot = service.get_rates().await;

    assert_eq!(snapshot.source(), &RateSource::Provider("CurrencyAPI".into()));
    assert_eq!(snapshot.rate(CurrencyCode::EUR), Some(0.91));
    assert_eq!(snapshot.rate(CurrencyCode::USD), Some(1.0));
    assert_eq!(snapshot.rate(CurrencyCode::INR), None);
}
