//! Integration tests for the currency routes.
//!
//! These drive the full Axum router with an in-memory fetcher and check the
//! wire shapes callers depend on.

mod common;

use axum::{
    body::Body,
    http::{Method, Request, StatusCode},
};
use serde_json::json;
use tower::ServiceExt;

use common::{StaticFetcher, json_body, service};
use rates_hex::inbound::HttpServer;

fn get_rates_request() -> Request<Body> {
    Request::builder()
        .uri("/api/currency/rates")
        .body(Body::empty())
        .unwrap()
}

fn refresh_request() -> Request<Body> {
    Request::builder()
        .method(Method::POST)
        .uri("/api/currency/refresh")
        .body(Body::empty())
        .unwrap()
}

#[tokio::test]
async fn test_health() {
    let server = HttpServer::new(service(StaticFetcher::failing()));
    let response = server
        .router()
        .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(json_body(response.into_body()).await, json!({ "status": "healthy" }));
}

#[tokio::test]
async fn test_get_rates_from_provider() {
    let fetcher = StaticFetcher::responding(json!({ "rates": { "EUR": 0.92, "INR": 83.15 } }));
    let server = HttpServer::new(service(fetcher));

    let response = server.router().oneshot(get_rates_request()).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response.into_body()).await;
    assert_eq!(body["base"], "USD");
    assert_eq!(body["source"], "Primary");
    assert_eq!(body["apiUrl"], "https://primary.test/latest");
    assert_eq!(body["rates"], json!({ "USD": 1.0, "INR": 83.15, "EUR": 0.92 }));
    assert!(body["date"].is_string());
    assert!(body.get("refreshed").is_none());
}

#[tokio::test]
async fn test_get_rates_never_fails() {
    let server = HttpServer::new(service(StaticFetcher::failing()));

    let response = server.router().oneshot(get_rates_request()).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response.into_body()).await;
    assert_eq!(body["source"], "fallback");
    assert_eq!(body["rates"]["USD"], 1.0);
    assert_eq!(body["rates"]["INR"], 83.15);
    assert!(body.get("apiUrl").is_none());
}

#[tokio::test]
async fn test_cached_rates_served_without_fetching() {
    let fetcher = StaticFetcher::responding(json!({ "rates": { "EUR": 0.92 } }));
    let server = HttpServer::new(service(fetcher));
    let app = server.router();

    let first = json_body(app.clone().oneshot(get_rates_request()).await.unwrap().into_body()).await;
    let second = json_body(app.oneshot(get_rates_request()).await.unwrap().into_body()).await;

    assert_eq!(first, second);
    assert_eq!(server.service().fetcher().calls(), 1);
}

#[tokio::test]
async fn test_refresh_success_shape() {
    let fetcher = StaticFetcher::responding(json!({ "rates": { "GBP": 0.79 } }));
    let server = HttpServer::new(service(fetcher));

    let response = server.router().oneshot(refresh_request()).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response.into_body()).await;
    assert_eq!(body["success"], true);
    assert_eq!(body["message"], "Rates refreshed from Primary");
    assert_eq!(body["refreshed"], true);
    assert_eq!(body["rates"]["GBP"], 0.79);
    assert_eq!(body["source"], "Primary");
}

#[tokio::test]
async fn test_refresh_bypasses_cache() {
    let fetcher = StaticFetcher::responding(json!({ "rates": { "EUR": 0.92 } }));
    let server = HttpServer::new(service(fetcher));
    let app = server.router();

    app.clone().oneshot(get_rates_request()).await.unwrap();
    server
        .service()
        .fetcher()
        .set_body(Some(json!({ "rates": { "EUR": 0.95 } })));
    let response = app.oneshot(refresh_request()).await.unwrap();

    let body = json_body(response.into_body()).await;
    assert_eq!(body["rates"]["EUR"], 0.95);
    assert_eq!(server.service().fetcher().calls(), 2);
}

#[tokio::test]
async fn test_refresh_total_failure_is_server_error() {
    let server = HttpServer::new(service(StaticFetcher::failing()));

    let response = server.router().oneshot(refresh_request()).await.unwrap();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(
        json_body(response.into_body()).await,
        json!({
            "success": false,
            "message": "All currency APIs failed during manual refresh",
            "fallback": true
        })
    );
    assert_eq!(server.service().fetcher().calls(), 2);
}

#[tokio::test]
async fn test_openapi_document_is_served() {
    let server = HttpServer::new(service(StaticFetcher::failing()));
    let response = server
        .router()
        .oneshot(
            Request::builder()
                .uri("/api-docs/openapi.json")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response.into_body()).await;
    assert!(body["paths"]["/api/currency/rates"].is_object());
}
