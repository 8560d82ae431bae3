//! OpenAPI specification and documentation.

#![allow(dead_code)] // Path functions are only used by utoipa for documentation generation

use rates_types::{CurrencyCode, RatesResponse, RefreshFailure, RefreshResponse};
use utoipa::OpenApi;

// Dummy functions to generate path documentation
// These are not the actual handlers, just for OpenAPI path generation

/// Health check endpoint
#[utoipa::path(
    get,
    path = "/health",
    tag = "health",
    responses(
        (status = 200, description = "Service is healthy", body = inline(serde_json::Value), example = json!({"status": "healthy"}))
    )
)]
async fn health() {}

/// Current USD-based exchange rates
///
/// Served from cache for five minutes. When no provider is reachable the
/// response is still 200 with `source` set to `fallback`.
#[utoipa::path(
    get,
    path = "/api/currency/rates",
    tag = "currency",
    responses(
        (status = 200, description = "Current rate table", body = RatesResponse)
    )
)]
async fn get_rates() {}

/// Refetch rates, bypassing the cache
#[utoipa::path(
    post,
    path = "/api/currency/refresh",
    tag = "currency",
    responses(
        (status = 200, description = "Rates refreshed from a live provider", body = RefreshResponse),
        (status = 429, description = "Too many manual refreshes"),
        (status = 500, description = "Every provider failed", body = RefreshFailure)
    )
)]
async fn refresh_rates() {}

/// OpenAPI documentation for the exchange-rate API.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Exchange Rate Service API",
        version = "1.0.0",
        description = "USD-based exchange rates aggregated from several public providers, cached and backed by static fallback data.",
        license(name = "MIT"),
    ),
    paths(health, get_rates, refresh_rates),
    components(schemas(CurrencyCode, RatesResponse, RefreshResponse, RefreshFailure)),
    tags(
        (name = "health", description = "Health check endpoints"),
        (name = "currency", description = "Exchange rate operations"),
    )
)]
pub struct ApiDoc;
