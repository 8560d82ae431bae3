//! HTTP request handlers.

use std::sync::Arc;

use axum::{
    Json,
    extract::State,
    http::{StatusCode, header},
    response::{IntoResponse, Response},
};
use utoipa::OpenApi;

use rates_types::{AppError, RateFetcher, RatesResponse, RefreshFailure, RefreshResponse};

use crate::RateService;
use crate::openapi::ApiDoc;

/// Application state shared across handlers.
pub struct AppState<F: RateFetcher> {
    pub service: RateService<F>,
}

/// Wrapper to implement IntoResponse for AppError (orphan rule workaround).
pub struct ApiError(pub AppError);

impl From<AppError> for ApiError {
    fn from(err: AppError) -> Self {
        ApiError(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self.0 {
            AppError::RefreshFailed(message) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(RefreshFailure::new(message)),
            )
                .into_response(),
            err @ AppError::TooManyRequests { retry_after_secs } => {
                let body = serde_json::json!({
                    "error": err.to_string(),
                    "retry_after_seconds": retry_after_secs
                });
                (
                    StatusCode::TOO_MANY_REQUESTS,
                    [(header::RETRY_AFTER, retry_after_secs.to_string())],
                    Json(body),
                )
                    .into_response()
            }
        }
    }
}

/// Health check endpoint.
pub async fn health() -> impl IntoResponse {
    Json(serde_json::json!({ "status": "healthy" }))
}

/// Serves the OpenAPI document.
pub async fn openapi_json() -> impl IntoResponse {
    Json(ApiDoc::openapi())
}

/// Current exchange rates, cached for the configured TTL.
#[tracing::instrument(skip(state))]
pub async fn get_rates<F: RateFetcher>(State(state): State<Arc<AppState<F>>>) -> impl IntoResponse {
    let snapshot = state.service.get_rates().await;
    if snapshot.source().is_fallback() {
        tracing::warn!("serving fallback rates, no provider reachable");
    }
    Json(RatesResponse::from(&snapshot))
}

/// Refetch exchange rates, bypassing the cache.
#[tracing::instrument(skip(state))]
pub async fn refresh_rates<F: RateFetcher>(
    State(state): State<Arc<AppState<F>>>,
) -> Result<impl IntoResponse, ApiError> {
    let snapshot = state
        .service
        .force_refresh()
        .await
        .map_err(AppError::from)?;
    Ok(Json(RefreshResponse::from(&snapshot)))
}
