//! HTTP Server configuration and startup.

use std::net::SocketAddr;
use std::num::NonZeroU32;
use std::sync::Arc;

use axum::{
    Router, middleware,
    routing::{get, post},
};
use tower_http::trace::TraceLayer;

use rates_types::RateFetcher;

use super::handlers::{self, AppState};
use super::rate_limit::{RateLimiterState, rate_limit_middleware};
use crate::RateService;

/// HTTP Server for the exchange-rate API.
pub struct HttpServer<F: RateFetcher> {
    state: Arc<AppState<F>>,
    rate_limiter: Arc<RateLimiterState>,
}

impl<F: RateFetcher> HttpServer<F> {
    /// Creates a new HTTP server with the given service.
    pub fn new(service: RateService<F>) -> Self {
        Self {
            state: Arc::new(AppState { service }),
            rate_limiter: Arc::new(RateLimiterState::default()), // 10 refreshes/min default
        }
    }

    /// Creates a new HTTP server with a custom manual-refresh limit.
    pub fn with_refresh_limit(service: RateService<F>, refreshes_per_minute: NonZeroU32) -> Self {
        Self {
            state: Arc::new(AppState { service }),
            rate_limiter: Arc::new(RateLimiterState::per_minute(refreshes_per_minute)),
        }
    }

    /// Returns the service behind this server.
    pub fn service(&self) -> &RateService<F> {
        &self.state.service
    }

    /// Returns the limiter guarding manual refreshes.
    pub fn refresh_limiter(&self) -> &RateLimiterState {
        &self.rate_limiter
    }

    /// Builds the Axum router with all routes.
    pub fn router(&self) -> Router {
        // Build HTTP metrics layer (uses globally set MeterProvider)
        let metrics = axum_otel_metrics::HttpMetricsLayerBuilder::new().build();

        let refresh = post(handlers::refresh_rates::<F>).layer(middleware::from_fn_with_state(
            self.rate_limiter.clone(),
            rate_limit_middleware,
        ));

        Router::new()
            .route("/health", get(handlers::health))
            .route("/api-docs/openapi.json", get(handlers::openapi_json))
            .route("/api/currency/rates", get(handlers::get_rates::<F>))
            .route("/api/currency/refresh", refresh)
            .layer(metrics)
            .layer(TraceLayer::new_for_http())
            .with_state(self.state.clone())
    }

    /// Runs the server on the given address with graceful shutdown.
    pub async fn run(self, addr: &str) -> anyhow::Result<()> {
        let listener = tokio::net::TcpListener::bind(addr).await?;
        tracing::info!("Server listening on {}", listener.local_addr()?);

        // peer addresses key the refresh limiter
        let app = self.router().into_make_service_with_connect_info::<SocketAddr>();
        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        Ok(())
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!("failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received, starting graceful shutdown...");
}
