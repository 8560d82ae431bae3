//! Rate limiting middleware using Governor.
//!
//! Every manual refresh spends quota at the upstream providers, so the
//! refresh route is throttled per peer address with a keyed token bucket.

use axum::{
    body::Body,
    extract::{ConnectInfo, State},
    http::Request,
    middleware::Next,
    response::{IntoResponse, Response},
};
use governor::{
    DefaultKeyedRateLimiter, Quota, RateLimiter,
    clock::{Clock as _, DefaultClock},
};
use rates_types::AppError;
use std::{
    net::{IpAddr, Ipv4Addr, SocketAddr},
    num::NonZeroU32,
    sync::Arc,
    sync::atomic::{AtomicU64, Ordering},
};

use super::handlers::ApiError;

/// Default number of manual refreshes a client may issue per minute.
pub const DEFAULT_REFRESHES_PER_MINUTE: NonZeroU32 = NonZeroU32::new(10).unwrap();

/// Idle client buckets are dropped every this many checks.
const PRUNE_EVERY: u64 = 256;

/// Rate limiter state shared across requests.
pub struct RateLimiterState {
    limiter: DefaultKeyedRateLimiter<IpAddr>,
    checks: AtomicU64,
}

impl Default for RateLimiterState {
    fn default() -> Self {
        Self::per_minute(DEFAULT_REFRESHES_PER_MINUTE)
    }
}

impl RateLimiterState {
    /// Creates a limiter allowing `requests` per minute per client, all usable as a burst.
    pub fn per_minute(requests: NonZeroU32) -> Self {
        Self::new(Quota::per_minute(requests))
    }

    pub fn new(quota: Quota) -> Self {
        Self {
            limiter: RateLimiter::keyed(quota),
            checks: AtomicU64::new(0),
        }
    }

    /// Checks if a request from `client` should be rate limited.
    ///
    /// Returns `Err(retry_after_secs)` when the client is over quota.
    pub fn check(&self, client: IpAddr) -> Result<(), u64> {
        if self.checks.fetch_add(1, Ordering::Relaxed) % PRUNE_EVERY == PRUNE_EVERY - 1 {
            self.prune();
        }

        self.limiter.check_key(&client).map_err(|not_until| {
            not_until
                .wait_time_from(DefaultClock::default().now())
                .as_secs()
                .max(1)
        })
    }

    /// Forgets clients whose bucket has fully refilled.
    pub fn prune(&self) {
        self.limiter.retain_recent();
        self.limiter.shrink_to_fit();
    }

    /// Number of clients currently holding a bucket.
    pub fn tracked_clients(&self) -> usize {
        self.limiter.len()
    }
}

/// Identifies the caller by the TCP peer address.
///
/// Requests without connection info (e.g. a router driven in-process) share
/// one bucket.
fn client_key(request: &Request<Body>) -> IpAddr {
    request
        .extensions()
        .get::<ConnectInfo<SocketAddr>>()
        .map(|ConnectInfo(addr)| addr.ip())
        .unwrap_or(IpAddr::V4(Ipv4Addr::UNSPECIFIED))
}

/// Rate limiting middleware.
pub async fn rate_limit_middleware(
    State(limiter): State<Arc<RateLimiterState>>,
    request: Request<Body>,
    next: Next,
) -> Response {
    let client = client_key(&request);

    if let Err(retry_after_secs) = limiter.check(client) {
        tracing::warn!(%client, retry_after_secs, "manual refresh rate limited");
        return ApiError(AppError::TooManyRequests { retry_after_secs }).into_response();
    }

    next.run(request).await
}
