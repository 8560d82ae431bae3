//! Exchange-Rate Application Service
//!
//! Walks the provider chain through the fetcher port, normalizes the first
//! usable response and keeps the result in the rate cache.
//! Contains NO infrastructure logic - pure orchestration.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::{Mutex, RwLock};
use tracing::{debug, error, info, warn};

use exchange_rates::normalize;
use rates_types::{
    Clock, ProviderDescriptor, ProviderError, RateError, RateFetcher, RateSnapshot, RateTable,
    SystemClock,
};

use crate::cache::RateCache;

/// Startup-time tuning for the aggregator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RatesConfig {
    /// How long a snapshot is served without contacting providers.
    pub cache_ttl: Duration,
    /// Upper bound for a single provider request.
    pub provider_timeout: Duration,
}

impl Default for RatesConfig {
    fn default() -> Self {
        Self {
            cache_ttl: Duration::from_secs(5 * 60),
            provider_timeout: Duration::from_secs(10),
        }
    }
}

/// Terminal states of one provider walk.
#[derive(Debug)]
enum WalkOutcome {
    Succeeded(RateSnapshot),
    AllProvidersFailed { attempted: usize },
}

/// Application service for exchange rates.
///
/// Generic over `F: RateFetcher` - the upstream adapter is injected at compile time.
/// Constructed once at startup and shared by handle; the cache lives here
/// rather than in module globals, so its lifecycle is explicit.
pub struct RateService<F: RateFetcher> {
    fetcher: F,
    clock: Arc<dyn Clock>,
    providers: Vec<ProviderDescriptor>,
    config: RatesConfig,
    cache: RwLock<RateCache>,
    // Serializes provider walks so concurrent cache misses fetch once.
    walk_guard: Mutex<()>,
}

impl<F: RateFetcher> RateService<F> {
    /// Creates a service over the built-in provider registry and the system clock.
    pub fn new(fetcher: F) -> Self {
        Self {
            fetcher,
            clock: Arc::new(SystemClock),
            providers: exchange_rates::providers(),
            config: RatesConfig::default(),
            cache: RwLock::new(RateCache::new()),
            walk_guard: Mutex::new(()),
        }
    }

    pub fn with_config(mut self, config: RatesConfig) -> Self {
        self.config = config;
        self
    }

    /// Replaces the provider registry. Order is preserved as given.
    pub fn with_providers(mut self, providers: Vec<ProviderDescriptor>) -> Self {
        self.providers = providers;
        self
    }

    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    /// Returns a reference to the underlying fetcher.
    pub fn fetcher(&self) -> &F {
        &self.fetcher
    }

    pub fn providers(&self) -> &[ProviderDescriptor] {
        &self.providers
    }

    pub fn config(&self) -> RatesConfig {
        self.config
    }

    // ─────────────────────────────────────────────────────────────────────────────
    // Core Operations
    // ─────────────────────────────────────────────────────────────────────────────

    /// Returns current rates, from cache when fresh.
    ///
    /// Never fails: when every provider is down the result is tagged
    /// `fallback`, carrying the last known rates or the static table.
    #[tracing::instrument(skip(self))]
    pub async fn get_rates(&self) -> RateSnapshot {
        if let Some(snapshot) = self.fresh_snapshot().await {
            debug!("serving cached rates");
            return snapshot;
        }

        let _walk = self.walk_guard.lock().await;

        // Another caller may have refreshed the cache while we waited.
        if let Some(snapshot) = self.fresh_snapshot().await {
            debug!("rates refreshed by a concurrent caller");
            return snapshot;
        }

        match self.walk_providers().await {
            WalkOutcome::Succeeded(snapshot) => {
                self.cache.write().await.replace(snapshot.clone());
                snapshot
            }
            WalkOutcome::AllProvidersFailed { attempted } => {
                warn!(attempted, "all currency providers failed, using fallback rates");
                let now = self.clock.now();
                self.cache.write().await.degrade(now)
            }
        }
    }

    /// Fetches rates from providers regardless of cache freshness.
    ///
    /// Unlike `get_rates`, exhausting the chain is reported as an error. The
    /// previous snapshot is kept but left stale.
    #[tracing::instrument(skip(self))]
    pub async fn force_refresh(&self) -> Result<RateSnapshot, RateError> {
        info!("manual refresh requested, bypassing cache");
        let _walk = self.walk_guard.lock().await;
        self.cache.write().await.invalidate();

        match self.walk_providers().await {
            WalkOutcome::Succeeded(snapshot) => {
                let snapshot = snapshot.into_forced();
                self.cache.write().await.replace(snapshot.clone());
                info!(source = %snapshot.source(), "manual refresh succeeded");
                Ok(snapshot)
            }
            WalkOutcome::AllProvidersFailed { attempted } => {
                error!(attempted, "all currency providers failed during manual refresh");
                Err(RateError::AllProvidersExhausted { attempted })
            }
        }
    }

    /// Returns the cached snapshot without regard to freshness.
    pub async fn cached(&self) -> Option<RateSnapshot> {
        self.cache.read().await.read()
    }

    /// Empties the cache, as at process start.
    pub async fn reset(&self) {
        self.cache.write().await.clear();
    }

    // ─────────────────────────────────────────────────────────────────────────────
    // Provider Chain
    // ─────────────────────────────────────────────────────────────────────────────

    async fn fresh_snapshot(&self) -> Option<RateSnapshot> {
        let now = self.clock.now();
        let cache = self.cache.read().await;
        if cache.is_fresh(now, self.config.cache_ttl) {
            cache.read()
        } else {
            None
        }
    }

    /// Tries providers strictly in registry order; the first success wins.
    async fn walk_providers(&self) -> WalkOutcome {
        for (index, provider) in self.providers.iter().enumerate() {
            info!(provider = provider.name, index, url = provider.endpoint, "fetching rates");
            match self.try_provider(provider).await {
                Ok(rates) => {
                    let snapshot = RateSnapshot::from_provider(provider, rates, self.clock.now());
                    info!(
                        provider = provider.name,
                        currencies = snapshot.rates().len(),
                        "exchange rates updated"
                    );
                    return WalkOutcome::Succeeded(snapshot);
                }
                Err(e) => {
                    warn!(provider = provider.name, error = %e, "currency provider failed");
                }
            }
        }

        WalkOutcome::AllProvidersFailed {
            attempted: self.providers.len(),
        }
    }

    async fn try_provider(&self, provider: &ProviderDescriptor) -> Result<RateTable, ProviderError> {
        let timeout = self.config.provider_timeout;
        let body = tokio::time::timeout(timeout, self.fetcher.fetch(provider, timeout))
            .await
            .map_err(|_| ProviderError::Timeout(timeout))??;

        Ok(normalize(&body, provider)?)
    }
}
