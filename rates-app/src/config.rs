//! Configuration loading from environment.

use std::env;
use std::num::NonZeroU32;
use std::time::Duration;

use rates_hex::RatesConfig;
use rates_hex::inbound::DEFAULT_REFRESHES_PER_MINUTE;

/// Application configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub port: u16,
    pub rates: RatesConfig,
    pub refreshes_per_minute: NonZeroU32,
}

impl Config {
    /// Loads configuration from environment variables.
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
        let defaults = RatesConfig::default();

        let port = lookup("PORT").unwrap_or_else(|| "3000".to_string()).parse()?;

        let cache_ttl = match lookup("RATES_CACHE_TTL_SECS") {
            Some(v) => Duration::from_secs(v.parse()?),
            None => defaults.cache_ttl,
        };

        let provider_timeout = match lookup("RATES_PROVIDER_TIMEOUT_SECS") {
            Some(v) => Duration::from_secs(v.parse()?),
            None => defaults.provider_timeout,
        };
        if provider_timeout.is_zero() {
            anyhow::bail!("RATES_PROVIDER_TIMEOUT_SECS must be greater than zero");
        }

        let refreshes_per_minute: NonZeroU32 = match lookup("RATES_REFRESH_PER_MINUTE") {
            Some(v) => v
                .parse()
                .map_err(|_| anyhow::anyhow!("RATES_REFRESH_PER_MINUTE must be a positive integer"))?,
            None => DEFAULT_REFRESHES_PER_MINUTE,
        };

        Ok(Self {
            port,
            rates: RatesConfig {
                cache_ttl,
                provider_timeout,
            },
            refreshes_per_minute,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn load(vars: &[(&str, &str)]) -> anyhow::Result<Config> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = load(&[]).unwrap();
        assert_eq!(config.port, 3000);
        assert_eq!(config.rates.cache_ttl, Duration::from_secs(300));
        assert_eq!(config.rates.provider_timeout, Duration::from_secs(10));
        assert_eq!(config.refreshes_per_minute.get(), 10);
    }

    #[test]
    fn test_overrides() {
        let config = load(&[
            ("PORT", "8080"),
            ("RATES_CACHE_TTL_SECS", "60"),
            ("RATES_PROVIDER_TIMEOUT_SECS", "3"),
            ("RATES_REFRESH_PER_MINUTE", "2"),
        ])
        .unwrap();
        assert_eq!(config.port, 8080);
        assert_eq!(config.rates.cache_ttl, Duration::from_secs(60));
        assert_eq!(config.rates.provider_timeout, Duration::from_secs(3));
        assert_eq!(config.refreshes_per_minute.get(), 2);
    }

    #[test]
    fn test_rejects_invalid_values() {
        assert!(load(&[("PORT", "http")]).is_err());
        assert!(load(&[("RATES_PROVIDER_TIMEOUT_SECS", "0")]).is_err());
        assert!(load(&[("RATES_REFRESH_PER_MINUTE", "0")]).is_err());
    }
}
