//! In-process cache for the most recent rate snapshot.

use std::time::Duration;

use chrono::{DateTime, TimeDelta, Utc};

use rates_types::RateSnapshot;

/// Holds the latest snapshot and the moment it was last fetched.
///
/// The cache never forgets real rates on its own: `invalidate` only drops
/// freshness, and `degrade` carries the previous rates forward.
#[derive(Debug, Default)]
pub struct RateCache {
    snapshot: Option<RateSnapshot>,
    last_fetched_at: Option<DateTime<Utc>>,
}

impl RateCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// True iff a snapshot exists, has not been invalidated, and is younger than `ttl`.
    pub fn is_fresh(&self, now: DateTime<Utc>, ttl: Duration) -> bool {
        let (Some(_), Some(fetched_at)) = (&self.snapshot, self.last_fetched_at) else {
            return false;
        };
        let ttl = TimeDelta::from_std(ttl).unwrap_or(TimeDelta::MAX);
        now - fetched_at < ttl
    }

    pub fn read(&self) -> Option<RateSnapshot> {
        self.snapshot.clone()
    }

    /// Unconditionally stores `snapshot` as the current record.
    pub fn replace(&mut self, snapshot: RateSnapshot) {
        self.last_fetched_at = Some(snapshot.generated_at());
        self.snapshot = Some(snapshot);
    }

    /// Stores the all-providers-failed snapshot and returns it.
    ///
    /// An empty cache gets the static fallback table. Otherwise the previous
    /// rates are kept and only the timestamp and source change.
    pub fn degrade(&mut self, now: DateTime<Utc>) -> RateSnapshot {
        let degraded = match &self.snapshot {
            Some(previous) => previous.degrade(now),
            None => RateSnapshot::fallback(now),
        };
        self.replace(degraded.clone());
        degraded
    }

    /// Drops freshness but keeps the last snapshot for `degrade`.
    pub fn invalidate(&mut self) {
        self.last_fetched_at = None;
    }

    /// Forgets everything, as at process start.
    pub fn clear(&mut self) {
        self.snapshot = None;
        self.last_fetched_at = None;
    }
}
