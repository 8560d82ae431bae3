//! Time source port.

use chrono::{DateTime, Utc};

/// Port for time abstraction.
///
/// Production uses the wall clock; tests drive a manual clock to step
/// across the cache TTL without sleeping.
pub trait Clock: Send + Sync + 'static {
    /// Get the current time according to this clock.
    fn now(&self) -> DateTime<Utc>;
}

/// Real system clock.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}
