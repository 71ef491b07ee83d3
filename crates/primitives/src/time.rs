//! The clock capability.
//!
//! State machine code never reads ambient wall-clock time directly; it asks a [`Clock`] it was
//! constructed with. Tests drive time deterministically with a manual implementation.

use std::time::{SystemTime, UNIX_EPOCH};

/// Seconds since the unix epoch.
pub type Timestamp = u64;

/// A source of the current time.
pub trait Clock {
    /// Returns the current time as seconds since the unix epoch.
    fn now(&self) -> Timestamp;
}

impl<C: Clock + ?Sized> Clock for &C {
    fn now(&self) -> Timestamp {
        (**self).now()
    }
}

impl<C: Clock + ?Sized> Clock for std::sync::Arc<C> {
    fn now(&self) -> Timestamp {
        (**self).now()
    }
}

/// The production clock, backed by [`SystemTime`].
#[derive(Copy, Clone, Debug, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Timestamp {
        // A system clock before the epoch is a host misconfiguration; treat it as time zero
        // rather than failing calls that only stamp records.
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|elapsed| elapsed.as_secs())
            .unwrap_or(0)
    }
}
