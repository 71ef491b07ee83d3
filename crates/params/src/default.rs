//! Default values for the bridge parameters.

use causeway_bridge_primitives::amount::{Amount, BasisPoints};

/// Default fee charged on each transfer, in basis points.
pub(crate) const FEE_BPS: BasisPoints = 30;

/// Hard ceiling on the configurable fee rate, in basis points.
///
/// A compromised Admin key can raise the fee, but never past this bound.
pub const MAX_FEE_BPS: BasisPoints = 1_000;

/// Default smallest transfer the bridge accepts.
pub(crate) const MIN_TRANSFER: Amount = Amount::from_units(10_000);

/// Default largest transfer the bridge accepts.
pub(crate) const MAX_TRANSFER: Amount = Amount::from_units(1_000_000_000_000);

/// Default number of confirmations a source transaction needs before a transfer can complete.
pub(crate) const REQUIRED_CONFIRMATIONS: u64 = 6;

/// Default minimum dwell between an emergency pause and the matching resume, in seconds.
pub(crate) const PAUSE_DWELL_SECS: u64 = 3_600;

/// Default number of ancestor headers considered for the median-time plausibility check.
pub(crate) const MEDIAN_TIME_WINDOW: usize = 11;
