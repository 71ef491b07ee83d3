//! Errors related to parameter validation.

use causeway_bridge_primitives::amount::{Amount, BasisPoints};
use thiserror::Error;

/// Errors that can occur while validating bridge parameters.
#[derive(Debug, Clone, Error)]
pub enum ParamsError {
    /// The configured fee rate exceeds the hard ceiling.
    #[error("fee rate {fee_bps} bps exceeds the ceiling of {max_bps} bps")]
    FeeTooHigh {
        /// The offending fee rate.
        fee_bps: BasisPoints,
        /// The ceiling it violates.
        max_bps: BasisPoints,
    },

    /// The transfer bounds are empty or inverted.
    #[error("transfer bounds [{min}, {max}] are invalid")]
    InvalidBounds {
        /// The configured minimum.
        min: Amount,
        /// The configured maximum.
        max: Amount,
    },

    /// The confirmation requirement is zero.
    ///
    /// A zero-confirmation bridge would complete transfers off unconfirmed transactions.
    #[error("required confirmations must be at least 1")]
    ZeroConfirmations,
}
