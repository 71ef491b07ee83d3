//! Economic and operational parameters of the transfer state machine.

use causeway_bridge_primitives::amount::{Amount, BasisPoints};
use serde::{Deserialize, Serialize};

use crate::{
    default::{FEE_BPS, MAX_FEE_BPS, MAX_TRANSFER, MIN_TRANSFER, PAUSE_DWELL_SECS,
        REQUIRED_CONFIRMATIONS},
    errors::ParamsError,
};

/// The parameters governing transfer acceptance, fees and the emergency pause.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BridgeParams {
    /// Fee charged on each transfer at initiation, in basis points.
    pub fee_bps: BasisPoints,
    /// Smallest requested amount the bridge accepts.
    pub min_transfer: Amount,
    /// Largest requested amount the bridge accepts.
    pub max_transfer: Amount,
    /// Confirmation depth a source transaction needs before a transfer can complete.
    pub required_confirmations: u64,
    /// Minimum number of seconds between an emergency pause and the matching resume.
    pub pause_dwell_secs: u64,
}

impl Default for BridgeParams {
    fn default() -> Self {
        Self {
            fee_bps: FEE_BPS,
            min_transfer: MIN_TRANSFER,
            max_transfer: MAX_TRANSFER,
            required_confirmations: REQUIRED_CONFIRMATIONS,
            pause_dwell_secs: PAUSE_DWELL_SECS,
        }
    }
}

impl BridgeParams {
    /// Validates the parameter set.
    ///
    /// Called at construction sites so an invalid configuration never reaches the state
    /// machine.
    pub fn validate(&self) -> Result<(), ParamsError> {
        if self.fee_bps > MAX_FEE_BPS {
            return Err(ParamsError::FeeTooHigh {
                fee_bps: self.fee_bps,
                max_bps: MAX_FEE_BPS,
            });
        }
        if self.min_transfer == Amount::ZERO || self.min_transfer > self.max_transfer {
            return Err(ParamsError::InvalidBounds {
                min: self.min_transfer,
                max: self.max_transfer,
            });
        }
        if self.required_confirmations == 0 {
            return Err(ParamsError::ZeroConfirmations);
        }
        Ok(())
    }
}
