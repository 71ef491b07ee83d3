//! Derived bridge-wide statistics.
//!
//! The counters are updated incrementally in the same atomic step as every transfer
//! transition; they are never independently stored truth. [`BridgeStatistics::recompute`] is
//! the defining fold, and the state machine asserts the two agree after every transition in
//! debug builds.

use causeway_bridge_primitives::amount::Amount;
use serde::{Deserialize, Serialize};

use crate::transfer::{record::Transfer, state::TransferStatus};

/// Aggregate counters over the whole transfer ledger.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BridgeStatistics {
    /// Transfers ever initiated, regardless of outcome.
    pub total_transfers: u64,
    /// Sum of gross (requested) amounts over all initiated transfers. Never reduced.
    pub total_volume: Amount,
    /// Transfers still in flight: pending or completed-but-unclaimed.
    pub active_count: u64,
    /// Transfers that reached completion, claimed ones included.
    pub completed_count: u64,
    /// Transfers cancelled before completion.
    pub failed_count: u64,
}

impl BridgeStatistics {
    pub(crate) fn record_initiated(&mut self, gross: Amount) {
        self.total_transfers += 1;
        self.total_volume = self
            .total_volume
            .checked_add(gross)
            .expect("cumulative volume fits the amount width");
        self.active_count += 1;
    }

    pub(crate) fn record_completed(&mut self) {
        self.completed_count += 1;
    }

    pub(crate) fn record_claimed(&mut self) {
        self.active_count -= 1;
    }

    pub(crate) fn record_cancelled(&mut self) {
        self.active_count -= 1;
        self.failed_count += 1;
    }

    /// Recomputes the statistics as a fold over transfer records.
    ///
    /// This is the ground truth the incremental counters must always equal.
    pub fn recompute<'a>(transfers: impl IntoIterator<Item = &'a Transfer>) -> Self {
        let mut stats = BridgeStatistics::default();
        for transfer in transfers {
            stats.record_initiated(transfer.requested());
            match transfer.status {
                TransferStatus::Pending => {}
                TransferStatus::Completed => stats.record_completed(),
                TransferStatus::Claimed => {
                    stats.record_completed();
                    stats.record_claimed();
                }
                TransferStatus::Cancelled => stats.record_cancelled(),
            }
        }
        stats
    }
}
