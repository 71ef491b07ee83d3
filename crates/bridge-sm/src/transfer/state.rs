//! The states of a transfer.

use serde::{Deserialize, Serialize};

/// The status of one bridge transfer.
///
/// There is no separate "processing" state: processing is the atomic transition from
/// [`TransferStatus::Pending`] to [`TransferStatus::Completed`]. Once a transfer reaches
/// [`TransferStatus::Claimed`] or [`TransferStatus::Cancelled`] its record is terminal and
/// immutable.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum TransferStatus {
    /// Initiated; the source transaction is reserved but not yet proven.
    Pending,
    /// Proven: inclusion, confirmation depth and the succinct proof all checked out.
    Completed,
    /// The counter-payment was released to the target address.
    Claimed,
    /// Cancelled by an Admin before completion.
    Cancelled,
}

impl TransferStatus {
    /// Returns true for the terminal statuses.
    pub const fn is_terminal(&self) -> bool {
        matches!(self, TransferStatus::Claimed | TransferStatus::Cancelled)
    }
}

impl std::fmt::Display for TransferStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let status = match self {
            TransferStatus::Pending => "Pending",
            TransferStatus::Completed => "Completed",
            TransferStatus::Claimed => "Claimed",
            TransferStatus::Cancelled => "Cancelled",
        };
        write!(f, "{status}")
    }
}
