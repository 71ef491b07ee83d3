//! Transfer records and their identifier derivation.

use causeway_bridge_primitives::{
    address::Address, amount::Amount, buf::Buf32, hash::Sha256d, time::Timestamp,
};
use serde::{Deserialize, Serialize};

use crate::transfer::state::TransferStatus;

/// One bridge transfer's full lifecycle record, from initiation to claim or cancellation.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transfer {
    /// Derived identifier; see [`Transfer::derive_id`].
    pub id: Buf32,
    /// Amount owed to the target, net of the fee.
    pub amount: Amount,
    /// Fee withheld at initiation; `amount + fee` is exactly the requested amount.
    pub fee: Amount,
    /// The source-chain transaction funding this transfer. Globally unique across all
    /// transfers, cancelled ones included.
    pub source_tx_id: Buf32,
    /// The address the funds came from on the source chain.
    pub source_address: Address,
    /// The address the counter-payment goes to on the target chain.
    pub target_address: Address,
    /// Current lifecycle status.
    pub status: TransferStatus,
    /// Whether the proof checks have passed; set when the transfer completes.
    pub verified: bool,
    /// When the transfer was initiated.
    pub initiated_at: Timestamp,
    /// When the transfer completed, if it has.
    pub processed_at: Option<Timestamp>,
    /// When the transfer was claimed, if it has been.
    pub claimed_at: Option<Timestamp>,
    /// When the transfer was cancelled, if it was.
    pub cancelled_at: Option<Timestamp>,
}

impl Transfer {
    /// Derives the transfer identifier from the net amount, the source binding, the target
    /// address and a caller-supplied salt.
    pub fn derive_id(
        amount: Amount,
        source_tx_id: &Buf32,
        source_address: &Address,
        target_address: &Address,
        salt: &Buf32,
    ) -> Buf32 {
        let mut hasher = Sha256d::new();
        hasher.absorb_u128(amount.to_units());
        hasher.absorb(source_tx_id.as_bytes());
        hasher.absorb(source_address.as_str().as_bytes());
        hasher.absorb(target_address.as_str().as_bytes());
        hasher.absorb(salt.as_bytes());
        hasher.finalize()
    }

    /// The originally requested amount: net amount plus fee.
    pub fn requested(&self) -> Amount {
        self.amount
            .checked_add(self.fee)
            .expect("net amount and fee sum back to the requested amount")
    }
}
