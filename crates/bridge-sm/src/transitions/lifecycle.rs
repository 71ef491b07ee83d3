//! The transfer lifecycle operations: initiate, process, claim, cancel.

use causeway_bridge_primitives::{
    address::Address,
    amount::Amount,
    buf::Buf32,
    merkle::MerkleProof,
    roles::{Capability, Principal},
    time::Clock,
};
use causeway_bridge_proof_registry::ProofVerifier;
use tracing::info;

use crate::{
    errors::{BridgeResult, ConflictError, ValidationError, VerificationError},
    machine::Bridge,
    transfer::{record::Transfer, state::TransferStatus},
};

impl<V, C> Bridge<V, C>
where
    V: ProofVerifier,
    C: Clock,
{
    /// Creates a Pending transfer and burns its source transaction id against replay.
    ///
    /// Requires the Operator capability. The fee is withheld here:
    /// `fee = floor(requested * fee_bps / 10_000)` and the recorded net amount is
    /// `requested - fee`, so the two always sum back to the requested amount exactly.
    pub fn initiate(
        &mut self,
        by: Principal,
        requested: Amount,
        source_tx_id: Buf32,
        source_address: &str,
        target_address: &str,
        salt: Buf32,
    ) -> BridgeResult<Buf32> {
        self.roles.require(by, Capability::Operator)?;
        self.ensure_not_paused()?;

        if source_tx_id.is_zero() {
            return Err(ValidationError::ZeroSourceTx.into());
        }
        let source_address =
            Address::new(source_address).map_err(ValidationError::from)?;
        let target_address =
            Address::new(target_address).map_err(ValidationError::from)?;
        if requested < self.params.min_transfer {
            return Err(ValidationError::BelowMinimum {
                requested,
                min: self.params.min_transfer,
            }
            .into());
        }
        if requested > self.params.max_transfer {
            return Err(ValidationError::AboveMaximum {
                requested,
                max: self.params.max_transfer,
            }
            .into());
        }

        if self.by_source.contains_key(&source_tx_id) {
            return Err(ConflictError::DuplicateSourceTx(source_tx_id).into());
        }

        let (amount, fee) = requested.split_fee(self.params.fee_bps);
        let id = Transfer::derive_id(amount, &source_tx_id, &source_address, &target_address, &salt);
        if self.transfers.contains_key(&id) {
            return Err(ConflictError::DuplicateTransfer(id).into());
        }

        let now = self.now();
        self.transfers.insert(
            id,
            Transfer {
                id,
                amount,
                fee,
                source_tx_id,
                source_address,
                target_address,
                status: TransferStatus::Pending,
                verified: false,
                initiated_at: now,
                processed_at: None,
                claimed_at: None,
                cancelled_at: None,
            },
        );
        self.by_source.insert(source_tx_id, id);
        self.stats.record_initiated(requested);

        info!(transfer=%id, source=%source_tx_id, %amount, %fee, by=%by, "transfer initiated");
        self.debug_assert_stats();
        Ok(id)
    }

    /// Proves a Pending transfer and completes it.
    ///
    /// Requires the Relayer capability. The supplied proof material must reference the stored
    /// source transaction; then the header relay must show the transaction buried under the
    /// required confirmation depth, the inclusion proof must verify against the canonical
    /// header, and a verified proof record must exist for the source transaction. Only the
    /// verification-class failures here are worth retrying unchanged: confirmations accrue
    /// and proof records get verified on their own schedule.
    pub fn process(
        &mut self,
        by: Principal,
        transfer_id: Buf32,
        header_id: Buf32,
        merkle_proof: &MerkleProof,
        proof_record_id: Buf32,
    ) -> BridgeResult<()> {
        self.roles.require(by, Capability::Relayer)?;
        self.ensure_not_paused()?;

        let (status, source_tx_id) = {
            let transfer = self
                .transfers
                .get(&transfer_id)
                .ok_or(ConflictError::UnknownTransfer(transfer_id))?;
            (transfer.status, transfer.source_tx_id)
        };
        if status != TransferStatus::Pending {
            return Err(ConflictError::InvalidTransition {
                id: transfer_id,
                status,
                operation: "process",
            }
            .into());
        }

        if merkle_proof.leaf != source_tx_id {
            return Err(ValidationError::ProofLeafMismatch {
                leaf: merkle_proof.leaf,
                expected: source_tx_id,
            }
            .into());
        }
        let record = self
            .registry
            .record(proof_record_id)
            .ok_or(ConflictError::UnknownProofRecord(proof_record_id))?;
        if record.subject_id != source_tx_id {
            return Err(ValidationError::SubjectMismatch {
                record: proof_record_id,
                expected: source_tx_id,
            }
            .into());
        }

        let have = self.relay.confirmations_of(header_id);
        let need = self.params.required_confirmations;
        if have < need {
            return Err(VerificationError::InsufficientConfirmations { have, need }.into());
        }
        if !self.relay.is_included(source_tx_id, header_id, merkle_proof) {
            return Err(VerificationError::InclusionNotProven { header: header_id }.into());
        }
        if !self.registry.is_verified(source_tx_id) {
            return Err(VerificationError::ProofNotVerified(source_tx_id).into());
        }

        let now = self.now();
        let transfer = self
            .transfers
            .get_mut(&transfer_id)
            .expect("transfer existed above");
        transfer.status = TransferStatus::Completed;
        transfer.verified = true;
        transfer.processed_at = Some(now);
        self.stats.record_completed();

        info!(transfer=%transfer_id, header=%header_id, %have, by=%by, "transfer completed");
        self.debug_assert_stats();
        Ok(())
    }

    /// Releases the counter-payment for a Completed transfer.
    ///
    /// Requires the Operator capability. The payout address binds at claim time and must
    /// equal the target address recorded at initiation; a completed transfer cannot be
    /// redirected.
    pub fn claim(
        &mut self,
        by: Principal,
        transfer_id: Buf32,
        payout_address: &str,
    ) -> BridgeResult<()> {
        self.roles.require(by, Capability::Operator)?;
        self.ensure_not_paused()?;

        let payout = Address::new(payout_address).map_err(ValidationError::from)?;

        let transfer = self
            .transfers
            .get(&transfer_id)
            .ok_or(ConflictError::UnknownTransfer(transfer_id))?;
        if transfer.status != TransferStatus::Completed {
            return Err(ConflictError::InvalidTransition {
                id: transfer_id,
                status: transfer.status,
                operation: "claim",
            }
            .into());
        }
        if payout != transfer.target_address {
            return Err(ValidationError::PayoutAddressMismatch {
                supplied: payout,
                expected: transfer.target_address.clone(),
            }
            .into());
        }

        let now = self.now();
        let transfer = self
            .transfers
            .get_mut(&transfer_id)
            .expect("transfer existed above");
        transfer.status = TransferStatus::Claimed;
        transfer.claimed_at = Some(now);
        self.stats.record_claimed();

        info!(transfer=%transfer_id, payout=%payout, by=%by, "transfer claimed");
        self.debug_assert_stats();
        Ok(())
    }

    /// Cancels a Pending transfer.
    ///
    /// Requires the Admin capability. Completed and Claimed transfers cannot be cancelled,
    /// and the cancelled transfer's source transaction id stays burned forever.
    pub fn cancel(&mut self, by: Principal, transfer_id: Buf32) -> BridgeResult<()> {
        self.roles.require(by, Capability::Admin)?;
        self.ensure_not_paused()?;

        let transfer = self
            .transfers
            .get(&transfer_id)
            .ok_or(ConflictError::UnknownTransfer(transfer_id))?;
        if transfer.status != TransferStatus::Pending {
            return Err(ConflictError::InvalidTransition {
                id: transfer_id,
                status: transfer.status,
                operation: "cancel",
            }
            .into());
        }

        let now = self.now();
        let transfer = self
            .transfers
            .get_mut(&transfer_id)
            .expect("transfer existed above");
        transfer.status = TransferStatus::Cancelled;
        transfer.cancelled_at = Some(now);
        self.stats.record_cancelled();

        info!(transfer=%transfer_id, by=%by, "transfer cancelled");
        self.debug_assert_stats();
        Ok(())
    }
}
