//! The bridge error taxonomy.
//!
//! Five classes, distinguished by what the caller should do next: fix the input
//! ([`ValidationError`]), obtain the missing capability ([`AuthorizationError`]), inspect
//! current state ([`ConflictError`]), retry later unchanged ([`VerificationError`], the only
//! class whose conditions can become true on their own), or wait for the emergency pause to
//! lift ([`BridgeError::Halted`]). Every error rejects before any state mutation.

use causeway_bridge_primitives::{
    address::{Address, AddressError},
    amount::{Amount, BasisPoints},
    buf::Buf32,
    roles::AuthorizationError,
};
use causeway_bridge_proof_registry::RegistryError;
use causeway_bridge_relay::RelayError;
use thiserror::Error;

use crate::transfer::state::TransferStatus;

/// Any error an externally-invoked bridge operation can return.
#[derive(Debug, Clone, Error)]
pub enum BridgeError {
    /// Malformed or out-of-range input; retry with corrected input.
    #[error("validation failed: {0}")]
    Validation(#[from] ValidationError),

    /// The caller lacks a required capability; never silently downgraded.
    #[error("authorization failed: {0}")]
    Authorization(#[from] AuthorizationError),

    /// The requested change collides with current state; inspect and decide.
    #[error("conflict: {0}")]
    Conflict(#[from] ConflictError),

    /// An external check did not (yet) pass; safe to retry unchanged.
    #[error("external verification failed: {0}")]
    Verification(#[from] VerificationError),

    /// The emergency pause is active; all state-changing calls are rejected uniformly.
    #[error("bridge is halted by emergency pause")]
    Halted,
}

/// The result type for bridge operations.
pub type BridgeResult<T> = Result<T, BridgeError>;

/// Input rejected before touching any state.
#[derive(Debug, Clone, Error)]
pub enum ValidationError {
    /// The source transaction identifier is the zero sentinel.
    #[error("source transaction id must not be zero")]
    ZeroSourceTx,

    /// An address failed syntactic validation.
    #[error(transparent)]
    Address(#[from] AddressError),

    /// The requested amount is below the configured minimum.
    #[error("requested amount {requested} is below the minimum {min}")]
    BelowMinimum {
        /// The rejected amount.
        requested: Amount,
        /// The configured lower bound.
        min: Amount,
    },

    /// The requested amount is above the configured maximum.
    #[error("requested amount {requested} is above the maximum {max}")]
    AboveMaximum {
        /// The rejected amount.
        requested: Amount,
        /// The configured upper bound.
        max: Amount,
    },

    /// A fee-rate update exceeds the hard ceiling.
    #[error("fee rate {fee_bps} bps exceeds the ceiling of {max_bps} bps")]
    FeeTooHigh {
        /// The rejected fee rate.
        fee_bps: BasisPoints,
        /// The ceiling it violates.
        max_bps: BasisPoints,
    },

    /// The payout address offered at claim time does not match the transfer's target.
    #[error("payout address {supplied} does not match the transfer target {expected}")]
    PayoutAddressMismatch {
        /// The address offered at claim time.
        supplied: Address,
        /// The target address bound at initiation.
        expected: Address,
    },

    /// The supplied Merkle proof is not anchored at the transfer's source transaction.
    #[error("merkle proof leaf {leaf} is not the transfer's source transaction {expected}")]
    ProofLeafMismatch {
        /// The leaf the proof is anchored at.
        leaf: Buf32,
        /// The source transaction the transfer is bound to.
        expected: Buf32,
    },

    /// The referenced proof record attests a different subject.
    #[error("proof record {record} does not attest source transaction {expected}")]
    SubjectMismatch {
        /// The referenced proof record.
        record: Buf32,
        /// The source transaction the transfer is bound to.
        expected: Buf32,
    },

    /// A relayed header failed the relay's structural checks.
    #[error(transparent)]
    Header(RelayError),
}

/// The requested change collides with what is already recorded.
#[derive(Debug, Clone, Error)]
pub enum ConflictError {
    /// The source transaction is already bound to a transfer (cancelled ones included; a
    /// burned source id stays burned).
    #[error("source transaction {0} is already bound to a transfer")]
    DuplicateSourceTx(Buf32),

    /// A transfer with the same derived identifier already exists.
    #[error("transfer {0} already exists")]
    DuplicateTransfer(Buf32),

    /// No transfer exists under the given identifier.
    #[error("transfer {0} does not exist")]
    UnknownTransfer(Buf32),

    /// The operation is not defined for the transfer's current status.
    #[error("transfer {id} is {status}; {operation} is not permitted")]
    InvalidTransition {
        /// The transfer in question.
        id: Buf32,
        /// Its current status.
        status: TransferStatus,
        /// The rejected operation.
        operation: &'static str,
    },

    /// The header was already relayed.
    #[error("header {0} was already relayed")]
    DuplicateHeader(Buf32),

    /// A proof record with the same content-derived identifier already exists.
    #[error("proof record {0} was already submitted")]
    DuplicateProofSubmission(Buf32),

    /// No proof record exists under the given identifier.
    #[error("proof record {0} does not exist")]
    UnknownProofRecord(Buf32),

    /// The proof record is already verified.
    #[error("proof record {0} is already verified")]
    ProofAlreadyVerified(Buf32),

    /// Resume was requested while the bridge is not paused.
    #[error("bridge is not paused")]
    NotPaused,
}

/// An external check failed; these conditions can become true later, so retrying the same call
/// is safe and expected.
#[derive(Debug, Clone, Error)]
pub enum VerificationError {
    /// The source transaction's header is not buried deep enough yet.
    #[error("header has {have} confirmations, {need} required")]
    InsufficientConfirmations {
        /// Confirmations currently accrued.
        have: u64,
        /// Confirmations required by the params.
        need: u64,
    },

    /// The inclusion proof did not verify against the canonical header.
    #[error("inclusion proof failed against header {header}")]
    InclusionNotProven {
        /// The header the proof was checked against.
        header: Buf32,
    },

    /// No verified proof record exists for the source transaction.
    #[error("no verified proof record for source transaction {0}")]
    ProofNotVerified(Buf32),

    /// The external verifier rejected the proof record.
    #[error("proof record {0} was rejected by the verifier")]
    VerifierRejected(Buf32),

    /// Resume was requested before the pause dwell elapsed.
    #[error("resume requires {required}s since pause, only {elapsed}s have elapsed")]
    PauseDwellNotElapsed {
        /// Seconds elapsed since the pause.
        elapsed: u64,
        /// The configured minimum dwell.
        required: u64,
    },
}

impl From<RelayError> for BridgeError {
    fn from(err: RelayError) -> Self {
        match err {
            // Re-relaying an accepted header collides with stored state; everything else is
            // malformed input.
            RelayError::DuplicateHeader(id) => {
                BridgeError::Conflict(ConflictError::DuplicateHeader(id))
            }
            other => BridgeError::Validation(ValidationError::Header(other)),
        }
    }
}

impl From<RegistryError> for BridgeError {
    fn from(err: RegistryError) -> Self {
        match err {
            RegistryError::DuplicateSubmission(id) => {
                BridgeError::Conflict(ConflictError::DuplicateProofSubmission(id))
            }
            RegistryError::NotFound(id) => {
                BridgeError::Conflict(ConflictError::UnknownProofRecord(id))
            }
            RegistryError::AlreadyVerified(id) => {
                BridgeError::Conflict(ConflictError::ProofAlreadyVerified(id))
            }
            RegistryError::InvalidProof(id) => {
                BridgeError::Verification(VerificationError::VerifierRejected(id))
            }
        }
    }
}
