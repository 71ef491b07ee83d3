//! Errors raised by the proof registry.

use causeway_bridge_primitives::buf::Buf32;
use thiserror::Error;

/// Errors that can occur while submitting or verifying proof records.
#[derive(Debug, Clone, Error)]
pub enum RegistryError {
    /// A record with the same content-derived identifier already exists.
    #[error("proof record {0} was already submitted")]
    DuplicateSubmission(Buf32),

    /// No record exists under the given identifier.
    #[error("proof record {0} does not exist")]
    NotFound(Buf32),

    /// The record was already verified; verification happens exactly once.
    #[error("proof record {0} is already verified")]
    AlreadyVerified(Buf32),

    /// The external verifier rejected the proof.
    ///
    /// The record stays unverified: verification may be retried, and a corrected resubmission
    /// derives a fresh record identifier since identifiers are content-derived.
    #[error("proof record {0} was rejected by the verifier")]
    InvalidProof(Buf32),
}

/// The result type for registry operations.
pub type RegistryResult<T> = Result<T, RegistryError>;
