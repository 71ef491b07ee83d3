//! Proof records and their content-derived identifiers.

use causeway_bridge_primitives::{buf::Buf32, hash::Sha256d, roles::Principal, time::Timestamp};
use serde::{Deserialize, Serialize};

/// One submitted succinct proof, keyed by its content-derived identifier.
///
/// Records are never deleted; the `verified` flag flips `false -> true` exactly once.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProofRecord {
    /// Content-derived identifier; see [`ProofRecord::derive_id`].
    pub id: Buf32,
    /// Identifier of the circuit the proof was produced for.
    pub circuit_id: Buf32,
    /// The source transaction the proof attests about.
    pub subject_id: Buf32,
    /// The opaque proof artifact.
    #[serde(with = "hex::serde")]
    pub proof_blob: Vec<u8>,
    /// Ordered public inputs the proof binds to.
    pub public_inputs: Vec<Buf32>,
    /// Principal that posted the record.
    pub submitted_by: Principal,
    /// Relay height observed at submission time; part of the identifier derivation.
    pub submitted_at_height: u64,
    /// Submission wall-clock time.
    pub submitted_at: Timestamp,
    /// Whether the external verifier has attested this record.
    pub verified: bool,
    /// Principal that triggered the successful verification, if any.
    pub verified_by: Option<Principal>,
    /// Verification wall-clock time, if verified.
    pub verified_at: Option<Timestamp>,
}

impl ProofRecord {
    /// Derives the record identifier from its content and submission height.
    ///
    /// Identical content at the same height maps to the same identifier, which is what makes
    /// duplicate submission detectable; corrected inputs (or a later height) produce a new
    /// identifier.
    pub fn derive_id(
        circuit_id: &Buf32,
        proof_blob: &[u8],
        public_inputs: &[Buf32],
        subject_id: &Buf32,
        submitted_at_height: u64,
    ) -> Buf32 {
        let mut hasher = Sha256d::new();
        hasher.absorb(circuit_id.as_bytes());
        hasher.absorb(proof_blob);
        hasher.absorb_u64(public_inputs.len() as u64);
        for input in public_inputs {
            hasher.absorb(input.as_bytes());
        }
        hasher.absorb(subject_id.as_bytes());
        hasher.absorb_u64(submitted_at_height);
        hasher.finalize()
    }
}
