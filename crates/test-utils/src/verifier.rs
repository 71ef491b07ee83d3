//! Stub proving-system verifiers.

use causeway_bridge_primitives::buf::Buf32;
use causeway_bridge_proof_registry::ProofVerifier;

/// A verifier that attests every proof.
#[derive(Copy, Clone, Debug, Default)]
pub struct AcceptAllVerifier;

impl ProofVerifier for AcceptAllVerifier {
    fn verify(&self, _circuit_id: Buf32, _proof_blob: &[u8], _public_inputs: &[Buf32]) -> bool {
        true
    }
}

/// A verifier that rejects every proof.
#[derive(Copy, Clone, Debug, Default)]
pub struct RejectAllVerifier;

impl ProofVerifier for RejectAllVerifier {
    fn verify(&self, _circuit_id: Buf32, _proof_blob: &[u8], _public_inputs: &[Buf32]) -> bool {
        false
    }
}
