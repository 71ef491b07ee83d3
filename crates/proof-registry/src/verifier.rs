//! The opaque proving-system capability.

use causeway_bridge_primitives::buf::Buf32;

/// Verifies succinct proofs produced by an external proving toolchain.
///
/// The bridge core only ever consumes this boolean seam; circuit compilation, witness
/// generation and the proof system's internals live entirely behind it.
pub trait ProofVerifier {
    /// Returns true iff `proof_blob` is a valid proof for `circuit_id` over `public_inputs`.
    fn verify(&self, circuit_id: Buf32, proof_blob: &[u8], public_inputs: &[Buf32]) -> bool;
}

impl<V: ProofVerifier + ?Sized> ProofVerifier for &V {
    fn verify(&self, circuit_id: Buf32, proof_blob: &[u8], public_inputs: &[Buf32]) -> bool {
        (**self).verify(circuit_id, proof_blob, public_inputs)
    }
}
