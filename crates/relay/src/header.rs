//! Block headers and their identifier derivation.

use causeway_bridge_primitives::{buf::Buf32, hash::sha256d, time::Timestamp};
use serde::{Deserialize, Serialize};

/// Height of a header above the designated genesis.
pub type BlockHeight = u64;

/// A proof-of-work block header as relayed from the source chain.
///
/// Headers are immutable once accepted. The identifier is never carried in the header itself;
/// it is always recomputed from the fields via [`BlockHeader::compute_id`], so a relayed header
/// cannot lie about its own hash.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlockHeader {
    /// Identifier of the parent header.
    pub prev_id: Buf32,
    /// Root of the Merkle tree committing to the block's transactions.
    pub merkle_root: Buf32,
    /// Block timestamp, seconds since the unix epoch.
    pub timestamp: Timestamp,
    /// Difficulty target as a 256-bit big-endian value; the identifier must not exceed it.
    pub target: Buf32,
    /// Proof-of-work nonce.
    pub nonce: u64,
}

/// Serialized size of a header: two hashes, the target, and two 8-byte integers.
const HEADER_ENCODING_SIZE: usize = 32 + 32 + 8 + 32 + 8;

impl BlockHeader {
    /// Computes the header identifier: the double-SHA-256 of the canonical field encoding.
    ///
    /// Integers are encoded little-endian explicitly, so the identifier is independent of the
    /// platform byte order.
    pub fn compute_id(&self) -> Buf32 {
        let mut encoded = [0u8; HEADER_ENCODING_SIZE];
        encoded[0..32].copy_from_slice(self.prev_id.as_bytes());
        encoded[32..64].copy_from_slice(self.merkle_root.as_bytes());
        encoded[64..72].copy_from_slice(&self.timestamp.to_le_bytes());
        encoded[72..104].copy_from_slice(self.target.as_bytes());
        encoded[104..112].copy_from_slice(&self.nonce.to_le_bytes());
        sha256d(&encoded)
    }

    /// Returns true if `id` satisfies this header's difficulty target.
    ///
    /// Both values are 256-bit big-endian, so the byte-wise lexicographic comparison is the
    /// numeric comparison.
    pub fn meets_target(&self, id: &Buf32) -> bool {
        id.as_bytes() <= self.target.as_bytes()
    }
}
