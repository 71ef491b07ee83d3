//! Merkle root construction, inclusion proof generation and verification.
//!
//! The tree follows the familiar proof-of-work chain convention: leaves are paired left to
//! right, an odd-length level duplicates its *last* element, and levels are reduced with the
//! double-SHA-256 pair hash until one node remains. Proof generation mirrors the exact pairing
//! decisions of root construction; verification recomputes the root from the leaf and compares.
//! The duplication rule is the cross-implementation compatibility contract: generator and
//! verifier must agree on it or inclusion proofs silently fail.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::{buf::Buf32, hash::sha256d};

/// Maximum accepted proof path length.
///
/// A tree over `2^64` leaves is unreachable in practice, so any longer path is fabricated.
pub const MAX_PROOF_DEPTH: usize = 64;

/// Which side of the pair the *sibling* hash occupies at one level of the path.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Direction {
    /// The sibling is the left node; the running hash is the right node.
    Left,
    /// The sibling is the right node; the running hash is the left node.
    Right,
}

/// An inclusion proof tying a leaf to a Merkle root.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MerkleProof {
    /// The leaf hash whose membership is being proven.
    pub leaf: Buf32,
    /// Sibling hashes from the leaf level up to just below the root.
    pub siblings: Vec<Buf32>,
    /// The side each sibling occupies, index-aligned with `siblings`.
    pub directions: Vec<Direction>,
    /// The root the proof claims the leaf belongs to.
    pub root: Buf32,
}

/// Errors that can occur while building Merkle roots or proofs.
#[derive(Debug, Clone, Error)]
pub enum MerkleError {
    /// A tree cannot be built over zero leaves.
    #[error("cannot build a merkle tree over zero leaves")]
    EmptyLeaves,

    /// The requested leaf is not part of the leaf sequence.
    #[error("leaf {0} not found among the tree leaves")]
    LeafNotFound(Buf32),
}

/// Hashes a pair of sibling nodes into their parent.
fn hash_pair(left: &Buf32, right: &Buf32) -> Buf32 {
    let mut concat = [0u8; 64];
    concat[..32].copy_from_slice(left.as_bytes());
    concat[32..].copy_from_slice(right.as_bytes());
    sha256d(&concat)
}

/// Computes the Merkle root over an ordered, non-empty sequence of leaf hashes.
///
/// A single-leaf tree has `root == leaf`.
pub fn build_root(leaves: &[Buf32]) -> Result<Buf32, MerkleError> {
    if leaves.is_empty() {
        return Err(MerkleError::EmptyLeaves);
    }

    let mut level = leaves.to_vec();
    while level.len() > 1 {
        if level.len() % 2 == 1 {
            // Odd level: duplicate the last element, never the first.
            level.push(*level.last().expect("level is non-empty"));
        }
        level = level
            .chunks_exact(2)
            .map(|pair| hash_pair(&pair[0], &pair[1]))
            .collect();
    }

    Ok(level[0])
}

/// Builds an inclusion proof for `target` within `leaves`.
///
/// When the target occurs more than once, the proof is built for its first occurrence. The
/// sibling path and direction bits mirror the pairing decisions of [`build_root`], including
/// the last-element duplication on odd levels.
pub fn build_proof(leaves: &[Buf32], target: Buf32) -> Result<MerkleProof, MerkleError> {
    if leaves.is_empty() {
        return Err(MerkleError::EmptyLeaves);
    }

    let mut idx = leaves
        .iter()
        .position(|leaf| *leaf == target)
        .ok_or(MerkleError::LeafNotFound(target))?;

    let mut level = leaves.to_vec();
    let mut siblings = Vec::new();
    let mut directions = Vec::new();

    while level.len() > 1 {
        if level.len() % 2 == 1 {
            level.push(*level.last().expect("level is non-empty"));
        }

        // The sibling of node `i` is its partner within the pair.
        let sibling_idx = idx ^ 1;
        siblings.push(level[sibling_idx]);
        directions.push(if sibling_idx < idx {
            Direction::Left
        } else {
            Direction::Right
        });

        level = level
            .chunks_exact(2)
            .map(|pair| hash_pair(&pair[0], &pair[1]))
            .collect();
        idx /= 2;
    }

    Ok(MerkleProof {
        leaf: target,
        siblings,
        directions,
        root: level[0],
    })
}

impl MerkleProof {
    /// Verifies the proof by recomputing the root from the leaf.
    ///
    /// Pure and side-effect free. Rejects structurally invalid proofs (mismatched path and
    /// direction lengths, paths deeper than [`MAX_PROOF_DEPTH`]) before doing any hashing, so
    /// fabricated short or oversized paths cannot masquerade as valid trees.
    pub fn verify(&self) -> bool {
        if self.siblings.len() != self.directions.len() {
            return false;
        }
        if self.siblings.len() > MAX_PROOF_DEPTH {
            return false;
        }

        let mut acc = self.leaf;
        for (sibling, direction) in self.siblings.iter().zip(self.directions.iter()) {
            acc = match direction {
                Direction::Left => hash_pair(sibling, &acc),
                Direction::Right => hash_pair(&acc, sibling),
            };
        }

        acc == self.root
    }
}
