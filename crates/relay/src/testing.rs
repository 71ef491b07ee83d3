//! Header fixtures for the relay's own tests.
//!
//! The miner searches nonces against a target with one leading zero bit, so each attempt
//! succeeds with probability one half and test chains mine in microseconds.

use causeway_bridge_primitives::{buf::Buf32, hash::Sha256d};

use crate::{header::BlockHeader, relay::HeaderRelay};

/// A target with a single leading zero bit.
pub(crate) const EASY_TARGET: [u8; 32] = {
    let mut bytes = [0xffu8; 32];
    bytes[0] = 0x7f;
    bytes
};

/// The designated genesis used across relay tests.
pub(crate) fn genesis() -> BlockHeader {
    BlockHeader {
        prev_id: Buf32::ZERO,
        merkle_root: Buf32::new([0xaa; 32]),
        timestamp: 1_700_000_000,
        target: Buf32::new(EASY_TARGET),
        nonce: 0,
    }
}

/// Mines a child of `parent` with a synthetic, call-distinct Merkle root.
pub(crate) fn mine_child(relay: &HeaderRelay, parent: Buf32) -> BlockHeader {
    let mut hasher = Sha256d::new();
    hasher.absorb(parent.as_bytes());
    hasher.absorb_u64(relay.len() as u64);
    mine_child_with_root(relay, parent, hasher.finalize())
}

/// Mines a child of `parent` committing to the given Merkle root.
pub(crate) fn mine_child_with_root(
    relay: &HeaderRelay,
    parent: Buf32,
    merkle_root: Buf32,
) -> BlockHeader {
    let parent_ts = relay
        .header(parent)
        .map(|stored| stored.header().timestamp)
        .unwrap_or(1_700_000_000);
    remine(BlockHeader {
        prev_id: parent,
        merkle_root,
        timestamp: parent_ts + 600,
        target: Buf32::new(EASY_TARGET),
        nonce: 0,
    })
}

/// Searches nonces until the header satisfies its own target.
pub(crate) fn remine(mut header: BlockHeader) -> BlockHeader {
    loop {
        let id = header.compute_id();
        if header.meets_target(&id) {
            return header;
        }
        header.nonce += 1;
    }
}
