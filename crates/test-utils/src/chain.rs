//! Deterministic low-difficulty header mining.
//!
//! The target keeps one leading zero bit, so nonce search succeeds after a couple of attempts
//! and whole test chains mine in microseconds while still carrying real proof-of-work.

use causeway_bridge_primitives::{buf::Buf32, hash::Sha256d};
use causeway_bridge_relay::{BlockHeader, HeaderRelay};

/// A target with a single leading zero bit.
pub const EASY_TARGET: [u8; 32] = {
    let mut bytes = [0xffu8; 32];
    bytes[0] = 0x7f;
    bytes
};

/// Timestamp of the test genesis header.
pub const GENESIS_TIMESTAMP: u64 = 1_700_000_000;

/// Spacing between consecutive mined test headers, in seconds.
pub const BLOCK_SPACING: u64 = 600;

/// The designated genesis header used across tests.
pub fn generate_genesis() -> BlockHeader {
    BlockHeader {
        prev_id: Buf32::ZERO,
        merkle_root: Buf32::new([0xaa; 32]),
        timestamp: GENESIS_TIMESTAMP,
        target: Buf32::new(EASY_TARGET),
        nonce: 0,
    }
}

/// Mines a child of `parent` committing to `merkle_root`.
///
/// The parent must already be accepted by the relay.
pub fn mine_child(relay: &HeaderRelay, parent: Buf32, merkle_root: Buf32) -> BlockHeader {
    let parent_ts = relay
        .header(parent)
        .map(|stored| stored.header().timestamp)
        .unwrap_or(GENESIS_TIMESTAMP);
    let mut header = BlockHeader {
        prev_id: parent,
        merkle_root,
        timestamp: parent_ts + BLOCK_SPACING,
        target: Buf32::new(EASY_TARGET),
        nonce: 0,
    };
    loop {
        let id = header.compute_id();
        if header.meets_target(&id) {
            return header;
        }
        header.nonce += 1;
    }
}

/// Mines a child of the canonical tip committing to `merkle_root`.
pub fn mine_on_tip(relay: &HeaderRelay, merkle_root: Buf32) -> BlockHeader {
    mine_child(relay, relay.tip().0, merkle_root)
}

/// Mines and relays `count` filler headers on top of the canonical tip.
///
/// Each filler commits to a synthetic root derived from its parent, so consecutive headers
/// never collide. Returns the accepted header ids in order.
pub fn extend_chain(relay: &mut HeaderRelay, count: usize) -> Vec<Buf32> {
    let mut ids = Vec::with_capacity(count);
    for _ in 0..count {
        let parent = relay.tip().0;
        let mut hasher = Sha256d::new();
        hasher.absorb(parent.as_bytes());
        hasher.absorb_u64(relay.len() as u64);
        let header = mine_child(relay, parent, hasher.finalize());
        let id = relay
            .add_header(header)
            .expect("mined filler headers are always valid");
        ids.push(id);
    }
    ids
}
