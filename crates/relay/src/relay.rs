//! The fork-aware header store and its derived queries.

use std::collections::BTreeMap;

use causeway_bridge_params::relay::RelayParams;
use causeway_bridge_primitives::{buf::Buf32, merkle::MerkleProof, time::Timestamp};
use tracing::{debug, info, warn};

use crate::{
    errors::{RelayError, RelayResult},
    header::{BlockHeader, BlockHeight},
    work::Work,
};

/// A header the relay has accepted, together with its derived position data.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StoredHeader {
    header: BlockHeader,
    id: Buf32,
    height: BlockHeight,
    chain_work: Work,
}

impl StoredHeader {
    /// The header as relayed.
    pub const fn header(&self) -> &BlockHeader {
        &self.header
    }

    /// The recomputed header identifier.
    pub const fn id(&self) -> Buf32 {
        self.id
    }

    /// Height above genesis.
    pub const fn height(&self) -> BlockHeight {
        self.height
    }

    /// Cumulative work of the branch ending at this header.
    pub const fn chain_work(&self) -> Work {
        self.chain_work
    }
}

/// The append-only, fork-aware header relay.
///
/// Every accepted header stays accepted; competing branches coexist in the store and the
/// canonical branch is simply the one whose tip carries the greatest cumulative work. There is
/// no reorg entry point; canonical reselection is automatic recomputation as headers arrive.
#[derive(Clone, Debug)]
pub struct HeaderRelay {
    params: RelayParams,
    headers: BTreeMap<Buf32, StoredHeader>,
    /// Height-indexed view of the canonical branch, maintained on tip changes.
    canonical: BTreeMap<BlockHeight, Buf32>,
    tip: Buf32,
}

impl HeaderRelay {
    /// Creates a relay anchored at the designated genesis header.
    ///
    /// The genesis is accepted verbatim at height zero: it is exempt from the parent,
    /// proof-of-work and timestamp checks, but its identifier is still recomputed from its
    /// fields rather than trusted.
    pub fn new(genesis: BlockHeader, params: RelayParams) -> Self {
        let id = genesis.compute_id();
        let stored = StoredHeader {
            header: genesis,
            id,
            height: 0,
            chain_work: Work::ZERO,
        };

        info!(genesis=%id, "initializing header relay");

        let mut headers = BTreeMap::new();
        headers.insert(id, stored);
        let mut canonical = BTreeMap::new();
        canonical.insert(0, id);

        Self {
            params,
            headers,
            canonical,
            tip: id,
        }
    }

    /// Validates and stores a header; `Unknown -> Accepted` is the only transition.
    ///
    /// Checks run in cost order: duplicate detection, parent linkage, target sanity,
    /// proof-of-work, then timestamp plausibility against the ancestor median. On success the
    /// header extends whichever branch its parent belongs to, and the canonical tip is
    /// reselected if that branch now carries strictly more work than the incumbent.
    pub fn add_header(&mut self, header: BlockHeader) -> RelayResult<Buf32> {
        let id = header.compute_id();
        if self.headers.contains_key(&id) {
            return Err(RelayError::DuplicateHeader(id));
        }

        let parent = self
            .headers
            .get(&header.prev_id)
            .ok_or(RelayError::UnknownParent(header.prev_id))?;

        if header.target.is_zero() {
            return Err(RelayError::ZeroTarget);
        }
        if !header.meets_target(&id) {
            return Err(RelayError::InvalidProofOfWork {
                id,
                target: header.target,
            });
        }

        let median = self.median_time_past(header.prev_id);
        if header.timestamp <= median {
            return Err(RelayError::NonMonotonicTime {
                timestamp: header.timestamp,
                median,
            });
        }

        let height = parent.height + 1;
        let chain_work = parent
            .chain_work
            .saturating_add(Work::from_target(header.target.as_bytes()));
        self.headers.insert(
            id,
            StoredHeader {
                header,
                id,
                height,
                chain_work,
            },
        );
        debug!(header=%id, %height, "accepted header");

        if chain_work > self.tip_work() {
            self.reselect_canonical(id, height);
        }

        Ok(id)
    }

    /// Number of canonical headers above the given one; zero for unknown or non-canonical
    /// headers.
    pub fn confirmations_of(&self, header_id: Buf32) -> u64 {
        let Some(stored) = self.headers.get(&header_id) else {
            return 0;
        };
        if self.canonical.get(&stored.height) != Some(&header_id) {
            return 0;
        }
        self.tip_height() - stored.height
    }

    /// Returns true iff `tx_id` is proven included in the canonical header `header_id`.
    ///
    /// The proof must be anchored at the supplied transaction id, commit to the header's
    /// Merkle root, and verify.
    pub fn is_included(&self, tx_id: Buf32, header_id: Buf32, proof: &MerkleProof) -> bool {
        let Some(stored) = self.headers.get(&header_id) else {
            return false;
        };
        if self.canonical.get(&stored.height) != Some(&header_id) {
            return false;
        }
        proof.leaf == tx_id && proof.root == stored.header.merkle_root && proof.verify()
    }

    /// The canonical tip: identifier and height.
    pub fn tip(&self) -> (Buf32, BlockHeight) {
        (self.tip, self.tip_height())
    }

    /// Height of the canonical tip.
    pub fn tip_height(&self) -> BlockHeight {
        self.stored(self.tip).height
    }

    /// Looks up an accepted header by identifier.
    pub fn header(&self, id: Buf32) -> Option<&StoredHeader> {
        self.headers.get(&id)
    }

    /// Height of an accepted header, on whichever branch it sits.
    pub fn height_of(&self, id: Buf32) -> Option<BlockHeight> {
        self.headers.get(&id).map(|stored| stored.height)
    }

    /// Returns true if the header has been accepted (on any branch).
    pub fn contains(&self, id: Buf32) -> bool {
        self.headers.contains_key(&id)
    }

    /// Number of accepted headers, the genesis included.
    pub fn len(&self) -> usize {
        self.headers.len()
    }

    /// Always false: the relay is constructed around a genesis header.
    pub fn is_empty(&self) -> bool {
        false
    }

    fn stored(&self, id: Buf32) -> &StoredHeader {
        self.headers.get(&id).expect("id refers to a stored header")
    }

    fn tip_work(&self) -> Work {
        self.stored(self.tip).chain_work
    }

    /// Median timestamp over up to `median_time_window` headers ending at `id`.
    ///
    /// With an even window the upper median is used. The window shrinks near genesis.
    fn median_time_past(&self, id: Buf32) -> Timestamp {
        let mut timestamps = Vec::with_capacity(self.params.median_time_window);
        let mut cursor = id;
        for _ in 0..self.params.median_time_window {
            let stored = self.stored(cursor);
            timestamps.push(stored.header.timestamp);
            if stored.height == 0 {
                break;
            }
            cursor = stored.header.prev_id;
        }
        timestamps.sort_unstable();
        timestamps[timestamps.len() / 2]
    }

    /// Installs `new_tip` as canonical and reconciles the height index.
    ///
    /// Walks back from the new tip rewriting the index until it rejoins the previous canonical
    /// line; entries above the new tip height are dropped first, which handles a heavier but
    /// shorter competing branch.
    fn reselect_canonical(&mut self, new_tip: Buf32, new_height: BlockHeight) {
        let old_tip = self.tip;
        let old_height = self.tip_height();
        let _ = self.canonical.split_off(&(new_height + 1));

        let mut rewritten = 0u64;
        let mut cursor = new_tip;
        loop {
            let stored = self.stored(cursor);
            let height = stored.height;
            let prev_id = stored.header.prev_id;
            match self.canonical.insert(height, cursor) {
                Some(existing) if existing == cursor => break,
                _ => rewritten += 1,
            }
            if height == 0 {
                break;
            }
            cursor = prev_id;
        }

        self.tip = new_tip;
        if old_tip == self.stored(new_tip).header.prev_id {
            debug!(tip=%new_tip, height=%new_height, "extended canonical branch");
        } else {
            warn!(
                %old_tip,
                %old_height,
                new_tip=%new_tip,
                new_height=%new_height,
                %rewritten,
                "canonical branch displaced by heavier competitor"
            );
        }
    }
}
