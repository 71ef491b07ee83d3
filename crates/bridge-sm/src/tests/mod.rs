//! Tests driving the bridge through its public operations only.

mod cancel;
mod initiate;
mod roles;

use std::sync::Arc;

use causeway_bridge_params::relay::RelayParams;
use causeway_bridge_primitives::{
    amount::Amount,
    buf::Buf32,
    merkle::{build_proof, build_root, MerkleProof},
    roles::{Capability, Principal},
};
use causeway_bridge_test_utils::prelude::*;

use crate::machine::Bridge;

pub(crate) type TestBridge = Bridge<AcceptAllVerifier, Arc<ManualClock>>;

/// A source-chain address in the style the bridge observes on the proof-of-work side.
pub(crate) const SOURCE_ADDR: &str = "bc1qw508d6qejxtdg4y5r3zarvary0c5xw7kv8f3t4";

/// A target-chain address in the style of the contract chain.
pub(crate) const TARGET_ADDR: &str = "0x52908400098527886E0F7030069857D2E4169EE7";

/// The requested amount used throughout: with the 30 bps fee this splits into
/// 99_700_000 net and 300_000 fee.
pub(crate) const REQUESTED: Amount = Amount::from_units(100_000_000);

pub(crate) struct Harness {
    pub(crate) bridge: TestBridge,
    pub(crate) clock: Arc<ManualClock>,
    pub(crate) admin: Principal,
    pub(crate) operator: Principal,
    pub(crate) relayer: Principal,
}

/// A bridge with distinct admin, operator and relayer principals and the canonical test
/// parameters (30 bps fee, 6 confirmations, one hour pause dwell).
pub(crate) fn harness() -> Harness {
    let admin = generate_principal();
    let clock = Arc::new(ManualClock::new(GENESIS_TIMESTAMP));
    let mut bridge = Bridge::new(
        admin,
        generate_bridge_params(),
        generate_genesis(),
        RelayParams::default(),
        AcceptAllVerifier,
        clock.clone(),
    )
    .expect("canonical test params are valid");

    let operator = generate_principal();
    let relayer = generate_principal();
    bridge
        .grant_role(admin, operator, Capability::Operator)
        .unwrap();
    bridge
        .grant_role(admin, relayer, Capability::Relayer)
        .unwrap();

    Harness {
        bridge,
        clock,
        admin,
        operator,
        relayer,
    }
}

impl Harness {
    /// Initiates a transfer for a fresh random source transaction.
    ///
    /// Returns `(transfer_id, source_tx_id)`.
    pub(crate) fn initiate_default(&mut self) -> (Buf32, Buf32) {
        let source_tx_id = generate_buf32();
        let transfer_id = self
            .bridge
            .initiate(
                self.operator,
                REQUESTED,
                source_tx_id,
                SOURCE_ADDR,
                TARGET_ADDR,
                generate_buf32(),
            )
            .unwrap();
        (transfer_id, source_tx_id)
    }

    /// Relays a header whose Merkle tree contains the given transaction ids.
    pub(crate) fn mine_source_header(&mut self, txids: &[Buf32]) -> Buf32 {
        let root = build_root(txids).unwrap();
        let header = mine_on_tip(self.bridge.relay(), root);
        self.bridge.add_header(self.relayer, header).unwrap()
    }

    /// Relays `count` filler headers on top of the canonical tip.
    pub(crate) fn bury(&mut self, count: usize) {
        for _ in 0..count {
            let filler = mine_on_tip(self.bridge.relay(), generate_buf32());
            self.bridge.add_header(self.relayer, filler).unwrap();
        }
    }

    /// Submits and verifies a proof record for the subject. Returns the record id.
    pub(crate) fn submit_verified_record(&mut self, subject_id: Buf32) -> Buf32 {
        let record_id = self
            .bridge
            .submit_proof(
                self.relayer,
                generate_buf32(),
                b"succinct-proof".to_vec(),
                vec![generate_buf32()],
                subject_id,
            )
            .unwrap();
        self.bridge.verify_proof(self.relayer, record_id).unwrap();
        record_id
    }

    /// Buries the source transaction under the required depth and verifies a proof record
    /// for it. Returns `(header_id, merkle_proof, record_id)` ready for `process`.
    pub(crate) fn prove_source(&mut self, source_tx_id: Buf32) -> (Buf32, MerkleProof, Buf32) {
        let txids = vec![source_tx_id, generate_buf32(), generate_buf32()];
        let header_id = self.mine_source_header(&txids);
        self.bury(6);
        let proof = build_proof(&txids, source_tx_id).unwrap();
        let record_id = self.submit_verified_record(source_tx_id);
        (header_id, proof, record_id)
    }

    /// Drives a fresh transfer all the way to Completed.
    ///
    /// Returns `(transfer_id, source_tx_id)`.
    pub(crate) fn complete_default(&mut self) -> (Buf32, Buf32) {
        let (transfer_id, source_tx_id) = self.initiate_default();
        let (header_id, proof, record_id) = self.prove_source(source_tx_id);
        self.bridge
            .process(self.relayer, transfer_id, header_id, &proof, record_id)
            .unwrap();
        (transfer_id, source_tx_id)
    }
}
