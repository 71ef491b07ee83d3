//! Re-exports of every fixture in this crate.

pub use crate::{
    chain::{
        extend_chain, generate_genesis, mine_child, mine_on_tip, BLOCK_SPACING, EASY_TARGET,
        GENESIS_TIMESTAMP,
    },
    clock::ManualClock,
    fixtures::{generate_address, generate_bridge_params, generate_buf32, generate_principal},
    verifier::{AcceptAllVerifier, RejectAllVerifier},
};
