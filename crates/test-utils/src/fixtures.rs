//! Random value generators and canned parameter sets.

use causeway_bridge_params::bridge::BridgeParams;
use causeway_bridge_primitives::{
    address::Address,
    amount::Amount,
    buf::Buf32,
    roles::Principal,
};
use rand::{distributions::Alphanumeric, Rng};

/// Generates a random 32-byte identifier.
pub fn generate_buf32() -> Buf32 {
    let mut bytes = [0u8; 32];
    rand::thread_rng().fill(&mut bytes);
    Buf32::new(bytes)
}

/// Generates a random principal.
pub fn generate_principal() -> Principal {
    Principal::new(generate_buf32())
}

/// Generates a random plausible-looking address of the given length.
pub fn generate_address(len: usize) -> Address {
    let addr: String = rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(len)
        .map(char::from)
        .collect();
    Address::new(addr).expect("alphanumeric addresses are always valid")
}

/// Bridge parameters matching the canonical protocol scenario: 30 bps fee, 6 confirmations,
/// a one-hour resume dwell.
pub fn generate_bridge_params() -> BridgeParams {
    BridgeParams {
        fee_bps: 30,
        min_transfer: Amount::from_units(10_000),
        max_transfer: Amount::from_units(1_000_000_000_000),
        required_confirmations: 6,
        pause_dwell_secs: 3_600,
    }
}
