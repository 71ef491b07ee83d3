//! Tests for the initiate operation.

use causeway_bridge_primitives::{amount::Amount, buf::Buf32};
use causeway_bridge_test_utils::prelude::*;

use crate::{
    errors::{BridgeError, ConflictError, ValidationError},
    tests::{harness, REQUESTED, SOURCE_ADDR, TARGET_ADDR},
    transfer::state::TransferStatus,
};

#[test]
fn initiate_withholds_fee_and_creates_pending_transfer() {
    let mut h = harness();
    let (transfer_id, source_tx_id) = h.initiate_default();

    let transfer = h.bridge.transfer(transfer_id).unwrap();
    assert_eq!(transfer.status, TransferStatus::Pending);
    assert_eq!(transfer.fee, Amount::from_units(300_000));
    assert_eq!(transfer.amount, Amount::from_units(99_700_000));
    assert_eq!(transfer.requested(), REQUESTED);
    assert_eq!(transfer.source_tx_id, source_tx_id);
    assert_eq!(transfer.source_address.as_str(), SOURCE_ADDR);
    assert_eq!(transfer.target_address.as_str(), TARGET_ADDR);
    assert!(!transfer.verified);
    assert_eq!(transfer.initiated_at, GENESIS_TIMESTAMP);
    assert_eq!(transfer.processed_at, None);

    // The ledger is queryable by source transaction as well.
    assert_eq!(
        h.bridge.transfer_by_source(source_tx_id).unwrap().id,
        transfer_id
    );

    let stats = h.bridge.statistics();
    assert_eq!(stats.total_transfers, 1);
    assert_eq!(stats.total_volume, REQUESTED);
    assert_eq!(stats.active_count, 1);
    assert_eq!(stats.completed_count, 0);
    assert_eq!(stats.failed_count, 0);
}

#[test]
fn duplicate_source_tx_rejected_regardless_of_salt() {
    let mut h = harness();
    let (_, source_tx_id) = h.initiate_default();

    let err = h
        .bridge
        .initiate(
            h.operator,
            REQUESTED,
            source_tx_id,
            SOURCE_ADDR,
            TARGET_ADDR,
            generate_buf32(), // different salt, same source
        )
        .unwrap_err();
    assert!(matches!(
        err,
        BridgeError::Conflict(ConflictError::DuplicateSourceTx(_))
    ));
    assert_eq!(h.bridge.statistics().total_transfers, 1);
}

#[test]
fn cancelled_source_tx_stays_burned() {
    let mut h = harness();
    let (transfer_id, source_tx_id) = h.initiate_default();
    h.bridge.cancel(h.admin, transfer_id).unwrap();

    let err = h
        .bridge
        .initiate(
            h.operator,
            REQUESTED,
            source_tx_id,
            SOURCE_ADDR,
            TARGET_ADDR,
            generate_buf32(),
        )
        .unwrap_err();
    assert!(matches!(
        err,
        BridgeError::Conflict(ConflictError::DuplicateSourceTx(_))
    ));
}

#[test]
fn zero_source_tx_rejected() {
    let mut h = harness();
    let err = h
        .bridge
        .initiate(
            h.operator,
            REQUESTED,
            Buf32::ZERO,
            SOURCE_ADDR,
            TARGET_ADDR,
            generate_buf32(),
        )
        .unwrap_err();
    assert!(matches!(
        err,
        BridgeError::Validation(ValidationError::ZeroSourceTx)
    ));
}

#[test]
fn amount_bounds_enforced() {
    let mut h = harness();
    let min = h.bridge.params().min_transfer;
    let max = h.bridge.params().max_transfer;

    let err = h
        .bridge
        .initiate(
            h.operator,
            min.checked_sub(Amount::from_units(1)).unwrap(),
            generate_buf32(),
            SOURCE_ADDR,
            TARGET_ADDR,
            generate_buf32(),
        )
        .unwrap_err();
    assert!(matches!(
        err,
        BridgeError::Validation(ValidationError::BelowMinimum { .. })
    ));

    let err = h
        .bridge
        .initiate(
            h.operator,
            max.checked_add(Amount::from_units(1)).unwrap(),
            generate_buf32(),
            SOURCE_ADDR,
            TARGET_ADDR,
            generate_buf32(),
        )
        .unwrap_err();
    assert!(matches!(
        err,
        BridgeError::Validation(ValidationError::AboveMaximum { .. })
    ));

    // The bounds themselves are accepted.
    h.bridge
        .initiate(
            h.operator,
            min,
            generate_buf32(),
            SOURCE_ADDR,
            TARGET_ADDR,
            generate_buf32(),
        )
        .unwrap();
    h.bridge
        .initiate(
            h.operator,
            max,
            generate_buf32(),
            SOURCE_ADDR,
            TARGET_ADDR,
            generate_buf32(),
        )
        .unwrap();
}

#[test]
fn malformed_addresses_rejected() {
    let mut h = harness();
    for (src, dst) in [("", TARGET_ADDR), (SOURCE_ADDR, ""), ("has space", TARGET_ADDR)] {
        let err = h
            .bridge
            .initiate(
                h.operator,
                REQUESTED,
                generate_buf32(),
                src,
                dst,
                generate_buf32(),
            )
            .unwrap_err();
        assert!(matches!(
            err,
            BridgeError::Validation(ValidationError::Address(_))
        ));
    }
    assert_eq!(h.bridge.statistics().total_transfers, 0);
}

#[test]
fn requires_operator_capability() {
    let mut h = harness();
    for outsider in [h.relayer, generate_principal()] {
        let err = h
            .bridge
            .initiate(
                outsider,
                REQUESTED,
                generate_buf32(),
                SOURCE_ADDR,
                TARGET_ADDR,
                generate_buf32(),
            )
            .unwrap_err();
        assert!(matches!(err, BridgeError::Authorization(_)));
    }
}

#[test]
fn fee_conservation_across_amounts() {
    let mut h = harness();
    for units in [10_000u128, 10_001, 333_333, 100_000_000, 999_999_999_999] {
        let requested = Amount::from_units(units);
        let id = h
            .bridge
            .initiate(
                h.operator,
                requested,
                generate_buf32(),
                SOURCE_ADDR,
                TARGET_ADDR,
                generate_buf32(),
            )
            .unwrap();
        let transfer = h.bridge.transfer(id).unwrap();
        assert_eq!(transfer.amount.checked_add(transfer.fee), Some(requested));
    }
}
