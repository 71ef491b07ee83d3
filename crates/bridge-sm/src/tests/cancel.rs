//! Tests for the cancel operation.

use causeway_bridge_test_utils::prelude::*;

use crate::{
    errors::{BridgeError, ConflictError},
    tests::{harness, TARGET_ADDR},
    transfer::state::TransferStatus,
};

#[test]
fn cancel_terminates_a_pending_transfer() {
    let mut h = harness();
    let (transfer_id, _) = h.initiate_default();

    h.bridge.cancel(h.admin, transfer_id).unwrap();

    let transfer = h.bridge.transfer(transfer_id).unwrap();
    assert_eq!(transfer.status, TransferStatus::Cancelled);
    assert!(transfer.cancelled_at.is_some());

    let stats = h.bridge.statistics();
    assert_eq!(stats.active_count, 0);
    assert_eq!(stats.failed_count, 1);
    assert_eq!(stats.total_transfers, 1);
}

#[test]
fn completed_and_claimed_transfers_cannot_be_cancelled() {
    let mut h = harness();
    let (completed, _) = h.complete_default();
    let err = h.bridge.cancel(h.admin, completed).unwrap_err();
    assert!(matches!(
        err,
        BridgeError::Conflict(ConflictError::InvalidTransition {
            status: TransferStatus::Completed,
            ..
        })
    ));

    h.bridge.claim(h.operator, completed, TARGET_ADDR).unwrap();
    let err = h.bridge.cancel(h.admin, completed).unwrap_err();
    assert!(matches!(
        err,
        BridgeError::Conflict(ConflictError::InvalidTransition {
            status: TransferStatus::Claimed,
            ..
        })
    ));
}

#[test]
fn cancel_is_not_repeatable() {
    let mut h = harness();
    let (transfer_id, _) = h.initiate_default();
    h.bridge.cancel(h.admin, transfer_id).unwrap();

    let err = h.bridge.cancel(h.admin, transfer_id).unwrap_err();
    assert!(matches!(
        err,
        BridgeError::Conflict(ConflictError::InvalidTransition {
            status: TransferStatus::Cancelled,
            ..
        })
    ));
}

#[test]
fn unknown_transfer_is_a_conflict() {
    let mut h = harness();
    let err = h.bridge.cancel(h.admin, generate_buf32()).unwrap_err();
    assert!(matches!(
        err,
        BridgeError::Conflict(ConflictError::UnknownTransfer(_))
    ));
}

#[test]
fn requires_admin_capability() {
    let mut h = harness();
    let (transfer_id, _) = h.initiate_default();

    for outsider in [h.operator, h.relayer, generate_principal()] {
        let err = h.bridge.cancel(outsider, transfer_id).unwrap_err();
        assert!(matches!(err, BridgeError::Authorization(_)));
    }
    assert_eq!(
        h.bridge.transfer(transfer_id).unwrap().status,
        TransferStatus::Pending
    );
}
