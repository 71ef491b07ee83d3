//! Tests for role administration, fee updates, and the proof-submission role split.

use causeway_bridge_params::default::MAX_FEE_BPS;
use causeway_bridge_primitives::{amount::Amount, roles::Capability};
use causeway_bridge_test_utils::prelude::*;

use crate::{
    errors::{BridgeError, ValidationError},
    tests::{harness, REQUESTED, SOURCE_ADDR, TARGET_ADDR},
};

#[test]
fn deployer_bootstraps_with_all_capabilities() {
    let h = harness();
    for cap in [Capability::Admin, Capability::Operator, Capability::Relayer] {
        assert!(h.bridge.roles().holds(h.admin, cap));
    }
}

#[test]
fn granted_operator_can_initiate_until_revoked() {
    let mut h = harness();
    let newcomer = generate_principal();

    assert!(h
        .bridge
        .grant_role(h.admin, newcomer, Capability::Operator)
        .unwrap());
    h.bridge
        .initiate(
            newcomer,
            REQUESTED,
            generate_buf32(),
            SOURCE_ADDR,
            TARGET_ADDR,
            generate_buf32(),
        )
        .unwrap();

    assert!(h
        .bridge
        .revoke_role(h.admin, newcomer, Capability::Operator)
        .unwrap());
    let err = h
        .bridge
        .initiate(
            newcomer,
            REQUESTED,
            generate_buf32(),
            SOURCE_ADDR,
            TARGET_ADDR,
            generate_buf32(),
        )
        .unwrap_err();
    assert!(matches!(err, BridgeError::Authorization(_)));
}

#[test]
fn role_administration_requires_admin() {
    let mut h = harness();
    let newcomer = generate_principal();

    let err = h
        .bridge
        .grant_role(h.operator, newcomer, Capability::Relayer)
        .unwrap_err();
    assert!(matches!(err, BridgeError::Authorization(_)));

    let err = h
        .bridge
        .revoke_role(h.relayer, h.operator, Capability::Operator)
        .unwrap_err();
    assert!(matches!(err, BridgeError::Authorization(_)));
}

#[test]
fn fee_rate_update_applies_to_subsequent_initiations() {
    let mut h = harness();
    h.bridge.set_fee_rate(h.admin, 100).unwrap(); // 1%

    let id = h
        .bridge
        .initiate(
            h.operator,
            REQUESTED,
            generate_buf32(),
            SOURCE_ADDR,
            TARGET_ADDR,
            generate_buf32(),
        )
        .unwrap();
    let transfer = h.bridge.transfer(id).unwrap();
    assert_eq!(transfer.fee, Amount::from_units(1_000_000));
    assert_eq!(transfer.amount, Amount::from_units(99_000_000));
}

#[test]
fn fee_rate_ceiling_enforced() {
    let mut h = harness();
    let err = h.bridge.set_fee_rate(h.admin, MAX_FEE_BPS + 1).unwrap_err();
    assert!(matches!(
        err,
        BridgeError::Validation(ValidationError::FeeTooHigh { .. })
    ));
    // The rate is unchanged.
    assert_eq!(h.bridge.params().fee_bps, 30);

    // The ceiling itself is accepted, and only Admins may set it.
    h.bridge.set_fee_rate(h.admin, MAX_FEE_BPS).unwrap();
    let err = h.bridge.set_fee_rate(h.operator, 10).unwrap_err();
    assert!(matches!(err, BridgeError::Authorization(_)));
}

#[test]
fn proof_submission_is_open_to_operator_and_relayer_only() {
    let mut h = harness();

    for submitter in [h.operator, h.relayer] {
        h.bridge
            .submit_proof(
                submitter,
                generate_buf32(),
                b"succinct-proof".to_vec(),
                vec![generate_buf32()],
                generate_buf32(),
            )
            .unwrap();
    }

    let err = h
        .bridge
        .submit_proof(
            generate_principal(),
            generate_buf32(),
            b"succinct-proof".to_vec(),
            vec![],
            generate_buf32(),
        )
        .unwrap_err();
    assert!(matches!(err, BridgeError::Authorization(_)));
}

#[test]
fn proof_verification_is_relayer_only() {
    let mut h = harness();
    let record_id = h
        .bridge
        .submit_proof(
            h.operator,
            generate_buf32(),
            b"succinct-proof".to_vec(),
            vec![],
            generate_buf32(),
        )
        .unwrap();

    let err = h.bridge.verify_proof(h.operator, record_id).unwrap_err();
    assert!(matches!(err, BridgeError::Authorization(_)));

    h.bridge.verify_proof(h.relayer, record_id).unwrap();
    assert!(h.bridge.proof_record(record_id).unwrap().verified);
}

#[test]
fn header_relaying_is_relayer_only() {
    let mut h = harness();
    let header = mine_on_tip(h.bridge.relay(), generate_buf32());

    let err = h.bridge.add_header(h.operator, header).unwrap_err();
    assert!(matches!(err, BridgeError::Authorization(_)));

    h.bridge.add_header(h.relayer, header).unwrap();
    assert_eq!(h.bridge.relay().tip_height(), 1);
}
