use crate::fixtures::{native, TestBridge, TEST_POOL_FEES, TEST_POOL_FIRST_AMOUNT};
use peggy_core::domain::WorkKind;
use peggy_core::foundation::{ForeignAddress, MAX_POWER};

/// Heights 100..=105, snapshot at height `100 + i` has `i + 1` equally weighted validators.
fn growing_valsets(t: &TestBridge) {
    for i in 0..6u8 {
        t.add_validator(i + 1, 1_000);
        t.bridge.build_validator_set(100 + u64::from(i)).expect("valset");
    }
}

#[test]
fn last_valset_requests_returns_five_newest() {
    let t = TestBridge::new();
    growing_valsets(&t);

    let requests = t.bridge.query().last_valset_requests().expect("last valset requests");
    let nonces: Vec<u64> = requests.iter().map(|s| s.nonce).collect();
    assert_eq!(nonces, vec![105, 104, 103, 102, 101]);
    for snapshot in &requests {
        let count = snapshot.members.len() as u64;
        assert_eq!(count, snapshot.nonce - 99);
        assert!(snapshot.members.iter().all(|m| u64::from(m.power) == MAX_POWER / count));
    }
}

#[test]
fn pending_valset_walks_back_past_confirmed() {
    let t = TestBridge::new();
    growing_valsets(&t);
    let validator = native(1);
    let query = t.bridge.query();
    let validator_str = validator.to_string();

    let pending = query.last_pending_valset_request(&validator_str).expect("pending");
    assert_eq!(pending.map(|s| s.nonce), Some(105));

    t.bridge.submit_confirmation(WorkKind::ValsetUpdate, 105, validator, vec![1], ForeignAddress::new([1; 20])).expect("confirm");
    t.bridge.submit_confirmation(WorkKind::ValsetUpdate, 104, validator, vec![1], ForeignAddress::new([1; 20])).expect("confirm");
    let pending = query.last_pending_valset_request(&validator_str).expect("pending");
    assert_eq!(pending.map(|s| s.nonce), Some(103));

    for nonce in 100..=103 {
        t.bridge
            .submit_confirmation(WorkKind::ValsetUpdate, nonce, validator, vec![1], ForeignAddress::new([1; 20]))
            .expect("confirm");
    }
    assert!(query.last_pending_valset_request(&validator_str).expect("pending").is_none());

    let other = native(2).to_string();
    assert_eq!(query.last_pending_valset_request(&other).expect("pending").map(|s| s.nonce), Some(105));
}

#[test]
fn pending_batch_is_newest_unconfirmed() {
    let t = TestBridge::new();
    t.add_transfers(&TEST_POOL_FEES, TEST_POOL_FIRST_AMOUNT);
    t.bridge.build_outgoing_batch(10, t.denom(), Some(2)).expect("batch 1");
    t.bridge.build_outgoing_batch(11, t.denom(), Some(2)).expect("batch 2");

    let validator = native(3);
    let query = t.bridge.query();
    assert!(query.last_pending_batch_request(&native(9).to_string()).expect("pending").is_some());

    let work = WorkKind::batch(t.denominator.token_contract);
    t.bridge.submit_confirmation(work, 2, validator, vec![7; 65], ForeignAddress::new([3; 20])).expect("confirm");
    let pending = query.last_pending_batch_request(&validator.to_string()).expect("pending").expect("batch 1 pending");
    assert_eq!(pending.nonce, 1);
    assert_eq!(pending.element_ids(), vec![2, 1]);

    t.bridge.submit_confirmation(work, 1, validator, vec![7; 65], ForeignAddress::new([3; 20])).expect("confirm");
    assert!(query.last_pending_batch_request(&validator.to_string()).expect("pending").is_none());
}

#[test]
fn valset_quorum_uses_previous_signer_set() {
    let t = TestBridge::new();
    for i in 1..=3 {
        t.add_validator(i, 1);
    }
    t.bridge.build_validator_set(10).expect("valset 10");
    t.add_validator(4, 1);
    t.bridge.build_validator_set(20).expect("valset 20");

    // two of the three old signers are not enough
    for i in 1..=2u8 {
        t.bridge.submit_confirmation(WorkKind::ValsetUpdate, 20, native(i), vec![i], ForeignAddress::new([i; 20])).expect("confirm");
    }
    let query = t.bridge.query();
    let status = query.valset_quorum("20").expect("quorum").expect("known valset");
    assert_eq!(status.total_power, 3 * (MAX_POWER / 3));
    assert!(!status.reached);

    // the new member has no power in the previous set
    t.bridge.submit_confirmation(WorkKind::ValsetUpdate, 20, native(4), vec![4], ForeignAddress::new([4; 20])).expect("confirm");
    assert!(!query.valset_quorum("20").expect("quorum").expect("known").reached);

    t.bridge.submit_confirmation(WorkKind::ValsetUpdate, 20, native(3), vec![3], ForeignAddress::new([3; 20])).expect("confirm");
    let status = query.valset_quorum("20").expect("quorum").expect("known");
    assert!(status.reached);
    assert_eq!(status.signed_power, status.total_power);

    assert!(query.valset_quorum("15").expect("quorum").is_none());
}

#[test]
fn batch_quorum_uses_attached_snapshot() {
    let t = TestBridge::new();
    t.add_validator(1, 3);
    t.add_validator(2, 1);
    t.bridge.build_validator_set(1).expect("valset");
    t.add_transfers(&[1], 10);
    let batch = t.bridge.build_outgoing_batch(2, t.denom(), None).expect("batch");

    let work = WorkKind::batch(batch.token_contract);
    t.bridge.submit_confirmation(work, batch.nonce, native(1), vec![1], ForeignAddress::new([1; 20])).expect("confirm");

    let contract = batch.token_contract.to_string();
    let status = t.bridge.query().batch_quorum("1", &contract).expect("quorum").expect("known batch");
    assert_eq!(u64::from(batch.valset.members[0].power), status.signed_power);
    assert!(status.reached);
    assert!(t.bridge.query().batch_quorum("2", &contract).expect("quorum").is_none());
}
