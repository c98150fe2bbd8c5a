use crate::fixtures::{foreign, native, snapshot_with_powers, ConfirmationBuilder};
use peggy_core::domain::confirm::{evaluate, ConfirmationIndex};
use peggy_core::domain::WorkKind;
use peggy_core::foundation::{DEFAULT_QUORUM_THRESHOLD_POWER, MAX_POWER};

#[test]
fn submit_twice_keeps_one_record_with_latest_payload() {
    let mut index = ConfirmationIndex::new();
    index.upsert(ConfirmationBuilder::default().nonce(4).signature(vec![1]).build());
    index.upsert(ConfirmationBuilder::default().nonce(4).signature(vec![2]).build());

    let records: Vec<_> = index.list(WorkKind::ValsetUpdate, 4).collect();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].signature, vec![2]);
    assert_eq!(records[0].key(), ConfirmationBuilder::default().nonce(4).build().key());
}

#[test]
fn valset_and_batch_spaces_are_disjoint() {
    let mut index = ConfirmationIndex::new();
    let batch_work = WorkKind::batch(foreign(0x42));
    index.upsert(ConfirmationBuilder::default().nonce(1).build());
    index.upsert(ConfirmationBuilder::default().work(batch_work).nonce(1).build());

    assert_eq!(index.list(WorkKind::ValsetUpdate, 1).count(), 1);
    assert_eq!(index.list(batch_work, 1).count(), 1);
    assert!(index.has_confirmed(batch_work, 1, &native(1)));
    assert!(index.list(WorkKind::ValsetUpdate, 2).next().is_none());
}

#[test]
fn quorum_needs_more_than_two_thirds() {
    let third = (MAX_POWER / 3) as u32;
    let signers = snapshot_with_powers(1, &[(1, third), (2, third), (3, third)]);

    let two: Vec<_> = (1..=2).map(|i| ConfirmationBuilder::default().signer(i).build()).collect();
    let status = evaluate(&signers, &two, DEFAULT_QUORUM_THRESHOLD_POWER);
    assert!(!status.reached);

    let three: Vec<_> = (1..=3).map(|i| ConfirmationBuilder::default().signer(i).build()).collect();
    let status = evaluate(&signers, &three, DEFAULT_QUORUM_THRESHOLD_POWER);
    assert!(status.reached);
    assert_eq!(status.signed_power, status.total_power);
}
