//! Per-validator view of work still waiting for a signature.
//!
//! Pure reads over a committed `BridgeState`. Anything the validator already confirmed is
//! skipped, never returned.

use crate::domain::model::{OutgoingBatch, ValidatorSetSnapshot, WorkKind};
use crate::domain::state::BridgeState;
use crate::foundation::NativeAddress;

/// Newest snapshot the validator has not confirmed.
pub fn last_pending_valset(state: &BridgeState, validator: &NativeAddress) -> Option<ValidatorSetSnapshot> {
    state
        .valsets
        .newest_first()
        .find(|snapshot| !state.confirmations.has_confirmed(WorkKind::ValsetUpdate, snapshot.nonce, validator))
        .cloned()
}

/// Newest batch, across all tokens, the validator has not confirmed.
pub fn last_pending_batch(state: &BridgeState, validator: &NativeAddress) -> Option<OutgoingBatch> {
    state
        .batches
        .newest_first()
        .find(|batch| !state.confirmations.has_confirmed(WorkKind::batch(batch.token_contract), batch.nonce, validator))
        .cloned()
}

pub fn last_valset_requests(state: &BridgeState, n: usize) -> Vec<ValidatorSetSnapshot> {
    state.valsets.last_n(n)
}

pub fn last_batch_requests(state: &BridgeState, n: usize) -> Vec<OutgoingBatch> {
    state.batches.last_n(n)
}
