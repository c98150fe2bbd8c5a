use crate::domain::batch::BatchHistory;
use crate::domain::confirm::{evaluate, ConfirmationIndex, QuorumStatus};
use crate::domain::denom::DenominatorRegistry;
use crate::domain::model::{ValidatorSetSnapshot, WorkKind};
use crate::domain::pool::OutgoingPool;
use crate::domain::valset::ValsetHistory;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Everything the bridge core persists. Each field is an independently testable sub-store.
///
/// Sub-stores sit behind `Arc` so that cloning the state shares them; the `*_mut` accessors copy
/// a sub-store only when it is still shared, leaving every other one untouched.
#[derive(Clone, Debug, Default, Deserialize, Serialize)]
pub struct BridgeState {
    pub pool: Arc<OutgoingPool>,
    pub valsets: Arc<ValsetHistory>,
    pub batches: Arc<BatchHistory>,
    pub confirmations: Arc<ConfirmationIndex>,
    pub denominators: Arc<DenominatorRegistry>,
}

impl BridgeState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn pool_mut(&mut self) -> &mut OutgoingPool {
        Arc::make_mut(&mut self.pool)
    }

    pub fn valsets_mut(&mut self) -> &mut ValsetHistory {
        Arc::make_mut(&mut self.valsets)
    }

    pub fn batches_mut(&mut self) -> &mut BatchHistory {
        Arc::make_mut(&mut self.batches)
    }

    pub fn confirmations_mut(&mut self) -> &mut ConfirmationIndex {
        Arc::make_mut(&mut self.confirmations)
    }

    pub fn denominators_mut(&mut self) -> &mut DenominatorRegistry {
        Arc::make_mut(&mut self.denominators)
    }

    /// Pool and batch history together, as batch building moves entries from one to the other.
    pub fn pool_and_batches_mut(&mut self) -> (&mut OutgoingPool, &mut BatchHistory) {
        (Arc::make_mut(&mut self.pool), Arc::make_mut(&mut self.batches))
    }

    /// Snapshot expected to sign `work` at `nonce`, if that work exists.
    pub fn signer_set(&self, work: WorkKind, nonce: u64) -> Option<&ValidatorSetSnapshot> {
        match work {
            WorkKind::ValsetUpdate => self.valsets.signer_set_for(nonce),
            WorkKind::BatchSettlement { token_contract } => self.batches.get(&token_contract, nonce).map(|b| &b.valset),
        }
    }

    pub fn quorum(&self, work: WorkKind, nonce: u64, threshold: u64) -> Option<QuorumStatus> {
        let signers = self.signer_set(work, nonce)?;
        Some(evaluate(signers, self.confirmations.list(work, nonce), threshold))
    }
}
