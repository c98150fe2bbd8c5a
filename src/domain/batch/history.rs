use crate::domain::model::OutgoingBatch;
use crate::foundation::{BridgeError, ForeignAddress, Result};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::collections::{BTreeMap, BTreeSet};

/// Position of a batch in the newest-first listing.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Deserialize, Serialize)]
pub struct BatchRecency {
    pub block: u64,
    pub nonce: u64,
    pub token_contract: ForeignAddress,
}

impl BatchRecency {
    fn of(batch: &OutgoingBatch) -> Self {
        Self { block: batch.block, nonce: batch.nonce, token_contract: batch.token_contract }
    }
}

impl Ord for BatchRecency {
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .block
            .cmp(&self.block)
            .then_with(|| other.nonce.cmp(&self.nonce))
            .then_with(|| self.token_contract.cmp(&other.token_contract))
    }
}

impl PartialOrd for BatchRecency {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// All batches ever built, addressable by `(token_contract, nonce)`.
#[derive(Clone, Debug, Default, Deserialize, Serialize)]
pub struct BatchHistory {
    batches: BTreeMap<(ForeignAddress, u64), OutgoingBatch>,
    last_nonce: BTreeMap<ForeignAddress, u64>,
    recency: BTreeSet<BatchRecency>,
    batched_ids: BTreeSet<u64>,
}

impl BatchHistory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Nonce the next batch for `token_contract` receives. Spaces start at 1.
    pub fn next_nonce(&self, token_contract: &ForeignAddress) -> Result<u64> {
        self.last_nonce(token_contract).checked_add(1).ok_or_else(|| BridgeError::overflow("batch nonce"))
    }

    pub fn last_nonce(&self, token_contract: &ForeignAddress) -> u64 {
        self.last_nonce.get(token_contract).copied().unwrap_or(0)
    }

    pub fn insert(&mut self, batch: OutgoingBatch) -> Result<()> {
        let key = (batch.token_contract, batch.nonce);
        if self.batches.contains_key(&key) {
            return Err(BridgeError::DuplicateBatch { token_contract: batch.token_contract.to_string(), nonce: batch.nonce });
        }
        let latest = self.last_nonce(&batch.token_contract);
        if batch.nonce <= latest {
            return Err(BridgeError::NonceRegression { kind: "batch".to_string(), latest, attempted: batch.nonce });
        }
        let mut ids = BTreeSet::new();
        for id in batch.element_ids() {
            if self.batched_ids.contains(&id) || !ids.insert(id) {
                return Err(BridgeError::DuplicatePoolId(id));
            }
        }

        self.batched_ids.extend(ids);
        self.recency.insert(BatchRecency::of(&batch));
        self.last_nonce.insert(batch.token_contract, batch.nonce);
        self.batches.insert(key, batch);
        Ok(())
    }

    pub fn get(&self, token_contract: &ForeignAddress, nonce: u64) -> Option<&OutgoingBatch> {
        self.batches.get(&(*token_contract, nonce))
    }

    /// Ordered by block height, then nonce, both descending; token contract breaks ties.
    pub fn newest_first(&self) -> impl Iterator<Item = &OutgoingBatch> {
        self.recency.iter().filter_map(|r| self.batches.get(&(r.token_contract, r.nonce)))
    }

    pub fn last_n(&self, n: usize) -> Vec<OutgoingBatch> {
        self.newest_first().take(n).cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.batches.len()
    }

    pub fn is_empty(&self) -> bool {
        self.batches.is_empty()
    }
}
