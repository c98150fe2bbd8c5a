use crate::domain::model::{Coin, OutgoingTransferIntent};
use crate::domain::pool::selection::FeeRank;
use crate::foundation::{BridgeError, ForeignAddress, NativeAddress, Result};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

/// Checks the shape of a transfer before any funds move.
pub fn validate_transfer(amount: &Coin, fee: &Coin) -> Result<()> {
    if amount.denom.trim().is_empty() {
        return Err(BridgeError::InvalidCoin("empty denom".to_string()));
    }
    if amount.denom != fee.denom {
        return Err(BridgeError::InvalidCoin(format!("fee denom {} does not match amount denom {}", fee.denom, amount.denom)));
    }
    if amount.amount == 0 {
        return Err(BridgeError::InvalidCoin("transfer amount must be > 0".to_string()));
    }
    amount.checked_add(fee)?;
    Ok(())
}

/// Pending transfer intents, keyed by a pool-wide monotonic id.
///
/// `last_id` survives removals, so an id is never handed out twice.
#[derive(Clone, Debug, Default, Deserialize, Serialize)]
pub struct OutgoingPool {
    last_id: u64,
    intents: BTreeMap<u64, OutgoingTransferIntent>,
    by_denom: BTreeMap<String, BTreeSet<FeeRank>>,
}

impl OutgoingPool {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn next_id(&self) -> Result<u64> {
        self.last_id.checked_add(1).ok_or_else(|| BridgeError::overflow("pool id"))
    }

    pub fn last_id(&self) -> u64 {
        self.last_id
    }

    pub fn insert(&mut self, sender: NativeAddress, receiver: ForeignAddress, amount: Coin, fee: Coin) -> Result<u64> {
        validate_transfer(&amount, &fee)?;
        let id = self.next_id()?;
        if self.intents.contains_key(&id) {
            return Err(BridgeError::DuplicatePoolId(id));
        }

        let rank = FeeRank { fee: fee.amount, id };
        self.by_denom.entry(amount.denom.clone()).or_default().insert(rank);
        self.intents.insert(id, OutgoingTransferIntent { id, sender, receiver, amount, fee });
        self.last_id = id;
        Ok(id)
    }

    /// Up to `limit` entries of `denom` in batch selection order, without removing them.
    pub fn peek_top(&self, denom: &str, limit: usize) -> Vec<OutgoingTransferIntent> {
        let Some(ranks) = self.by_denom.get(denom) else {
            return Vec::new();
        };
        ranks.iter().take(limit).filter_map(|rank| self.intents.get(&rank.id)).cloned().collect()
    }

    /// Removes exactly the given entries, returning them in the order requested.
    ///
    /// All ids are checked before anything is removed.
    pub fn remove(&mut self, ids: &[u64]) -> Result<Vec<OutgoingTransferIntent>> {
        let mut unique = BTreeSet::new();
        for id in ids {
            if !self.intents.contains_key(id) || !unique.insert(*id) {
                return Err(BridgeError::MissingPoolEntry(*id));
            }
        }

        let mut removed = Vec::with_capacity(ids.len());
        for id in ids {
            let intent = self.intents.remove(id).ok_or(BridgeError::MissingPoolEntry(*id))?;
            if let Some(ranks) = self.by_denom.get_mut(&intent.amount.denom) {
                ranks.remove(&FeeRank { fee: intent.fee.amount, id: intent.id });
                if ranks.is_empty() {
                    self.by_denom.remove(&intent.amount.denom);
                }
            }
            removed.push(intent);
        }
        Ok(removed)
    }

    pub fn get(&self, id: u64) -> Option<&OutgoingTransferIntent> {
        self.intents.get(&id)
    }

    pub fn count_for_denom(&self, denom: &str) -> usize {
        self.by_denom.get(denom).map_or(0, BTreeSet::len)
    }

    pub fn len(&self) -> usize {
        self.intents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.intents.is_empty()
    }
}
