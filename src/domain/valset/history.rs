use crate::domain::model::ValidatorSetSnapshot;
use crate::foundation::{BridgeError, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Every snapshot ever stored, keyed by nonce. Nothing is pruned.
#[derive(Clone, Debug, Default, Deserialize, Serialize)]
pub struct ValsetHistory {
    snapshots: BTreeMap<u64, ValidatorSetSnapshot>,
}

impl ValsetHistory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores a snapshot whose nonce must exceed every stored nonce.
    pub fn insert(&mut self, snapshot: ValidatorSetSnapshot) -> Result<()> {
        if let Some(latest) = self.latest_nonce() {
            if snapshot.nonce <= latest {
                return Err(BridgeError::NonceRegression { kind: "valset".to_string(), latest, attempted: snapshot.nonce });
            }
        }
        self.snapshots.insert(snapshot.nonce, snapshot);
        Ok(())
    }

    pub fn get(&self, nonce: u64) -> Option<&ValidatorSetSnapshot> {
        self.snapshots.get(&nonce)
    }

    pub fn latest(&self) -> Option<&ValidatorSetSnapshot> {
        self.snapshots.values().next_back()
    }

    pub fn latest_nonce(&self) -> Option<u64> {
        self.snapshots.keys().next_back().copied()
    }

    pub fn newest_first(&self) -> impl Iterator<Item = &ValidatorSetSnapshot> {
        self.snapshots.values().rev()
    }

    pub fn last_n(&self, n: usize) -> Vec<ValidatorSetSnapshot> {
        self.newest_first().take(n).cloned().collect()
    }

    /// The set expected to sign the update to `nonce`: the newest snapshot before it, or the
    /// snapshot itself when it is the first one.
    pub fn signer_set_for(&self, nonce: u64) -> Option<&ValidatorSetSnapshot> {
        let target = self.snapshots.get(&nonce)?;
        Some(self.snapshots.range(..nonce).next_back().map(|(_, s)| s).unwrap_or(target))
    }

    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }
}
