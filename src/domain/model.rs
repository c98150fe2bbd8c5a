use crate::foundation::util::serde_helpers::{decimal_string, hex_bytes};
use crate::foundation::{BridgeError, ForeignAddress, NativeAddress, Result};
use serde::{Deserialize, Serialize};

/// Amount of a single denomination.
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq, Eq, Hash)]
pub struct Coin {
    #[serde(with = "decimal_string")]
    pub amount: u64,
    pub denom: String,
}

impl Coin {
    pub fn new(amount: u64, denom: impl Into<String>) -> Self {
        Self { amount, denom: denom.into() }
    }

    pub fn zero(denom: impl Into<String>) -> Self {
        Self::new(0, denom)
    }

    /// Adds two coins of the same denomination.
    pub fn checked_add(&self, other: &Coin) -> Result<Coin> {
        if self.denom != other.denom {
            return Err(BridgeError::InvalidCoin(format!("denom mismatch: {} vs {}", self.denom, other.denom)));
        }
        let amount =
            self.amount.checked_add(other.amount).ok_or_else(|| BridgeError::overflow(format!("coin sum in {}", self.denom)))?;
        Ok(Coin::new(amount, self.denom.clone()))
    }
}

/// Raw voting weight reported by the staking collaborator for one validator.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ValidatorPower {
    pub validator: NativeAddress,
    pub power: u64,
}

impl ValidatorPower {
    pub fn new(validator: NativeAddress, power: u64) -> Self {
        Self { validator, power }
    }
}

#[derive(Clone, Debug, Deserialize, Serialize, PartialEq, Eq)]
pub struct ValidatorSetMember {
    #[serde(with = "decimal_string")]
    pub power: u32,
    pub foreign_address: ForeignAddress,
}

/// Nonce-stamped weighted membership of the foreign-chain signer set.
///
/// Immutable once stored; the nonce is the block height the snapshot was taken at.
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq, Eq)]
pub struct ValidatorSetSnapshot {
    #[serde(with = "decimal_string")]
    pub nonce: u64,
    pub members: Vec<ValidatorSetMember>,
}

impl ValidatorSetSnapshot {
    /// Placeholder attached to batches built before any snapshot was stored.
    pub fn empty(nonce: u64) -> Self {
        Self { nonce, members: Vec::new() }
    }

    pub fn total_power(&self) -> u64 {
        self.members.iter().map(|m| u64::from(m.power)).sum()
    }

    pub fn power_of(&self, foreign_address: &ForeignAddress) -> Option<u32> {
        self.members.iter().find(|m| &m.foreign_address == foreign_address).map(|m| m.power)
    }
}

/// Transfer request waiting in the outgoing pool.
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq, Eq)]
pub struct OutgoingTransferIntent {
    #[serde(with = "decimal_string")]
    pub id: u64,
    pub sender: NativeAddress,
    pub receiver: ForeignAddress,
    pub amount: Coin,
    pub fee: Coin,
}

/// Foreign token registered for bridging, with its local voucher denomination.
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq, Eq)]
pub struct BridgedDenominator {
    pub token_contract: ForeignAddress,
    pub symbol: String,
    pub voucher_denom: String,
}

/// Immutable settlement batch for one foreign token.
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq, Eq)]
pub struct OutgoingBatch {
    #[serde(with = "decimal_string")]
    pub nonce: u64,
    /// Block height the batch was built at.
    #[serde(with = "decimal_string")]
    pub block: u64,
    pub elements: Vec<OutgoingTransferIntent>,
    pub total_fee: Coin,
    pub bridged_denominator: BridgedDenominator,
    pub valset: ValidatorSetSnapshot,
    pub token_contract: ForeignAddress,
}

impl OutgoingBatch {
    pub fn element_ids(&self) -> Vec<u64> {
        self.elements.iter().map(|e| e.id).collect()
    }
}

/// Kind of signable work a confirmation refers to.
///
/// Batch nonces live in per-token spaces, so the token contract is part of the key.
#[derive(Clone, Copy, Debug, Deserialize, Serialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(rename_all = "snake_case")]
pub enum WorkKind {
    ValsetUpdate,
    BatchSettlement { token_contract: ForeignAddress },
}

impl WorkKind {
    pub fn batch(token_contract: ForeignAddress) -> Self {
        WorkKind::BatchSettlement { token_contract }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Deserialize, Serialize)]
pub struct ConfirmationKey {
    pub work: WorkKind,
    pub nonce: u64,
    pub validator: NativeAddress,
}

/// A validator's foreign-chain signature over a valset or batch nonce.
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq, Eq)]
pub struct ConfirmationRecord {
    pub work: WorkKind,
    #[serde(with = "decimal_string")]
    pub nonce: u64,
    pub validator: NativeAddress,
    #[serde(with = "hex_bytes")]
    pub signature: Vec<u8>,
    pub foreign_address: ForeignAddress,
}

impl ConfirmationRecord {
    pub fn key(&self) -> ConfirmationKey {
        ConfirmationKey { work: self.work, nonce: self.nonce, validator: self.validator }
    }
}
