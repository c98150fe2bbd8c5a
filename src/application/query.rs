//! Read API over string inputs.
//!
//! Each call parses its inputs, takes one point-in-time snapshot of the committed state and
//! answers from it. Malformed input is an error; a well-formed key with no data is `None` or an
//! empty list.

use crate::domain::confirm::QuorumStatus;
use crate::domain::model::{
    BridgedDenominator, ConfirmationRecord, OutgoingBatch, OutgoingTransferIntent, ValidatorSetSnapshot, WorkKind,
};
use crate::domain::pending;
use crate::foundation::util::encoding::parse_nonce;
use crate::foundation::{ForeignAddress, NativeAddress, Result};
use crate::infrastructure::config::BridgeConfig;
use crate::infrastructure::storage::StateStore;
use serde::Serialize;
use std::sync::Arc;

pub struct QueryService {
    store: Arc<dyn StateStore>,
    config: BridgeConfig,
}

impl QueryService {
    pub fn new(store: Arc<dyn StateStore>, config: BridgeConfig) -> Self {
        Self { store, config }
    }

    pub fn valset_confirm(&self, nonce: &str, validator: &str) -> Result<Option<ConfirmationRecord>> {
        let nonce = parse_nonce(nonce)?;
        let validator: NativeAddress = validator.parse()?;
        Ok(self.store.snapshot()?.confirmations.get(WorkKind::ValsetUpdate, nonce, &validator).cloned())
    }

    pub fn all_valset_confirms(&self, nonce: &str) -> Result<Vec<ConfirmationRecord>> {
        let nonce = parse_nonce(nonce)?;
        Ok(self.store.snapshot()?.confirmations.list(WorkKind::ValsetUpdate, nonce).cloned().collect())
    }

    pub fn last_valset_requests(&self) -> Result<Vec<ValidatorSetSnapshot>> {
        Ok(pending::last_valset_requests(&*self.store.snapshot()?, self.config.last_valset_requests_limit))
    }

    pub fn last_pending_valset_request(&self, validator: &str) -> Result<Option<ValidatorSetSnapshot>> {
        let validator: NativeAddress = validator.parse()?;
        Ok(pending::last_pending_valset(&*self.store.snapshot()?, &validator))
    }

    pub fn last_pending_batch_request(&self, validator: &str) -> Result<Option<OutgoingBatch>> {
        let validator: NativeAddress = validator.parse()?;
        Ok(pending::last_pending_batch(&*self.store.snapshot()?, &validator))
    }

    pub fn batch_confirms(&self, nonce: &str, token_contract: &str) -> Result<Vec<ConfirmationRecord>> {
        let nonce = parse_nonce(nonce)?;
        let token_contract: ForeignAddress = token_contract.parse()?;
        Ok(self.store.snapshot()?.confirmations.list(WorkKind::batch(token_contract), nonce).cloned().collect())
    }

    pub fn batch(&self, nonce: &str, token_contract: &str) -> Result<Option<OutgoingBatch>> {
        let nonce = parse_nonce(nonce)?;
        let token_contract: ForeignAddress = token_contract.parse()?;
        Ok(self.store.snapshot()?.batches.get(&token_contract, nonce).cloned())
    }

    pub fn last_batches(&self) -> Result<Vec<OutgoingBatch>> {
        Ok(pending::last_batch_requests(&*self.store.snapshot()?, self.config.last_batches_limit))
    }

    /// Pool entries of `denom` in the order the next batch would take them.
    pub fn pending_pool(&self, denom: &str) -> Result<Vec<OutgoingTransferIntent>> {
        Ok(self.store.snapshot()?.pool.peek_top(denom, self.config.pending_pool_limit))
    }

    pub fn valset_quorum(&self, nonce: &str) -> Result<Option<QuorumStatus>> {
        let nonce = parse_nonce(nonce)?;
        Ok(self.store.snapshot()?.quorum(WorkKind::ValsetUpdate, nonce, self.config.quorum_threshold_power))
    }

    pub fn batch_quorum(&self, nonce: &str, token_contract: &str) -> Result<Option<QuorumStatus>> {
        let nonce = parse_nonce(nonce)?;
        let token_contract: ForeignAddress = token_contract.parse()?;
        Ok(self.store.snapshot()?.quorum(WorkKind::batch(token_contract), nonce, self.config.quorum_threshold_power))
    }

    pub fn denominator(&self, voucher_denom: &str) -> Result<Option<BridgedDenominator>> {
        Ok(self.store.snapshot()?.denominators.by_voucher(voucher_denom).cloned())
    }
}

/// JSON body for a query response. Absent results render as `null`.
pub fn to_json<T: Serialize>(value: &T) -> Result<Vec<u8>> {
    Ok(serde_json::to_vec(value)?)
}
