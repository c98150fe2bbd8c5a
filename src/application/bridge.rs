use crate::application::lifecycle::{BridgeObserver, NoopObserver};
use crate::application::query::QueryService;
use crate::domain::batch::build_batch;
use crate::domain::model::{
    BridgedDenominator, Coin, ConfirmationRecord, OutgoingBatch, OutgoingTransferIntent, ValidatorSetSnapshot, WorkKind,
};
use crate::domain::pool::validate_transfer;
use crate::domain::ports::{AddressRegistry, Ledger, VotingPowerProvider};
use crate::domain::valset::build_snapshot;
use crate::foundation::{BridgeError, ForeignAddress, NativeAddress, Result};
use crate::infrastructure::config::BridgeConfig;
use crate::infrastructure::storage::{transact, StateStore};
use log::{debug, error, trace};
use std::cell::Cell;
use std::sync::Arc;

/// Write side of the bridge core.
///
/// Every method is one transition: it runs against a private copy of the committed state and
/// publishes it only on success. Observers hear about the outcome after the fact.
pub struct Bridge {
    store: Arc<dyn StateStore>,
    staking: Arc<dyn VotingPowerProvider>,
    registry: Arc<dyn AddressRegistry>,
    ledger: Arc<dyn Ledger>,
    config: BridgeConfig,
    observer: Arc<dyn BridgeObserver>,
}

impl Bridge {
    pub fn new(
        store: Arc<dyn StateStore>,
        staking: Arc<dyn VotingPowerProvider>,
        registry: Arc<dyn AddressRegistry>,
        ledger: Arc<dyn Ledger>,
        config: BridgeConfig,
    ) -> Self {
        Self { store, staking, registry, ledger, config, observer: Arc::new(NoopObserver) }
    }

    pub fn with_observer(mut self, observer: Arc<dyn BridgeObserver>) -> Self {
        self.observer = observer;
        self
    }

    pub fn set_observer(&mut self, observer: Arc<dyn BridgeObserver>) {
        self.observer = observer;
    }

    pub fn config(&self) -> &BridgeConfig {
        &self.config
    }

    pub fn store(&self) -> &Arc<dyn StateStore> {
        &self.store
    }

    /// Read side over the same store.
    pub fn query(&self) -> QueryService {
        QueryService::new(Arc::clone(&self.store), self.config.clone())
    }

    /// Escrows `amount + fee` from `sender` and queues the transfer. Returns the pool id.
    ///
    /// If the transition fails after the debit, including while committing, the escrow is refunded.
    pub fn add_to_outgoing_pool(&self, sender: NativeAddress, receiver: ForeignAddress, amount: Coin, fee: Coin) -> Result<u64> {
        let coins = [amount.clone(), fee.clone()];
        let debited = Cell::new(false);
        let result = transact(self.store.as_ref(), |state| {
            validate_transfer(&amount, &fee)?;
            state.denominators.require(&amount.denom)?;
            state.pool.next_id()?;

            self.ledger.debit(&sender, &coins)?;
            debited.set(true);
            let pool = state.pool_mut();
            let id = pool.insert(sender, receiver, amount.clone(), fee.clone())?;
            pool.get(id).cloned().ok_or(BridgeError::MissingPoolEntry(id))
        });
        let result = match result {
            Err(err) if debited.get() => Err(self.release_escrow(&sender, &coins, err)),
            other => other,
        };
        let intent = self.observe("add_to_outgoing_pool", result)?;
        self.observer.on_intent_added(&intent);
        Ok(intent.id)
    }

    /// Snapshots the current validator set at `height` and stores it with `nonce = height`.
    pub fn build_validator_set(&self, height: u64) -> Result<ValidatorSetSnapshot> {
        let result = transact(self.store.as_ref(), |state| {
            let powers = self.staking.validator_powers()?;
            trace!("building validator set height={} reported_validators={}", height, powers.len());
            let snapshot = build_snapshot(height, &powers, self.registry.as_ref())?;
            state.valsets_mut().insert(snapshot.clone())?;
            Ok(snapshot)
        });
        let snapshot = self.observe("build_validator_set", result)?;
        self.observer.on_valset_created(&snapshot);
        Ok(snapshot)
    }

    /// Builds the next batch for `voucher_denom` at `height`.
    ///
    /// `max_elements` falls back to the configured default batch size.
    pub fn build_outgoing_batch(&self, height: u64, voucher_denom: &str, max_elements: Option<usize>) -> Result<OutgoingBatch> {
        let max_elements = max_elements.unwrap_or(self.config.default_batch_size);
        let result = transact(self.store.as_ref(), |state| {
            let denominator = state.denominators.require(voucher_denom)?.clone();
            let valset = state.valsets.latest().cloned().unwrap_or_else(|| ValidatorSetSnapshot::empty(height));
            let (pool, batches) = state.pool_and_batches_mut();
            build_batch(pool, batches, &denominator, valset, height, max_elements)
        });
        let batch = self.observe("build_outgoing_batch", result)?;
        self.observer.on_batch_created(&batch);
        Ok(batch)
    }

    /// Records a validator's signature for `(work, nonce)`, replacing any earlier submission.
    ///
    /// The referenced valset or batch does not need to exist.
    pub fn submit_confirmation(
        &self,
        work: WorkKind,
        nonce: u64,
        validator: NativeAddress,
        signature: Vec<u8>,
        foreign_address: ForeignAddress,
    ) -> Result<()> {
        let record = ConfirmationRecord { work, nonce, validator, signature, foreign_address };
        let result = transact(self.store.as_ref(), |state| Ok(state.confirmations_mut().upsert(record.clone()).is_some()));
        let replaced = self.observe("submit_confirmation", result)?;
        self.observer.on_confirmation_recorded(&record, replaced);
        Ok(())
    }

    pub fn store_counterpart_denominator(&self, token_contract: ForeignAddress, symbol: &str) -> Result<BridgedDenominator> {
        let result = transact(self.store.as_ref(), |state| state.denominators_mut().store(token_contract, symbol));
        let denominator = self.observe("store_counterpart_denominator", result)?;
        debug!(
            "counterpart denominator stored token_contract={} symbol={} voucher_denom={}",
            denominator.token_contract, denominator.symbol, denominator.voucher_denom
        );
        Ok(denominator)
    }

    /// Entries the next batch for `denom` would take, without removing them.
    pub fn peek_top(&self, denom: &str, limit: usize) -> Result<Vec<OutgoingTransferIntent>> {
        Ok(self.store.snapshot()?.pool.peek_top(denom, limit))
    }

    fn release_escrow(&self, sender: &NativeAddress, coins: &[Coin], cause: BridgeError) -> BridgeError {
        match self.ledger.refund(sender, coins) {
            Ok(()) => debug!("escrow refunded after failed transition sender={} cause={}", sender, cause),
            Err(err) => error!("escrow refund failed sender={} error={} cause={}", sender, err, cause),
        }
        cause
    }

    fn observe<T>(&self, operation: &str, result: Result<T>) -> Result<T> {
        if let Err(err) = &result {
            self.observer.on_transition_failed(operation, err);
        }
        result
    }
}
