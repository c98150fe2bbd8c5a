use crate::domain::model::{ConfirmationRecord, OutgoingBatch, OutgoingTransferIntent, ValidatorSetSnapshot};
use crate::foundation::BridgeError;
use log::{debug, error, info, trace, warn};
use std::sync::Arc;

/// Hooks fired after a state transition commits, or after it fails.
pub trait BridgeObserver: Send + Sync {
    fn on_intent_added(&self, _intent: &OutgoingTransferIntent) {}
    fn on_valset_created(&self, _snapshot: &ValidatorSetSnapshot) {}
    fn on_batch_created(&self, _batch: &OutgoingBatch) {}
    fn on_confirmation_recorded(&self, _record: &ConfirmationRecord, _replaced: bool) {}
    fn on_transition_failed(&self, _operation: &str, _error: &BridgeError) {}
}

pub struct NoopObserver;

impl BridgeObserver for NoopObserver {}

pub struct CompositeObserver {
    observers: Vec<Arc<dyn BridgeObserver>>,
}

impl CompositeObserver {
    pub fn new() -> Self {
        Self { observers: Vec::new() }
    }

    pub fn add_observer(&mut self, observer: Arc<dyn BridgeObserver>) {
        self.observers.push(observer);
    }

    pub fn len(&self) -> usize {
        self.observers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.observers.is_empty()
    }
}

impl Default for CompositeObserver {
    fn default() -> Self {
        Self::new()
    }
}

impl BridgeObserver for CompositeObserver {
    fn on_intent_added(&self, intent: &OutgoingTransferIntent) {
        trace!("on_intent_added dispatch observer_count={} id={}", self.observers.len(), intent.id);
        for observer in &self.observers {
            observer.on_intent_added(intent);
        }
    }

    fn on_valset_created(&self, snapshot: &ValidatorSetSnapshot) {
        trace!("on_valset_created dispatch observer_count={} nonce={}", self.observers.len(), snapshot.nonce);
        for observer in &self.observers {
            observer.on_valset_created(snapshot);
        }
    }

    fn on_batch_created(&self, batch: &OutgoingBatch) {
        trace!(
            "on_batch_created dispatch observer_count={} token_contract={} nonce={}",
            self.observers.len(),
            batch.token_contract,
            batch.nonce
        );
        for observer in &self.observers {
            observer.on_batch_created(batch);
        }
    }

    fn on_confirmation_recorded(&self, record: &ConfirmationRecord, replaced: bool) {
        for observer in &self.observers {
            observer.on_confirmation_recorded(record, replaced);
        }
    }

    fn on_transition_failed(&self, operation: &str, error: &BridgeError) {
        for observer in &self.observers {
            observer.on_transition_failed(operation, error);
        }
    }
}

/// Writes one log line per lifecycle event.
pub struct LoggingObserver;

impl BridgeObserver for LoggingObserver {
    fn on_intent_added(&self, intent: &OutgoingTransferIntent) {
        debug!(
            "outgoing transfer queued id={} sender={} receiver={} amount={} fee={} denom={}",
            intent.id, intent.sender, intent.receiver, intent.amount.amount, intent.fee.amount, intent.amount.denom
        );
    }

    fn on_valset_created(&self, snapshot: &ValidatorSetSnapshot) {
        info!(
            "validator set snapshot stored nonce={} members={} total_power={}",
            snapshot.nonce,
            snapshot.members.len(),
            snapshot.total_power()
        );
    }

    fn on_batch_created(&self, batch: &OutgoingBatch) {
        info!(
            "outgoing batch built token_contract={} nonce={} block={} elements={} total_fee={} valset_nonce={}",
            batch.token_contract,
            batch.nonce,
            batch.block,
            batch.elements.len(),
            batch.total_fee.amount,
            batch.valset.nonce
        );
    }

    fn on_confirmation_recorded(&self, record: &ConfirmationRecord, replaced: bool) {
        debug!(
            "confirmation recorded work={:?} nonce={} validator={} foreign_address={} replaced={}",
            record.work, record.nonce, record.validator, record.foreign_address, replaced
        );
    }

    fn on_transition_failed(&self, operation: &str, error: &BridgeError) {
        if error.is_fatal() {
            error!("bridge transition halted operation={} code={:?} error={}", operation, error.code(), error);
        } else {
            warn!("bridge transition rejected operation={} code={:?} error={}", operation, error.code(), error);
        }
    }
}
