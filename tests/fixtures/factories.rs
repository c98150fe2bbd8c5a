#![allow(dead_code)]

use crate::fixtures::{TEST_RECEIVER, TEST_SENDER_BALANCE, TEST_TOKEN_CONTRACT, TEST_TOKEN_SYMBOL};
use peggy_core::application::Bridge;
use peggy_core::domain::{BridgedDenominator, Coin};
use peggy_core::foundation::{ForeignAddress, NativeAddress};
use peggy_core::infrastructure::chain::{MemoryAddressRegistry, MemoryLedger, StaticVotingPower};
use peggy_core::infrastructure::config::BridgeConfig;
use peggy_core::infrastructure::storage::{MemoryStateStore, StateStore};
use std::sync::Arc;

pub fn native(i: u8) -> NativeAddress {
    NativeAddress::new([i; 20])
}

pub fn foreign(i: u8) -> ForeignAddress {
    ForeignAddress::new([i; 20])
}

pub fn token_contract() -> ForeignAddress {
    TEST_TOKEN_CONTRACT.parse().expect("token contract")
}

pub fn receiver() -> ForeignAddress {
    TEST_RECEIVER.parse().expect("receiver")
}

/// A bridge over in-memory collaborators with one registered token and a funded sender.
pub struct TestBridge {
    pub bridge: Bridge,
    pub store: Arc<dyn StateStore>,
    pub staking: Arc<StaticVotingPower>,
    pub registry: Arc<MemoryAddressRegistry>,
    pub ledger: Arc<MemoryLedger>,
    pub denominator: BridgedDenominator,
    pub sender: NativeAddress,
}

impl TestBridge {
    pub fn new() -> Self {
        Self::with_store(Arc::new(MemoryStateStore::new()))
    }

    pub fn with_store(store: Arc<dyn StateStore>) -> Self {
        Self::with_store_and_config(store, BridgeConfig::default())
    }

    pub fn with_store_and_config(store: Arc<dyn StateStore>, config: BridgeConfig) -> Self {
        let staking = Arc::new(StaticVotingPower::default());
        let registry = Arc::new(MemoryAddressRegistry::new());
        let ledger = Arc::new(MemoryLedger::new());
        let bridge = Bridge::new(store.clone(), staking.clone(), registry.clone(), ledger.clone(), config);

        let denominator = bridge.store_counterpart_denominator(token_contract(), TEST_TOKEN_SYMBOL).expect("register token");
        let sender = native(0xaa);
        ledger.credit(&sender, &Coin::new(TEST_SENDER_BALANCE, denominator.voucher_denom.clone())).expect("fund sender");

        Self { bridge, store, staking, registry, ledger, denominator, sender }
    }

    pub fn denom(&self) -> &str {
        &self.denominator.voucher_denom
    }

    pub fn coin(&self, amount: u64) -> Coin {
        Coin::new(amount, self.denom())
    }

    /// Queues one transfer per fee, amounts counting up from `first_amount`.
    pub fn add_transfers(&self, fees: &[u64], first_amount: u64) -> Vec<u64> {
        fees.iter()
            .enumerate()
            .map(|(i, fee)| {
                self.bridge
                    .add_to_outgoing_pool(self.sender, receiver(), self.coin(first_amount + i as u64), self.coin(*fee))
                    .expect("add to pool")
            })
            .collect()
    }

    /// Registers validator `i` with raw weight `power` and foreign address `foreign(i)`.
    pub fn add_validator(&self, i: u8, power: u64) {
        self.registry.set_foreign_address(native(i), foreign(i)).expect("register foreign address");
        self.staking.set_power(native(i), power).expect("set power");
    }
}
