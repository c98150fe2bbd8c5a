use crate::domain::model::Coin;
use crate::domain::ports::Ledger;
use crate::foundation::{BridgeError, NativeAddress, Result};
use crate::storage_err;
use std::collections::BTreeMap;
use std::sync::{Mutex, MutexGuard};

#[derive(Default)]
struct Balances {
    accounts: BTreeMap<(NativeAddress, String), u64>,
    escrow: BTreeMap<String, u64>,
}

/// Account balances plus a bridge escrow, held in memory.
#[derive(Default)]
pub struct MemoryLedger {
    inner: Mutex<Balances>,
}

impl MemoryLedger {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock_inner(&self) -> Result<MutexGuard<'_, Balances>> {
        self.inner.lock().map_err(|_| storage_err!("ledger lock", "poisoned"))
    }

    pub fn credit(&self, account: &NativeAddress, coin: &Coin) -> Result<()> {
        let mut inner = self.lock_inner()?;
        let balance = inner.accounts.entry((*account, coin.denom.clone())).or_insert(0);
        *balance = balance.checked_add(coin.amount).ok_or_else(|| BridgeError::overflow("ledger credit"))?;
        Ok(())
    }

    pub fn balance(&self, account: &NativeAddress, denom: &str) -> Result<u64> {
        Ok(self.lock_inner()?.accounts.get(&(*account, denom.to_string())).copied().unwrap_or(0))
    }

    pub fn escrowed(&self, denom: &str) -> Result<u64> {
        Ok(self.lock_inner()?.escrow.get(denom).copied().unwrap_or(0))
    }
}

impl Ledger for MemoryLedger {
    fn debit(&self, sender: &NativeAddress, coins: &[Coin]) -> Result<()> {
        let required = sum_by_denom(coins, "ledger debit")?;
        let mut inner = self.lock_inner()?;
        for (denom, amount) in &required {
            let available = inner.accounts.get(&(*sender, denom.to_string())).copied().unwrap_or(0);
            if available < *amount {
                return Err(BridgeError::InsufficientFunds {
                    sender: sender.to_string(),
                    denom: denom.to_string(),
                    required: *amount,
                    available,
                });
            }
        }

        for (denom, amount) in required {
            if let Some(balance) = inner.accounts.get_mut(&(*sender, denom.to_string())) {
                *balance -= amount;
            }
            let escrow = inner.escrow.entry(denom.to_string()).or_insert(0);
            *escrow = escrow.checked_add(amount).ok_or_else(|| BridgeError::overflow("ledger escrow"))?;
        }
        Ok(())
    }

    fn refund(&self, sender: &NativeAddress, coins: &[Coin]) -> Result<()> {
        let returned = sum_by_denom(coins, "ledger refund")?;
        let mut inner = self.lock_inner()?;
        for (denom, amount) in &returned {
            let escrowed = inner.escrow.get(*denom).copied().unwrap_or(0);
            if escrowed < *amount {
                return Err(BridgeError::LedgerError {
                    operation: "refund".to_string(),
                    details: format!("escrow holds {} {}, refund needs {}", escrowed, denom, amount),
                });
            }
        }

        for (denom, amount) in returned {
            if let Some(escrow) = inner.escrow.get_mut(denom) {
                *escrow -= amount;
            }
            let balance = inner.accounts.entry((*sender, denom.to_string())).or_insert(0);
            *balance = balance.checked_add(amount).ok_or_else(|| BridgeError::overflow("ledger refund"))?;
        }
        Ok(())
    }
}

fn sum_by_denom<'a>(coins: &'a [Coin], operation: &str) -> Result<BTreeMap<&'a str, u64>> {
    let mut totals: BTreeMap<&str, u64> = BTreeMap::new();
    for coin in coins {
        let entry = totals.entry(coin.denom.as_str()).or_insert(0);
        *entry = entry.checked_add(coin.amount).ok_or_else(|| BridgeError::overflow(operation))?;
    }
    Ok(totals)
}
