use crate::domain::ports::AddressRegistry;
use crate::foundation::{ForeignAddress, NativeAddress, Result};
use crate::storage_err;
use log::debug;
use std::collections::BTreeMap;
use std::sync::RwLock;

/// Validator -> foreign signing address bookkeeping.
#[derive(Default)]
pub struct MemoryAddressRegistry {
    entries: RwLock<BTreeMap<NativeAddress, ForeignAddress>>,
}

impl MemoryAddressRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_foreign_address(&self, validator: NativeAddress, foreign: ForeignAddress) -> Result<()> {
        debug!("set foreign address validator={} foreign_address={}", validator, foreign);
        self.entries.write().map_err(|_| storage_err!("address registry write", "poisoned"))?.insert(validator, foreign);
        Ok(())
    }
}

impl AddressRegistry for MemoryAddressRegistry {
    fn foreign_address(&self, validator: &NativeAddress) -> Result<Option<ForeignAddress>> {
        Ok(self.entries.read().map_err(|_| storage_err!("address registry read", "poisoned"))?.get(validator).copied())
    }
}
