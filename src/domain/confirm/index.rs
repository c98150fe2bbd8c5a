use crate::domain::model::{ConfirmationKey, ConfirmationRecord, WorkKind};
use crate::foundation::NativeAddress;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// One record per `(work, nonce, validator)`. Later submissions overwrite the payload.
#[derive(Clone, Debug, Default, Deserialize, Serialize)]
pub struct ConfirmationIndex {
    records: BTreeMap<ConfirmationKey, ConfirmationRecord>,
}

impl ConfirmationIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the record that was replaced, if any.
    pub fn upsert(&mut self, record: ConfirmationRecord) -> Option<ConfirmationRecord> {
        self.records.insert(record.key(), record)
    }

    pub fn get(&self, work: WorkKind, nonce: u64, validator: &NativeAddress) -> Option<&ConfirmationRecord> {
        self.records.get(&ConfirmationKey { work, nonce, validator: *validator })
    }

    pub fn has_confirmed(&self, work: WorkKind, nonce: u64, validator: &NativeAddress) -> bool {
        self.get(work, nonce, validator).is_some()
    }

    /// Records for one nonce, sorted by validator address.
    pub fn list(&self, work: WorkKind, nonce: u64) -> impl Iterator<Item = &ConfirmationRecord> {
        let from = ConfirmationKey { work, nonce, validator: NativeAddress::new([0x00; 20]) };
        let to = ConfirmationKey { work, nonce, validator: NativeAddress::new([0xff; 20]) };
        self.records.range(from..=to).map(|(_, record)| record)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
