#![allow(dead_code)]

use crate::fixtures::{foreign, native};
use peggy_core::domain::{ConfirmationRecord, ValidatorSetMember, ValidatorSetSnapshot, WorkKind};
use peggy_core::foundation::{ForeignAddress, NativeAddress};

pub struct ConfirmationBuilder {
    work: WorkKind,
    nonce: u64,
    validator: NativeAddress,
    signature: Vec<u8>,
    foreign_address: ForeignAddress,
}

impl Default for ConfirmationBuilder {
    fn default() -> Self {
        Self {
            work: WorkKind::ValsetUpdate,
            nonce: 1,
            validator: native(1),
            signature: vec![0xde, 0xad, 0xbe, 0xef],
            foreign_address: foreign(1),
        }
    }
}

impl ConfirmationBuilder {
    pub fn work(mut self, work: WorkKind) -> Self {
        self.work = work;
        self
    }

    pub fn nonce(mut self, nonce: u64) -> Self {
        self.nonce = nonce;
        self
    }

    /// Sets both the validator and its foreign address to the `i`-filled pattern.
    pub fn signer(mut self, i: u8) -> Self {
        self.validator = native(i);
        self.foreign_address = foreign(i);
        self
    }

    pub fn signature(mut self, signature: Vec<u8>) -> Self {
        self.signature = signature;
        self
    }

    pub fn build(self) -> ConfirmationRecord {
        ConfirmationRecord {
            work: self.work,
            nonce: self.nonce,
            validator: self.validator,
            signature: self.signature,
            foreign_address: self.foreign_address,
        }
    }
}

/// Snapshot whose members are `foreign(i)` with the given powers, in the order given.
pub fn snapshot_with_powers(nonce: u64, powers: &[(u8, u32)]) -> ValidatorSetSnapshot {
    ValidatorSetSnapshot {
        nonce,
        members: powers.iter().map(|(i, power)| ValidatorSetMember { power: *power, foreign_address: foreign(*i) }).collect(),
    }
}
