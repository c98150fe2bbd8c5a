use crate::domain::model::{ConfirmationRecord, ValidatorSetSnapshot};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

#[derive(Clone, Debug, Deserialize, Serialize, PartialEq, Eq)]
pub struct QuorumStatus {
    pub signed_power: u64,
    pub total_power: u64,
    pub threshold: u64,
    pub reached: bool,
}

/// Power-weighted tally of `records` against the members of `signers`.
///
/// A member counts once, when some record carries its foreign address. Records from addresses
/// outside the set add nothing. Quorum is reached when signed power strictly exceeds `threshold`.
pub fn evaluate<'a>(
    signers: &ValidatorSetSnapshot,
    records: impl IntoIterator<Item = &'a ConfirmationRecord>,
    threshold: u64,
) -> QuorumStatus {
    let signed: BTreeSet<_> = records.into_iter().map(|r| r.foreign_address).collect();
    let signed_power = signers.members.iter().filter(|m| signed.contains(&m.foreign_address)).map(|m| u64::from(m.power)).sum();
    QuorumStatus { signed_power, total_power: signers.total_power(), threshold, reached: signed_power > threshold }
}
