use crate::domain::model::{ValidatorPower, ValidatorSetMember, ValidatorSetSnapshot};
use crate::domain::ports::AddressRegistry;
use crate::domain::valset::power::normalize_powers;
use crate::foundation::{BridgeError, ForeignAddress, Result};
use std::cmp::Reverse;
use std::collections::BTreeSet;

/// Builds the membership snapshot for `height` from the current staking view.
///
/// Validators without a registered foreign address are excluded before normalization, so they
/// contribute to neither numerator nor denominator. Members are ordered by power descending,
/// then by foreign address bytes ascending.
pub fn build_snapshot(height: u64, powers: &[ValidatorPower], registry: &dyn AddressRegistry) -> Result<ValidatorSetSnapshot> {
    let mut seen = BTreeSet::new();
    let mut registered: Vec<(ForeignAddress, u64)> = Vec::with_capacity(powers.len());
    for entry in powers {
        if !seen.insert(entry.validator) {
            return Err(BridgeError::InvalidVotingPower(format!("validator {} reported twice", entry.validator)));
        }
        if let Some(foreign) = registry.foreign_address(&entry.validator)? {
            registered.push((foreign, entry.power));
        }
    }
    if registered.is_empty() {
        return Err(BridgeError::EmptyValidatorSet);
    }

    let raw: Vec<u64> = registered.iter().map(|(_, power)| *power).collect();
    let normalized = normalize_powers(&raw)?;

    let mut members: Vec<ValidatorSetMember> = registered
        .into_iter()
        .zip(normalized)
        .map(|((foreign_address, _), power)| ValidatorSetMember { power, foreign_address })
        .collect();
    members.sort_by_key(|m| (Reverse(m.power), m.foreign_address));

    Ok(ValidatorSetSnapshot { nonce: height, members })
}
