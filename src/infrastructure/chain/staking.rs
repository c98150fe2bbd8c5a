use crate::domain::model::ValidatorPower;
use crate::domain::ports::VotingPowerProvider;
use crate::foundation::{NativeAddress, Result};
use crate::storage_err;
use std::sync::RwLock;

/// Fixed validator power table, updated explicitly by the host or tests.
#[derive(Default)]
pub struct StaticVotingPower {
    powers: RwLock<Vec<ValidatorPower>>,
}

impl StaticVotingPower {
    pub fn new(powers: Vec<ValidatorPower>) -> Self {
        Self { powers: RwLock::new(powers) }
    }

    /// Sets or replaces the weight of one validator.
    pub fn set_power(&self, validator: NativeAddress, power: u64) -> Result<()> {
        let mut powers = self.powers.write().map_err(|_| storage_err!("voting power write", "poisoned"))?;
        match powers.iter_mut().find(|entry| entry.validator == validator) {
            Some(entry) => entry.power = power,
            None => powers.push(ValidatorPower::new(validator, power)),
        }
        Ok(())
    }
}

impl VotingPowerProvider for StaticVotingPower {
    fn validator_powers(&self) -> Result<Vec<ValidatorPower>> {
        Ok(self.powers.read().map_err(|_| storage_err!("voting power read", "poisoned"))?.clone())
    }
}
