//! Capability interfaces for the external collaborators the core depends on.
//!
//! Hosts inject implementations at construction time; every call is synchronous and a failure
//! aborts the transition that issued it.

use crate::domain::model::{Coin, ValidatorPower};
use crate::foundation::{ForeignAddress, NativeAddress, Result};

/// Staking collaborator: bonded validators and their raw voting weight.
pub trait VotingPowerProvider: Send + Sync {
    fn validator_powers(&self) -> Result<Vec<ValidatorPower>>;
}

/// Maps a validator to the foreign-chain address it signs with.
pub trait AddressRegistry: Send + Sync {
    fn foreign_address(&self, validator: &NativeAddress) -> Result<Option<ForeignAddress>>;
}

/// Bank collaborator. The core never tracks balances itself.
pub trait Ledger: Send + Sync {
    /// Moves `coins` from `sender` into bridge escrow.
    ///
    /// Fails with `BridgeError::InsufficientFunds` without side effects when the sender
    /// cannot cover the full amount.
    fn debit(&self, sender: &NativeAddress, coins: &[Coin]) -> Result<()>;

    /// Returns `coins` from escrow to `sender`, undoing a `debit` whose transition did not commit.
    fn refund(&self, sender: &NativeAddress, coins: &[Coin]) -> Result<()>;
}
