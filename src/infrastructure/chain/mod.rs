//! In-memory implementations of the chain collaborators.

pub mod ledger;
pub mod registry;
pub mod staking;

pub use ledger::MemoryLedger;
pub use registry::MemoryAddressRegistry;
pub use staking::StaticVotingPower;
