pub mod index;
pub mod quorum;

pub use index::ConfirmationIndex;
pub use quorum::{evaluate, QuorumStatus};
