pub mod outgoing;
pub mod selection;

pub use outgoing::{validate_transfer, OutgoingPool};
pub use selection::FeeRank;
