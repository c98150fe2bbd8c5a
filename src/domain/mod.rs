pub mod batch;
pub mod confirm;
pub mod denom;
pub mod model;
pub mod pending;
pub mod pool;
pub mod ports;
pub mod state;
pub mod valset;

pub use model::*;
pub use state::BridgeState;
