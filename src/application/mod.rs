//! Application layer: transitions and queries wired over the state store and collaborators.

pub mod bridge;
pub mod lifecycle;
pub mod query;

pub use bridge::Bridge;
pub use lifecycle::{BridgeObserver, CompositeObserver, LoggingObserver, NoopObserver};
pub use query::{to_json, QueryService};
