pub mod builder;
pub mod history;
pub mod power;

pub use builder::build_snapshot;
pub use history::ValsetHistory;
pub use power::normalize_powers;
