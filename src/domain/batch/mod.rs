pub mod builder;
pub mod history;

pub use builder::{build_batch, total_fee};
pub use history::{BatchHistory, BatchRecency};
