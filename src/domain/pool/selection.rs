use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// Batch selection priority of a pool entry.
///
/// Orders by fee descending, then by id ascending, so iterating a sorted set of ranks yields
/// entries in the exact order a batch takes them: highest fee first, earliest insert among
/// equal fees.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Deserialize, Serialize)]
pub struct FeeRank {
    pub fee: u64,
    pub id: u64,
}

impl Ord for FeeRank {
    fn cmp(&self, other: &Self) -> Ordering {
        other.fee.cmp(&self.fee).then_with(|| self.id.cmp(&other.id))
    }
}

impl PartialOrd for FeeRank {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}
