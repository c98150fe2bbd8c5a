//! System-wide constants for the bridge coordination core.

/// Upper bound of the normalized validator power scale (2^32 - 1).
///
/// Normalized member powers of a snapshot sum to at most this value.
pub const MAX_POWER: u64 = u32::MAX as u64;

/// Default signing quorum: two thirds of `MAX_POWER`.
pub const DEFAULT_QUORUM_THRESHOLD_POWER: u64 = MAX_POWER * 2 / 3;

/// Human-readable prefix of native (bridge-chain) bech32 addresses.
pub const NATIVE_ADDRESS_PREFIX: &str = "cosmos";

/// Prefix of voucher denominations minted for bridged foreign tokens.
pub const VOUCHER_DENOM_PREFIX: &str = "peggy";

/// Number of hash hex characters appended to `VOUCHER_DENOM_PREFIX`.
pub const VOUCHER_DENOM_HASH_LEN: usize = 10;

/// Default number of snapshots returned by the last-valset-requests query.
pub const DEFAULT_LAST_VALSET_REQUESTS_LIMIT: usize = 5;

/// Default number of batches returned by the last-batches query.
pub const DEFAULT_LAST_BATCHES_LIMIT: usize = 100;

/// Default element cap for a single outgoing batch.
pub const DEFAULT_BATCH_SIZE: usize = 100;

/// Default number of pool entries returned by the pending-pool query.
pub const DEFAULT_PENDING_POOL_LIMIT: usize = 100;

/// Version tag written into persisted state files.
pub const STATE_SCHEMA_VERSION: u32 = 1;
