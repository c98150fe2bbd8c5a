//! Log file names, patterns and rotation limits.

pub const LOG_FILE_NAME: &str = "peggy.log";
/// Warn and error records only.
pub const ERR_LOG_FILE_NAME: &str = "peggy_err.log";

/// Format: `timestamp [LEVEL] message [module] [thread-id]`
pub const LOG_LINE_PATTERN_COLORED: &str = "{d(%Y-%m-%d %H:%M:%S%.3f)} [{h({l:5})}] {m} [{M}] [{I}]{n}";

pub const LOG_LINE_PATTERN: &str = "{d(%Y-%m-%d %H:%M:%S%.3f)} [{l:5}] {m} [{M}] [{I}]{n}";

/// 50 MB.
pub const LOG_FILE_MAX_SIZE: u64 = 50_000_000;

pub const LOG_FILE_MAX_ROLLS: u32 = 5;

/// Targets logged at the requested app level. Everything else is off unless opted in.
pub const WHITELISTED_CRATES: &[&str] = &["peggy_core"];
