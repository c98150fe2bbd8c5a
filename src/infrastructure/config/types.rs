use crate::foundation::{
    DEFAULT_BATCH_SIZE, DEFAULT_LAST_BATCHES_LIMIT, DEFAULT_LAST_VALSET_REQUESTS_LIMIT, DEFAULT_PENDING_POOL_LIMIT,
    DEFAULT_QUORUM_THRESHOLD_POWER,
};
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ServiceConfig {
    /// Directory holding the persisted bridge state.
    #[serde(default)]
    pub data_dir: String,
    /// Rolling log file directory. Console only when unset.
    #[serde(default)]
    pub log_dir: Option<String>,
    /// Filter expression passed to `init_logger`, e.g. `"info,root=warn"`.
    #[serde(default = "default_log_filters")]
    pub log_filters: String,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self { data_dir: String::new(), log_dir: None, log_filters: default_log_filters() }
    }
}

fn default_log_filters() -> String {
    "info".to_string()
}

/// Query limits, batch sizing and the signing quorum.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct BridgeConfig {
    pub last_valset_requests_limit: usize,
    pub last_batches_limit: usize,
    pub default_batch_size: usize,
    pub pending_pool_limit: usize,
    /// Signed power must exceed this for quorum.
    pub quorum_threshold_power: u64,
}

impl Default for BridgeConfig {
    fn default() -> Self {
        Self {
            last_valset_requests_limit: DEFAULT_LAST_VALSET_REQUESTS_LIMIT,
            last_batches_limit: DEFAULT_LAST_BATCHES_LIMIT,
            default_batch_size: DEFAULT_BATCH_SIZE,
            pending_pool_limit: DEFAULT_PENDING_POOL_LIMIT,
            quorum_threshold_power: DEFAULT_QUORUM_THRESHOLD_POWER,
        }
    }
}

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub service: ServiceConfig,
    #[serde(default)]
    pub bridge: BridgeConfig,
}
