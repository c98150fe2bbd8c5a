//! Layered configuration via Figment.
//!
//! Precedence (lowest to highest):
//! 1. Compiled defaults
//! 2. TOML config file
//! 3. Environment variables (`PEGGY_` prefix, `__` between sections)

use crate::foundation::{BridgeError, Result};
use crate::infrastructure::config::types::AppConfig;
use figment::providers::{Env, Format, Serialized, Toml};
use figment::Figment;
use log::{debug, info};
use std::path::Path;

pub const CONFIG_FILE_NAME: &str = "peggy-config.toml";

/// Example: `PEGGY_BRIDGE__DEFAULT_BATCH_SIZE` -> `bridge.default_batch_size`
const ENV_PREFIX: &str = "PEGGY_";

/// Loads `<data_dir>/peggy-config.toml`.
pub fn load_config(data_dir: &Path) -> Result<AppConfig> {
    load_config_from_file(&data_dir.join(CONFIG_FILE_NAME), data_dir)
}

/// Loads `path` on top of the defaults. A missing file is not an error.
pub fn load_config_from_file(path: &Path, data_dir: &Path) -> Result<AppConfig> {
    info!("loading configuration path={} data_dir={}", path.display(), data_dir.display());
    let mut figment = Figment::new().merge(Serialized::defaults(AppConfig::default()));
    if path.exists() {
        figment = figment.merge(Toml::file(path));
    } else {
        debug!("configuration file missing; using defaults and env only path={}", path.display());
    }
    // the locator variables share the prefix but are not config keys
    figment = figment.merge(Env::prefixed(ENV_PREFIX).ignore(&["config_path", "data_dir"]).split("__"));

    let mut config: AppConfig = figment.extract().map_err(|e| BridgeError::ConfigError(format!("config extraction failed: {e}")))?;
    if config.service.data_dir.trim().is_empty() {
        config.service.data_dir = data_dir.to_string_lossy().to_string();
    }
    debug!(
        "configuration loaded data_dir={} default_batch_size={} quorum_threshold_power={}",
        config.service.data_dir, config.bridge.default_batch_size, config.bridge.quorum_threshold_power
    );
    Ok(config)
}
