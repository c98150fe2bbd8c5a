use peggy_core::foundation::{BridgeError, DEFAULT_QUORUM_THRESHOLD_POWER, MAX_POWER};
use peggy_core::infrastructure::config::{load_app_config_from_path, load_config, load_config_from_file, AppConfig, CONFIG_FILE_NAME};
use std::fs;

#[test]
fn missing_file_yields_defaults() {
    let dir = tempfile::tempdir().expect("tempdir");
    let config = load_config(dir.path()).expect("load");
    assert_eq!(config.bridge, AppConfig::default().bridge);
    assert_eq!(config.bridge.last_valset_requests_limit, 5);
    assert_eq!(config.bridge.quorum_threshold_power, DEFAULT_QUORUM_THRESHOLD_POWER);
    assert_eq!(config.service.data_dir, dir.path().to_string_lossy());
    config.validate().expect("defaults are valid");
}

#[test]
fn toml_overrides_defaults() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join(CONFIG_FILE_NAME);
    fs::write(
        &path,
        r#"
[service]
log_filters = "debug,root=warn"
log_dir = "/var/log/peggy"

[bridge]
default_batch_size = 25
last_batches_limit = 10
"#,
    )
    .expect("write config");

    let config = load_config_from_file(&path, dir.path()).expect("load");
    assert_eq!(config.bridge.default_batch_size, 25);
    assert_eq!(config.bridge.last_batches_limit, 10);
    assert_eq!(config.bridge.pending_pool_limit, 100);
    assert_eq!(config.service.log_filters, "debug,root=warn");
    assert_eq!(config.service.log_dir.as_deref(), Some("/var/log/peggy"));
}

#[test]
fn invalid_values_fail_validation() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("bad.toml");
    fs::write(&path, format!("[bridge]\nquorum_threshold_power = {}\nlast_valset_requests_limit = 0\n", MAX_POWER)).expect("write");

    let err = load_app_config_from_path(&path, dir.path()).expect_err("invalid");
    assert!(err.to_string().contains("quorum_threshold_power"));
    assert!(err.to_string().contains("last_valset_requests_limit"));
}

#[test]
fn malformed_toml_is_a_config_error() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("broken.toml");
    fs::write(&path, "[bridge\ndefault_batch_size = ").expect("write");
    let err = load_config_from_file(&path, dir.path()).expect_err("malformed toml");
    assert!(matches!(err, BridgeError::ConfigError(_)), "{err}");
}
