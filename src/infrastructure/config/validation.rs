use crate::foundation::MAX_POWER;
use crate::infrastructure::config::types::AppConfig;

impl AppConfig {
    pub fn validate(&self) -> Result<(), Vec<String>> {
        let mut errors = Vec::new();

        if self.service.data_dir.trim().is_empty() {
            errors.push("service.data_dir must be set".to_string());
        }
        if self.service.log_filters.trim().is_empty() {
            errors.push("service.log_filters must not be empty".to_string());
        }

        let bridge = &self.bridge;
        if bridge.last_valset_requests_limit == 0 {
            errors.push("bridge.last_valset_requests_limit must be > 0".to_string());
        }
        if bridge.last_batches_limit == 0 {
            errors.push("bridge.last_batches_limit must be > 0".to_string());
        }
        if bridge.default_batch_size == 0 {
            errors.push("bridge.default_batch_size must be > 0".to_string());
        }
        if bridge.pending_pool_limit == 0 {
            errors.push("bridge.pending_pool_limit must be > 0".to_string());
        }
        if bridge.quorum_threshold_power == 0 || bridge.quorum_threshold_power >= MAX_POWER {
            errors.push(format!("bridge.quorum_threshold_power must be in 1..{}", MAX_POWER));
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}
