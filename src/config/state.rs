// Application state module
// Shared read-only state for the local edge emulator

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use super::types::Config;
use crate::error::RulesError;
use crate::handler::bucket::Bucket;
use crate::routing::RewriteRules;

/// Application state
pub struct AppState {
    pub config: Config,
    pub rules: Arc<RewriteRules>,
    pub bucket: Bucket,

    // Cached config values for fast access
    pub cached_access_log: Arc<AtomicBool>,
}

impl AppState {
    /// Build state, validating the rewrite rules
    pub fn new(config: &Config) -> Result<Self, RulesError> {
        let rules = RewriteRules::try_from(&config.rewrite)?;
        let bucket = Bucket::new(&config.bucket.root, &config.bucket.origin_path);

        Ok(Self {
            config: config.clone(),
            rules: Arc::new(rules),
            bucket,
            cached_access_log: Arc::new(AtomicBool::new(config.logging.access_log)),
        })
    }

    pub fn access_log_enabled(&self) -> bool {
        self.cached_access_log.load(Ordering::Relaxed)
    }
}
