// Configuration types module
// Defines all configuration-related data structures

use serde::{Deserialize, Serialize};

use crate::error::RulesError;
use crate::routing::RewriteRules;

/// Main configuration structure
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct Config {
    pub server: ServerConfig,
    pub logging: LoggingConfig,
    pub performance: PerformanceConfig,
    pub http: HttpConfig,
    pub rewrite: RewriteConfig,
    pub bucket: BucketConfig,
    pub health: HealthConfig,
}

/// Server configuration
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub workers: Option<usize>,
}

/// Logging configuration
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct LoggingConfig {
    pub level: String,
    pub access_log: bool,
    /// Access log format (combined, common, json, or custom pattern)
    #[serde(default = "default_access_log_format")]
    pub access_log_format: String,
    /// Access log file path (optional, stdout if not set)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub access_log_file: Option<String>,
    /// Error log file path (optional, stderr if not set)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error_log_file: Option<String>,
}

#[allow(clippy::missing_const_for_fn)]
fn default_access_log_format() -> String {
    "combined".to_string()
}

/// Performance configuration
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct PerformanceConfig {
    pub keep_alive_timeout: u64,
    pub read_timeout: u64,
    pub write_timeout: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_connections: Option<u64>,
}

/// HTTP configuration
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct HttpConfig {
    pub server_name: String,
    pub enable_cors: bool,
    /// Add `X-Rewritten-Uri` to every response
    pub expose_rewrite_header: bool,
    pub cache_control: String,
}

/// Rewrite rule configuration
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Eq)]
pub struct RewriteConfig {
    pub base_location: String,
    pub branch_marker: String,
    pub shell_document: String,
}

impl TryFrom<&RewriteConfig> for RewriteRules {
    type Error = RulesError;

    fn try_from(cfg: &RewriteConfig) -> Result<Self, Self::Error> {
        Self::new(
            cfg.base_location.as_str(),
            cfg.branch_marker.as_str(),
            cfg.shell_document.as_str(),
        )
    }
}

/// Local bucket emulation
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct BucketConfig {
    /// Directory standing in for the storage bucket
    pub root: String,
    /// Prefix the CDN origin reads from inside the bucket
    pub origin_path: String,
    /// Served with 200 when the requested object is missing; empty disables
    pub fallback_document: String,
}

impl BucketConfig {
    pub fn fallback(&self) -> Option<&str> {
        let doc = self.fallback_document.trim();
        (!doc.is_empty()).then_some(doc)
    }
}

/// Health check configuration
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct HealthConfig {
    pub enabled: bool,
    pub path: String,
}
