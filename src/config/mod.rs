// Configuration module entry point
// Loads application configuration and holds the shared runtime state

mod state;
mod types;

use std::net::SocketAddr;

// Re-export public types
pub use state::AppState;
pub use types::{
    BucketConfig, Config, HealthConfig, HttpConfig, LoggingConfig, PerformanceConfig,
    RewriteConfig, ServerConfig,
};

use crate::routing::{DEFAULT_BASE_LOCATION, DEFAULT_BRANCH_MARKER, DEFAULT_SHELL_DOCUMENT};

/// Environment variable prefix, e.g. `SPA_REWRITE__BRANCH_MARKER=PREVIEW`
pub const ENV_PREFIX: &str = "SPA";

impl Config {
    /// Load configuration from specified file path (without extension)
    /// Default config file is "config.toml" when no path specified
    pub fn load_from(config_path: &str) -> Result<Self, config::ConfigError> {
        let settings = config::Config::builder()
            .add_source(config::File::with_name(config_path).required(false))
            .add_source(
                config::Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("_")
                    .separator("__"),
            )
            .set_default("server.host", "127.0.0.1")?
            .set_default("server.port", 8080)?
            .set_default("logging.level", "info")?
            .set_default("logging.access_log", true)?
            .set_default("logging.access_log_format", "combined")?
            .set_default("performance.keep_alive_timeout", 75)?
            .set_default("performance.read_timeout", 30)?
            .set_default("performance.write_timeout", 30)?
            .set_default("http.server_name", "spa-rewrite/0.1")?
            .set_default("http.enable_cors", false)?
            .set_default("http.expose_rewrite_header", true)?
            .set_default("http.cache_control", "no-cache")?
            .set_default("rewrite.base_location", DEFAULT_BASE_LOCATION)?
            .set_default("rewrite.branch_marker", DEFAULT_BRANCH_MARKER)?
            .set_default("rewrite.shell_document", DEFAULT_SHELL_DOCUMENT)?
            .set_default("bucket.root", "./bucket")?
            .set_default("bucket.origin_path", "frontend")?
            .set_default("bucket.fallback_document", "/live/index.html")?
            .set_default("health.enabled", true)?
            .set_default("health.path", "/healthz")?
            .build()?;

        settings.try_deserialize()
    }

    /// Load from the default "config" file name
    pub fn load() -> Result<Self, config::ConfigError> {
        Self::load_from("config")
    }

    pub fn get_socket_addr(&self) -> Result<SocketAddr, String> {
        format!("{}:{}", self.server.host, self.server.port)
            .parse()
            .map_err(|e| format!("Invalid address: {e}"))
    }

    /// Render the effective configuration as TOML
    pub fn to_toml(&self) -> Result<String, toml::ser::Error> {
        toml::to_string_pretty(self)
    }
}
