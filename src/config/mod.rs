// Configuration module entry point
// Loads layered configuration and holds the per-process application state

mod state;
mod types;

use std::net::SocketAddr;

use crate::error::ServerError;

// Re-export public types
pub use state::AppState;
pub use types::{
    Config, FactProviderConfig, HealthConfig, HttpConfig, LogFormat, LoggingConfig,
    PerformanceConfig, ServerConfig,
};

/// Default config file looked up when no path is given (extension optional)
pub const DEFAULT_CONFIG_PATH: &str = "config";

impl Config {
    /// Load configuration from the given file path (without extension).
    ///
    /// Precedence, lowest first: defaults, config file, `CLASSIFIER_*`
    /// environment variables (`__` separates nested keys), `PORT`,
    /// then `port_override`.
    pub fn load_from(
        config_path: &str,
        port_override: Option<u16>,
    ) -> Result<Self, config::ConfigError> {
        let settings = config::Config::builder()
            .add_source(config::File::with_name(config_path).required(false))
            .add_source(
                config::Environment::with_prefix("CLASSIFIER")
                    .prefix_separator("_")
                    .separator("__"),
            )
            .set_default("server.host", "0.0.0.0")?
            .set_default("server.port", 3000)?
            .set_default("logging.level", "info")?
            .set_default("logging.format", "compact")?
            .set_default("logging.access_log", true)?
            .set_default("logging.access_log_format", "combined")?
            .set_default("performance.keep_alive_timeout", 75)?
            .set_default("performance.read_timeout", 30)?
            .set_default("performance.write_timeout", 30)?
            .set_default("performance.shutdown_timeout", 10)?
            .set_default("http.server_name", "number-classifier")?
            .set_default("http.enable_cors", false)?
            .set_default("health.enabled", true)?
            .set_default("health.path", "/healthz")?
            .set_default("fact_provider.base_url", "http://numbersapi.com")?
            .set_default("fact_provider.timeout_ms", 3000)?
            .set_override_option("server.port", std::env::var("PORT").ok())?
            .set_override_option("server.port", port_override.map(i64::from))?
            .build()?;

        settings.try_deserialize()
    }

    pub fn get_socket_addr(&self) -> Result<SocketAddr, ServerError> {
        let addr = format!("{}:{}", self.server.host, self.server.port);
        addr.parse()
            .map_err(|source| ServerError::InvalidAddress { addr, source })
    }
}
