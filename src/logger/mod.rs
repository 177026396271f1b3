//! Logger module
//!
//! Thin helpers over `tracing` so call sites read as intent
//! (`log_access`, `log_fact_fallback`) rather than formatting details.
//! The subscriber is installed once by [`init`]; helpers called before that
//! (for example in unit tests) are silently dropped.

mod format;

pub use format::AccessLogEntry;

use crate::config::{Config, LogFormat, LoggingConfig};
use crate::error::ServerError;
use std::net::SocketAddr;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Target used for access log lines, filterable with `RUST_LOG=access=off`
pub const ACCESS_TARGET: &str = "access";

/// Install the global subscriber.
///
/// `RUST_LOG` wins over `logging.level` when set.
pub fn init(config: &LoggingConfig) -> Result<(), ServerError> {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.level))
        .map_err(|e| ServerError::Logger {
            message: format!("invalid log level '{}': {e}", config.level),
        })?;

    let registry = tracing_subscriber::registry().with(filter);
    let result = match config.format {
        LogFormat::Compact => registry
            .with(
                tracing_subscriber::fmt::layer()
                    .with_target(false)
                    .with_thread_ids(false)
                    .compact(),
            )
            .try_init(),
        LogFormat::Json => registry
            .with(tracing_subscriber::fmt::layer().json())
            .try_init(),
    };

    result.map_err(|e| ServerError::Logger {
        message: e.to_string(),
    })
}

pub fn log_server_start(addr: &SocketAddr, config: &Config) {
    tracing::info!("Number classifier listening on http://{addr}");
    tracing::info!("Endpoint: GET http://{addr}/api/classify-number?number=<n>");
    tracing::info!(
        "Log level: {}, access log: {} ({})",
        config.logging.level,
        config.logging.access_log,
        config.logging.access_log_format
    );
    match config.server.workers {
        Some(workers) => tracing::info!("Worker threads: {workers}"),
        None => tracing::info!("Worker threads: default (CPU cores)"),
    }
    if let Some(max) = config.performance.max_connections {
        tracing::info!("Max connections: {max}");
    }
    tracing::info!(
        "Fact provider: {} (timeout {} ms)",
        config.fact_provider.base_url,
        config.fact_provider.timeout_ms
    );
}

pub fn log_connection_accepted(peer_addr: &SocketAddr) {
    tracing::debug!("[Connection] Accepted from: {peer_addr}");
}

pub fn log_connection_error(err: &impl std::fmt::Debug) {
    tracing::error!("Failed to serve connection: {err:?}");
}

pub fn log_connection_rejected(active: usize, max: u64) {
    tracing::warn!("Max connections reached: {active}/{max}. Connection rejected.");
}

pub fn log_request(method: &hyper::Method, uri: &hyper::Uri, version: hyper::Version) {
    tracing::debug!("[Request] {method} {uri} {version:?}");
}

/// Validation failures are client errors, never server faults
pub fn log_invalid_number(raw: Option<&str>, err: &impl std::fmt::Display) {
    tracing::debug!("Rejected number {raw:?}: {err}");
}

pub fn log_fact_fallback(number: i64, err: &impl std::fmt::Display) {
    tracing::warn!("Fun fact unavailable for {number}, using fallback: {err}");
}

/// Log formatted access log entry
pub fn log_access(entry: &AccessLogEntry, format: &str) {
    tracing::info!(target: ACCESS_TARGET, "{}", entry.format(format));
}

pub fn log_error(message: &str) {
    tracing::error!("{message}");
}

pub fn log_warning(message: &str) {
    tracing::warn!("{message}");
}

pub fn log_shutdown_started(active: usize, grace_secs: u64) {
    tracing::info!(
        "Shutdown requested, draining {active} active connection(s) for up to {grace_secs}s"
    );
}

pub fn log_shutdown_complete(remaining: usize) {
    if remaining == 0 {
        tracing::info!("Server stopped cleanly");
    } else {
        tracing::warn!("Server stopped with {remaining} connection(s) still open");
    }
}
