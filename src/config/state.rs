// Application state module
// Shared, read-only state handed to every connection

use std::sync::Arc;

use super::types::Config;
use crate::error::ServerError;
use crate::facts::{FactProvider, NumbersApiClient};

/// Application state
pub struct AppState {
    pub config: Config,
    pub fact_provider: Arc<dyn FactProvider>,
}

impl AppState {
    /// Build state with the HTTP-backed fact provider from `config`
    pub fn new(config: Config) -> Result<Self, ServerError> {
        let client = NumbersApiClient::new(&config.fact_provider)?;
        Ok(Self::with_provider(config, Arc::new(client)))
    }

    /// Build state around an arbitrary provider
    pub fn with_provider(config: Config, fact_provider: Arc<dyn FactProvider>) -> Self {
        Self {
            config,
            fact_provider,
        }
    }
}
