//! Fun fact provider module
//!
//! Fetches trivia text for a number from a third-party service. The request
//! path only ever sees a string: every failure collapses into
//! [`fallback_fact`].

use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;
use thiserror::Error;

use crate::config::FactProviderConfig;
use crate::logger;

#[derive(Error, Debug)]
pub enum FactError {
    #[error("fact request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("fact service returned HTTP {0}")]
    Status(u16),

    #[error("fact service returned an empty body")]
    Empty,
}

/// Source of trivia text for a number
#[async_trait]
pub trait FactProvider: Send + Sync {
    async fn fun_fact(&self, number: i64) -> Result<String, FactError>;
}

/// Fallback text used whenever the provider fails
pub fn fallback_fact(number: i64) -> String {
    format!("Could not fetch a fun fact for {number}.")
}

/// Ask `provider` for a fact, degrading to [`fallback_fact`] on any error
pub async fn fun_fact_or_fallback(provider: &dyn FactProvider, number: i64) -> String {
    match provider.fun_fact(number).await {
        Ok(fact) => fact,
        Err(e) => {
            logger::log_fact_fallback(number, &e);
            fallback_fact(number)
        }
    }
}

/// Plain-text `GET {base_url}/{number}` client for numbersapi-style services
#[derive(Debug, Clone)]
pub struct NumbersApiClient {
    client: Client,
    base_url: String,
}

impl NumbersApiClient {
    pub fn new(config: &FactProviderConfig) -> Result<Self, reqwest::Error> {
        let client = Client::builder()
            .timeout(Duration::from_millis(config.timeout_ms))
            .build()?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    fn fact_url(&self, number: i64) -> String {
        format!("{}/{number}", self.base_url)
    }
}

#[async_trait]
impl FactProvider for NumbersApiClient {
    async fn fun_fact(&self, number: i64) -> Result<String, FactError> {
        let response = self.client.get(self.fact_url(number)).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(FactError::Status(status.as_u16()));
        }

        let text = response.text().await?;
        let fact = text.trim();
        if fact.is_empty() {
            return Err(FactError::Empty);
        }
        Ok(fact.to_string())
    }
}
