//! Number classification endpoint
//!
//! `GET /api/classify-number?number=<n>`: validate the query value, classify
//! it, attach a fun fact and serialize the result.

use http_body_util::Full;
use hyper::body::Bytes;
use hyper::{Response, StatusCode};
use serde::Serialize;
use thiserror::Error;
use url::form_urlencoded;

use crate::classifier::Classification;
use crate::config::AppState;
use crate::facts::{self, FactProvider};
use crate::http;
use crate::logger;

pub const CLASSIFY_PATH: &str = "/api/classify-number";

/// Why a `number` query value was rejected
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum NumberParseError {
    #[error("missing 'number' query parameter")]
    Missing,

    #[error("value is empty")]
    Empty,

    #[error("value is not numeric")]
    NotNumeric,

    #[error("value is not an integer")]
    NotInteger,

    #[error("value does not fit in a 64-bit integer")]
    OutOfRange,
}

/// Successful response body
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ClassificationResult {
    #[serde(flatten)]
    pub classification: Classification,
    pub fun_fact: String,
}

/// 400 response body; `number` echoes the raw value and is omitted when absent
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ErrorResponse {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub number: Option<String>,
    pub error: bool,
}

/// First `number` value in a raw query string, form-url-decoded
pub fn number_param(query: Option<&str>) -> Option<String> {
    form_urlencoded::parse(query?.as_bytes())
        .find(|(key, _)| key == "number")
        .map(|(_, value)| value.into_owned())
}

/// Validate a raw query value as an integer.
///
/// Plain integer literals are tried first so every `i64` round-trips
/// exactly; integral decimal or exponent forms (`12.0`, `1e3`) are accepted
/// when they fit.
pub fn parse_number(raw: Option<&str>) -> Result<i64, NumberParseError> {
    let trimmed = raw.ok_or(NumberParseError::Missing)?.trim();
    if trimmed.is_empty() {
        return Err(NumberParseError::Empty);
    }

    if let Ok(number) = trimmed.parse::<i64>() {
        return Ok(number);
    }

    let value: f64 = trimmed
        .parse()
        .map_err(|_| NumberParseError::NotNumeric)?;
    if !value.is_finite() {
        return Err(NumberParseError::NotNumeric);
    }
    if value.fract() != 0.0 {
        return Err(NumberParseError::NotInteger);
    }
    // 2^63 is exactly representable; i64::MAX is not
    if !(-9_223_372_036_854_775_808.0..9_223_372_036_854_775_808.0).contains(&value) {
        return Err(NumberParseError::OutOfRange);
    }

    #[allow(clippy::cast_possible_truncation)]
    let number = value as i64;
    Ok(number)
}

/// Classify `number` off the async workers, then fetch its fun fact
pub async fn classify_number(
    number: i64,
    provider: &dyn FactProvider,
) -> Result<ClassificationResult, tokio::task::JoinError> {
    let classification = tokio::task::spawn_blocking(move || Classification::of(number)).await?;
    let fun_fact = facts::fun_fact_or_fallback(provider, number).await;

    Ok(ClassificationResult {
        classification,
        fun_fact,
    })
}

/// Handle one classify request given the raw query string
pub async fn handle_classify(
    query: Option<&str>,
    state: &AppState,
    is_head: bool,
) -> Response<Full<Bytes>> {
    let http_config = &state.config.http;
    let raw = number_param(query);

    let number = match parse_number(raw.as_deref()) {
        Ok(number) => number,
        Err(e) => {
            logger::log_invalid_number(raw.as_deref(), &e);
            let body = ErrorResponse {
                number: raw,
                error: true,
            };
            return http::build_json_response(StatusCode::BAD_REQUEST, &body, http_config, is_head);
        }
    };

    match classify_number(number, state.fact_provider.as_ref()).await {
        Ok(result) => http::build_json_response(StatusCode::OK, &result, http_config, is_head),
        Err(e) => {
            logger::log_error(&format!("Classification task for {number} failed: {e}"));
            http::build_500_response()
        }
    }
}
