//! Request routing dispatch module
//!
//! Entry point for HTTP request processing, responsible for method validation,
//! route matching, dispatching and access logging.

use crate::config::AppState;
use crate::handler::classify::{self, CLASSIFY_PATH};
use crate::http;
use crate::logger::{self, AccessLogEntry};
use http_body_util::Full;
use hyper::body::{Body, Bytes};
use hyper::http::request::Parts;
use hyper::{Method, Request, Response};
use std::convert::Infallible;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Instant;

/// Main entry point for HTTP request handling.
///
/// Request bodies are never read, so any body type is accepted and dropped
/// up front.
pub async fn handle_request<B>(
    req: Request<B>,
    state: Arc<AppState>,
    peer_addr: SocketAddr,
) -> Result<Response<Full<Bytes>>, Infallible> {
    let started = Instant::now();
    let (parts, _body) = req.into_parts();
    logger::log_request(&parts.method, &parts.uri, parts.version);

    let response = route_request(&parts, &state).await;

    let logging = &state.config.logging;
    if logging.access_log {
        log_access(&parts, &response, peer_addr, started, &logging.access_log_format);
    }
    Ok(response)
}

/// Route request based on method and path
async fn route_request(parts: &Parts, state: &AppState) -> Response<Full<Bytes>> {
    let http_config = &state.config.http;

    // 1. Check HTTP method
    let is_head = match parts.method {
        Method::GET => false,
        Method::HEAD => true,
        Method::OPTIONS => return http::build_options_response(http_config.enable_cors),
        _ => {
            logger::log_warning(&format!("Method not allowed: {}", parts.method));
            return http::build_405_response();
        }
    };

    let path = parts.uri.path();

    // 2. Classification endpoint
    if path == CLASSIFY_PATH {
        return classify::handle_classify(parts.uri.query(), state, is_head).await;
    }

    // 3. Liveness probe
    let health = &state.config.health;
    if health.enabled && path == health.path {
        return http::build_health_response(http_config, is_head);
    }

    http::build_404_response(http_config, is_head)
}

fn log_access(
    parts: &Parts,
    response: &Response<Full<Bytes>>,
    peer_addr: SocketAddr,
    started: Instant,
    format: &str,
) {
    let header = |name: &str| {
        parts
            .headers
            .get(name)
            .and_then(|v| v.to_str().ok())
            .map(ToString::to_string)
    };

    let mut entry = AccessLogEntry::new(
        peer_addr.ip().to_string(),
        parts.method.to_string(),
        parts.uri.path().to_string(),
    );
    entry.query = parts.uri.query().map(ToString::to_string);
    entry.http_version = match parts.version {
        hyper::Version::HTTP_10 => "1.0",
        hyper::Version::HTTP_2 => "2",
        _ => "1.1",
    }
    .to_string();
    entry.status = response.status().as_u16();
    entry.body_bytes = response
        .body()
        .size_hint()
        .exact()
        .and_then(|n| usize::try_from(n).ok())
        .unwrap_or(0);
    entry.referer = header("referer");
    entry.user_agent = header("user-agent");
    entry.request_time_us = u64::try_from(started.elapsed().as_micros()).unwrap_or(u64::MAX);

    logger::log_access(&entry, format);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::facts::{FactError, FactProvider};
    use async_trait::async_trait;
    use http_body_util::BodyExt;
    use hyper::StatusCode;

    struct EchoFacts;

    #[async_trait]
    impl FactProvider for EchoFacts {
        async fn fun_fact(&self, number: i64) -> Result<String, FactError> {
            Ok(format!("fact about {number}"))
        }
    }

    fn test_state() -> Arc<AppState> {
        let config = Config::load_from("does-not-exist/config", Some(0)).unwrap();
        Arc::new(AppState::with_provider(config, Arc::new(EchoFacts)))
    }

    async fn send(method: Method, uri: &str) -> Response<Full<Bytes>> {
        let req = Request::builder().method(method).uri(uri).body(()).unwrap();
        let peer: SocketAddr = "127.0.0.1:50000".parse().unwrap();
        handle_request(req, test_state(), peer).await.unwrap()
    }

    async fn body_json(resp: Response<Full<Bytes>>) -> serde_json::Value {
        let body = resp.into_body().collect().await.unwrap().to_bytes();
        serde_json::from_slice(&body).unwrap()
    }

    #[tokio::test]
    async fn test_get_classify_route() {
        let resp = send(Method::GET, "/api/classify-number?number=153").await;
        assert_eq!(resp.status(), StatusCode::OK);
        let body = body_json(resp).await;
        assert_eq!(body["number"], 153);
        assert_eq!(body["fun_fact"], "fact about 153");
    }

    #[tokio::test]
    async fn test_head_classify_has_no_body() {
        let resp = send(Method::HEAD, "/api/classify-number?number=153").await;
        assert_eq!(resp.status(), StatusCode::OK);
        let body = resp.into_body().collect().await.unwrap().to_bytes();
        assert!(body.is_empty());
    }

    #[tokio::test]
    async fn test_invalid_query_is_400() {
        let resp = send(Method::GET, "/api/classify-number?number=abc").await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            body_json(resp).await,
            serde_json::json!({ "number": "abc", "error": true })
        );
    }

    #[tokio::test]
    async fn test_method_not_allowed() {
        let resp = send(Method::POST, "/api/classify-number?number=1").await;
        assert_eq!(resp.status(), StatusCode::METHOD_NOT_ALLOWED);
    }

    #[tokio::test]
    async fn test_options_preflight() {
        let resp = send(Method::OPTIONS, "/api/classify-number").await;
        assert_eq!(resp.status(), StatusCode::NO_CONTENT);
    }

    #[tokio::test]
    async fn test_health_endpoint() {
        let resp = send(Method::GET, "/healthz").await;
        assert_eq!(resp.status(), StatusCode::OK);
        assert_eq!(body_json(resp).await, serde_json::json!({ "status": "ok" }));
    }

    #[tokio::test]
    async fn test_unknown_path_is_404() {
        let resp = send(Method::GET, "/api/classify").await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
        assert_eq!(body_json(resp).await["error"], "Not Found");
    }
}
