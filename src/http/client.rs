//! Instrumented HTTP client for the remote user API
//!
//! Wraps reqwest with base-URL handling, JSON helpers, and round-trip timing.
//! An HTTP error status (4xx/5xx) is a received response, not an `ApiError`;
//! `ApiError` is reserved for transport-level failures where no response
//! arrived at all. The two must never be conflated by callers.

#![allow(dead_code)]

use anyhow::{Context, Result};
use reqwest::{Client, Method};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::time::Duration;
use thiserror::Error;
use tracing::debug;

use crate::http::instrument;

/// Transport-level failures: the request never yielded an HTTP response.
#[derive(Error, Debug)]
pub enum ApiError {
    #[error("request timed out after {timeout_secs} seconds")]
    Timeout {
        timeout_secs: u64,
        elapsed: Duration,
    },

    #[error("connection refused to {url}")]
    ConnectionRefused { url: String, elapsed: Duration },

    #[error("transport failure: {message}")]
    Transport { message: String, elapsed: Duration },

    #[error("invalid request: {0}")]
    InvalidRequest(String),
}

impl ApiError {
    /// Time spent before the failure was observed.
    ///
    /// `None` for requests rejected before reaching the network; those have no
    /// meaningful round-trip duration.
    pub fn elapsed(&self) -> Option<Duration> {
        match self {
            ApiError::Timeout { elapsed, .. }
            | ApiError::ConnectionRefused { elapsed, .. }
            | ApiError::Transport { elapsed, .. } => Some(*elapsed),
            ApiError::InvalidRequest(_) => None,
        }
    }

    fn with_elapsed(self, elapsed: Duration) -> Self {
        match self {
            ApiError::Timeout { timeout_secs, .. } => ApiError::Timeout {
                timeout_secs,
                elapsed,
            },
            ApiError::ConnectionRefused { url, .. } => ApiError::ConnectionRefused { url, elapsed },
            ApiError::Transport { message, .. } => ApiError::Transport { message, elapsed },
            ApiError::InvalidRequest(msg) => ApiError::InvalidRequest(msg),
        }
    }
}

/// HTTP client for the user API
#[derive(Clone)]
pub struct ApiClient {
    client: Client,
    base_url: String,
    timeout_secs: u64,
}

impl ApiClient {
    /// Create a client against the given base URL (e.g. `https://reqres.in/api/`)
    pub fn new(base_url: impl Into<String>) -> Result<Self> {
        Self::with_timeout(base_url, 30)
    }

    /// Create a client with a custom transport timeout
    pub fn with_timeout(base_url: impl Into<String>, timeout_secs: u64) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self {
            client,
            base_url: base_url.into(),
            timeout_secs,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Join a resource path onto the base URL
    fn build_url(&self, path: &str) -> String {
        if path.starts_with("http://") || path.starts_with("https://") {
            path.to_string()
        } else {
            format!(
                "{}/{}",
                self.base_url.trim_end_matches('/'),
                path.trim_start_matches('/')
            )
        }
    }

    /// Raw dispatch without timing annotation.
    ///
    /// Returns a response with no duration attached; `send` is the public path
    /// and composes the instrumentation stamps around this call.
    async fn dispatch(&self, request: &ApiRequest) -> Result<ApiResponse, ApiError> {
        let url = self.build_url(&request.path);
        debug!("Sending {} request to {}", request.method, url);

        let method = Method::from_bytes(request.method.as_bytes())
            .map_err(|_| ApiError::InvalidRequest(format!("bad method: {}", request.method)))?;

        let mut req_builder = self.client.request(method, &url);

        if !request.query.is_empty() {
            req_builder = req_builder.query(&request.query);
        }

        if let Some(body) = &request.body {
            req_builder = req_builder.json(body);
        }

        let response = req_builder.send().await.map_err(|e| {
            let zero = Duration::ZERO;
            if e.is_timeout() {
                ApiError::Timeout {
                    timeout_secs: self.timeout_secs,
                    elapsed: zero,
                }
            } else if e.is_connect() {
                ApiError::ConnectionRefused {
                    url: url.clone(),
                    elapsed: zero,
                }
            } else {
                ApiError::Transport {
                    message: e.to_string(),
                    elapsed: zero,
                }
            }
        })?;

        let status = response.status();

        let mut headers = HashMap::new();
        for (key, value) in response.headers().iter() {
            if let Ok(v) = value.to_str() {
                headers.insert(key.to_string(), v.to_string());
            }
        }

        let body = response.text().await.map_err(|e| ApiError::Transport {
            message: format!("failed to read response body: {e}"),
            elapsed: Duration::ZERO,
        })?;

        Ok(ApiResponse {
            status: status.as_u16(),
            headers,
            body,
            duration: None,
        })
    }

    /// Send a request with round-trip timing attached.
    ///
    /// The instrumentation pair runs on both completion paths: a received
    /// response (any status) carries `duration: Some(_)`, and a transport
    /// failure carries the elapsed time on the error. Neither stamp can alter
    /// or suppress the underlying outcome.
    pub async fn send(&self, request: &ApiRequest) -> Result<ApiResponse, ApiError> {
        let timing = instrument::start();
        let outcome = self.dispatch(request).await;
        let duration = instrument::finish(timing);

        match outcome {
            Ok(mut response) => {
                response.duration = Some(duration);
                debug!(
                    "Response: {} in {}ms",
                    response.status,
                    duration.as_millis()
                );
                Ok(response)
            }
            Err(e) => Err(e.with_elapsed(duration)),
        }
    }

    /// Convenience method for GET
    pub async fn get(&self, path: &str) -> Result<ApiResponse, ApiError> {
        self.send(&ApiRequest::get(path)).await
    }

    /// GET with query parameters
    pub async fn get_query(
        &self,
        path: &str,
        query: &[(&str, &str)],
    ) -> Result<ApiResponse, ApiError> {
        let mut request = ApiRequest::get(path);
        for (key, value) in query {
            request = request.query(*key, *value);
        }
        self.send(&request).await
    }

    /// POST with a JSON body
    pub async fn post_json(
        &self,
        path: &str,
        body: serde_json::Value,
    ) -> Result<ApiResponse, ApiError> {
        self.send(&ApiRequest::post(path).json(body)).await
    }

    /// PUT with a JSON body
    pub async fn put_json(
        &self,
        path: &str,
        body: serde_json::Value,
    ) -> Result<ApiResponse, ApiError> {
        self.send(&ApiRequest::put(path).json(body)).await
    }

    /// PATCH with a JSON body
    pub async fn patch_json(
        &self,
        path: &str,
        body: serde_json::Value,
    ) -> Result<ApiResponse, ApiError> {
        self.send(&ApiRequest::patch(path).json(body)).await
    }

    /// Convenience method for DELETE
    pub async fn delete(&self, path: &str) -> Result<ApiResponse, ApiError> {
        self.send(&ApiRequest::delete(path)).await
    }
}

/// HTTP request builder
#[derive(Clone, Debug)]
pub struct ApiRequest {
    pub method: String,
    pub path: String,
    pub query: Vec<(String, String)>,
    pub body: Option<serde_json::Value>,
}

impl ApiRequest {
    pub fn new(method: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            method: method.into(),
            path: path.into(),
            query: Vec::new(),
            body: None,
        }
    }

    pub fn get(path: impl Into<String>) -> Self {
        Self::new("GET", path)
    }

    pub fn post(path: impl Into<String>) -> Self {
        Self::new("POST", path)
    }

    pub fn put(path: impl Into<String>) -> Self {
        Self::new("PUT", path)
    }

    pub fn patch(path: impl Into<String>) -> Self {
        Self::new("PATCH", path)
    }

    pub fn delete(path: impl Into<String>) -> Self {
        Self::new("DELETE", path)
    }

    pub fn query(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.query.push((key.into(), value.into()));
        self
    }

    pub fn json(mut self, body: serde_json::Value) -> Self {
        self.body = Some(body);
        self
    }
}

/// A received HTTP response with optional timing annotation
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ApiResponse {
    pub status: u16,
    pub headers: HashMap<String, String>,
    pub body: String,
    /// Round-trip time; `Some` only when both instrumentation stamps were
    /// observed for this request.
    pub duration: Option<Duration>,
}

impl ApiResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    pub fn is_client_error(&self) -> bool {
        (400..500).contains(&self.status)
    }

    /// Parse the body as JSON
    pub fn json(&self) -> Result<serde_json::Value> {
        serde_json::from_str(&self.body)
            .with_context(|| format!("response body is not valid JSON: {}", truncate(&self.body)))
    }

    pub fn duration_ms(&self) -> Option<u64> {
        self.duration.map(|d| d.as_millis() as u64)
    }
}

fn truncate(body: &str) -> String {
    body.chars().take(120).collect()
}
