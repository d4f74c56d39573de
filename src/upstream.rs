// src/upstream.rs
use std::time::Duration;
use log::{debug, error, warn};
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, USER_AGENT};
use serde_json::Value;
use thiserror::Error;
use crate::config::Config;
use crate::models::server::{is_truthy, Page};

/// Upstream maximum page size.
pub const PAGE_LIMIT: u32 = 100;
pub const SORT_ORDER: &str = "Asc";
pub const CLIENT_USER_AGENT: &str = "microapi-roblox/1.2";

#[derive(Debug, Error)]
pub enum UpstreamError {
    #[error("Request failed with status code {status}")]
    Status { status: u16, message: Option<String> },

    #[error("timeout of {0}ms exceeded")]
    Timeout(u64),

    #[error("{0}")]
    Transport(#[source] reqwest::Error),

    #[error("Invalid upstream response: {0}")]
    Decode(String),
}

impl UpstreamError {
    /// 429, any 5xx and client-side timeouts are worth another attempt.
    pub fn is_retriable(&self) -> bool {
        match self {
            Self::Status { status, .. } => *status == 429 || *status >= 500,
            Self::Timeout(_) => true,
            Self::Transport(_) | Self::Decode(_) => false,
        }
    }

    /// The `message` the upstream put in its error body, if any.
    pub fn upstream_message(&self) -> Option<&str> {
        match self {
            Self::Status { message, .. } => message.as_deref(),
            _ => None,
        }
    }
}

/// Upstream error messages are usually strings; anything else is reported as its JSON text.
fn message_text(message: &Value) -> String {
    match message {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Delay after failed attempt `attempt` (1-based): `step × attempt`.
pub fn linear_backoff(attempt: u32, step: Duration) -> Duration {
    step.saturating_mul(attempt)
}

pub struct UpstreamClient {
    http: reqwest::Client,
    base_url: String,
    timeout_ms: u64,
    max_attempts: u32,
    backoff_step: Duration,
}

impl UpstreamClient {
    pub fn new(config: &Config) -> Result<Self, reqwest::Error> {
        let mut headers = HeaderMap::new();
        headers.insert(USER_AGENT, HeaderValue::from_static(CLIENT_USER_AGENT));
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

        let http = reqwest::Client::builder()
            .timeout(config.upstream_timeout())
            .default_headers(headers)
            .build()?;

        Ok(Self {
            http,
            base_url: config.upstream_base_url.clone(),
            timeout_ms: config.upstream_timeout_ms,
            max_attempts: config.upstream_max_attempts.max(1),
            backoff_step: config.upstream_backoff_step(),
        })
    }

    pub fn servers_url(&self, place_id: u64) -> String {
        format!("{}/{}/servers/Public", self.base_url, place_id)
    }

    /// Fetches one page of public servers, retrying transient failures with linear
    /// backoff. The last error is returned unchanged once attempts run out.
    pub async fn fetch_page(&self, place_id: u64, cursor: &str) -> Result<Page, UpstreamError> {
        let url = self.servers_url(place_id);
        let mut attempt = 1;

        loop {
            match self.attempt(&url, cursor).await {
                Ok(page) => {
                    debug!("Fetched upstream page for place {} on attempt {}", place_id, attempt);
                    return Ok(page);
                }
                Err(e) if e.is_retriable() && attempt < self.max_attempts => {
                    let delay = linear_backoff(attempt, self.backoff_step);
                    warn!(
                        "Upstream attempt {}/{} for place {} failed: {}; retrying in {:?}",
                        attempt, self.max_attempts, place_id, e, delay
                    );
                    tokio::time::sleep(delay).await;
                    attempt += 1;
                }
                Err(e) => {
                    error!("Upstream request for place {} failed on attempt {}: {}", place_id, attempt, e);
                    return Err(e);
                }
            }
        }
    }

    async fn attempt(&self, url: &str, cursor: &str) -> Result<Page, UpstreamError> {
        let mut query: Vec<(&str, String)> = vec![
            ("limit", PAGE_LIMIT.to_string()),
            ("sortOrder", SORT_ORDER.to_string()),
        ];
        if !cursor.is_empty() {
            query.push(("cursor", cursor.to_string()));
        }
        query.push(("excludeFullGames", "true".to_string()));

        let response = self
            .http
            .get(url)
            .query(&query)
            .send().await
            .map_err(|e| self.transport_error(e))?;

        let status = response.status();
        let body = response.bytes().await.map_err(|e| self.transport_error(e))?;

        if !status.is_success() {
            let message = serde_json::from_slice::<Value>(&body)
                .ok()
                .and_then(|v| v.get("message").filter(|m| is_truthy(m)).map(message_text));
            return Err(UpstreamError::Status { status: status.as_u16(), message });
        }

        let raw: Value = serde_json::from_slice(&body)
            .map_err(|e| UpstreamError::Decode(e.to_string()))?;

        Ok(Page::from_value(raw))
    }

    fn transport_error(&self, e: reqwest::Error) -> UpstreamError {
        if e.is_timeout() {
            UpstreamError::Timeout(self.timeout_ms)
        } else {
            UpstreamError::Transport(e)
        }
    }
}
