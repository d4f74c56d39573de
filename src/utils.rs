// src/utils.rs
use actix_web::{http::StatusCode, HttpResponse, ResponseError};
use serde_json::json;
use std::fmt;
use crate::upstream::UpstreamError;

pub const FALLBACK_ERROR: &str = "Request failed";

#[derive(Debug)]
pub enum ApiError {
    Upstream(UpstreamError),
    Query(String),
}

impl From<UpstreamError> for ApiError {
    fn from(e: UpstreamError) -> Self {
        Self::Upstream(e)
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Upstream(e) => write!(f, "{}", error_message(e)),
            Self::Query(message) => write!(f, "{}", message),
        }
    }
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        StatusCode::INTERNAL_SERVER_ERROR
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).json(json!({
            "success": false,
            "error": self.to_string(),
        }))
    }
}

/// Message shown to callers: the upstream's own message, then the error's
/// description, then a fixed fallback.
pub fn error_message(e: &UpstreamError) -> String {
    if let Some(message) = e.upstream_message() {
        return message.to_string();
    }
    let own = e.to_string();
    if !own.is_empty() {
        return own;
    }
    FALLBACK_ERROR.to_string()
}

pub fn not_found() -> HttpResponse {
    HttpResponse::NotFound().json(json!({ "error": "Not found" }))
}
