// src/handlers/health.rs
use actix_web::{web, HttpResponse};
use chrono::{SecondsFormat, Utc};
use lazy_static::lazy_static;
use serde::Serialize;
use std::time::Instant;
use crate::config::Config;

lazy_static! {
    static ref PROCESS_START: Instant = Instant::now();
}

/// Pins the uptime origin; call once at startup.
pub fn mark_process_start() {
    lazy_static::initialize(&PROCESS_START);
}

pub fn uptime_secs() -> f64 {
    PROCESS_START.elapsed().as_secs_f64()
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthResponse {
    pub status: &'static str,
    pub max_playing: i64,
    pub timestamp: String,
    pub uptime: f64,
}

pub async fn health(config: web::Data<Config>) -> HttpResponse {
    HttpResponse::Ok().json(HealthResponse {
        status: "healthy",
        max_playing: config.max_playing,
        timestamp: Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
        uptime: uptime_secs(),
    })
}
