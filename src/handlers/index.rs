// src/handlers/index.rs
use actix_web::{web, HttpResponse};
use serde_json::json;
use crate::config::Config;
use crate::utils;

pub const SERVICE_NAME: &str = "microapi-roblox (<7 players)";

pub async fn index(config: web::Data<Config>) -> HttpResponse {
    HttpResponse::Ok().json(json!({
        "ok": true,
        "name": SERVICE_NAME,
        "placeId": config.place_id,
        "filter": { "maxPlaying": config.max_playing },
        "endpoints": ["/servers", "/health"],
    }))
}

pub async fn not_found() -> HttpResponse {
    utils::not_found()
}
