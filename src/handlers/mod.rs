// src/handlers/mod.rs
pub mod health;
pub mod index;
pub mod servers;

use actix_cors::Cors;
use actix_web::web;
use crate::utils::ApiError;

/// Cross-origin policy for browser callers: any origin, method and header, with
/// preflight requests answered before routing.
pub fn cors() -> Cors {
    Cors::permissive()
}

/// Registers every route. Non-GET methods on known paths fall through to the JSON 404;
/// malformed query strings answer through the JSON error body.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.app_data(
        web::QueryConfig::default()
            .error_handler(|err, _req| ApiError::Query(err.to_string()).into()),
    )
    .service(
        web::resource("/")
            .route(web::get().to(index::index))
            .default_service(web::to(index::not_found)),
    )
    .service(
        web::resource("/health")
            .route(web::get().to(health::health))
            .default_service(web::to(index::not_found)),
    )
    .service(
        web::resource("/servers")
            .route(web::get().to(servers::get_servers))
            .default_service(web::to(index::not_found)),
    )
    .default_service(web::to(index::not_found));
}
