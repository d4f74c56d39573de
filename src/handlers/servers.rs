// src/handlers/servers.rs
use actix_web::{web, HttpResponse};
use log::debug;
use serde::{Deserialize, Serialize};
use crate::config::Config;
use crate::filter::filter_servers;
use crate::models::server::FilteredPage;
use crate::upstream::UpstreamClient;
use crate::utils::ApiError;

#[derive(Deserialize)]
pub struct ServersQuery {
    cursor: Option<String>,
}

#[derive(Serialize)]
struct ServersResponse {
    success: bool,
    data: FilteredPage,
}

pub async fn get_servers(
    config: web::Data<Config>,
    client: web::Data<UpstreamClient>,
    query: web::Query<ServersQuery>,
) -> Result<HttpResponse, ApiError> {
    let cursor = query.cursor.as_deref().unwrap_or("");
    let page = client.fetch_page(config.place_id, cursor).await?;

    let servers = filter_servers(&page.data, config.max_playing);
    debug!(
        "Kept {} servers with at most {} players (cursor {:?})",
        servers.len(), config.max_playing, cursor
    );

    Ok(HttpResponse::Ok().json(ServersResponse {
        success: true,
        data: FilteredPage {
            data: servers,
            next_page_cursor: page.next_page_cursor,
            previous_page_cursor: page.previous_page_cursor,
        },
    }))
}
