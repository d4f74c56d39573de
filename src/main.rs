// src/main.rs
use actix_web::{middleware, web, App, HttpServer};
use env_logger::Env;
use log::{error, info};
use roblox_relay::config::Config;
use roblox_relay::handlers;
use roblox_relay::upstream::UpstreamClient;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenv::dotenv().ok();

    env_logger::init_from_env(Env::default().default_filter_or("info"));
    handlers::health::mark_process_start();

    let config = Config::from_env();

    let client = match UpstreamClient::new(&config) {
        Ok(client) => web::Data::new(client),
        Err(e) => {
            error!("Failed to build upstream HTTP client: {}", e);
            return Err(
                std::io::Error::new(
                    std::io::ErrorKind::Other,
                    format!("Failed to build upstream HTTP client: {}", e)
                )
            );
        }
    };

    let bind = config.bind();
    info!(
        "Relaying place {} from {} (max {} playing)",
        config.place_id, config.upstream_base_url, config.max_playing
    );

    let config = web::Data::new(config);

    info!("Starting server on {}", bind);
    HttpServer::new(move || {
        App::new()
            .app_data(config.clone())
            .app_data(client.clone())
            .wrap(handlers::cors())
            .wrap(middleware::Logger::default())
            .configure(handlers::configure)
    })
        .bind(&bind)?
        .run().await
}
