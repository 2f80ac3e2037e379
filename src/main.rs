mod config;
mod constants;
mod errors;
mod handlers;
mod middleware;
mod models;
mod openapi;
mod query;
mod repositories;
mod routes;
mod services;
mod validators;

use std::io;
use std::time::Duration;

use actix_web::{middleware::Logger, web, App, HttpServer};
use log::info;
use mongodb::bson::doc;
use mongodb::Client;

use crate::config::CONFIG;
use crate::middleware::build_cors;
use crate::repositories::GenreRepository;
use crate::services::{GenreService, OutputCache};

#[actix_web::main]
async fn main() -> io::Result<()> {
    // Initialize environment variables and logger
    dotenv::dotenv().ok();
    env_logger::init_from_env(env_logger::Env::default().default_filter_or("info"));

    // Connect to MongoDB
    info!("Connecting to MongoDB...");
    let client = Client::with_uri_str(&CONFIG.mongodb_uri)
        .await
        .map_err(|e| io::Error::other(format!("Failed to connect to MongoDB: {}", e)))?;

    let db = client.database(&CONFIG.database_name);

    // Test MongoDB connection
    db.run_command(doc! { "ping": 1 })
        .await
        .map_err(|e| io::Error::other(format!("Failed to ping MongoDB: {}", e)))?;
    info!("Connected to MongoDB successfully!");

    // Initialize services
    let genre_service = GenreService::new(&db);
    genre_service
        .repository()
        .create_indexes()
        .await
        .map_err(|e| io::Error::other(format!("Failed to create indexes: {}", e)))?;

    let genre_service = web::Data::new(genre_service);
    let output_cache = web::Data::new(OutputCache::new(Duration::from_secs(
        CONFIG.cache_expiration_secs,
    )));

    // Start HTTP server
    let server_addr = format!("{}:{}", CONFIG.server_host, CONFIG.server_port);
    info!(
        "Starting server at http://{} ({} environment)",
        server_addr, CONFIG.app_env
    );

    HttpServer::new(move || {
        let app = App::new()
            .wrap(build_cors(&CONFIG.allowed_origins))
            .wrap(Logger::default())
            .app_data(genre_service.clone())
            .app_data(output_cache.clone())
            .configure(routes::configure_routes::<GenreRepository>);

        if CONFIG.is_development() {
            app.configure(routes::configure_docs)
        } else {
            app
        }
    })
    .bind(&server_addr)?
    .run()
    .await
}
