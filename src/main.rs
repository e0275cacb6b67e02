mod api;
mod config;
mod database;
mod jobs;
mod middleware;
mod models;
mod services;
mod state;
mod utils;

#[cfg(test)]
mod test_support;

use actix_cors::Cors;
use actix_web::{middleware::Logger, web, App, HttpServer};
use dotenv::dotenv;
use std::io;
use std::sync::Arc;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::config::AppConfig;
use crate::database::{MongoDB, MongoMovieStore, MongoUserStore};
use crate::services::{JwtKeys, SwapiClient};
use crate::state::AppState;

#[actix_web::main]
async fn main() -> io::Result<()> {
    // Load environment variables
    dotenv().ok();

    // Initialize logger
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    let config = AppConfig::from_env().map_err(|e| {
        log::error!("❌ Invalid configuration: {}", e);
        io::Error::new(io::ErrorKind::InvalidInput, e.to_string())
    })?;

    log::info!("🚀 Starting Movie Catalog Service...");
    log::debug!("⚙️  Config: {:?}", config);

    // Initialize MongoDB connection
    let db = MongoDB::new(&config.database_url).await.map_err(|e| {
        log::error!("❌ Failed to connect to MongoDB: {}", e);
        io::Error::new(io::ErrorKind::ConnectionRefused, e.to_string())
    })?;

    let catalog = SwapiClient::new(&config.catalog).map_err(|e| {
        log::error!("❌ Failed to build SWAPI client: {}", e);
        io::Error::new(io::ErrorKind::Other, e.to_string())
    })?;

    let state = AppState {
        users: Arc::new(MongoUserStore::new(&db)),
        movies: Arc::new(MongoMovieStore::new(&db)),
        catalog: Arc::new(catalog),
        jwt: JwtKeys::new(&config.jwt),
    };

    // 📅 Background jobs
    jobs::catalog_sync::start_catalog_sync_scheduler(state.clone(), &config.sync);

    let state_data = web::Data::new(state);
    let bind_addr = (config.host.clone(), config.port);
    let origins = config.cors_allowed_origins.clone();

    log::info!("🌐 Server starting on {}:{}", config.host, config.port);
    log::info!("📚 Swagger UI available at: http://{}:{}/swagger-ui/", config.host, config.port);
    log::info!("📄 OpenAPI spec at: http://{}:{}/api-docs/openapi.json", config.host, config.port);

    // Start HTTP server
    HttpServer::new(move || {
        let cors = origins
            .iter()
            .fold(Cors::default(), |cors, origin| cors.allowed_origin(origin))
            .allowed_methods(vec!["GET", "POST", "PUT", "PATCH", "DELETE", "OPTIONS"])
            .allowed_headers(vec![
                actix_web::http::header::AUTHORIZATION,
                actix_web::http::header::CONTENT_TYPE,
                actix_web::http::header::ACCEPT,
            ])
            .expose_headers(vec![actix_web::http::header::CONTENT_TYPE])
            .max_age(3600);

        // Generate OpenAPI specification
        let openapi = api::swagger::ApiDoc::openapi();

        App::new()
            .app_data(state_data.clone())
            .wrap(cors)
            .wrap(middleware::SecurityHeaders)
            .wrap(Logger::default())
            .service(SwaggerUi::new("/swagger-ui/{_:.*}").url("/api-docs/openapi.json", openapi))
            .configure(api::configure)
    })
    .bind(bind_addr)?
    .run()
    .await
}
