pub mod auth;
pub mod health;
pub mod movies;
pub mod swagger;
pub mod users;

use actix_web::web;

use crate::middleware::AuthMiddleware;
use crate::utils::error::AppError;

/// Malformed JSON bodies are reported in the regular error envelope
pub fn json_config() -> web::JsonConfig {
    web::JsonConfig::default().error_handler(|err, _req| {
        AppError::Validation(format!("Invalid request body: {}", err)).into()
    })
}

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.app_data(json_config())
        // Health check
        .route("/health", web::get().to(health::health_check))
        // Auth endpoints (public)
        .service(
            web::scope("/auth")
                .route("/register", web::post().to(auth::register))
                .route("/login", web::post().to(auth::login)),
        )
        // Movies - Requires JWT
        .service(
            web::scope("/movies")
                .wrap(AuthMiddleware)
                .service(movies::sync_movies) // before /{id}
                .service(movies::get_movies)
                .service(movies::get_movie)
                .service(movies::create_movie)
                .service(movies::update_movie)
                .service(movies::delete_movie),
        )
        // Users - Requires JWT
        .service(
            web::scope("/users")
                .wrap(AuthMiddleware)
                .service(users::list_users)
                .service(users::update_password)
                .service(users::get_user_by_email)
                .service(users::delete_user),
        );
}
