use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Movie Catalog Service API",
        version = "1.0.0",
        description = "Movie catalog with role-based access.\n\n**Authentication:** `/movies` and `/users` require a JWT Bearer token from `/auth/login`.\n\n**Roles:** `USER` can read the catalog; `ADMIN` can also write it, trigger the SWAPI sync and manage users."
    ),
    paths(
        // Auth
        crate::api::auth::register,
        crate::api::auth::login,

        // Movies
        crate::api::movies::get_movies,
        crate::api::movies::sync_movies,
        crate::api::movies::get_movie,
        crate::api::movies::create_movie,
        crate::api::movies::update_movie,
        crate::api::movies::delete_movie,

        // Users
        crate::api::users::list_users,
        crate::api::users::get_user_by_email,
        crate::api::users::update_password,
        crate::api::users::delete_user,

        // Health
        crate::api::health::health_check,
    ),
    components(
        schemas(
            crate::models::Role,
            crate::models::RegisterRequest,
            crate::models::RegisterResponse,
            crate::models::LoginRequest,
            crate::models::LoginResponse,
            crate::models::UserInfo,
            crate::models::UserProfile,
            crate::models::UpdatePasswordRequest,
            crate::models::MessageResponse,
            crate::models::Movie,
            crate::models::CreateMovieRequest,
            crate::models::UpdateMovieRequest,
            crate::services::SyncReport,
            crate::api::health::HealthResponse,
        )
    ),
    tags(
        (name = "Auth", description = "Registration and login."),
        (name = "Movies", description = "Movie catalog CRUD and SWAPI synchronization."),
        (name = "Users", description = "User administration and password changes."),
        (name = "Health", description = "Liveness and database status."),
    ),
    modifiers(&SecurityAddon)
)]
pub struct ApiDoc;

struct SecurityAddon;

impl utoipa::Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .description(Some("Enter your JWT token"))
                        .build(),
                ),
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_openapi_document() {
        let doc = ApiDoc::openapi();
        let json = serde_json::to_value(&doc).unwrap();

        for path in ["/auth/register", "/auth/login", "/movies", "/movies/sync", "/movies/{id}", "/users/{id}/password", "/health"] {
            assert!(json["paths"].get(path).is_some(), "missing path {}", path);
        }
        assert!(json["components"]["securitySchemes"].get("bearer_auth").is_some());
    }
}
