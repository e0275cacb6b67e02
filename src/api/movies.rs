use actix_web::{delete, get, patch, post, web, HttpResponse};

use crate::middleware::{AdminOnly, Authorized, UserOrAbove};
use crate::models::{CreateMovieRequest, Movie, UpdateMovieRequest};
use crate::services::{movie_service, sync_service, SyncReport};
use crate::state::AppState;
use crate::utils::error::AppError;

/// GET /movies - List all movies
#[utoipa::path(
    get,
    path = "/movies",
    tag = "Movies",
    responses(
        (status = 200, description = "All movies", body = [Movie]),
        (status = 401, description = "Missing or invalid token")
    ),
    security(("bearer_auth" = []))
)]
#[get("")]
pub async fn get_movies(
    _auth: Authorized<UserOrAbove>,
    state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let movies = movie_service::get_all_movies(state.movies.as_ref()).await?;
    Ok(HttpResponse::Ok().json(movies))
}

/// GET /movies/sync - Sync the catalog with SWAPI.
/// Registered before `/{id}`.
#[utoipa::path(
    get,
    path = "/movies/sync",
    tag = "Movies",
    responses(
        (status = 200, description = "Catalog synced", body = SyncReport),
        (status = 403, description = "Admin role required"),
        (status = 500, description = "Sync failed")
    ),
    security(("bearer_auth" = []))
)]
#[get("/sync")]
pub async fn sync_movies(
    auth: Authorized<AdminOnly>,
    state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let by = auth.claims().map(|c| c.email.as_str()).unwrap_or("-");
    log::info!("🔄 GET /movies/sync - requested by {}", by);

    let report = sync_service::sync_movies(state.movies.as_ref(), state.catalog.as_ref()).await?;
    log::info!(
        "✅ Manual sync done: {} inserted, {} skipped",
        report.inserted,
        report.skipped
    );
    Ok(HttpResponse::Ok().json(report))
}

#[utoipa::path(
    get,
    path = "/movies/{id}",
    tag = "Movies",
    params(("id" = String, Path, description = "Movie id")),
    responses(
        (status = 200, description = "Movie found", body = Movie),
        (status = 404, description = "Movie not found")
    ),
    security(("bearer_auth" = []))
)]
#[get("/{id}")]
pub async fn get_movie(
    _auth: Authorized<UserOrAbove>,
    state: web::Data<AppState>,
    path: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let movie = movie_service::get_movie_by_id(state.movies.as_ref(), &path).await?;
    Ok(HttpResponse::Ok().json(movie))
}

#[utoipa::path(
    post,
    path = "/movies",
    tag = "Movies",
    request_body = CreateMovieRequest,
    responses(
        (status = 201, description = "Movie created", body = Movie),
        (status = 400, description = "Invalid movie"),
        (status = 403, description = "Admin role required")
    ),
    security(("bearer_auth" = []))
)]
#[post("")]
pub async fn create_movie(
    _auth: Authorized<AdminOnly>,
    state: web::Data<AppState>,
    request: web::Json<CreateMovieRequest>,
) -> Result<HttpResponse, AppError> {
    let movie = movie_service::create_movie(state.movies.as_ref(), request.into_inner()).await?;
    Ok(HttpResponse::Created().json(movie))
}

#[utoipa::path(
    patch,
    path = "/movies/{id}",
    tag = "Movies",
    params(("id" = String, Path, description = "Movie id")),
    request_body = UpdateMovieRequest,
    responses(
        (status = 200, description = "Movie updated", body = Movie),
        (status = 404, description = "Movie not found")
    ),
    security(("bearer_auth" = []))
)]
#[patch("/{id}")]
pub async fn update_movie(
    _auth: Authorized<AdminOnly>,
    state: web::Data<AppState>,
    path: web::Path<String>,
    request: web::Json<UpdateMovieRequest>,
) -> Result<HttpResponse, AppError> {
    let movie = movie_service::update_movie(state.movies.as_ref(), &path, &request).await?;
    Ok(HttpResponse::Ok().json(movie))
}

#[utoipa::path(
    delete,
    path = "/movies/{id}",
    tag = "Movies",
    params(("id" = String, Path, description = "Movie id")),
    responses(
        (status = 200, description = "Deleted movie", body = Movie),
        (status = 404, description = "Movie not found")
    ),
    security(("bearer_auth" = []))
)]
#[delete("/{id}")]
pub async fn delete_movie(
    _auth: Authorized<AdminOnly>,
    state: web::Data<AppState>,
    path: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let movie = movie_service::delete_movie(state.movies.as_ref(), &path).await?;
    Ok(HttpResponse::Ok().json(movie))
}
