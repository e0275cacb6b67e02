use validator::Validate;

use crate::database::MovieStore;
use crate::models::{CreateMovieRequest, Movie, UpdateMovieRequest};
use crate::utils::error::AppError;

pub async fn get_all_movies(movies: &dyn MovieStore) -> Result<Vec<Movie>, AppError> {
    movies.list().await
}

pub async fn get_movie_by_id(movies: &dyn MovieStore, id: &str) -> Result<Movie, AppError> {
    movies
        .find_by_id(id)
        .await?
        .ok_or_else(|| AppError::not_found("Movie", id))
}

pub async fn create_movie(
    movies: &dyn MovieStore,
    request: CreateMovieRequest,
) -> Result<Movie, AppError> {
    request.validate()?;

    let movie = movies.insert(request.into()).await?;
    log::info!("🎬 Movie created: {} ({})", movie.title, movie.id);
    Ok(movie)
}

pub async fn update_movie(
    movies: &dyn MovieStore,
    id: &str,
    request: &UpdateMovieRequest,
) -> Result<Movie, AppError> {
    request.validate()?;

    // Nothing to write
    if request.is_empty() {
        return get_movie_by_id(movies, id).await;
    }

    movies
        .update(id, request)
        .await?
        .ok_or_else(|| AppError::not_found("Movie", id))
}

/// Returns the record as it was right before removal
pub async fn delete_movie(movies: &dyn MovieStore, id: &str) -> Result<Movie, AppError> {
    let movie = get_movie_by_id(movies, id).await?;

    if !movies.delete(id).await? {
        return Err(AppError::not_found("Movie", id));
    }

    log::info!("🗑️  Movie deleted: {} ({})", movie.title, movie.id);
    Ok(movie)
}
