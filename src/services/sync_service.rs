use chrono::{Datelike, NaiveDate};
use serde::Serialize;

use crate::database::MovieStore;
use crate::models::NewMovie;
use crate::services::swapi_service::{FilmCatalog, SwapiFilm};
use crate::utils::error::AppError;

pub const SYNCED_GENRE: &str = "Sci-Fi";

#[derive(Debug, Clone, PartialEq, Serialize, utoipa::ToSchema)]
pub struct SyncReport {
    #[schema(example = "Movies synced successfully!")]
    pub message: String,
    pub inserted: usize,
    pub skipped: usize,
}

/// Year component of a SWAPI `release_date` (`YYYY-MM-DD`)
pub fn release_year(release_date: &str) -> Result<i32, AppError> {
    NaiveDate::parse_from_str(release_date.trim(), "%Y-%m-%d")
        .map(|date| date.year())
        .map_err(|e| AppError::Upstream(format!("Invalid release_date '{}': {}", release_date, e)))
}

fn to_new_movie(film: SwapiFilm) -> Result<NewMovie, AppError> {
    Ok(NewMovie {
        release_year: release_year(&film.release_date)?,
        title: film.title,
        description: film.opening_crawl,
        genre: SYNCED_GENRE.to_string(),
    })
}

async fn run(movies: &dyn MovieStore, catalog: &dyn FilmCatalog) -> Result<SyncReport, AppError> {
    let films = catalog.fetch_films().await?;

    let mut inserted = 0;
    let mut skipped = 0;

    // Not transactional: a failure stops the loop, earlier inserts stay
    for film in films {
        if movies.find_by_title(&film.title).await?.is_some() {
            skipped += 1;
            continue;
        }

        let movie = movies.insert(to_new_movie(film)?).await?;
        log::info!("   ➕ Synced movie: {}", movie.title);
        inserted += 1;
    }

    Ok(SyncReport {
        message: "Movies synced successfully!".to_string(),
        inserted,
        skipped,
    })
}

/// Pulls the film list and inserts every title not present locally.
/// Existing titles are left untouched.
pub async fn sync_movies(
    movies: &dyn MovieStore,
    catalog: &dyn FilmCatalog,
) -> Result<SyncReport, AppError> {
    run(movies, catalog).await.map_err(|e| {
        log::error!("❌ Error syncing movies: {}", e);
        AppError::Internal(format!("Failed to sync movies: {}", e))
    })
}
