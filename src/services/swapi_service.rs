use async_trait::async_trait;
use serde::Deserialize;
use std::time::Duration;

use crate::config::CatalogConfig;
use crate::utils::error::AppError;

/// Film entry as returned by SWAPI `/films/`
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct SwapiFilm {
    pub title: String,
    #[serde(default)]
    pub opening_crawl: Option<String>,
    pub release_date: String,
}

#[derive(Debug, Deserialize)]
struct SwapiFilmPage {
    results: Vec<SwapiFilm>,
}

/// Source of film records for the catalog sync
#[async_trait]
pub trait FilmCatalog: Send + Sync {
    async fn fetch_films(&self) -> Result<Vec<SwapiFilm>, AppError>;
}

pub struct SwapiClient {
    http: reqwest::Client,
    base_url: String,
}

impl SwapiClient {
    pub fn new(config: &CatalogConfig) -> Result<Self, AppError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| AppError::Internal(format!("Failed to build HTTP client: {}", e)))?;

        Ok(SwapiClient {
            http,
            base_url: config.base_url.clone(),
        })
    }

    fn films_url(&self) -> String {
        format!("{}/films/", self.base_url)
    }
}

#[async_trait]
impl FilmCatalog for SwapiClient {
    /// Single request, no paging: the film list fits in one page
    async fn fetch_films(&self) -> Result<Vec<SwapiFilm>, AppError> {
        let url = self.films_url();
        log::info!("🌌 Fetching films from SWAPI: {}", url);

        let response = self
            .http
            .get(&url)
            .header("Accept", "application/json")
            .send()
            .await
            .map_err(|e| AppError::Upstream(format!("Failed to fetch from SWAPI: {}", e)))?;

        if !response.status().is_success() {
            return Err(AppError::Upstream(format!(
                "SWAPI returned status {}",
                response.status()
            )));
        }

        let page: SwapiFilmPage = response
            .json()
            .await
            .map_err(|e| AppError::Upstream(format!("Failed to parse SWAPI response: {}", e)))?;

        log::info!("✅ SWAPI returned {} films", page.results.len());
        Ok(page.results)
    }
}
