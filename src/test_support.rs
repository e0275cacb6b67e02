//! Fixtures shared by the unit and handler tests.

use async_trait::async_trait;
use chrono::Utc;
use std::sync::Arc;

use crate::config::JwtConfig;
use crate::database::memory::{MemoryMovieStore, MemoryUserStore};
use crate::models::{Role, User};
use crate::services::{FilmCatalog, JwtKeys, SwapiFilm};
use crate::state::AppState;
use crate::utils::error::AppError;

pub const TEST_PASSWORD: &str = "password123";

pub fn test_jwt_config() -> JwtConfig {
    JwtConfig {
        secret: "test-secret".to_string(),
        issuer: "movie-catalog-service".to_string(),
        audience: "movie-catalog-api".to_string(),
        expiration_secs: 3600,
    }
}

pub fn test_keys() -> JwtKeys {
    JwtKeys::new(&test_jwt_config())
}

/// User record whose password is `TEST_PASSWORD` (low bcrypt cost to keep tests fast)
pub fn user(id: &str, email: &str, role: Role) -> User {
    User {
        id: id.to_string(),
        email: email.to_string(),
        password_hash: bcrypt::hash(TEST_PASSWORD, 4).unwrap(),
        role,
        created_at: Utc::now(),
    }
}

pub fn film(title: &str, release_date: &str) -> SwapiFilm {
    SwapiFilm {
        title: title.to_string(),
        opening_crawl: Some(format!("{} opening crawl", title)),
        release_date: release_date.to_string(),
    }
}

pub struct StaticCatalog {
    films: Vec<SwapiFilm>,
}

impl StaticCatalog {
    pub fn new(films: Vec<SwapiFilm>) -> Self {
        StaticCatalog { films }
    }
}

#[async_trait]
impl FilmCatalog for StaticCatalog {
    async fn fetch_films(&self) -> Result<Vec<SwapiFilm>, AppError> {
        Ok(self.films.clone())
    }
}

pub struct FailingCatalog;

#[async_trait]
impl FilmCatalog for FailingCatalog {
    async fn fetch_films(&self) -> Result<Vec<SwapiFilm>, AppError> {
        Err(AppError::Upstream("SWAPI returned status 503 Service Unavailable".to_string()))
    }
}

/// App state over in-memory stores, keeping typed handles for assertions
pub struct TestContext {
    pub state: AppState,
    pub users: Arc<MemoryUserStore>,
    pub movies: Arc<MemoryMovieStore>,
}

impl TestContext {
    pub fn new() -> Self {
        Self::with_catalog(Arc::new(StaticCatalog::new(vec![
            film("A New Hope", "1977-05-25"),
            film("The Empire Strikes Back", "1980-05-17"),
        ])))
    }

    pub fn with_catalog(catalog: Arc<dyn FilmCatalog>) -> Self {
        let users = Arc::new(MemoryUserStore::new());
        let movies = Arc::new(MemoryMovieStore::new());
        let state = AppState {
            users: users.clone(),
            movies: movies.clone(),
            catalog,
            jwt: test_keys(),
        };
        TestContext {
            state,
            users,
            movies,
        }
    }

    /// Seeds a user and returns a bearer token for it
    pub fn seed_user(&self, id: &str, email: &str, role: Role) -> String {
        let record = user(id, email, role);
        let token = self.state.jwt.issue(&record).unwrap();
        self.users.seed(record);
        token
    }
}
