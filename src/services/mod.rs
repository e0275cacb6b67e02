pub mod auth_service;
pub mod movie_service;
pub mod swapi_service;
pub mod sync_service;
pub mod user_service;

pub use auth_service::{Claims, JwtKeys};
pub use swapi_service::{FilmCatalog, SwapiClient, SwapiFilm};
pub use sync_service::SyncReport;
