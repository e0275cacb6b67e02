use std::sync::Arc;

use crate::database::{MovieStore, UserStore};
use crate::services::{FilmCatalog, JwtKeys};

/// Shared handles injected into every worker through `web::Data`
#[derive(Clone)]
pub struct AppState {
    pub users: Arc<dyn UserStore>,
    pub movies: Arc<dyn MovieStore>,
    pub catalog: Arc<dyn FilmCatalog>,
    pub jwt: JwtKeys,
}
