pub mod movies;
pub mod users;

#[cfg(test)]
pub mod memory;

pub use movies::*;
pub use users::*;

use mongodb::bson::{doc, Document};
use mongodb::options::{ClientOptions, IndexOptions};
use mongodb::{Client, Collection, Database, IndexModel};
use std::time::Duration;

pub const USERS_COLLECTION: &str = "users";
pub const MOVIES_COLLECTION: &str = "movies";

const DEFAULT_DATABASE: &str = "movie_catalog";

#[derive(Clone)]
pub struct MongoDB {
    db: Database,
}

impl MongoDB {
    pub async fn new(uri: &str) -> Result<Self, mongodb::error::Error> {
        let mut client_options = ClientOptions::parse(uri).await?;

        client_options.max_pool_size = Some(20);
        client_options.min_pool_size = Some(2);
        client_options.max_idle_time = Some(Duration::from_secs(300));
        client_options.connect_timeout = Some(Duration::from_secs(5));
        client_options.server_selection_timeout = Some(Duration::from_secs(5));

        // Database name comes from the URI path, e.g. mongodb://host:27017/movies
        let db_name = client_options
            .default_database
            .clone()
            .unwrap_or_else(|| DEFAULT_DATABASE.to_string());

        let client = Client::with_options(client_options)?;
        let db = client.database(&db_name);

        // Test connection
        db.list_collection_names().await?;
        log::info!("✅ Connected to MongoDB database: {}", db_name);

        let mongodb = Self { db };
        mongodb.ensure_indexes().await?;

        Ok(mongodb)
    }

    /// Creates the indexes the stores rely on (idempotent)
    async fn ensure_indexes(&self) -> Result<(), mongodb::error::Error> {
        log::info!("🔧 Creating database indexes...");

        let users = self.collection::<Document>(USERS_COLLECTION);
        create_index(&users, doc! { "email": 1 }, true, "users(email)").await?;
        create_index(&users, doc! { "user_id": 1 }, true, "users(user_id)").await?;

        let movies = self.collection::<Document>(MOVIES_COLLECTION);
        create_index(&movies, doc! { "movie_id": 1 }, true, "movies(movie_id)").await?;
        // Non-unique: the sync job looks movies up by exact title
        create_index(&movies, doc! { "title": 1 }, false, "movies(title)").await?;

        log::info!("✅ Database indexes ready");
        Ok(())
    }

    pub fn collection<T: Send + Sync>(&self, name: &str) -> Collection<T> {
        self.db.collection(name)
    }

    pub fn database(&self) -> &Database {
        &self.db
    }
}

async fn create_index(
    collection: &Collection<Document>,
    keys: Document,
    unique: bool,
    label: &str,
) -> Result<(), mongodb::error::Error> {
    let index = IndexModel::builder()
        .keys(keys)
        .options(IndexOptions::builder().unique(unique).build())
        .build();

    collection.create_index(index).await?;
    log::info!("   ✅ Index ready: {}{}", label, if unique { " [unique]" } else { "" });
    Ok(())
}

/// E11000: unique index violation
pub(crate) fn is_duplicate_key(err: &mongodb::error::Error) -> bool {
    use mongodb::error::{ErrorKind, WriteFailure};

    match err.kind.as_ref() {
        ErrorKind::Write(WriteFailure::WriteError(write_error)) => write_error.code == 11000,
        _ => false,
    }
}
