use async_trait::async_trait;
use futures::stream::TryStreamExt;
use mongodb::bson::{doc, oid::ObjectId, DateTime as BsonDateTime, Document};
use mongodb::Collection;

use super::{MongoDB, MOVIES_COLLECTION};
use crate::models::{Movie, MovieDocument, NewMovie, UpdateMovieRequest};
use crate::utils::error::AppError;

/// Movie store: persistence of movie records
#[async_trait]
pub trait MovieStore: Send + Sync {
    async fn list(&self) -> Result<Vec<Movie>, AppError>;

    async fn find_by_id(&self, id: &str) -> Result<Option<Movie>, AppError>;

    /// Exact title match; first hit wins when titles repeat.
    async fn find_by_title(&self, title: &str) -> Result<Option<Movie>, AppError>;

    async fn insert(&self, movie: NewMovie) -> Result<Movie, AppError>;

    /// Returns `None` when no movie has that id.
    async fn update(&self, id: &str, changes: &UpdateMovieRequest) -> Result<Option<Movie>, AppError>;

    /// Returns `false` when no movie has that id.
    async fn delete(&self, id: &str) -> Result<bool, AppError>;
}

pub struct MongoMovieStore {
    collection: Collection<MovieDocument>,
}

impl MongoMovieStore {
    pub fn new(db: &MongoDB) -> Self {
        MongoMovieStore {
            collection: db.collection::<MovieDocument>(MOVIES_COLLECTION),
        }
    }
}

fn update_document(changes: &UpdateMovieRequest) -> Document {
    let mut set = Document::new();
    if let Some(title) = &changes.title {
        set.insert("title", title);
    }
    if let Some(description) = &changes.description {
        set.insert("description", description);
    }
    if let Some(year) = changes.release_year {
        set.insert("release_year", year);
    }
    if let Some(genre) = &changes.genre {
        set.insert("genre", genre);
    }
    set
}

#[async_trait]
impl MovieStore for MongoMovieStore {
    async fn list(&self) -> Result<Vec<Movie>, AppError> {
        let cursor = self.collection.find(doc! {}).sort(doc! { "created_at": 1 }).await?;
        let documents: Vec<MovieDocument> = cursor.try_collect().await?;
        Ok(documents.into_iter().map(Movie::from).collect())
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<Movie>, AppError> {
        let movie = self.collection.find_one(doc! { "movie_id": id }).await?;
        Ok(movie.map(Movie::from))
    }

    async fn find_by_title(&self, title: &str) -> Result<Option<Movie>, AppError> {
        let movie = self.collection.find_one(doc! { "title": title }).await?;
        Ok(movie.map(Movie::from))
    }

    async fn insert(&self, movie: NewMovie) -> Result<Movie, AppError> {
        let document = MovieDocument {
            _id: None,
            movie_id: ObjectId::new().to_hex(),
            title: movie.title,
            description: movie.description,
            release_year: movie.release_year,
            genre: movie.genre,
            created_at: BsonDateTime::now(),
        };

        self.collection
            .insert_one(&document)
            .await
            .map_err(|e| AppError::Database(format!("Failed to create movie: {}", e)))?;

        Ok(Movie::from(document))
    }

    async fn update(&self, id: &str, changes: &UpdateMovieRequest) -> Result<Option<Movie>, AppError> {
        let set = update_document(changes);

        // MongoDB rejects an empty $set
        if !set.is_empty() {
            let result = self
                .collection
                .update_one(doc! { "movie_id": id }, doc! { "$set": set })
                .await?;
            if result.matched_count == 0 {
                return Ok(None);
            }
        }

        self.find_by_id(id).await
    }

    async fn delete(&self, id: &str) -> Result<bool, AppError> {
        let result = self.collection.delete_one(doc! { "movie_id": id }).await?;
        Ok(result.deleted_count > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_update_document_only_sets_present_fields() {
        let changes = UpdateMovieRequest {
            title: Some("Attack of the Clones".into()),
            release_year: Some(2002),
            ..Default::default()
        };
        let set = update_document(&changes);

        assert_eq!(set.get_str("title").unwrap(), "Attack of the Clones");
        assert_eq!(set.get_i32("release_year").unwrap(), 2002);
        assert!(!set.contains_key("genre"));
        assert!(!set.contains_key("description"));
        assert!(update_document(&UpdateMovieRequest::default()).is_empty());
    }
}
