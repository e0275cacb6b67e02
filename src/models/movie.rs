use chrono::{DateTime, Utc};
use mongodb::bson::{oid::ObjectId, DateTime as BsonDateTime};
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Movie as stored in the `movies` collection.
/// `title` is indexed but not unique; the catalog sync dedups on it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MovieDocument {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub _id: Option<ObjectId>,
    pub movie_id: String,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    pub release_year: i32,
    pub genre: String,
    pub created_at: BsonDateTime,
}

#[derive(Debug, Clone, PartialEq, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Movie {
    pub id: String,
    #[schema(example = "A New Hope")]
    pub title: String,
    pub description: Option<String>,
    #[schema(example = 1977)]
    pub release_year: i32,
    #[schema(example = "Sci-Fi")]
    pub genre: String,
    pub created_at: DateTime<Utc>,
}

impl From<MovieDocument> for Movie {
    fn from(doc: MovieDocument) -> Self {
        Movie {
            id: doc.movie_id,
            title: doc.title,
            description: doc.description,
            release_year: doc.release_year,
            genre: doc.genre,
            created_at: DateTime::<Utc>::from_timestamp_millis(doc.created_at.timestamp_millis())
                .unwrap_or_default(),
        }
    }
}

/// Fields of a movie about to be inserted
#[derive(Debug, Clone, PartialEq)]
pub struct NewMovie {
    pub title: String,
    pub description: Option<String>,
    pub release_year: i32,
    pub genre: String,
}

#[derive(Debug, Clone, Deserialize, Validate, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateMovieRequest {
    #[validate(length(min = 1, message = "Title is required"))]
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    pub release_year: i32,
    #[validate(length(min = 1, message = "Genre is required"))]
    pub genre: String,
}

impl From<CreateMovieRequest> for NewMovie {
    fn from(req: CreateMovieRequest) -> Self {
        NewMovie {
            title: req.title,
            description: req.description,
            release_year: req.release_year,
            genre: req.genre,
        }
    }
}

/// Partial update; absent fields are left untouched
#[derive(Debug, Clone, Default, Deserialize, Validate, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateMovieRequest {
    #[validate(length(min = 1, message = "Title cannot be empty"))]
    pub title: Option<String>,
    pub description: Option<String>,
    pub release_year: Option<i32>,
    #[validate(length(min = 1, message = "Genre cannot be empty"))]
    pub genre: Option<String>,
}

impl UpdateMovieRequest {
    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.description.is_none()
            && self.release_year.is_none()
            && self.genre.is_none()
    }

    pub fn apply_to(&self, movie: &mut Movie) {
        if let Some(title) = &self.title {
            movie.title = title.clone();
        }
        if let Some(description) = &self.description {
            movie.description = Some(description.clone());
        }
        if let Some(year) = self.release_year {
            movie.release_year = year;
        }
        if let Some(genre) = &self.genre {
            movie.genre = genre.clone();
        }
    }
}
