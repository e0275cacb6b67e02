//! In-process stores backing the unit tests.

use async_trait::async_trait;
use chrono::Utc;
use mongodb::bson::oid::ObjectId;
use std::sync::Mutex;

use super::{MovieStore, UserStore};
use crate::models::{Movie, NewMovie, NewUser, UpdateMovieRequest, User};
use crate::utils::error::AppError;

#[derive(Default)]
pub struct MemoryUserStore {
    users: Mutex<Vec<User>>,
}

impl MemoryUserStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a record as-is, bypassing the email check
    pub fn seed(&self, user: User) {
        self.users.lock().unwrap().push(user);
    }
}

#[async_trait]
impl UserStore for MemoryUserStore {
    async fn create(&self, user: NewUser) -> Result<User, AppError> {
        let mut users = self.users.lock().unwrap();
        if users.iter().any(|u| u.email == user.email) {
            return Err(AppError::Conflict("User already exists".to_string()));
        }
        let record = User {
            id: ObjectId::new().to_hex(),
            email: user.email,
            password_hash: user.password_hash,
            role: user.role,
            created_at: Utc::now(),
        };
        users.push(record.clone());
        Ok(record)
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, AppError> {
        Ok(self.users.lock().unwrap().iter().find(|u| u.email == email).cloned())
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<User>, AppError> {
        Ok(self.users.lock().unwrap().iter().find(|u| u.id == id).cloned())
    }

    async fn list(&self) -> Result<Vec<User>, AppError> {
        Ok(self.users.lock().unwrap().clone())
    }

    async fn update_password(&self, id: &str, password_hash: &str) -> Result<bool, AppError> {
        let mut users = self.users.lock().unwrap();
        match users.iter_mut().find(|u| u.id == id) {
            Some(user) => {
                user.password_hash = password_hash.to_string();
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn delete(&self, id: &str) -> Result<bool, AppError> {
        let mut users = self.users.lock().unwrap();
        let before = users.len();
        users.retain(|u| u.id != id);
        Ok(users.len() < before)
    }

    async fn ping(&self) -> Result<(), AppError> {
        Ok(())
    }
}

#[derive(Default)]
pub struct MemoryMovieStore {
    movies: Mutex<Vec<Movie>>,
    // Inserts allowed before `insert` starts failing
    insert_budget: Mutex<Option<usize>>,
}

impl MemoryMovieStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn fail_inserts_after(&self, successful: usize) {
        *self.insert_budget.lock().unwrap() = Some(successful);
    }

    pub fn snapshot(&self) -> Vec<Movie> {
        self.movies.lock().unwrap().clone()
    }
}

#[async_trait]
impl MovieStore for MemoryMovieStore {
    async fn list(&self) -> Result<Vec<Movie>, AppError> {
        Ok(self.snapshot())
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<Movie>, AppError> {
        Ok(self.movies.lock().unwrap().iter().find(|m| m.id == id).cloned())
    }

    async fn find_by_title(&self, title: &str) -> Result<Option<Movie>, AppError> {
        Ok(self.movies.lock().unwrap().iter().find(|m| m.title == title).cloned())
    }

    async fn insert(&self, movie: NewMovie) -> Result<Movie, AppError> {
        {
            let mut budget = self.insert_budget.lock().unwrap();
            match budget.as_mut() {
                Some(0) => return Err(AppError::Database("simulated insert failure".to_string())),
                Some(left) => *left -= 1,
                None => {}
            }
        }

        let record = Movie {
            id: ObjectId::new().to_hex(),
            title: movie.title,
            description: movie.description,
            release_year: movie.release_year,
            genre: movie.genre,
            created_at: Utc::now(),
        };
        self.movies.lock().unwrap().push(record.clone());
        Ok(record)
    }

    async fn update(&self, id: &str, changes: &UpdateMovieRequest) -> Result<Option<Movie>, AppError> {
        let mut movies = self.movies.lock().unwrap();
        Ok(movies.iter_mut().find(|m| m.id == id).map(|movie| {
            changes.apply_to(movie);
            movie.clone()
        }))
    }

    async fn delete(&self, id: &str) -> Result<bool, AppError> {
        let mut movies = self.movies.lock().unwrap();
        let before = movies.len();
        movies.retain(|m| m.id != id);
        Ok(movies.len() < before)
    }
}
