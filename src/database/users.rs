use async_trait::async_trait;
use futures::stream::TryStreamExt;
use mongodb::bson::{doc, oid::ObjectId, DateTime as BsonDateTime};
use mongodb::{Collection, Database};

use super::{is_duplicate_key, MongoDB, USERS_COLLECTION};
use crate::models::{NewUser, User, UserDocument};
use crate::utils::error::AppError;

/// Credential store: persistence of user records
#[async_trait]
pub trait UserStore: Send + Sync {
    /// Fails with `Conflict` when the email is already taken.
    async fn create(&self, user: NewUser) -> Result<User, AppError>;

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, AppError>;

    async fn find_by_id(&self, id: &str) -> Result<Option<User>, AppError>;

    async fn list(&self) -> Result<Vec<User>, AppError>;

    /// Returns `false` when no user has that id.
    async fn update_password(&self, id: &str, password_hash: &str) -> Result<bool, AppError>;

    /// Returns `false` when no user has that id.
    async fn delete(&self, id: &str) -> Result<bool, AppError>;

    async fn ping(&self) -> Result<(), AppError>;
}

pub struct MongoUserStore {
    db: Database,
    collection: Collection<UserDocument>,
}

impl MongoUserStore {
    pub fn new(db: &MongoDB) -> Self {
        MongoUserStore {
            db: db.database().clone(),
            collection: db.collection::<UserDocument>(USERS_COLLECTION),
        }
    }
}

#[async_trait]
impl UserStore for MongoUserStore {
    async fn create(&self, user: NewUser) -> Result<User, AppError> {
        let document = UserDocument {
            _id: None,
            user_id: ObjectId::new().to_hex(),
            email: user.email,
            password: user.password_hash,
            role: user.role,
            created_at: BsonDateTime::now(),
        };

        self.collection.insert_one(&document).await.map_err(|e| {
            if is_duplicate_key(&e) {
                AppError::Conflict("User already exists".to_string())
            } else {
                AppError::Database(format!("Failed to create user: {}", e))
            }
        })?;

        Ok(User::from(document))
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, AppError> {
        let user = self.collection.find_one(doc! { "email": email }).await?;
        Ok(user.map(User::from))
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<User>, AppError> {
        let user = self.collection.find_one(doc! { "user_id": id }).await?;
        Ok(user.map(User::from))
    }

    async fn list(&self) -> Result<Vec<User>, AppError> {
        let cursor = self.collection.find(doc! {}).sort(doc! { "created_at": 1 }).await?;
        let documents: Vec<UserDocument> = cursor.try_collect().await?;
        Ok(documents.into_iter().map(User::from).collect())
    }

    async fn update_password(&self, id: &str, password_hash: &str) -> Result<bool, AppError> {
        let result = self
            .collection
            .update_one(
                doc! { "user_id": id },
                doc! { "$set": { "password": password_hash } },
            )
            .await?;
        Ok(result.matched_count > 0)
    }

    async fn delete(&self, id: &str) -> Result<bool, AppError> {
        let result = self.collection.delete_one(doc! { "user_id": id }).await?;
        Ok(result.deleted_count > 0)
    }

    async fn ping(&self) -> Result<(), AppError> {
        self.db.run_command(doc! { "ping": 1 }).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Role;

    #[tokio::test]
    #[ignore] // Requires MongoDB to be running
    async fn test_duplicate_email_maps_to_conflict() {
        dotenv::dotenv().ok();
        let uri = std::env::var("DATABASE_URL")
            .unwrap_or_else(|_| "mongodb://localhost:27017/movie_catalog_test".to_string());

        let db = MongoDB::new(&uri).await.unwrap();
        let store = MongoUserStore::new(&db);
        let email = format!("dup-{}@example.com", ObjectId::new().to_hex());
        let new_user = || NewUser {
            email: email.clone(),
            password_hash: "hash".to_string(),
            role: Role::User,
        };

        let first = store.create(new_user()).await.unwrap();
        let err = store.create(new_user()).await.unwrap_err();
        store.delete(&first.id).await.unwrap();

        assert!(matches!(err, AppError::Conflict(_)));
        assert_eq!(err.to_string(), "User already exists");
    }
}
