//! MongoDB repository implementations.

use async_trait::async_trait;
use bson::{doc, oid::ObjectId};
use futures::TryStreamExt;
use mongodb::options::{FindOneAndUpdateOptions, IndexOptions, ReturnDocument};
use mongodb::{Collection, IndexModel, error::ErrorKind, error::WriteFailure};

use mesto_core::domain::{Card, User};
use mesto_core::error::RepoError;
use mesto_core::ports::{CardRepository, ProfilePatch, UserRepository};

use super::connection::MongoConnection;
use super::document::{CardDocument, UserDocument};

/// Duplicate key violations surface as write error code 11000. This is the
/// only place the driver's error shape is inspected.
fn is_duplicate_key(err: &mongodb::error::Error) -> bool {
    match *err.kind {
        ErrorKind::Write(WriteFailure::WriteError(ref write_err)) => write_err.code == 11000,
        _ => false,
    }
}

fn query_err(err: mongodb::error::Error) -> RepoError {
    RepoError::Query(err.to_string())
}

fn after_update() -> FindOneAndUpdateOptions {
    FindOneAndUpdateOptions::builder()
        .return_document(ReturnDocument::After)
        .build()
}

/// User repository backed by the `users` collection.
pub struct MongoUserRepository {
    collection: Collection<UserDocument>,
}

impl MongoUserRepository {
    pub fn new(conn: &MongoConnection) -> Self {
        Self {
            collection: conn.database().collection("users"),
        }
    }

    /// Create the unique email index. Called once at startup; email
    /// uniqueness is enforced by the database, not by application checks.
    pub async fn ensure_indexes(&self) -> Result<(), RepoError> {
        let email_index = IndexModel::builder()
            .keys(doc! { "email": 1 })
            .options(
                IndexOptions::builder()
                    .unique(true)
                    .name("email_unique".to_string())
                    .build(),
            )
            .build();

        self.collection
            .create_index(email_index)
            .await
            .map_err(query_err)?;

        Ok(())
    }
}

#[async_trait]
impl UserRepository for MongoUserRepository {
    async fn find_all(&self) -> Result<Vec<User>, RepoError> {
        let docs: Vec<UserDocument> = self
            .collection
            .find(doc! {})
            .sort(doc! { "created_at": 1 })
            .await
            .map_err(query_err)?
            .try_collect()
            .await
            .map_err(query_err)?;

        Ok(docs.into_iter().map(Into::into).collect())
    }

    async fn find_by_id(&self, id: ObjectId) -> Result<Option<User>, RepoError> {
        let doc = self
            .collection
            .find_one(doc! { "_id": id })
            .await
            .map_err(query_err)?;

        Ok(doc.map(Into::into))
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, RepoError> {
        let doc = self
            .collection
            .find_one(doc! { "email": email })
            .await
            .map_err(query_err)?;

        Ok(doc.map(Into::into))
    }

    async fn insert(&self, user: User) -> Result<User, RepoError> {
        let document = UserDocument::from(user.clone());

        self.collection.insert_one(&document).await.map_err(|e| {
            if is_duplicate_key(&e) {
                RepoError::Constraint("email already registered".to_string())
            } else {
                query_err(e)
            }
        })?;

        Ok(user)
    }

    async fn update_profile(
        &self,
        id: ObjectId,
        patch: ProfilePatch,
    ) -> Result<Option<User>, RepoError> {
        let set = match patch {
            ProfilePatch::Info { name, about } => doc! { "name": name, "about": about },
            ProfilePatch::Avatar { avatar } => doc! { "avatar": avatar },
        };

        let updated = self
            .collection
            .find_one_and_update(doc! { "_id": id }, doc! { "$set": set })
            .with_options(after_update())
            .await
            .map_err(query_err)?;

        Ok(updated.map(Into::into))
    }
}

/// Card repository backed by the `cards` collection.
pub struct MongoCardRepository {
    collection: Collection<CardDocument>,
}

impl MongoCardRepository {
    pub fn new(conn: &MongoConnection) -> Self {
        Self {
            collection: conn.database().collection("cards"),
        }
    }
}

#[async_trait]
impl CardRepository for MongoCardRepository {
    async fn find_all(&self) -> Result<Vec<Card>, RepoError> {
        let docs: Vec<CardDocument> = self
            .collection
            .find(doc! {})
            .sort(doc! { "created_at": 1 })
            .await
            .map_err(query_err)?
            .try_collect()
            .await
            .map_err(query_err)?;

        Ok(docs.into_iter().map(Into::into).collect())
    }

    async fn find_by_id(&self, id: ObjectId) -> Result<Option<Card>, RepoError> {
        let doc = self
            .collection
            .find_one(doc! { "_id": id })
            .await
            .map_err(query_err)?;

        Ok(doc.map(Into::into))
    }

    async fn insert(&self, card: Card) -> Result<Card, RepoError> {
        let document = CardDocument::from(card.clone());

        self.collection
            .insert_one(&document)
            .await
            .map_err(query_err)?;

        Ok(card)
    }

    async fn delete(&self, id: ObjectId) -> Result<(), RepoError> {
        let result = self
            .collection
            .delete_one(doc! { "_id": id })
            .await
            .map_err(query_err)?;

        if result.deleted_count == 0 {
            return Err(RepoError::NotFound);
        }

        Ok(())
    }

    async fn add_like(
        &self,
        card_id: ObjectId,
        user_id: ObjectId,
    ) -> Result<Option<Card>, RepoError> {
        // $addToSet keeps the like set deduplicated without a read-modify-write.
        let updated = self
            .collection
            .find_one_and_update(
                doc! { "_id": card_id },
                doc! { "$addToSet": { "likes": user_id } },
            )
            .with_options(after_update())
            .await
            .map_err(query_err)?;

        Ok(updated.map(Into::into))
    }

    async fn remove_like(
        &self,
        card_id: ObjectId,
        user_id: ObjectId,
    ) -> Result<Option<Card>, RepoError> {
        let updated = self
            .collection
            .find_one_and_update(
                doc! { "_id": card_id },
                doc! { "$pull": { "likes": user_id } },
            )
            .with_options(after_update())
            .await
            .map_err(query_err)?;

        Ok(updated.map(Into::into))
    }
}
