use async_trait::async_trait;
use bson::oid::ObjectId;

use crate::domain::{Card, User};
use crate::error::RepoError;

/// A partial update to a user's own profile.
///
/// The two PATCH endpoints touch disjoint field sets; one atomic update
/// path covers both.
#[derive(Debug, Clone)]
pub enum ProfilePatch {
    Info { name: String, about: String },
    Avatar { avatar: String },
}

/// User persistence port.
#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn find_all(&self) -> Result<Vec<User>, RepoError>;

    async fn find_by_id(&self, id: ObjectId) -> Result<Option<User>, RepoError>;

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, RepoError>;

    /// Insert a new user. Fails with [`RepoError::Constraint`] when the
    /// email is already registered.
    async fn insert(&self, user: User) -> Result<User, RepoError>;

    /// Apply a profile patch, returning the updated user or `None` when the
    /// record no longer exists.
    async fn update_profile(
        &self,
        id: ObjectId,
        patch: ProfilePatch,
    ) -> Result<Option<User>, RepoError>;
}

/// Card persistence port.
#[async_trait]
pub trait CardRepository: Send + Sync {
    async fn find_all(&self) -> Result<Vec<Card>, RepoError>;

    async fn find_by_id(&self, id: ObjectId) -> Result<Option<Card>, RepoError>;

    async fn insert(&self, card: Card) -> Result<Card, RepoError>;

    /// Delete a card. Fails with [`RepoError::NotFound`] when absent.
    /// Ownership checks belong to the caller; the repository does not know
    /// who is asking.
    async fn delete(&self, id: ObjectId) -> Result<(), RepoError>;

    /// Add `user_id` to the card's like set (idempotent union), returning
    /// the updated card or `None` when the card is absent.
    async fn add_like(
        &self,
        card_id: ObjectId,
        user_id: ObjectId,
    ) -> Result<Option<Card>, RepoError>;

    /// Remove `user_id` from the card's like set (idempotent), returning
    /// the updated card or `None` when the card is absent.
    async fn remove_like(
        &self,
        card_id: ObjectId,
        user_id: ObjectId,
    ) -> Result<Option<Card>, RepoError>;
}
