//! In-memory repository implementations - used for tests and as a fallback
//! when no database is configured.
//!
//! Note: data is lost on process restart. The maps are guarded by async
//! RwLocks so lookups never block the executor.

use std::collections::HashMap;

use async_trait::async_trait;
use bson::oid::ObjectId;
use tokio::sync::RwLock;

use mesto_core::domain::{Card, User};
use mesto_core::error::RepoError;
use mesto_core::ports::{CardRepository, ProfilePatch, UserRepository};

/// In-memory user store enforcing the same email uniqueness the Mongo
/// index provides.
#[derive(Default)]
pub struct InMemoryUserRepository {
    store: RwLock<HashMap<ObjectId, User>>,
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn find_all(&self) -> Result<Vec<User>, RepoError> {
        let store = self.store.read().await;
        let mut users: Vec<User> = store.values().cloned().collect();
        users.sort_by_key(|u| u.created_at);
        Ok(users)
    }

    async fn find_by_id(&self, id: ObjectId) -> Result<Option<User>, RepoError> {
        Ok(self.store.read().await.get(&id).cloned())
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, RepoError> {
        let store = self.store.read().await;
        Ok(store.values().find(|u| u.email == email).cloned())
    }

    async fn insert(&self, user: User) -> Result<User, RepoError> {
        let mut store = self.store.write().await;

        if store.values().any(|u| u.email == user.email) {
            return Err(RepoError::Constraint("email already registered".to_string()));
        }

        store.insert(user.id, user.clone());
        Ok(user)
    }

    async fn update_profile(
        &self,
        id: ObjectId,
        patch: ProfilePatch,
    ) -> Result<Option<User>, RepoError> {
        let mut store = self.store.write().await;

        let Some(user) = store.get_mut(&id) else {
            return Ok(None);
        };

        match patch {
            ProfilePatch::Info { name, about } => {
                user.name = name;
                user.about = about;
            }
            ProfilePatch::Avatar { avatar } => {
                user.avatar = avatar;
            }
        }

        Ok(Some(user.clone()))
    }
}

/// In-memory card store mirroring the `$addToSet` / `$pull` semantics of
/// the Mongo adapter.
#[derive(Default)]
pub struct InMemoryCardRepository {
    store: RwLock<HashMap<ObjectId, Card>>,
}

impl InMemoryCardRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl CardRepository for InMemoryCardRepository {
    async fn find_all(&self) -> Result<Vec<Card>, RepoError> {
        let store = self.store.read().await;
        let mut cards: Vec<Card> = store.values().cloned().collect();
        cards.sort_by_key(|c| c.created_at);
        Ok(cards)
    }

    async fn find_by_id(&self, id: ObjectId) -> Result<Option<Card>, RepoError> {
        Ok(self.store.read().await.get(&id).cloned())
    }

    async fn insert(&self, card: Card) -> Result<Card, RepoError> {
        let mut store = self.store.write().await;
        store.insert(card.id, card.clone());
        Ok(card)
    }

    async fn delete(&self, id: ObjectId) -> Result<(), RepoError> {
        let mut store = self.store.write().await;

        if store.remove(&id).is_none() {
            return Err(RepoError::NotFound);
        }

        Ok(())
    }

    async fn add_like(
        &self,
        card_id: ObjectId,
        user_id: ObjectId,
    ) -> Result<Option<Card>, RepoError> {
        let mut store = self.store.write().await;

        let Some(card) = store.get_mut(&card_id) else {
            return Ok(None);
        };

        if !card.likes.contains(&user_id) {
            card.likes.push(user_id);
        }

        Ok(Some(card.clone()))
    }

    async fn remove_like(
        &self,
        card_id: ObjectId,
        user_id: ObjectId,
    ) -> Result<Option<Card>, RepoError> {
        let mut store = self.store.write().await;

        let Some(card) = store.get_mut(&card_id) else {
            return Ok(None);
        };

        card.likes.retain(|id| *id != user_id);

        Ok(Some(card.clone()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_user(email: &str) -> User {
        User::new(email.to_string(), "hash".to_string(), None, None, None)
    }

    #[tokio::test]
    async fn test_insert_rejects_duplicate_email() {
        let repo = InMemoryUserRepository::new();
        repo.insert(test_user("anna@example.com")).await.unwrap();

        let result = repo.insert(test_user("anna@example.com")).await;

        assert!(matches!(result, Err(RepoError::Constraint(_))));
    }

    #[tokio::test]
    async fn test_update_profile_missing_user_is_none() {
        let repo = InMemoryUserRepository::new();

        let result = repo
            .update_profile(
                ObjectId::new(),
                ProfilePatch::Avatar {
                    avatar: "https://example.com/a.png".to_string(),
                },
            )
            .await
            .unwrap();

        assert!(result.is_none());
    }

    #[tokio::test]
    async fn test_add_like_is_idempotent() {
        let repo = InMemoryCardRepository::new();
        let liker = ObjectId::new();
        let card = Card::new(
            "Baikal".to_string(),
            "https://example.com/b.jpg".to_string(),
            ObjectId::new(),
        );
        let card_id = card.id;
        repo.insert(card).await.unwrap();

        repo.add_like(card_id, liker).await.unwrap();
        let updated = repo.add_like(card_id, liker).await.unwrap().unwrap();

        assert_eq!(updated.likes.len(), 1);
    }

    #[tokio::test]
    async fn test_remove_like_on_unliked_card_is_noop() {
        let repo = InMemoryCardRepository::new();
        let card = Card::new(
            "Baikal".to_string(),
            "https://example.com/b.jpg".to_string(),
            ObjectId::new(),
        );
        let card_id = card.id;
        repo.insert(card).await.unwrap();

        let updated = repo
            .remove_like(card_id, ObjectId::new())
            .await
            .unwrap()
            .unwrap();

        assert!(updated.likes.is_empty());
    }

    #[tokio::test]
    async fn test_delete_missing_card_is_not_found() {
        let repo = InMemoryCardRepository::new();

        let result = repo.delete(ObjectId::new()).await;

        assert!(matches!(result, Err(RepoError::NotFound)));
    }
}
