//! BSON document shapes for the `users` and `cards` collections.
//!
//! Kept separate from the domain entities so persistence concerns (field
//! renames, BSON datetime encoding) never leak into `mesto-core`.

use bson::oid::ObjectId;
use serde::{Deserialize, Serialize};

use mesto_core::domain::{Card, User};

#[derive(Debug, Serialize, Deserialize)]
pub(crate) struct UserDocument {
    #[serde(rename = "_id")]
    pub id: ObjectId,
    pub email: String,
    pub password: String,
    pub name: String,
    pub about: String,
    pub avatar: String,
    pub created_at: bson::DateTime,
}

impl From<User> for UserDocument {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            email: user.email,
            password: user.password_hash,
            name: user.name,
            about: user.about,
            avatar: user.avatar,
            created_at: user.created_at.into(),
        }
    }
}

impl From<UserDocument> for User {
    fn from(doc: UserDocument) -> Self {
        Self {
            id: doc.id,
            email: doc.email,
            password_hash: doc.password,
            name: doc.name,
            about: doc.about,
            avatar: doc.avatar,
            created_at: doc.created_at.to_chrono(),
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub(crate) struct CardDocument {
    #[serde(rename = "_id")]
    pub id: ObjectId,
    pub name: String,
    pub link: String,
    pub owner: ObjectId,
    pub likes: Vec<ObjectId>,
    pub created_at: bson::DateTime,
}

impl From<Card> for CardDocument {
    fn from(card: Card) -> Self {
        Self {
            id: card.id,
            name: card.name,
            link: card.link,
            owner: card.owner,
            likes: card.likes,
            created_at: card.created_at.into(),
        }
    }
}

impl From<CardDocument> for Card {
    fn from(doc: CardDocument) -> Self {
        Self {
            id: doc.id,
            name: doc.name,
            link: doc.link,
            owner: doc.owner,
            likes: doc.likes,
            created_at: doc.created_at.to_chrono(),
        }
    }
}
