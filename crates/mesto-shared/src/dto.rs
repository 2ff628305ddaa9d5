//! Data Transfer Objects - request/response types for the API.
//!
//! Request types carry their validation schema as `validator` attributes;
//! the server rejects violations with 400 before any handler runs.

use serde::{Deserialize, Serialize};
use validator::Validate;

use mesto_core::domain::{Card, User};

/// Request to create an account. Profile fields are optional; the backend
/// fills stock defaults.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct SignupRequest {
    #[validate(email(message = "email must be a valid address"))]
    pub email: String,

    #[validate(length(min = 8, message = "password must be at least 8 characters"))]
    pub password: String,

    #[validate(length(min = 2, max = 30, message = "name must be 2 to 30 characters"))]
    pub name: Option<String>,

    #[validate(length(min = 2, max = 30, message = "about must be 2 to 30 characters"))]
    pub about: Option<String>,

    #[validate(url(message = "avatar must be a valid URL"))]
    pub avatar: Option<String>,
}

/// Request to sign in.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct SigninRequest {
    #[validate(email(message = "email must be a valid address"))]
    pub email: String,

    #[validate(length(min = 1, message = "password is required"))]
    pub password: String,
}

/// PATCH /users/me body.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct UpdateProfileRequest {
    #[validate(length(min = 2, max = 30, message = "name must be 2 to 30 characters"))]
    pub name: String,

    #[validate(length(min = 2, max = 30, message = "about must be 2 to 30 characters"))]
    pub about: String,
}

/// PATCH /users/me/avatar body.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct UpdateAvatarRequest {
    #[validate(url(message = "avatar must be a valid URL"))]
    pub avatar: String,
}

/// POST /cards body.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateCardRequest {
    #[validate(length(min = 2, max = 30, message = "name must be 2 to 30 characters"))]
    pub name: String,

    #[validate(url(message = "link must be a valid URL"))]
    pub link: String,
}

/// A user's public profile. Deliberately has no password field - the hash
/// cannot reach the wire through this type.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserResponse {
    #[serde(rename = "_id")]
    pub id: String,
    pub email: String,
    pub name: String,
    pub about: String,
    pub avatar: String,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id.to_hex(),
            email: user.email,
            name: user.name,
            about: user.about,
            avatar: user.avatar,
        }
    }
}

/// A card with its like set rendered as user id strings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CardResponse {
    #[serde(rename = "_id")]
    pub id: String,
    pub name: String,
    pub link: String,
    pub owner: String,
    pub likes: Vec<String>,
    #[serde(rename = "createdAt")]
    pub created_at: String,
}

impl From<Card> for CardResponse {
    fn from(card: Card) -> Self {
        Self {
            id: card.id.to_hex(),
            name: card.name,
            link: card.link,
            owner: card.owner.to_hex(),
            likes: card.likes.iter().map(|id| id.to_hex()).collect(),
            created_at: card.created_at.to_rfc3339(),
        }
    }
}

/// POST /signin response body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenResponse {
    pub token: String,
}
