use bson::oid::ObjectId;
use chrono::{DateTime, Utc};

/// Card entity - a user-submitted photo with a like set.
#[derive(Debug, Clone)]
pub struct Card {
    pub id: ObjectId,
    pub name: String,
    pub link: String,
    /// The creating user. Immutable after creation; only the owner may
    /// delete the card.
    pub owner: ObjectId,
    /// Deduplicated set of users who liked the card.
    pub likes: Vec<ObjectId>,
    pub created_at: DateTime<Utc>,
}

impl Card {
    /// Create a new card owned by `owner` with an empty like set.
    pub fn new(name: String, link: String, owner: ObjectId) -> Self {
        Self {
            id: ObjectId::new(),
            name,
            link,
            owner,
            likes: Vec::new(),
            created_at: Utc::now(),
        }
    }

    /// Whether `user_id` is the card's owner.
    pub fn is_owned_by(&self, user_id: ObjectId) -> bool {
        self.owner == user_id
    }

    /// Whether `user_id` appears in the like set.
    pub fn is_liked_by(&self, user_id: ObjectId) -> bool {
        self.likes.contains(&user_id)
    }
}
