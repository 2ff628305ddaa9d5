use bson::oid::ObjectId;
use chrono::{DateTime, Utc};

/// Default profile fields applied when signup omits them.
pub const DEFAULT_NAME: &str = "Jacques-Yves Cousteau";
pub const DEFAULT_ABOUT: &str = "Explorer";
pub const DEFAULT_AVATAR: &str =
    "https://pictures.s3.yandex.net/resources/jacques-cousteau_1604399756.png";

/// User entity - an account holder.
///
/// The password hash never leaves the backend; response shaping lives in
/// `mesto-shared` and deliberately has no password field.
#[derive(Debug, Clone)]
pub struct User {
    pub id: ObjectId,
    pub email: String,
    pub password_hash: String,
    pub name: String,
    pub about: String,
    pub avatar: String,
    pub created_at: DateTime<Utc>,
}

impl User {
    /// Create a new user with generated ID, filling omitted profile fields
    /// with the stock defaults.
    pub fn new(
        email: String,
        password_hash: String,
        name: Option<String>,
        about: Option<String>,
        avatar: Option<String>,
    ) -> Self {
        Self {
            id: ObjectId::new(),
            email,
            password_hash,
            name: name.unwrap_or_else(|| DEFAULT_NAME.to_string()),
            about: about.unwrap_or_else(|| DEFAULT_ABOUT.to_string()),
            avatar: avatar.unwrap_or_else(|| DEFAULT_AVATAR.to_string()),
            created_at: Utc::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_user_applies_defaults() {
        let user = User::new("a@b.com".into(), "hash".into(), None, None, None);

        assert_eq!(user.name, DEFAULT_NAME);
        assert_eq!(user.about, DEFAULT_ABOUT);
        assert_eq!(user.avatar, DEFAULT_AVATAR);
    }

    #[test]
    fn new_user_keeps_explicit_fields() {
        let user = User::new(
            "a@b.com".into(),
            "hash".into(),
            Some("Anna".into()),
            Some("Photographer".into()),
            None,
        );

        assert_eq!(user.name, "Anna");
        assert_eq!(user.about, "Photographer");
        assert_eq!(user.avatar, DEFAULT_AVATAR);
    }
}
