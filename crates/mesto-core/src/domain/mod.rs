//! Domain entities - the core business objects.

pub mod card;
pub mod user;

pub use card::Card;
pub use user::User;
