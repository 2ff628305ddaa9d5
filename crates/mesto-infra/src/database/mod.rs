//! Database adapters: MongoDB repositories plus in-memory fallbacks.

mod connection;
mod document;
mod memory;
mod mongo_repo;

pub use connection::{MongoConfig, MongoConnection};
pub use memory::{InMemoryCardRepository, InMemoryUserRepository};
pub use mongo_repo::{MongoCardRepository, MongoUserRepository};
