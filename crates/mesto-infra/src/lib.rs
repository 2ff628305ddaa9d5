//! # Mesto Infrastructure
//!
//! Concrete implementations of the ports defined in `mesto-core`:
//! MongoDB repositories, in-memory repositories for tests and database-less
//! operation, and the JWT / Argon2 authentication services.

pub mod auth;
pub mod database;

pub use auth::{Argon2PasswordService, JwtConfig, JwtTokenService};
pub use database::{
    InMemoryCardRepository, InMemoryUserRepository, MongoCardRepository, MongoConfig,
    MongoConnection, MongoUserRepository,
};
