//! Application state - shared across all handlers.

use std::sync::Arc;

use mesto_core::ports::{CardRepository, UserRepository};
use mesto_infra::{
    InMemoryCardRepository, InMemoryUserRepository, MongoCardRepository, MongoConfig,
    MongoConnection, MongoUserRepository,
};

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub users: Arc<dyn UserRepository>,
    pub cards: Arc<dyn CardRepository>,
}

impl AppState {
    /// Build the application state with appropriate repository
    /// implementations: MongoDB when configured and reachable, in-memory
    /// otherwise.
    pub async fn new(db_config: Option<&MongoConfig>) -> Self {
        if let Some(config) = db_config {
            match MongoConnection::init(config).await {
                Ok(conn) => {
                    let users = MongoUserRepository::new(&conn);
                    if let Err(e) = users.ensure_indexes().await {
                        tracing::error!("Failed to create user indexes: {}", e);
                    }
                    let cards = MongoCardRepository::new(&conn);

                    tracing::info!("Application state initialized (MongoDB)");
                    return Self {
                        users: Arc::new(users),
                        cards: Arc::new(cards),
                    };
                }
                Err(e) => {
                    tracing::error!(
                        "Failed to connect to MongoDB: {}. Using in-memory fallback.",
                        e
                    );
                }
            }
        } else {
            tracing::warn!("MONGODB_URI not set. Running without database (in-memory mode).");
        }

        Self::in_memory()
    }

    /// State backed purely by in-memory repositories. Also used by the
    /// handler tests.
    pub fn in_memory() -> Self {
        Self {
            users: Arc::new(InMemoryUserRepository::new()),
            cards: Arc::new(InMemoryCardRepository::new()),
        }
    }
}
