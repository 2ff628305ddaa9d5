use mongodb::{Client, options::ClientOptions};

use mesto_core::error::RepoError;

/// Configuration for the MongoDB connection.
#[derive(Debug, Clone)]
pub struct MongoConfig {
    pub uri: String,
    pub database: String,
}

/// MongoDB connection wrapper.
///
/// Owns the driver client (which owns the connection pool) and hands out
/// typed collection handles to the repositories.
#[derive(Clone)]
pub struct MongoConnection {
    client: Client,
    database_name: String,
}

impl MongoConnection {
    /// Connect and verify the server is reachable with a ping.
    pub async fn init(config: &MongoConfig) -> Result<Self, RepoError> {
        tracing::info!("Initializing MongoDB connection...");

        let mut options = ClientOptions::parse(&config.uri)
            .await
            .map_err(|e| RepoError::Connection(e.to_string()))?;
        options.app_name = Some("mesto-api".to_string());

        let client =
            Client::with_options(options).map_err(|e| RepoError::Connection(e.to_string()))?;

        client
            .database(&config.database)
            .run_command(bson::doc! { "ping": 1 })
            .await
            .map_err(|e| RepoError::Connection(e.to_string()))?;

        tracing::info!(database = %config.database, "MongoDB connected");

        Ok(Self {
            client,
            database_name: config.database.clone(),
        })
    }

    pub fn database(&self) -> mongodb::Database {
        self.client.database(&self.database_name)
    }
}
