//! Application configuration loaded from environment variables.
//!
//! Everything the server needs is collected here and passed explicitly to
//! the bootstrap; no module reads the environment on its own.

use std::env;

use mesto_infra::JwtConfig;
use mesto_infra::MongoConfig;

/// Application configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub database: Option<MongoConfig>,
    pub jwt: JwtConfig,
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("JWT_SECRET must be set when RUST_ENV is production")]
    MissingJwtSecret,
}

impl AppConfig {
    /// Load configuration from environment variables.
    ///
    /// Refuses to start in production without an explicit token-signing
    /// secret; in development a default is used with a logged warning.
    pub fn from_env() -> Result<Self, ConfigError> {
        let is_production = env::var("RUST_ENV")
            .map(|v| v == "production" || v == "prod")
            .unwrap_or(false);

        let jwt_secret = match env::var("JWT_SECRET") {
            Ok(secret) => secret,
            Err(_) if is_production => return Err(ConfigError::MissingJwtSecret),
            Err(_) => {
                tracing::warn!("Using default JWT secret. Set JWT_SECRET for production use.");
                JwtConfig::default().secret
            }
        };

        let jwt = JwtConfig {
            secret: jwt_secret,
            ..JwtConfig::default()
        };

        let database = env::var("MONGODB_URI").ok().map(|uri| MongoConfig {
            uri,
            database: env::var("DATABASE_NAME").unwrap_or_else(|_| "mestodb".to_string()),
        });

        Ok(Self {
            host: env::var("HOST").unwrap_or_else(|_| "127.0.0.1".to_string()),
            port: env::var("PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(3000),
            database,
            jwt,
        })
    }
}
