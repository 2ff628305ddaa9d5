//! Standardized API response envelopes.

use serde::{Deserialize, Serialize};

/// Successful response wrapper: `{ "data": ... }`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Data<T> {
    pub data: T,
}

impl<T> Data<T> {
    pub fn new(data: T) -> Self {
        Self { data }
    }
}

/// Error body: `{ "message": ... }`. Every failure, validation to 500,
/// renders through this shape; internals never leak past the message.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub message: String,
}

impl ErrorResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    pub fn internal_error() -> Self {
        Self::new("Internal server error")
    }
}
