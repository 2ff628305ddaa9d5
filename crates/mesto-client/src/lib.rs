//! # Mesto Client
//!
//! A typed client for the Mesto REST API plus the UI state model the
//! frontend drives. One method per endpoint; the stored bearer token is
//! attached to every call; any non-success status becomes an error carrying
//! the status code. No retry, no caching.

mod api;
pub mod ui;

pub use api::{ApiError, MestoApi};
