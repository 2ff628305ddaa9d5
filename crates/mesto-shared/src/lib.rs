//! # Mesto Shared
//!
//! Types shared between the backend and the API client: request DTOs with
//! their declarative validation schemas, and response envelopes.

pub mod dto;
pub mod response;

pub use response::{Data, ErrorResponse};
