//! Foundation module - Shared domain primitives.
//!
//! Contains value objects, identifiers and error types that form the
//! vocabulary of the Resonance domain.

mod auth;
mod errors;
mod ids;
mod timestamp;

pub use auth::{AuthError, AuthenticatedUser};
pub use errors::ValidationError;
pub use ids::UserId;
pub use timestamp::Timestamp;
