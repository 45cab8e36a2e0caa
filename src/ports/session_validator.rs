//! Session validation port for access token verification.
//!
//! This port defines the contract for validating the hosted auth
//! provider's access tokens and extracting user identity. HTTP middleware
//! depends only on this trait.

use async_trait::async_trait;

use crate::domain::foundation::{AuthError, AuthenticatedUser};

/// Validates access tokens and extracts user identity.
///
/// # Contract
///
/// Implementations must:
/// - Validate the token signature
/// - Validate audience and expiry claims
/// - Return `AuthError::InvalidToken` for malformed/bad signature tokens
/// - Return `AuthError::TokenExpired` for expired tokens
/// - Return `AuthError::ServiceUnavailable` for configuration or transient errors
#[async_trait]
pub trait SessionValidator: Send + Sync {
    /// Validate an access token (without the "Bearer " prefix).
    async fn validate(&self, token: &str) -> Result<AuthenticatedUser, AuthError>;
}
