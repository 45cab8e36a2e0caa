//! Authentication types for the domain layer.
//!
//! These types represent a user whose session token has been verified.
//! They have **no external dependencies** - the hosted auth provider
//! populates them through the `SessionValidator` port.

use super::UserId;
use thiserror::Error;

/// Authenticated user extracted from a verified access token.
#[derive(Debug, Clone)]
pub struct AuthenticatedUser {
    /// The unique user identifier from the auth provider (`sub` claim).
    pub id: UserId,

    /// User's email address from the token claims, if present.
    pub email: Option<String>,

    /// Display name from the provider's user metadata, if present.
    pub display_name: Option<String>,
}

impl AuthenticatedUser {
    /// Creates a new authenticated user.
    pub fn new(id: UserId, email: Option<String>, display_name: Option<String>) -> Self {
        Self {
            id,
            email,
            display_name,
        }
    }
}

/// Authentication errors that can occur during token validation.
#[derive(Debug, Clone, Error)]
pub enum AuthError {
    /// The token is missing, malformed, or has an invalid signature.
    #[error("Invalid or expired token")]
    InvalidToken,

    /// The token has expired.
    #[error("Token expired")]
    TokenExpired,

    /// The authentication service is unavailable or misconfigured.
    #[error("Auth service unavailable: {0}")]
    ServiceUnavailable(String),
}

impl AuthError {
    /// Creates a service unavailable error with a message.
    pub fn service_unavailable(message: impl Into<String>) -> Self {
        Self::ServiceUnavailable(message.into())
    }

    /// Returns true if this error indicates the user should sign in again.
    pub fn requires_reauthentication(&self) -> bool {
        matches!(self, AuthError::InvalidToken | AuthError::TokenExpired)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn authenticated_user_new_creates_user() {
        let user = AuthenticatedUser::new(
            UserId::new("user-123").unwrap(),
            Some("test@example.com".to_string()),
            None,
        );

        assert_eq!(user.id.as_str(), "user-123");
        assert_eq!(user.email.as_deref(), Some("test@example.com"));
        assert!(user.display_name.is_none());
    }

    #[test]
    fn auth_error_service_unavailable_displays_message() {
        let err = AuthError::service_unavailable("missing jwt secret");
        assert_eq!(format!("{}", err), "Auth service unavailable: missing jwt secret");
    }

    #[test]
    fn auth_error_requires_reauthentication_for_token_errors() {
        assert!(AuthError::InvalidToken.requires_reauthentication());
        assert!(AuthError::TokenExpired.requires_reauthentication());
        assert!(!AuthError::service_unavailable("").requires_reauthentication());
    }
}
