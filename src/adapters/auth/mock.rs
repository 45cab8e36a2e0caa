//! Mock session validator for testing.
//!
//! Implements the `SessionValidator` port without a real auth provider.
//!
//! # Example
//!
//! ```ignore
//! let validator = MockSessionValidator::new().with_test_user("valid-token", "user-123");
//! let user = validator.validate("valid-token").await?;
//! ```

use std::collections::HashMap;
use std::sync::RwLock;

use async_trait::async_trait;

use crate::domain::foundation::{AuthError, AuthenticatedUser, UserId};
use crate::ports::SessionValidator;

/// Stores a map of tokens to users. Tokens not in the map return `InvalidToken`.
#[derive(Debug, Default)]
pub struct MockSessionValidator {
    tokens: RwLock<HashMap<String, AuthenticatedUser>>,
    /// Optional error to return for all validations (for error testing)
    force_error: RwLock<Option<AuthError>>,
}

impl MockSessionValidator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a valid token that maps to a user.
    pub fn with_user(self, token: impl Into<String>, user: AuthenticatedUser) -> Self {
        self.tokens.write().unwrap().insert(token.into(), user);
        self
    }

    /// Adds a valid token for a user with the given id.
    pub fn with_test_user(self, token: impl Into<String>, user_id: impl Into<String>) -> Self {
        let user_id = user_id.into();
        let user = AuthenticatedUser::new(
            UserId::new(&user_id).unwrap(),
            Some(format!("{}@test.example.com", user_id)),
            None,
        );
        self.with_user(token, user)
    }

    /// Forces all validations to return the specified error.
    pub fn with_error(self, error: AuthError) -> Self {
        *self.force_error.write().unwrap() = Some(error);
        self
    }
}

#[async_trait]
impl SessionValidator for MockSessionValidator {
    async fn validate(&self, token: &str) -> Result<AuthenticatedUser, AuthError> {
        if let Some(error) = self.force_error.read().unwrap().clone() {
            return Err(error);
        }

        self.tokens
            .read()
            .unwrap()
            .get(token)
            .cloned()
            .ok_or(AuthError::InvalidToken)
    }
}
