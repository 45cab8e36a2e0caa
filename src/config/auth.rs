//! Authentication configuration

use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;

use super::error::ValidationError;

/// Minimum HS256 secret length accepted.
const MIN_SECRET_LEN: usize = 32;

/// Access token verification settings for the hosted auth provider
#[derive(Debug, Clone, Deserialize)]
pub struct AuthConfig {
    /// Project JWT secret that signs access tokens
    pub jwt_secret: Option<SecretString>,

    /// Expected audience claim
    #[serde(default = "default_audience")]
    pub audience: String,

    /// Expected issuer claim, when set
    pub issuer: Option<String>,
}

impl AuthConfig {
    /// Validate authentication configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        let secret = self
            .jwt_secret
            .as_ref()
            .ok_or(ValidationError::MissingRequired("AUTH__JWT_SECRET"))?;
        if secret.expose_secret().len() < MIN_SECRET_LEN {
            return Err(ValidationError::JwtSecretTooShort);
        }
        if self.audience.is_empty() {
            return Err(ValidationError::MissingRequired("AUTH__AUDIENCE"));
        }
        Ok(())
    }
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            jwt_secret: None,
            audience: default_audience(),
            issuer: None,
        }
    }
}

fn default_audience() -> String {
    "authenticated".to_string()
}
