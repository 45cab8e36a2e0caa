//! JWT adapter for the hosted auth provider's access tokens.
//!
//! This adapter implements the `SessionValidator` port for a Supabase-style
//! auth service, which signs access tokens with HS256 using the project's
//! JWT secret. It validates:
//!
//! - **Signature**: HS256 against the configured secret
//! - **Audience (aud)**: Must contain the configured audience (`authenticated`)
//! - **Expiry (exp)**: Must be in the future
//! - **Issuer (iss)**: Must match, when an issuer is configured
//!
//! Claims are mapped onto the domain `AuthenticatedUser`.

use async_trait::async_trait;
use jsonwebtoken::{decode, Algorithm, DecodingKey, TokenData, Validation};
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};

use crate::domain::foundation::{AuthError, AuthenticatedUser, UserId};
use crate::ports::SessionValidator;

/// Configuration for the JWT adapter.
#[derive(Clone)]
pub struct SupabaseJwtConfig {
    /// Project JWT secret used to sign access tokens.
    pub jwt_secret: SecretString,

    /// Expected audience claim.
    pub audience: String,

    /// Expected issuer, e.g. `https://<project>.supabase.co/auth/v1`.
    pub issuer: Option<String>,
}

impl SupabaseJwtConfig {
    pub fn new(jwt_secret: SecretString, audience: impl Into<String>) -> Self {
        Self {
            jwt_secret,
            audience: audience.into(),
            issuer: None,
        }
    }

    pub fn with_issuer(mut self, issuer: impl Into<String>) -> Self {
        self.issuer = Some(issuer.into());
        self
    }
}

/// Access token claims.
#[derive(Debug, Serialize, Deserialize)]
struct AccessTokenClaims {
    /// Subject - the user ID
    sub: String,

    #[serde(default)]
    aud: Audience,

    exp: i64,

    #[serde(default)]
    iss: Option<String>,

    #[serde(default)]
    email: Option<String>,

    /// Provider-managed profile metadata (`full_name`, `name`, ...)
    #[serde(default)]
    user_metadata: Option<serde_json::Value>,
}

/// Audience can be a single string or array of strings in JWTs.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(untagged)]
enum Audience {
    #[default]
    None,
    Single(String),
    Multiple(Vec<String>),
}

impl Audience {
    fn contains(&self, expected: &str) -> bool {
        match self {
            Audience::None => false,
            Audience::Single(s) => s == expected,
            Audience::Multiple(v) => v.iter().any(|s| s == expected),
        }
    }
}

impl AccessTokenClaims {
    fn display_name(&self) -> Option<String> {
        let metadata = self.user_metadata.as_ref()?;
        ["full_name", "name"]
            .iter()
            .find_map(|key| metadata.get(key).and_then(|v| v.as_str()))
            .map(String::from)
    }
}

/// HS256 session validator for the hosted auth provider.
pub struct SupabaseJwtValidator {
    config: SupabaseJwtConfig,
    decoding_key: DecodingKey,
}

impl SupabaseJwtValidator {
    pub fn new(config: SupabaseJwtConfig) -> Self {
        let decoding_key = DecodingKey::from_secret(config.jwt_secret.expose_secret().as_bytes());
        Self {
            config,
            decoding_key,
        }
    }

    fn validate_token(&self, token: &str) -> Result<TokenData<AccessTokenClaims>, AuthError> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.set_audience(&[&self.config.audience]);
        if let Some(issuer) = &self.config.issuer {
            validation.set_issuer(&[issuer]);
        }
        validation.validate_exp = true;
        validation.set_required_spec_claims(&["exp", "sub", "aud"]);

        decode::<AccessTokenClaims>(token, &self.decoding_key, &validation).map_err(|e| {
            use jsonwebtoken::errors::ErrorKind;
            match e.kind() {
                ErrorKind::ExpiredSignature => {
                    tracing::debug!("Token expired");
                    AuthError::TokenExpired
                }
                ErrorKind::InvalidIssuer => {
                    tracing::warn!("Invalid issuer in token");
                    AuthError::InvalidToken
                }
                ErrorKind::InvalidAudience => {
                    tracing::warn!("Invalid audience in token");
                    AuthError::InvalidToken
                }
                _ => {
                    tracing::debug!("Token validation failed: {}", e);
                    AuthError::InvalidToken
                }
            }
        })
    }
}

#[async_trait]
impl SessionValidator for SupabaseJwtValidator {
    async fn validate(&self, token: &str) -> Result<AuthenticatedUser, AuthError> {
        let claims = self.validate_token(token)?.claims;

        if !claims.aud.contains(&self.config.audience) {
            tracing::warn!("Audience mismatch after validation: {:?}", claims.aud);
            return Err(AuthError::InvalidToken);
        }

        let user_id = UserId::new(&claims.sub).map_err(|_| {
            tracing::warn!("Token carries an empty subject");
            AuthError::InvalidToken
        })?;
        let display_name = claims.display_name();

        Ok(AuthenticatedUser::new(user_id, claims.email, display_name))
    }
}

impl std::fmt::Debug for SupabaseJwtValidator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SupabaseJwtValidator")
            .field("audience", &self.config.audience)
            .field("issuer", &self.config.issuer)
            .finish_non_exhaustive()
    }
}
