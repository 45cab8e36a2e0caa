//! Authentication middleware and extractors for axum.
//!
//! This module provides:
//! - `auth_middleware` - Layer that validates Bearer tokens and injects user into extensions
//! - `RequireAuth` - Extractor that requires authentication
//!
//! The middleware only talks to the `SessionValidator` port, so the hosted
//! auth provider's JWT adapter and the test mock plug in the same way.
//!
//! ```text
//! Request → auth_middleware → injects AuthenticatedUser into extensions
//!                                      ↓
//!                              Handler → RequireAuth extractor reads from extensions
//! ```

use std::sync::Arc;

use axum::{
    extract::{Request, State},
    http::{header::AUTHORIZATION, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
    Json,
};

use crate::domain::foundation::{AuthError, AuthenticatedUser};
use crate::ports::SessionValidator;

/// Auth middleware state - wraps the session validator.
pub type AuthState = Arc<dyn SessionValidator>;

/// Why a presented token did not produce a user. Left in request
/// extensions for `RequireAuth` to turn into the right rejection.
#[derive(Debug, Clone)]
pub struct SessionRejected(pub AuthError);

/// Authentication middleware that validates Bearer tokens.
///
/// On success the `AuthenticatedUser` is inserted into request extensions.
/// The middleware never rejects: a missing, invalid, or expired token
/// leaves the request anonymous, so public routes answer regardless of
/// what the caller sends. Protected routes reject through `RequireAuth`.
pub async fn auth_middleware(
    State(validator): State<AuthState>,
    mut request: Request,
    next: Next,
) -> Response {
    let token = request
        .headers()
        .get(AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .and_then(|h| h.strip_prefix("Bearer "))
        .map(str::trim)
        .filter(|t| !t.is_empty());

    let Some(token) = token else {
        return next.run(request).await;
    };

    match validator.validate(token).await {
        Ok(user) => {
            request.extensions_mut().insert(user);
        }
        Err(e) => {
            if let AuthError::ServiceUnavailable(msg) = &e {
                tracing::error!("Auth service unavailable: {}", msg);
            } else {
                tracing::debug!(error = %e, "ignoring unusable session token");
            }
            request.extensions_mut().insert(SessionRejected(e));
        }
    }

    next.run(request).await
}

/// Extractor that requires authentication.
///
/// Returns 401 when the auth middleware did not inject a user, or 503
/// when the token could not be checked because the auth provider is down.
#[derive(Debug, Clone)]
pub struct RequireAuth(pub AuthenticatedUser);

impl<S> axum::extract::FromRequestParts<S> for RequireAuth
where
    S: Send + Sync,
{
    type Rejection = AuthRejection;

    fn from_request_parts<'life0, 'life1, 'async_trait>(
        parts: &'life0 mut axum::http::request::Parts,
        _state: &'life1 S,
    ) -> std::pin::Pin<
        Box<dyn std::future::Future<Output = Result<Self, Self::Rejection>> + Send + 'async_trait>,
    >
    where
        'life0: 'async_trait,
        'life1: 'async_trait,
        Self: 'async_trait,
    {
        Box::pin(async move {
            if let Some(user) = parts.extensions.get::<AuthenticatedUser>() {
                return Ok(RequireAuth(user.clone()));
            }
            match parts.extensions.get::<SessionRejected>() {
                Some(SessionRejected(AuthError::ServiceUnavailable(_))) => {
                    Err(AuthRejection::ServiceUnavailable)
                }
                Some(SessionRejected(AuthError::TokenExpired)) => Err(AuthRejection::Expired),
                _ => Err(AuthRejection::Unauthenticated),
            }
        })
    }
}

/// Rejection type for authentication failures.
#[derive(Debug, Clone)]
pub enum AuthRejection {
    /// No valid authentication token was provided.
    Unauthenticated,
    /// The token was valid once but has expired.
    Expired,
    /// The token could not be checked.
    ServiceUnavailable,
}

impl IntoResponse for AuthRejection {
    fn into_response(self) -> Response {
        let (status, message, code) = match self {
            AuthRejection::Unauthenticated => {
                (StatusCode::UNAUTHORIZED, "Unauthorized", "UNAUTHENTICATED")
            }
            AuthRejection::Expired => (StatusCode::UNAUTHORIZED, "Token expired", "UNAUTHENTICATED"),
            AuthRejection::ServiceUnavailable => (
                StatusCode::SERVICE_UNAVAILABLE,
                "Authentication service unavailable",
                "AUTH_ERROR",
            ),
        };

        (
            status,
            Json(serde_json::json!({
                "error": message,
                "code": code
            })),
        )
            .into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::auth::MockSessionValidator;
    use crate::domain::foundation::UserId;
    use axum::body::Body;
    use axum::extract::FromRequestParts;
    use axum::http::Request as HttpRequest;
    use axum::routing::get;
    use axum::Router;
    use tower::ServiceExt;

    fn test_user() -> AuthenticatedUser {
        AuthenticatedUser::new(
            UserId::new("user-123").unwrap(),
            Some("test@example.com".to_string()),
            Some("Test User".to_string()),
        )
    }

    async fn whoami(RequireAuth(user): RequireAuth) -> String {
        user.id.to_string()
    }

    fn app(validator: MockSessionValidator) -> Router {
        let state: AuthState = Arc::new(validator);
        Router::new()
            .route("/whoami", get(whoami))
            .route("/public", get(|| async { "ok" }))
            .layer(axum::middleware::from_fn_with_state(state, auth_middleware))
    }

    fn get_request(uri: &str, token: Option<&str>) -> HttpRequest<Body> {
        let mut builder = HttpRequest::builder().uri(uri);
        if let Some(token) = token {
            builder = builder.header("Authorization", format!("Bearer {}", token));
        }
        builder.body(Body::empty()).unwrap()
    }

    // ════════════════════════════════════════════════════════════════════════════
    // Middleware Tests
    // ════════════════════════════════════════════════════════════════════════════

    #[tokio::test]
    async fn valid_token_reaches_handler_with_user() {
        let app = app(MockSessionValidator::new().with_user("valid-token", test_user()));

        let response = app
            .oneshot(get_request("/whoami", Some("valid-token")))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        assert_eq!(&body[..], b"user-123");
    }

    #[tokio::test]
    async fn invalid_token_does_not_block_public_routes() {
        let app = app(MockSessionValidator::new());

        let response = app
            .oneshot(get_request("/public", Some("forged")))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn invalid_token_on_protected_route_is_401() {
        let app = app(MockSessionValidator::new());

        let response = app
            .oneshot(get_request("/whoami", Some("forged")))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json["code"], "UNAUTHENTICATED");
    }

    #[tokio::test]
    async fn expired_token_on_protected_route_says_so() {
        let app = app(MockSessionValidator::new().with_error(AuthError::TokenExpired));

        let response = app
            .oneshot(get_request("/whoami", Some("stale")))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json["error"], "Token expired");
    }

    #[tokio::test]
    async fn missing_token_passes_through_to_public_routes() {
        let app = app(MockSessionValidator::new());

        let response = app.oneshot(get_request("/public", None)).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn missing_token_on_protected_route_is_401() {
        let app = app(MockSessionValidator::new());

        let response = app.oneshot(get_request("/whoami", None)).await.unwrap();

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json["error"], "Unauthorized");
    }

    #[tokio::test]
    async fn auth_service_outage_is_503() {
        let app = app(
            MockSessionValidator::new().with_error(AuthError::service_unavailable("timeout")),
        );

        let response = app
            .oneshot(get_request("/whoami", Some("any")))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
    }

    #[tokio::test]
    async fn auth_service_outage_does_not_block_public_routes() {
        let app = app(
            MockSessionValidator::new().with_error(AuthError::service_unavailable("timeout")),
        );

        let response = app
            .oneshot(get_request("/public", Some("any")))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
    }

    // ════════════════════════════════════════════════════════════════════════════
    // RequireAuth Extractor Tests
    // ════════════════════════════════════════════════════════════════════════════

    #[tokio::test]
    async fn require_auth_extracts_user_from_extensions() {
        let mut request: HttpRequest<()> = HttpRequest::builder().uri("/test").body(()).unwrap();
        request.extensions_mut().insert(test_user());
        let (mut parts, _body) = request.into_parts();

        let result: Result<RequireAuth, AuthRejection> =
            RequireAuth::from_request_parts(&mut parts, &()).await;

        let RequireAuth(user) = result.unwrap();
        assert_eq!(user.email.as_deref(), Some("test@example.com"));
    }

    #[tokio::test]
    async fn require_auth_fails_without_user() {
        let request: HttpRequest<()> = HttpRequest::builder().uri("/test").body(()).unwrap();
        let (mut parts, _body) = request.into_parts();

        let result: Result<RequireAuth, AuthRejection> =
            RequireAuth::from_request_parts(&mut parts, &()).await;

        assert!(matches!(result, Err(AuthRejection::Unauthenticated)));
    }

    // ════════════════════════════════════════════════════════════════════════════
    // Type Safety Tests
    // ════════════════════════════════════════════════════════════════════════════

    #[test]
    fn auth_state_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<AuthState>();
        assert_send_sync::<RequireAuth>();
    }
}
