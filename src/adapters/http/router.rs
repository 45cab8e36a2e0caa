//! Application router: public and export routes plus cross-cutting layers.

use axum::http::{header, HeaderValue, Method};
use axum::routing::get;
use axum::{Json, Router};
use tower_http::compression::CompressionLayer;
use tower_http::cors::{AllowOrigin, CorsLayer};
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

use super::export::{export_routes, ExportAppState};
use super::middleware::{auth_middleware, AuthState};
use crate::config::ServerConfig;

/// Builds the full HTTP application.
///
/// Every route sits behind `auth_middleware`; only the export routes
/// require a user. The timeout layer bounds each request, which drops an
/// in-flight export along with its pending store reads.
pub fn app_router(export: ExportAppState, validator: AuthState, server: &ServerConfig) -> Router {
    Router::new()
        .route("/health", get(health))
        .merge(export_routes().with_state(export))
        .layer(axum::middleware::from_fn_with_state(validator, auth_middleware))
        .layer(TimeoutLayer::new(server.request_timeout()))
        .layer(CompressionLayer::new())
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(TraceLayer::new_for_http())
        .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
        .layer(cors_layer(&server.cors_origins_list()))
}

/// GET /health
async fn health() -> Json<serde_json::Value> {
    Json(serde_json::json!({ "status": "ok" }))
}

fn cors_layer(origins: &[String]) -> CorsLayer {
    let origins: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| match origin.parse::<HeaderValue>() {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!(origin = %origin, "ignoring unparseable CORS origin");
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods([Method::GET, Method::OPTIONS])
        .allow_headers([header::AUTHORIZATION, header::ACCEPT])
        .expose_headers([header::CONTENT_DISPOSITION])
}
