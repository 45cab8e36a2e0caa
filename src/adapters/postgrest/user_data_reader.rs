//! PostgREST implementation of UserDataReader.
//!
//! Queries `{base_url}/rest/v1/{table}` with the service key. Singleton
//! reads ask for a single JSON object; PostgREST answers "no row" with
//! error code `PGRST116`, which maps to `DataError::NotFound`. A user
//! with several settings rows gets the most recently updated one.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, AUTHORIZATION};
use secrecy::{ExposeSecret, SecretString};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use thiserror::Error;

use crate::domain::export::{DataError, Resource};
use crate::domain::foundation::UserId;
use crate::domain::wellbeing::{MoodEntry, Note, Profile, UserSettings, VoiceSession};
use crate::ports::UserDataReader;

/// PostgREST error code for "JSON object requested, multiple (or no) rows returned".
const ROW_NOT_FOUND_CODE: &str = "PGRST116";

const SINGLE_OBJECT_MEDIA_TYPE: &str = "application/vnd.pgrst.object+json";

/// Newest settings row first; matches `UserSettings::recency`.
const SETTINGS_ORDER: &str = "updated_at.desc.nullslast,created_at.desc.nullslast,id.desc";

/// Errors building the PostgREST client.
#[derive(Debug, Error)]
pub enum RestClientError {
    #[error("Service key is not a valid HTTP header value")]
    InvalidServiceKey,

    #[error(transparent)]
    Http(#[from] reqwest::Error),
}

/// Error body returned by PostgREST.
#[derive(Debug, Default, Deserialize)]
struct PostgrestError {
    #[serde(default)]
    code: Option<String>,
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    details: Option<String>,
}

/// PostgREST implementation of UserDataReader.
pub struct RestUserDataReader {
    client: reqwest::Client,
    base_url: String,
}

impl RestUserDataReader {
    /// Creates a reader authenticated with the project's service key.
    pub fn new(
        base_url: impl Into<String>,
        service_key: &SecretString,
        timeout: Duration,
    ) -> Result<Self, RestClientError> {
        let key = service_key.expose_secret();
        let mut headers = HeaderMap::new();
        headers.insert("apikey", sensitive_header(key)?);
        headers.insert(AUTHORIZATION, sensitive_header(&format!("Bearer {}", key))?);

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(timeout)
            .build()?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    fn table_url(&self, resource: Resource) -> String {
        format!("{}/rest/v1/{}", self.base_url, resource.table())
    }

    async fn fetch_list<T: DeserializeOwned>(
        &self,
        resource: Resource,
        user_id: &UserId,
    ) -> Result<Vec<T>, DataError> {
        let response = self
            .client
            .get(self.table_url(resource))
            .query(&[
                ("select", "*".to_string()),
                ("user_id", format!("eq.{}", user_id)),
                ("order", "created_at.desc".to_string()),
            ])
            .send()
            .await
            .map_err(|e| DataError::query(resource, e.to_string()))?;

        Self::decode(resource, response).await
    }

    async fn fetch_single<T: DeserializeOwned>(
        &self,
        resource: Resource,
        key_column: &str,
        user_id: &UserId,
        order: Option<&str>,
    ) -> Result<T, DataError> {
        let mut params = vec![
            ("select", "*".to_string()),
            (key_column, format!("eq.{}", user_id)),
        ];
        if let Some(order) = order {
            params.push(("order", order.to_string()));
            params.push(("limit", "1".to_string()));
        }

        let response = self
            .client
            .get(self.table_url(resource))
            .header(ACCEPT, SINGLE_OBJECT_MEDIA_TYPE)
            .query(&params)
            .send()
            .await
            .map_err(|e| DataError::query(resource, e.to_string()))?;

        Self::decode(resource, response).await
    }

    async fn decode<T: DeserializeOwned>(
        resource: Resource,
        response: reqwest::Response,
    ) -> Result<T, DataError> {
        let status = response.status();
        let body = response
            .bytes()
            .await
            .map_err(|e| DataError::query(resource, e.to_string()))?;

        if !status.is_success() {
            let error: PostgrestError = serde_json::from_slice(&body).unwrap_or_default();
            if error.code.as_deref() == Some(ROW_NOT_FOUND_CODE) {
                return Err(DataError::not_found(resource));
            }
            let mut message = format!("HTTP {}", status);
            if let Some(code) = &error.code {
                message.push_str(&format!(" [{}]", code));
            }
            if let Some(text) = error.message.as_ref().or(error.details.as_ref()) {
                message.push_str(&format!(": {}", text));
            }
            return Err(DataError::query(resource, message));
        }

        serde_json::from_slice(&body).map_err(|e| DataError::decode(resource, e.to_string()))
    }
}

#[async_trait]
impl UserDataReader for RestUserDataReader {
    async fn get_profile(&self, user_id: &UserId) -> Result<Profile, DataError> {
        self.fetch_single(Resource::Profile, "id", user_id, None).await
    }

    async fn list_mood_entries(&self, user_id: &UserId) -> Result<Vec<MoodEntry>, DataError> {
        self.fetch_list(Resource::MoodEntries, user_id).await
    }

    async fn list_voice_sessions(&self, user_id: &UserId) -> Result<Vec<VoiceSession>, DataError> {
        self.fetch_list(Resource::VoiceSessions, user_id).await
    }

    async fn list_notes(&self, user_id: &UserId) -> Result<Vec<Note>, DataError> {
        self.fetch_list(Resource::Notes, user_id).await
    }

    async fn get_settings(&self, user_id: &UserId) -> Result<UserSettings, DataError> {
        self.fetch_single(Resource::Settings, "user_id", user_id, Some(SETTINGS_ORDER))
            .await
    }
}

fn sensitive_header(value: &str) -> Result<HeaderValue, RestClientError> {
    let mut header =
        HeaderValue::from_str(value).map_err(|_| RestClientError::InvalidServiceKey)?;
    header.set_sensitive(true);
    Ok(header)
}

impl std::fmt::Debug for RestUserDataReader {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RestUserDataReader")
            .field("base_url", &self.base_url)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::extract::Query;
    use axum::http::{HeaderMap as AxumHeaders, StatusCode};
    use axum::response::IntoResponse;
    use axum::routing::get;
    use axum::{Json, Router};
    use serde_json::json;
    use std::collections::HashMap;

    const SERVICE_KEY: &str = "service-role-key";

    /// Serves a stub PostgREST on an ephemeral port and returns its base URL.
    async fn serve(router: Router) -> String {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });
        format!("http://{}", addr)
    }

    fn reader(base_url: &str) -> RestUserDataReader {
        RestUserDataReader::new(
            base_url,
            &SecretString::new(SERVICE_KEY.to_string()),
            Duration::from_secs(5),
        )
        .unwrap()
    }

    fn user() -> UserId {
        UserId::new("8d3c6a2e-0b5f-4c61-a4b5-1f0e7a9c2d33").unwrap()
    }

    async fn mood_entries(
        headers: AxumHeaders,
        Query(params): Query<HashMap<String, String>>,
    ) -> impl IntoResponse {
        let authorized = headers.get("apikey").and_then(|v| v.to_str().ok()) == Some(SERVICE_KEY)
            && headers.get("authorization").and_then(|v| v.to_str().ok())
                == Some("Bearer service-role-key");
        if !authorized {
            return (StatusCode::UNAUTHORIZED, Json(json!({ "message": "no key" })));
        }
        assert_eq!(params.get("order").map(String::as_str), Some("created_at.desc"));
        let owner = params["user_id"].trim_start_matches("eq.").to_string();
        (
            StatusCode::OK,
            Json(json!([
                {
                    "id": "0d6f3a57-3d8e-4f7b-9a7e-0f0b8a1c2d01",
                    "user_id": owner,
                    "mood": 7,
                    "emotions": ["hopeful"],
                    "note": null,
                    "created_at": "2024-02-02T09:00:00+00:00"
                },
                {
                    "id": "0d6f3a57-3d8e-4f7b-9a7e-0f0b8a1c2d02",
                    "user_id": owner,
                    "mood": 4,
                    "emotions": [],
                    "note": "rough night",
                    "created_at": "2024-02-01T09:00:00+00:00"
                }
            ])),
        )
    }

    async fn no_single_row(headers: AxumHeaders) -> impl IntoResponse {
        assert_eq!(
            headers.get("accept").and_then(|v| v.to_str().ok()),
            Some(SINGLE_OBJECT_MEDIA_TYPE)
        );
        (
            StatusCode::NOT_ACCEPTABLE,
            Json(json!({
                "code": "PGRST116",
                "details": "The result contains 0 rows",
                "hint": null,
                "message": "JSON object requested, multiple (or no) rows returned"
            })),
        )
    }

    async fn broken() -> impl IntoResponse {
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({ "code": "42P01", "message": "relation \"notes\" does not exist" })),
        )
    }

    async fn garbage() -> impl IntoResponse {
        (StatusCode::OK, Json(json!([{ "unexpected": true }])))
    }

    fn stub_router() -> Router {
        Router::new()
            .route("/rest/v1/mood_entries", get(mood_entries))
            .route("/rest/v1/user_settings", get(no_single_row))
            .route("/rest/v1/profiles", get(no_single_row))
            .route("/rest/v1/notes", get(broken))
            .route("/rest/v1/voice_sessions", get(garbage))
    }

    #[tokio::test]
    async fn lists_rows_scoped_to_user() {
        let base = serve(stub_router()).await;

        let entries = reader(&base).list_mood_entries(&user()).await.unwrap();

        assert_eq!(entries.len(), 2);
        assert!(entries.iter().all(|e| e.user_id == user()));
        assert_eq!(entries[0].mood, 7);
        assert_eq!(entries[1].note.as_deref(), Some("rough night"));
    }

    #[tokio::test]
    async fn row_not_found_code_maps_to_not_found() {
        let base = serve(stub_router()).await;
        let reader = reader(&base);

        let settings = reader.get_settings(&user()).await;
        let profile = reader.get_profile(&user()).await;

        assert_eq!(settings.unwrap_err(), DataError::not_found(Resource::Settings));
        assert_eq!(profile.unwrap_err(), DataError::not_found(Resource::Profile));
    }

    #[tokio::test]
    async fn server_error_maps_to_query_error_with_detail() {
        let base = serve(stub_router()).await;

        let err = reader(&base).list_notes(&user()).await.unwrap_err();

        match err {
            DataError::Query { resource, message } => {
                assert_eq!(resource, Resource::Notes);
                assert!(message.contains("500"));
                assert!(message.contains("42P01"));
            }
            other => panic!("Expected Query error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn unexpected_shape_maps_to_decode_error() {
        let base = serve(stub_router()).await;

        let err = reader(&base).list_voice_sessions(&user()).await.unwrap_err();

        assert!(matches!(err, DataError::Decode { resource: Resource::VoiceSessions, .. }));
    }

    #[tokio::test]
    async fn unreachable_store_maps_to_query_error() {
        // Bind then drop to get a port nobody listens on.
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let err = reader(&format!("http://{}", addr))
            .list_notes(&user())
            .await
            .unwrap_err();

        assert!(matches!(err, DataError::Query { resource: Resource::Notes, .. }));
    }

    async fn newest_settings(
        headers: AxumHeaders,
        Query(params): Query<HashMap<String, String>>,
    ) -> impl IntoResponse {
        assert_eq!(
            headers.get("accept").and_then(|v| v.to_str().ok()),
            Some(SINGLE_OBJECT_MEDIA_TYPE)
        );
        assert_eq!(params.get("order").map(String::as_str), Some(SETTINGS_ORDER));
        assert_eq!(params.get("limit").map(String::as_str), Some("1"));
        let owner = params["user_id"].trim_start_matches("eq.").to_string();
        Json(json!({
            "user_id": owner,
            "privacy_level": "private",
            "updated_at": "2024-03-01T10:00:00+00:00"
        }))
    }

    #[tokio::test]
    async fn settings_request_newest_single_row() {
        let router = Router::new().route("/rest/v1/user_settings", get(newest_settings));
        let base = serve(router).await;

        let settings = reader(&base).get_settings(&user()).await.unwrap();

        assert_eq!(settings.user_id, Some(user()));
        assert_eq!(settings.privacy_level.as_deref(), Some("private"));
    }

    #[test]
    fn service_key_with_control_characters_is_rejected() {
        let result = RestUserDataReader::new(
            "http://localhost:54321",
            &SecretString::new("service-key\n".to_string()),
            Duration::from_secs(5),
        );

        assert!(matches!(result, Err(RestClientError::InvalidServiceKey)));
    }

    #[test]
    fn debug_output_hides_service_key() {
        let debug = format!("{:?}", reader("http://localhost:54321/"));
        assert!(!debug.contains(SERVICE_KEY));
        assert!(debug.contains("http://localhost:54321"));
    }
}
