//! PostgreSQL implementation of UserDataReader.
//!
//! Reads the application's tables directly. User ids are UUIDs in the
//! store and text in the domain, so ids are cast on the way in and out.
//! A user with several settings rows gets the most recently updated one.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::postgres::PgRow;
use sqlx::{PgPool, Row};

use crate::domain::export::{DataError, Resource};
use crate::domain::foundation::{Timestamp, UserId};
use crate::domain::wellbeing::{MoodEntry, Note, Profile, UserSettings, VoiceSession};
use crate::ports::UserDataReader;

/// Newest settings row first; matches `UserSettings::recency`.
const SETTINGS_QUERY: &str = r#"
    SELECT id, user_id::text AS user_id, voice_reminders, notifications,
           privacy_level, crisis_contacts, created_at, updated_at
    FROM user_settings
    WHERE user_id = $1::uuid
    ORDER BY updated_at DESC NULLS LAST, created_at DESC NULLS LAST, id DESC
    LIMIT 1
"#;

/// PostgreSQL implementation of UserDataReader.
#[derive(Clone)]
pub struct PgUserDataReader {
    pool: PgPool,
}

impl PgUserDataReader {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn fetch_all(
        &self,
        resource: Resource,
        sql: &'static str,
        user_id: &UserId,
    ) -> Result<Vec<PgRow>, DataError> {
        sqlx::query(sql)
            .bind(user_id.as_str())
            .fetch_all(&self.pool)
            .await
            .map_err(|e| DataError::query(resource, e.to_string()))
    }

    async fn fetch_one(
        &self,
        resource: Resource,
        sql: &'static str,
        user_id: &UserId,
    ) -> Result<PgRow, DataError> {
        sqlx::query(sql)
            .bind(user_id.as_str())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| DataError::query(resource, e.to_string()))?
            .ok_or(DataError::not_found(resource))
    }
}

#[async_trait]
impl UserDataReader for PgUserDataReader {
    async fn get_profile(&self, user_id: &UserId) -> Result<Profile, DataError> {
        let row = self
            .fetch_one(
                Resource::Profile,
                r#"
                SELECT id::text AS id, email, full_name, avatar_url, theme,
                       created_at, updated_at
                FROM profiles
                WHERE id = $1::uuid
                "#,
                user_id,
            )
            .await?;
        row_to_profile(&row)
    }

    async fn list_mood_entries(&self, user_id: &UserId) -> Result<Vec<MoodEntry>, DataError> {
        let rows = self
            .fetch_all(
                Resource::MoodEntries,
                r#"
                SELECT id, user_id::text AS user_id, mood, emotions, note, created_at
                FROM mood_entries
                WHERE user_id = $1::uuid
                ORDER BY created_at DESC
                "#,
                user_id,
            )
            .await?;
        rows.iter().map(row_to_mood_entry).collect()
    }

    async fn list_voice_sessions(&self, user_id: &UserId) -> Result<Vec<VoiceSession>, DataError> {
        let rows = self
            .fetch_all(
                Resource::VoiceSessions,
                r#"
                SELECT id, user_id::text AS user_id, title, transcript, duration,
                       emotions, ai_response, mood_score, tags, created_at
                FROM voice_sessions
                WHERE user_id = $1::uuid
                ORDER BY created_at DESC
                "#,
                user_id,
            )
            .await?;
        rows.iter().map(row_to_voice_session).collect()
    }

    async fn list_notes(&self, user_id: &UserId) -> Result<Vec<Note>, DataError> {
        let rows = self
            .fetch_all(
                Resource::Notes,
                r#"
                SELECT id, user_id::text AS user_id, title, content, tags,
                       created_at, updated_at
                FROM notes
                WHERE user_id = $1::uuid
                ORDER BY created_at DESC
                "#,
                user_id,
            )
            .await?;
        rows.iter().map(row_to_note).collect()
    }

    async fn get_settings(&self, user_id: &UserId) -> Result<UserSettings, DataError> {
        let row = self
            .fetch_one(Resource::Settings, SETTINGS_QUERY, user_id)
            .await?;
        row_to_settings(&row)
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Row mapping
// ════════════════════════════════════════════════════════════════════════════

fn column<'r, T>(row: &'r PgRow, resource: Resource, name: &str) -> Result<T, DataError>
where
    T: sqlx::Decode<'r, sqlx::Postgres> + sqlx::Type<sqlx::Postgres>,
{
    row.try_get(name)
        .map_err(|e| DataError::decode(resource, format!("Failed to get {}: {}", name, e)))
}

fn user_column(row: &PgRow, resource: Resource, name: &str) -> Result<UserId, DataError> {
    let raw: String = column(row, resource, name)?;
    UserId::new(raw).map_err(|e| DataError::decode(resource, e.to_string()))
}

fn time_column(row: &PgRow, resource: Resource, name: &str) -> Result<Timestamp, DataError> {
    let dt: DateTime<Utc> = column(row, resource, name)?;
    Ok(Timestamp::from_datetime(dt))
}

fn optional_time_column(
    row: &PgRow,
    resource: Resource,
    name: &str,
) -> Result<Option<Timestamp>, DataError> {
    let dt: Option<DateTime<Utc>> = column(row, resource, name)?;
    Ok(dt.map(Timestamp::from_datetime))
}

fn tags_column(row: &PgRow, resource: Resource, name: &str) -> Result<Vec<String>, DataError> {
    let tags: Option<Vec<String>> = column(row, resource, name)?;
    Ok(tags.unwrap_or_default())
}

fn row_to_profile(row: &PgRow) -> Result<Profile, DataError> {
    let r = Resource::Profile;
    Ok(Profile {
        id: user_column(row, r, "id")?,
        email: column(row, r, "email")?,
        full_name: column(row, r, "full_name")?,
        avatar_url: column(row, r, "avatar_url")?,
        theme: column(row, r, "theme")?,
        created_at: time_column(row, r, "created_at")?,
        updated_at: optional_time_column(row, r, "updated_at")?,
    })
}

fn row_to_mood_entry(row: &PgRow) -> Result<MoodEntry, DataError> {
    let r = Resource::MoodEntries;
    Ok(MoodEntry {
        id: column(row, r, "id")?,
        user_id: user_column(row, r, "user_id")?,
        mood: column(row, r, "mood")?,
        emotions: tags_column(row, r, "emotions")?,
        note: column(row, r, "note")?,
        created_at: time_column(row, r, "created_at")?,
    })
}

fn row_to_voice_session(row: &PgRow) -> Result<VoiceSession, DataError> {
    let r = Resource::VoiceSessions;
    let emotions: Option<serde_json::Value> = column(row, r, "emotions")?;
    Ok(VoiceSession {
        id: column(row, r, "id")?,
        user_id: user_column(row, r, "user_id")?,
        title: column(row, r, "title")?,
        transcript: column(row, r, "transcript")?,
        duration: column(row, r, "duration")?,
        emotions: emotions.unwrap_or_default(),
        ai_response: column(row, r, "ai_response")?,
        mood_score: column(row, r, "mood_score")?,
        tags: tags_column(row, r, "tags")?,
        created_at: time_column(row, r, "created_at")?,
    })
}

fn row_to_note(row: &PgRow) -> Result<Note, DataError> {
    let r = Resource::Notes;
    Ok(Note {
        id: column(row, r, "id")?,
        user_id: user_column(row, r, "user_id")?,
        title: column(row, r, "title")?,
        content: column(row, r, "content")?,
        tags: tags_column(row, r, "tags")?,
        created_at: time_column(row, r, "created_at")?,
        updated_at: optional_time_column(row, r, "updated_at")?,
    })
}

fn row_to_settings(row: &PgRow) -> Result<UserSettings, DataError> {
    let r = Resource::Settings;
    Ok(UserSettings {
        id: column(row, r, "id")?,
        user_id: Some(user_column(row, r, "user_id")?),
        voice_reminders: column(row, r, "voice_reminders")?,
        notifications: column(row, r, "notifications")?,
        privacy_level: column(row, r, "privacy_level")?,
        crisis_contacts: column(row, r, "crisis_contacts")?,
        created_at: optional_time_column(row, r, "created_at")?,
        updated_at: optional_time_column(row, r, "updated_at")?,
    })
}
