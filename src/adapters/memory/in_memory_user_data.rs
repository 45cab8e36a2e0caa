//! In-Memory User Data Adapter
//!
//! Holds every user's rows in process memory, one `Vec` per table, and
//! answers `UserDataReader` queries the way the hosted store does: scoped
//! by user, lists newest first, singletons `NotFound` when absent.
//! Failures can be injected per sub-resource.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::export::{DataError, Resource};
use crate::domain::foundation::UserId;
use crate::domain::wellbeing::{
    sort_newest_first, Chronological, MoodEntry, Note, Profile, UserOwned, UserSettings,
    VoiceSession,
};
use crate::ports::UserDataReader;

#[derive(Debug, Default)]
struct Tables {
    profiles: Vec<Profile>,
    mood_entries: Vec<MoodEntry>,
    voice_sessions: Vec<VoiceSession>,
    notes: Vec<Note>,
    settings: Vec<UserSettings>,
    failures: HashMap<Resource, DataError>,
}

/// In-memory implementation of `UserDataReader`.
#[derive(Debug, Clone, Default)]
pub struct InMemoryUserDataReader {
    tables: Arc<RwLock<Tables>>,
}

impl InMemoryUserDataReader {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn insert_profile(&self, profile: Profile) {
        self.tables.write().await.profiles.push(profile);
    }

    pub async fn insert_mood_entry(&self, entry: MoodEntry) {
        self.tables.write().await.mood_entries.push(entry);
    }

    pub async fn insert_voice_session(&self, session: VoiceSession) {
        self.tables.write().await.voice_sessions.push(session);
    }

    pub async fn insert_note(&self, note: Note) {
        self.tables.write().await.notes.push(note);
    }

    /// Stores a settings row. Rows without a `user_id` are unreachable.
    pub async fn insert_settings(&self, settings: UserSettings) {
        self.tables.write().await.settings.push(settings);
    }

    /// Makes every query for `resource` fail with `error`.
    pub async fn fail_with(&self, resource: Resource, error: DataError) {
        self.tables.write().await.failures.insert(resource, error);
    }

    /// Clears injected failures.
    pub async fn clear_failures(&self) {
        self.tables.write().await.failures.clear();
    }

    fn check(tables: &Tables, resource: Resource) -> Result<(), DataError> {
        match tables.failures.get(&resource) {
            Some(err) => Err(err.clone()),
            None => Ok(()),
        }
    }

    fn owned_newest_first<T>(rows: &[T], user_id: &UserId) -> Vec<T>
    where
        T: UserOwned + Chronological + Clone,
    {
        let mut rows: Vec<T> = rows
            .iter()
            .filter(|row| row.owner() == user_id)
            .cloned()
            .collect();
        sort_newest_first(&mut rows);
        rows
    }
}

#[async_trait]
impl UserDataReader for InMemoryUserDataReader {
    async fn get_profile(&self, user_id: &UserId) -> Result<Profile, DataError> {
        let tables = self.tables.read().await;
        Self::check(&tables, Resource::Profile)?;
        tables
            .profiles
            .iter()
            .find(|p| p.owner() == user_id)
            .cloned()
            .ok_or(DataError::not_found(Resource::Profile))
    }

    async fn list_mood_entries(&self, user_id: &UserId) -> Result<Vec<MoodEntry>, DataError> {
        let tables = self.tables.read().await;
        Self::check(&tables, Resource::MoodEntries)?;
        Ok(Self::owned_newest_first(&tables.mood_entries, user_id))
    }

    async fn list_voice_sessions(&self, user_id: &UserId) -> Result<Vec<VoiceSession>, DataError> {
        let tables = self.tables.read().await;
        Self::check(&tables, Resource::VoiceSessions)?;
        Ok(Self::owned_newest_first(&tables.voice_sessions, user_id))
    }

    async fn list_notes(&self, user_id: &UserId) -> Result<Vec<Note>, DataError> {
        let tables = self.tables.read().await;
        Self::check(&tables, Resource::Notes)?;
        Ok(Self::owned_newest_first(&tables.notes, user_id))
    }

    async fn get_settings(&self, user_id: &UserId) -> Result<UserSettings, DataError> {
        let tables = self.tables.read().await;
        Self::check(&tables, Resource::Settings)?;
        tables
            .settings
            .iter()
            .filter(|s| s.user_id.as_ref() == Some(user_id))
            .max_by_key(|s| s.recency())
            .cloned()
            .ok_or(DataError::not_found(Resource::Settings))
    }
}
