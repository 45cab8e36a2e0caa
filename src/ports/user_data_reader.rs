//! UserDataReader port - the five per-user queries an export needs.
//!
//! # Contract
//!
//! Implementations must:
//! - Scope every query by the given `UserId` and never return another
//!   user's rows
//! - Return list rows newest first (`created_at` descending)
//! - Return `DataError::NotFound` from a singleton query that matched no row
//! - Return `DataError::Query` / `DataError::Decode` for store failures
//! - Be read-only; calls may run concurrently in any order

use async_trait::async_trait;

use crate::domain::export::DataError;
use crate::domain::foundation::UserId;
use crate::domain::wellbeing::{MoodEntry, Note, Profile, UserSettings, VoiceSession};

/// Read access to everything a user owns.
#[async_trait]
pub trait UserDataReader: Send + Sync {
    /// The user's profile row.
    async fn get_profile(&self, user_id: &UserId) -> Result<Profile, DataError>;

    /// All mood check-ins, newest first.
    async fn list_mood_entries(&self, user_id: &UserId) -> Result<Vec<MoodEntry>, DataError>;

    /// All voice sessions, newest first.
    async fn list_voice_sessions(&self, user_id: &UserId) -> Result<Vec<VoiceSession>, DataError>;

    /// All notes, newest first.
    async fn list_notes(&self, user_id: &UserId) -> Result<Vec<Note>, DataError>;

    /// The user's settings row.
    async fn get_settings(&self, user_id: &UserId) -> Result<UserSettings, DataError>;
}
