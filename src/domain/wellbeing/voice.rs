//! Recorded and transcribed voice session row.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{Chronological, UserOwned};
use crate::domain::foundation::{Timestamp, UserId};

/// One row per voice session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VoiceSession {
    pub id: Uuid,
    pub user_id: UserId,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub transcript: Option<String>,
    /// Recording length in seconds.
    #[serde(default)]
    pub duration: Option<i32>,
    /// Structured emotion analysis produced at transcription time.
    #[serde(default)]
    pub emotions: serde_json::Value,
    #[serde(default)]
    pub ai_response: Option<String>,
    #[serde(default)]
    pub mood_score: Option<i32>,
    #[serde(default)]
    pub tags: Vec<String>,
    pub created_at: Timestamp,
}

impl UserOwned for VoiceSession {
    fn owner(&self) -> &UserId {
        &self.user_id
    }
}

impl Chronological for VoiceSession {
    fn created_at(&self) -> Timestamp {
        self.created_at
    }
}
