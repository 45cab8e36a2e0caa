//! Mood check-in row.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{Chronological, UserOwned};
use crate::domain::foundation::{Timestamp, UserId};

/// One row per mood check-in. Immutable once created.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MoodEntry {
    pub id: Uuid,
    pub user_id: UserId,
    pub mood: i32,
    #[serde(default)]
    pub emotions: Vec<String>,
    #[serde(default)]
    pub note: Option<String>,
    pub created_at: Timestamp,
}

impl UserOwned for MoodEntry {
    fn owner(&self) -> &UserId {
        &self.user_id
    }
}

impl Chronological for MoodEntry {
    fn created_at(&self) -> Timestamp {
        self.created_at
    }
}
