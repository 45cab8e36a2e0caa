//! Personal note row.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{Chronological, UserOwned};
use crate::domain::foundation::{Timestamp, UserId};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Note {
    pub id: Uuid,
    pub user_id: UserId,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub content: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    pub created_at: Timestamp,
    #[serde(default)]
    pub updated_at: Option<Timestamp>,
}

impl UserOwned for Note {
    fn owner(&self) -> &UserId {
        &self.user_id
    }
}

impl Chronological for Note {
    fn created_at(&self) -> Timestamp {
        self.created_at
    }
}
