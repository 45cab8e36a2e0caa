//! User profile row.

use serde::{Deserialize, Serialize};

use super::UserOwned;
use crate::domain::foundation::{Timestamp, UserId};

/// One row per user identity. The primary key is the user id itself.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Profile {
    pub id: UserId,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub full_name: Option<String>,
    #[serde(default)]
    pub avatar_url: Option<String>,
    /// UI theme preference (`light`, `dark`, `system`).
    #[serde(default)]
    pub theme: Option<String>,
    pub created_at: Timestamp,
    #[serde(default)]
    pub updated_at: Option<Timestamp>,
}

impl UserOwned for Profile {
    fn owner(&self) -> &UserId {
        &self.id
    }
}
