//! Per-user settings singleton.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::foundation::{Timestamp, UserId};

/// Settings row. A user who never opened the settings screen has no row;
/// the export then carries `UserSettings::default()`, which serializes
/// to `{}`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UserSettings {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<Uuid>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<UserId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub voice_reminders: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notifications: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub privacy_level: Option<String>,
    /// Structured list of people to reach in a crisis.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub crisis_contacts: Option<serde_json::Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<Timestamp>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<Timestamp>,
}

impl UserSettings {
    /// True when no settings row was found for the user.
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Sort key picking one row when a user has several. Greater is newer:
    /// latest `updated_at`, then latest `created_at`, then highest `id`,
    /// with missing values ranked oldest.
    pub fn recency(&self) -> (Option<Timestamp>, Option<Timestamp>, Option<Uuid>) {
        (self.updated_at, self.created_at, self.id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn recency_prefers_updated_then_created() {
        let stale = UserSettings {
            created_at: Some(Timestamp::from_unix_secs(500)),
            ..Default::default()
        };
        let edited = UserSettings {
            created_at: Some(Timestamp::from_unix_secs(100)),
            updated_at: Some(Timestamp::from_unix_secs(200)),
            ..Default::default()
        };
        let newer_created = UserSettings {
            created_at: Some(Timestamp::from_unix_secs(600)),
            ..Default::default()
        };

        assert!(edited.recency() > stale.recency());
        assert!(edited.recency() > newer_created.recency());
        assert!(newer_created.recency() > stale.recency());
    }

    #[test]
    fn default_settings_serialize_to_empty_object() {
        let value = serde_json::to_value(UserSettings::default()).unwrap();
        assert_eq!(value, json!({}));
    }

    #[test]
    fn settings_row_roundtrips_crisis_contacts() {
        let row = json!({
            "user_id": "user-1",
            "voice_reminders": true,
            "notifications": false,
            "privacy_level": "private",
            "crisis_contacts": [{ "name": "Alex", "phone": "555-0100" }]
        });
        let settings: UserSettings = serde_json::from_value(row.clone()).unwrap();

        assert!(!settings.is_empty());
        assert_eq!(settings.crisis_contacts.as_ref().unwrap()[0]["name"], "Alex");
        assert_eq!(serde_json::to_value(&settings).unwrap(), row);
    }
}
