//! The export snapshot document.

use serde::{Deserialize, Serialize};

use super::ExportError;
use crate::domain::foundation::Timestamp;
use crate::domain::wellbeing::{MoodEntry, Note, Profile, UserSettings, VoiceSession};

/// Schema tag written into every snapshot.
pub const EXPORT_VERSION: &str = "1.0";

/// Everything one user owns, at one point in time.
///
/// Top-level keys are camelCase; rows keep the store's column names.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportSnapshot {
    pub profile: Option<Profile>,
    pub mood_entries: Vec<MoodEntry>,
    pub voice_sessions: Vec<VoiceSession>,
    pub notes: Vec<Note>,
    pub settings: UserSettings,
    pub export_date: Timestamp,
    pub export_version: String,
}

/// Row counts, for logging.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExportCounts {
    pub has_profile: bool,
    pub mood_entries: usize,
    pub voice_sessions: usize,
    pub notes: usize,
    pub has_settings: bool,
}

impl ExportSnapshot {
    /// Assembles a snapshot stamped with the current schema version.
    pub fn new(
        profile: Option<Profile>,
        mood_entries: Vec<MoodEntry>,
        voice_sessions: Vec<VoiceSession>,
        notes: Vec<Note>,
        settings: UserSettings,
        export_date: Timestamp,
    ) -> Self {
        Self {
            profile,
            mood_entries,
            voice_sessions,
            notes,
            settings,
            export_date,
            export_version: EXPORT_VERSION.to_string(),
        }
    }

    pub fn counts(&self) -> ExportCounts {
        ExportCounts {
            has_profile: self.profile.is_some(),
            mood_entries: self.mood_entries.len(),
            voice_sessions: self.voice_sessions.len(),
            notes: self.notes.len(),
            has_settings: !self.settings.is_empty(),
        }
    }

    /// Pretty-printed JSON with two-space indentation.
    pub fn to_json_pretty(&self) -> Result<Vec<u8>, ExportError> {
        Ok(serde_json::to_vec_pretty(self)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn empty_snapshot_serializes_with_camel_case_keys() {
        let export_date = Timestamp::from_unix_secs(1_705_314_600);
        let snapshot = ExportSnapshot::new(
            None,
            vec![],
            vec![],
            vec![],
            UserSettings::default(),
            export_date,
        );

        let value = serde_json::to_value(&snapshot).unwrap();
        assert_eq!(
            value,
            json!({
                "profile": null,
                "moodEntries": [],
                "voiceSessions": [],
                "notes": [],
                "settings": {},
                "exportDate": serde_json::to_value(export_date).unwrap(),
                "exportVersion": "1.0"
            })
        );
    }

    #[test]
    fn pretty_json_uses_two_space_indent() {
        let snapshot = ExportSnapshot::new(
            None,
            vec![],
            vec![],
            vec![],
            UserSettings::default(),
            Timestamp::now(),
        );
        let body = String::from_utf8(snapshot.to_json_pretty().unwrap()).unwrap();
        assert!(body.starts_with("{\n  \"profile\": null,"));
    }

    #[test]
    fn counts_reflect_contents() {
        let snapshot = ExportSnapshot::new(
            None,
            vec![],
            vec![],
            vec![],
            UserSettings::default(),
            Timestamp::now(),
        );
        let counts = snapshot.counts();
        assert!(!counts.has_profile);
        assert!(!counts.has_settings);
        assert_eq!(counts.mood_entries, 0);
    }
}
