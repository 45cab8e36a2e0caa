//! ExportUserData - Query handler that assembles a user's export snapshot.
//!
//! The five sub-resource reads run concurrently and are all awaited; a
//! fast failure never cancels the others. The export is all-or-nothing,
//! except that a missing settings row becomes empty settings and a
//! missing profile becomes `null`.

use std::sync::Arc;

use crate::domain::export::{DataError, ExportError, ExportSnapshot, Resource};
use crate::domain::foundation::{Timestamp, UserId};
use crate::domain::wellbeing::{sort_newest_first, Profile, UserOwned, UserSettings};
use crate::ports::{ExportSink, UserDataReader};

/// Query to export everything a user owns.
///
/// The caller is responsible for establishing that `user_id` is authentic
/// and that the requesting actor may export it.
#[derive(Debug, Clone)]
pub struct ExportUserDataQuery {
    pub user_id: UserId,
}

/// Handler that produces export snapshots.
pub struct ExportUserDataHandler {
    reader: Arc<dyn UserDataReader>,
}

impl ExportUserDataHandler {
    pub fn new(reader: Arc<dyn UserDataReader>) -> Self {
        Self { reader }
    }

    /// Fetches and merges the five sub-resources into one snapshot.
    #[tracing::instrument(name = "export_user_data", skip(self, query), fields(user_id = %query.user_id))]
    pub async fn handle(&self, query: ExportUserDataQuery) -> Result<ExportSnapshot, ExportError> {
        let user_id = &query.user_id;

        let (profile, mood_entries, voice_sessions, notes, settings) = tokio::join!(
            self.reader.get_profile(user_id),
            self.reader.list_mood_entries(user_id),
            self.reader.list_voice_sessions(user_id),
            self.reader.list_notes(user_id),
            self.reader.get_settings(user_id),
        );

        let mut failures = Vec::new();

        let profile = match profile.and_then(|p| scoped_profile(user_id, p)) {
            Ok(profile) => Some(profile),
            Err(err) if err.is_not_found() => {
                tracing::debug!("no profile row, exporting profile as null");
                None
            }
            Err(err) => {
                failures.push(err);
                None
            }
        };

        let mut mood_entries = collect(
            mood_entries.and_then(|rows| scoped(Resource::MoodEntries, user_id, rows)),
            &mut failures,
        );
        let mut voice_sessions = collect(
            voice_sessions.and_then(|rows| scoped(Resource::VoiceSessions, user_id, rows)),
            &mut failures,
        );
        let mut notes = collect(
            notes.and_then(|rows| scoped(Resource::Notes, user_id, rows)),
            &mut failures,
        );

        let settings = match settings.and_then(|s| scoped_settings(user_id, s)) {
            Ok(settings) => settings,
            Err(err) if err.is_not_found() => {
                tracing::debug!("no settings row, exporting empty settings");
                UserSettings::default()
            }
            Err(err) => {
                failures.push(err);
                UserSettings::default()
            }
        };

        if !failures.is_empty() {
            for failure in &failures {
                tracing::error!(
                    resource = %failure.resource(),
                    error = %failure,
                    "export sub-resource fetch failed"
                );
            }
            return Err(ExportError::DataFetch { failures });
        }

        sort_newest_first(&mut mood_entries);
        sort_newest_first(&mut voice_sessions);
        sort_newest_first(&mut notes);

        let snapshot = ExportSnapshot::new(
            profile,
            mood_entries,
            voice_sessions,
            notes,
            settings,
            Timestamp::now(),
        );

        let counts = snapshot.counts();
        tracing::info!(
            has_profile = counts.has_profile,
            mood_entries = counts.mood_entries,
            voice_sessions = counts.voice_sessions,
            notes = counts.notes,
            has_settings = counts.has_settings,
            "export snapshot assembled"
        );

        Ok(snapshot)
    }

    /// Assembles a snapshot and hands it to `sink`.
    pub async fn deliver<S: ExportSink>(
        &self,
        query: ExportUserDataQuery,
        sink: &S,
    ) -> Result<S::Receipt, ExportError> {
        let user_id = query.user_id.clone();
        let snapshot = self.handle(query).await?;
        sink.deliver(&user_id, &snapshot).await
    }
}

fn collect<T>(result: Result<Vec<T>, DataError>, failures: &mut Vec<DataError>) -> Vec<T> {
    result.unwrap_or_else(|err| {
        failures.push(err);
        Vec::new()
    })
}

fn scoped<T: UserOwned>(resource: Resource, expected: &UserId, rows: Vec<T>) -> Result<Vec<T>, DataError> {
    if let Some(row) = rows.iter().find(|row| row.owner() != expected) {
        return Err(DataError::ScopeViolation {
            resource,
            expected: expected.clone(),
            found: row.owner().clone(),
        });
    }
    Ok(rows)
}

fn scoped_profile(expected: &UserId, profile: Profile) -> Result<Profile, DataError> {
    if profile.owner() != expected {
        return Err(DataError::ScopeViolation {
            resource: Resource::Profile,
            expected: expected.clone(),
            found: profile.owner().clone(),
        });
    }
    Ok(profile)
}

fn scoped_settings(expected: &UserId, settings: UserSettings) -> Result<UserSettings, DataError> {
    match &settings.user_id {
        Some(owner) if owner != expected => Err(DataError::ScopeViolation {
            resource: Resource::Settings,
            expected: expected.clone(),
            found: owner.clone(),
        }),
        _ => Ok(settings),
    }
}
