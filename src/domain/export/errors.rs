//! Export error types.
//!
//! `DataError` is what a store adapter reports for one sub-resource;
//! `ExportError` is what an export invocation reports to its caller.
//! Detailed messages stay in logs; `ExportError::user_message` is the
//! only text that crosses the trust boundary.

use std::fmt;
use thiserror::Error;

use crate::domain::foundation::{UserId, ValidationError};

/// Message shown to end users for any data-layer failure.
pub const GENERIC_FETCH_MESSAGE: &str = "Failed to fetch user data";

/// The five independently fetched sub-resources of an export.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Resource {
    Profile,
    MoodEntries,
    VoiceSessions,
    Notes,
    Settings,
}

impl Resource {
    /// All sub-resources in snapshot order.
    pub const ALL: [Resource; 5] = [
        Resource::Profile,
        Resource::MoodEntries,
        Resource::VoiceSessions,
        Resource::Notes,
        Resource::Settings,
    ];

    /// Backing table name.
    pub fn table(&self) -> &'static str {
        match self {
            Resource::Profile => "profiles",
            Resource::MoodEntries => "mood_entries",
            Resource::VoiceSessions => "voice_sessions",
            Resource::Notes => "notes",
            Resource::Settings => "user_settings",
        }
    }
}

impl fmt::Display for Resource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.table())
    }
}

/// Failure of a single sub-resource read.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum DataError {
    /// A singleton query matched no row.
    #[error("{resource}: no row found")]
    NotFound { resource: Resource },

    /// The store rejected or failed the query.
    #[error("{resource}: query failed: {message}")]
    Query { resource: Resource, message: String },

    /// A row came back in a shape we could not decode.
    #[error("{resource}: could not decode row: {message}")]
    Decode { resource: Resource, message: String },

    /// The store returned a row owned by a different identity.
    #[error("{resource}: row owned by {found}, expected {expected}")]
    ScopeViolation {
        resource: Resource,
        expected: UserId,
        found: UserId,
    },
}

impl DataError {
    pub fn not_found(resource: Resource) -> Self {
        Self::NotFound { resource }
    }

    pub fn query(resource: Resource, message: impl Into<String>) -> Self {
        Self::Query {
            resource,
            message: message.into(),
        }
    }

    pub fn decode(resource: Resource, message: impl Into<String>) -> Self {
        Self::Decode {
            resource,
            message: message.into(),
        }
    }

    /// The sub-resource this error belongs to.
    pub fn resource(&self) -> Resource {
        match self {
            DataError::NotFound { resource }
            | DataError::Query { resource, .. }
            | DataError::Decode { resource, .. }
            | DataError::ScopeViolation { resource, .. } => *resource,
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, DataError::NotFound { .. })
    }
}

/// Errors reported by an export invocation.
#[derive(Debug, Error)]
pub enum ExportError {
    /// The operator script was run without a user id.
    #[error("Missing user id argument")]
    MissingArgument,

    /// No valid session at the HTTP boundary.
    #[error("Authentication required")]
    Unauthorized,

    #[error("Invalid user id: {0}")]
    InvalidUserId(#[from] ValidationError),

    /// One or more required sub-resource reads failed.
    #[error("Failed to fetch user data: {}", join_failures(.failures))]
    DataFetch { failures: Vec<DataError> },

    #[error("Failed to serialize export: {0}")]
    Serialization(String),

    #[error("Failed to write export: {0}")]
    Io(String),
}

fn join_failures(failures: &[DataError]) -> String {
    failures
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

impl ExportError {
    /// Message safe to show an end user.
    pub fn user_message(&self) -> &'static str {
        match self {
            ExportError::MissingArgument => "Usage: resonance-export <user-id>",
            ExportError::Unauthorized => "Unauthorized",
            ExportError::InvalidUserId(_) => "Invalid user id",
            ExportError::DataFetch { .. } => GENERIC_FETCH_MESSAGE,
            ExportError::Serialization(_) | ExportError::Io(_) => "Failed to export user data",
        }
    }

    /// Sub-resources that failed, for a `DataFetch` error.
    pub fn failed_resources(&self) -> Vec<Resource> {
        match self {
            ExportError::DataFetch { failures } => failures.iter().map(DataError::resource).collect(),
            _ => Vec::new(),
        }
    }
}

impl From<serde_json::Error> for ExportError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization(err.to_string())
    }
}

impl From<std::io::Error> for ExportError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}
