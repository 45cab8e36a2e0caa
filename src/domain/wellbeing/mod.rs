//! Wellbeing module - the per-user records the application keeps.
//!
//! Rows are created and edited elsewhere in the application; this crate
//! only reads them. Field names mirror the store's column names so a
//! snapshot can be re-imported without a mapping layer.

mod mood;
mod note;
mod profile;
mod settings;
mod voice;

pub use mood::MoodEntry;
pub use note::Note;
pub use profile::Profile;
pub use settings::UserSettings;
pub use voice::VoiceSession;

use crate::domain::foundation::{Timestamp, UserId};

/// A row owned by exactly one user identity.
pub trait UserOwned {
    /// The identity the row belongs to.
    fn owner(&self) -> &UserId;
}

/// A row ordered by its creation time.
pub trait Chronological {
    fn created_at(&self) -> Timestamp;
}

/// Sorts rows newest first. Stable, so equal timestamps keep store order.
pub fn sort_newest_first<T: Chronological>(rows: &mut [T]) {
    rows.sort_by(|a, b| b.created_at().cmp(&a.created_at()));
}
