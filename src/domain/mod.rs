//! Domain layer containing business types.
//!
//! # Module Organization
//!
//! - `foundation` - Shared domain primitives (IDs, timestamps, auth, errors)
//! - `wellbeing` - Per-user rows: profile, mood entries, voice sessions, notes, settings
//! - `export` - The export snapshot, its rendered file, and export errors

pub mod export;
pub mod foundation;
pub mod wellbeing;
