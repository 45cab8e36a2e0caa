//! Resonance - user data export service
//!
//! Aggregates everything a Resonance user owns (profile, mood entries,
//! voice sessions, notes, settings) into one versioned JSON snapshot and
//! delivers it as an HTTP attachment, a client download, or an operator
//! file on disk.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
pub mod startup;
