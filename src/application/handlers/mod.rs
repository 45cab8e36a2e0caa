//! Application handlers.
//!
//! Query handlers that orchestrate reads across ports.

pub mod export;
