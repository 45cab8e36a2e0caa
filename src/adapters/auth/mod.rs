//! Authentication adapters.
//!
//! Implementations of the `SessionValidator` port:
//!
//! - `supabase_jwt` - Production HS256 access token validation
//! - `mock` - Test implementation that doesn't require external services

mod mock;
mod supabase_jwt;

pub use mock::MockSessionValidator;
pub use supabase_jwt::{SupabaseJwtConfig, SupabaseJwtValidator};
