//! Services used by the route handlers.
//!
//! - `auth` - Client for the hosted auth/database provider
//! - `diagnostics` - Environment variable reports for the debug endpoints

pub mod auth;
pub mod diagnostics;
