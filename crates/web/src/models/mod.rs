//! Request-scoped models for the web application.
//!
//! Profile and family records live in `familysync-core`; this module only
//! holds what the HTTP layer carries between requests.

pub mod session;

pub use session::{SessionTokens, cookie_names};
