//! HTTP middleware stack.
//!
//! # Middleware Order (outermost first)
//!
//! 1. Sentry layers (capture errors, transactions)
//! 2. `TraceLayer` (request spans)
//! 3. Request ID (add unique ID to each request)
//! 4. Security headers (CSP, framing, caching)

pub mod auth;
pub mod request_id;
pub mod security_headers;
pub mod session;

pub use auth::{LOGIN_PATH, RequireSession, SessionRejection};
pub use request_id::request_id_middleware;
pub use security_headers::security_headers_middleware;
pub use session::{clear_session_cookies, session_cookie};
