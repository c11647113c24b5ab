//! FamilySync web application library.
//!
//! Server-rendered family dashboard backed by a hosted auth/database
//! provider. The binary in `main.rs` only wires up telemetry and serves
//! [`routes::build_router`]; everything else lives here so it can be tested.
//!
//! # Modules
//!
//! - [`config`] - Environment-driven configuration
//! - [`services`] - Provider client and environment diagnostics
//! - [`middleware`] - Session extractor, cookies, request IDs, security headers
//! - [`routes`] - Pages, sign-in/out, session and diagnostic endpoints

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod config;
pub mod error;
pub mod filters;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;
pub mod state;
