//! FamilySync Core - Shared types library.
//!
//! This crate provides the domain types used by the FamilySync web
//! application and its test harnesses:
//! - `web` - The family dashboard, pages and API routes
//! - `integration-tests` - End-to-end tests against a running server
//!
//! # Architecture
//!
//! The core crate contains only types - no I/O, no HTTP clients. Records are
//! mirrored from the hosted database and deserialized with serde; this crate
//! never creates, updates or deletes them.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for IDs, emails, member roles and colours
//! - [`profile`] - The user profile record and its embedded family reference

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod profile;
pub mod types;

pub use profile::{FamilyRef, UserProfile};
pub use types::*;
