//! Core types for FamilySync.
//!
//! This module provides type-safe wrappers for common domain concepts.

pub mod color;
pub mod email;
pub mod id;
pub mod role;

pub use color::ColorTag;
pub use email::{Email, EmailError};
pub use id::*;
pub use role::{MemberRole, ParseRoleError};
