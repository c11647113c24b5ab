//! Environment diagnostics.
//!
//! Builds read-only reports about the variables the application depends on:
//! whether each is set, its length, and a bounded preview. Secret values are
//! never reproduced in full; a secret's preview is at most a quarter of its
//! length and never more than [`SECRET_PREVIEW_MAX`] characters.

use serde::Serialize;

use crate::config::vars;

/// Maximum preview length for secret variables.
pub const SECRET_PREVIEW_MAX: usize = 6;

/// Maximum preview length for public variables.
pub const PUBLIC_PREVIEW_MAX: usize = 24;

/// Appended to previews that do not show the whole value.
const ELLIPSIS: char = '…';

/// How much of a variable's value may be shown.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sensitivity {
    Public,
    Secret,
}

/// A variable tracked by the diagnostic endpoints.
#[derive(Debug, Clone, Copy)]
pub struct TrackedVar {
    pub name: &'static str,
    pub sensitivity: Sensitivity,
    pub required: bool,
}

/// Every variable reported by the diagnostic endpoints.
pub const TRACKED_VARS: [TrackedVar; 6] = [
    TrackedVar {
        name: vars::SUPABASE_URL,
        sensitivity: Sensitivity::Public,
        required: true,
    },
    TrackedVar {
        name: vars::SUPABASE_ANON_KEY,
        sensitivity: Sensitivity::Public,
        required: true,
    },
    TrackedVar {
        name: vars::SUPABASE_SERVICE_ROLE_KEY,
        sensitivity: Sensitivity::Secret,
        required: false,
    },
    TrackedVar {
        name: vars::SUPABASE_JWT_SECRET,
        sensitivity: Sensitivity::Secret,
        required: false,
    },
    TrackedVar {
        name: vars::ENV,
        sensitivity: Sensitivity::Public,
        required: false,
    },
    TrackedVar {
        name: vars::DEPLOYMENT,
        sensitivity: Sensitivity::Public,
        required: false,
    },
];

/// Report for a single variable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VarReport {
    pub name: &'static str,
    pub present: bool,
    /// Length in characters; 0 when unset.
    pub length: usize,
    pub preview: Option<String>,
}

impl VarReport {
    /// Describe `value` without ever returning more than the allowed prefix.
    #[must_use]
    pub fn new(name: &'static str, value: Option<&str>, sensitivity: Sensitivity) -> Self {
        let Some(value) = value else {
            return Self {
                name,
                present: false,
                length: 0,
                preview: None,
            };
        };

        let length = value.chars().count();
        let limit = match sensitivity {
            Sensitivity::Secret => SECRET_PREVIEW_MAX.min(length / 4),
            Sensitivity::Public => PUBLIC_PREVIEW_MAX,
        };

        Self {
            name,
            present: true,
            length,
            preview: preview(value, length, limit),
        }
    }
}

fn preview(value: &str, length: usize, limit: usize) -> Option<String> {
    if limit == 0 {
        return None;
    }
    let mut shown: String = value.chars().take(limit).collect();
    if length > limit {
        shown.push(ELLIPSIS);
    }
    Some(shown)
}

/// Snapshot of every tracked variable.
#[derive(Debug, Clone, Serialize)]
pub struct EnvSnapshot {
    pub variables: Vec<VarReport>,
    pub all_required_present: bool,
}

impl EnvSnapshot {
    /// Capture the tracked variables from a lookup function.
    ///
    /// Empty values count as unset, matching configuration loading.
    #[must_use]
    pub fn capture<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut all_required_present = true;
        let variables = TRACKED_VARS
            .iter()
            .map(|var| {
                let value = lookup(var.name).filter(|v| !v.trim().is_empty());
                if var.required && value.is_none() {
                    all_required_present = false;
                }
                VarReport::new(var.name, value.as_deref(), var.sensitivity)
            })
            .collect();

        Self {
            variables,
            all_required_present,
        }
    }

    /// Capture from the process environment.
    #[must_use]
    pub fn from_process() -> Self {
        Self::capture(|key| std::env::var(key).ok())
    }

    /// Report for a tracked variable by name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&VarReport> {
        self.variables.iter().find(|v| v.name == name)
    }
}
