//! Member display colour.

use serde::{Deserialize, Serialize};

/// Display-colour tag chosen for a family member (e.g. `blue`, `coral`).
///
/// Stored as free-form text by the hosted database. Templates should only
/// ever emit [`ColorTag::css_class`], never the raw value.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ColorTag(String);

impl ColorTag {
    /// Tag used when a member has not picked a colour yet.
    pub const DEFAULT: &'static str = "blue";

    #[must_use]
    pub fn new(tag: impl Into<String>) -> Self {
        Self(tag.into())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// CSS class for this colour, e.g. `member-color-blue`.
    ///
    /// Lowercases the tag and replaces anything outside `[a-z0-9-]` with `-`.
    #[must_use]
    pub fn css_class(&self) -> String {
        let tag = if self.0.trim().is_empty() {
            Self::DEFAULT
        } else {
            self.0.trim()
        };
        let slug: String = tag
            .chars()
            .map(|c| {
                let c = c.to_ascii_lowercase();
                if c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-' {
                    c
                } else {
                    '-'
                }
            })
            .collect();
        format!("member-color-{slug}")
    }
}

impl Default for ColorTag {
    fn default() -> Self {
        Self(Self::DEFAULT.to_string())
    }
}

impl std::fmt::Display for ColorTag {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_css_class_plain() {
        assert_eq!(ColorTag::new("teal").css_class(), "member-color-teal");
    }

    #[test]
    fn test_css_class_sanitizes() {
        assert_eq!(
            ColorTag::new("Sky Blue\"><script>").css_class(),
            "member-color-sky-blue---script-"
        );
    }

    #[test]
    fn test_css_class_empty_falls_back() {
        assert_eq!(ColorTag::new("  ").css_class(), "member-color-blue");
        assert_eq!(ColorTag::default().as_str(), "blue");
    }
}
