//! URL base path parsing and composition.
//!
//! The site is served under a base path such as `/docs/`. Every URL the build
//! pipeline emits is composed as `{base}{segment}/`, so the base path is
//! normalized to always begin and end with a slash:
//!
//! - `"/docs/"` → `/docs/`
//! - `"docs"` → `/docs/`
//! - `"/guides/v2"` → `/guides/v2/`
//! - `"/"` → `/`
//!
//! Anything that is not a plain path is rejected: empty strings, whitespace,
//! query strings, fragments, full URLs, and empty segments (`//`).

use serde::Serialize;
use std::fmt;

/// A normalized URL base path. Always starts and ends with `/`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct BasePath(String);

impl BasePath {
    /// Parse and normalize a base path.
    ///
    /// Returns the reason as a plain message on failure; the caller prefixes
    /// it with the config key.
    pub fn parse(raw: &str) -> Result<Self, String> {
        if raw.is_empty() {
            return Err("must not be empty".into());
        }
        if raw.chars().any(char::is_whitespace) {
            return Err(format!("must not contain whitespace: {raw:?}"));
        }
        if raw.contains("://") {
            return Err(format!("must be a path, not a URL: {raw:?}"));
        }
        if raw.contains('?') || raw.contains('#') {
            return Err(format!(
                "must not contain a query or fragment: {raw:?}"
            ));
        }
        if raw.contains("//") {
            return Err(format!("must not contain empty segments: {raw:?}"));
        }

        let trimmed = raw.trim_matches('/');
        if trimmed.is_empty() {
            return Ok(Self("/".to_string()));
        }
        Ok(Self(format!("/{trimmed}/")))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Whether this is the site root (`/`).
    pub fn is_root(&self) -> bool {
        self.0 == "/"
    }

    /// Compose a URL under this base path.
    ///
    /// Surrounding slashes on `segment` are ignored; an empty segment yields
    /// the base path itself.
    pub fn join(&self, segment: &str) -> String {
        let segment = segment.trim_matches('/');
        if segment.is_empty() {
            self.0.clone()
        } else {
            format!("{}{}/", self.0, segment)
        }
    }
}

impl fmt::Display for BasePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
