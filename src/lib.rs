//! # docsite-config
//!
//! Validates and normalizes the configuration of a documentation site before
//! the site build runs. The config is declarative: where the site is served,
//! which integrations (documentation themes) are registered, and how each
//! integration lays out its sidebar and plugins. Rendering, markdown parsing,
//! search, and bundling all belong to the external build pipeline; this crate
//! only makes sure what it receives is well-formed.
//!
//! # Pipeline
//!
//! ```text
//! 1. Load      docsite.toml (+ overlays)  →  raw document
//! 2. Resolve   raw document               →  SiteConfig   (pure, fails fast)
//! 3. Emit      SiteConfig                 →  JSON + fingerprint for the build
//! ```
//!
//! Resolution is a single pass with no I/O. Any problem stops it with a
//! [`config::ConfigError::Validation`] naming the offending key, e.g.
//! `integrations[0].options.sidebar[0].autogenerate.directory is required`.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`config`] | Raw and resolved config types, `resolve`, file loading and overlay merging |
//! | [`sidebar`] | Sidebar entry tree and its validation |
//! | [`plugin`] | Opaque plugin references |
//! | [`base_path`] | URL base path normalization and URL composition |
//! | [`autogen`] | Diagnostic preview of autogenerated sidebar directories |
//! | [`fingerprint`] | Change-detection hash of a resolved config |
//! | [`output`] | CLI output formatting |
//!
//! # Design Decisions
//!
//! ## Raw and Resolved Types
//!
//! Config files deserialize into `Raw*` structs where every field is
//! optional. Validation then builds the resolved types, so a missing key is
//! reported with its full path instead of a bare serde "missing field".
//!
//! ## Order Is Meaning
//!
//! Integrations and plugins keep their declaration order; the build pipeline
//! applies them in that order. Overlays replace arrays wholesale rather than
//! merging them, so the order in the winning file is the order used.
//!
//! ## Round-Trippable Output
//!
//! A resolved [`config::SiteConfig`] serializes to the same shape the loader
//! accepts. Feeding the emitted JSON back through
//! [`config::resolve_json`] yields an equal config.

pub mod autogen;
pub mod base_path;
pub mod config;
pub mod fingerprint;
pub mod output;
pub mod plugin;
pub mod sidebar;

#[cfg(test)]
pub(crate) mod test_helpers;
