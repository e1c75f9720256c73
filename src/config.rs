//! Site configuration module.
//!
//! Handles loading, validating, and normalizing the documentation-site config
//! before the external build pipeline runs. The config declares where the site
//! is served, which integrations (documentation themes) are registered, and
//! how each integration's sidebar and plugins are laid out.
//!
//! ## Config File Location
//!
//! The CLI looks for `docsite.toml`, then `docsite.json`, in the working
//! directory. Pass `--config` to point elsewhere and `--overlay` (repeatable)
//! to merge extra TOML files on top:
//!
//! ```text
//! site/
//! ├── docsite.toml           # Base config
//! ├── docsite.local.toml     # Overlay (--overlay docsite.local.toml)
//! └── src/content/docs/
//!     └── lxmfy/             # Autogenerated sidebar directory
//! ```
//!
//! ## Configuration Options
//!
//! ```toml
//! base_path = "/docs/"           # Required. Also accepted as `basePath` or `base`
//!
//! [[integrations]]               # Required, at least one
//! name = "starlight"             # Optional, defaults to "starlight"
//! title = "LXMFy Bot Framework"  # Optional site title
//! plugins = ["ion"]              # Bare names or { name, options } tables
//!
//! [[integrations.sidebar]]
//! label = "lxmfy"
//! autogenerate = { directory = "lxmfy" }
//! ```
//!
//! `title`, `sidebar`, and `plugins` may also be nested under an
//! `[integrations.options]` table, which is the shape the resolved JSON uses.
//! Mixing both shapes in one integration is rejected.
//!
//! ## Overlays
//!
//! Overlays are merged table by table. Arrays are replaced wholesale, so an
//! overlay that sets `integrations` replaces the whole list and its order.
//!
//! Unknown keys are rejected to catch typos early.

use crate::base_path::BasePath;
use crate::plugin::{self, PluginSpec, RawPlugin};
use crate::sidebar::{self, RawSidebarEntry, SidebarEntry};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Config file names tried, in order, when discovering a config in a directory.
pub const CONFIG_FILENAMES: &[&str] = &["docsite.toml", "docsite.json"];

/// Integration name used when a config does not name one.
pub const DEFAULT_INTEGRATION: &str = "starlight";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Unsupported config format (expected .toml or .json): {0}")]
    UnsupportedFormat(PathBuf),
    #[error("No config found: {0}")]
    NotFound(PathBuf),
    #[error("Config validation error: {0}")]
    Validation(String),
}

impl ConfigError {
    /// Validation error for the value at config path `at`.
    pub fn invalid(at: &str, message: impl fmt::Display) -> Self {
        ConfigError::Validation(format!("{at} {message}"))
    }
}

// =============================================================================
// Raw (as written) config
// =============================================================================

/// Site configuration as written in a config file, before validation.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RawSiteConfig {
    #[serde(alias = "basePath", alias = "base")]
    pub base_path: Option<String>,
    pub integrations: Option<Vec<RawIntegration>>,
}

/// An integration as written. `title`, `sidebar`, and `plugins` may sit on the
/// integration itself or inside `options`, not both.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RawIntegration {
    pub name: Option<String>,
    pub options: Option<RawIntegrationOptions>,
    pub title: Option<String>,
    pub sidebar: Option<Vec<RawSidebarEntry>>,
    pub plugins: Option<Vec<RawPlugin>>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RawIntegrationOptions {
    pub title: Option<String>,
    pub sidebar: Option<Vec<RawSidebarEntry>>,
    pub plugins: Option<Vec<RawPlugin>>,
}

impl RawIntegration {
    fn has_shorthand(&self) -> bool {
        self.title.is_some() || self.sidebar.is_some() || self.plugins.is_some()
    }
}

// =============================================================================
// Resolved config
// =============================================================================

/// Validated, normalized site configuration handed to the build pipeline.
///
/// Built once by [`resolve`] and only read afterwards. Serializes to the same
/// shape [`resolve_json`] accepts, so the output re-resolves to an equal value.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SiteConfig {
    /// URL base path, always `/`-delimited.
    pub base_path: BasePath,
    /// Registered integrations in declaration order. Never empty.
    pub integrations: Vec<Integration>,
}

/// A registered integration (e.g. a documentation theme).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Integration {
    pub name: String,
    pub options: IntegrationOptions,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IntegrationOptions {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    pub sidebar: Vec<SidebarEntry>,
    /// Plugins in declaration order, which is their precedence order.
    pub plugins: Vec<PluginSpec>,
}

impl SiteConfig {
    /// Look up an integration by name.
    pub fn integration(&self, name: &str) -> Option<&Integration> {
        self.integrations.iter().find(|i| i.name == name)
    }
}

// =============================================================================
// Resolution
// =============================================================================

/// Validate and normalize a raw config.
///
/// Pure: no I/O, and equal inputs give equal outputs. Fails with
/// [`ConfigError::Validation`] naming the first offending key.
pub fn resolve(raw: RawSiteConfig) -> Result<SiteConfig, ConfigError> {
    let base_path = raw
        .base_path
        .ok_or_else(|| ConfigError::invalid("base_path", "is required"))?;
    let base_path =
        BasePath::parse(&base_path).map_err(|reason| ConfigError::invalid("base_path", reason))?;

    let raw_integrations = raw
        .integrations
        .ok_or_else(|| ConfigError::invalid("integrations", "is required"))?;
    if raw_integrations.is_empty() {
        return Err(ConfigError::invalid(
            "integrations",
            "must contain at least one integration",
        ));
    }

    let integrations = raw_integrations
        .into_iter()
        .enumerate()
        .map(|(i, integration)| resolve_integration(integration, &format!("integrations[{i}]")))
        .collect::<Result<Vec<_>, _>>()?;

    Ok(SiteConfig {
        base_path,
        integrations,
    })
}

fn resolve_integration(raw: RawIntegration, at: &str) -> Result<Integration, ConfigError> {
    let name = raw
        .name
        .clone()
        .unwrap_or_else(|| DEFAULT_INTEGRATION.to_string());
    if name.trim().is_empty() {
        return Err(ConfigError::invalid(&format!("{at}.name"), "must not be empty"));
    }

    let options = match (raw.has_shorthand(), raw.options) {
        (true, Some(_)) => {
            return Err(ConfigError::invalid(
                at,
                "sets `title`, `sidebar`, or `plugins` both directly and under `options`",
            ));
        }
        (_, Some(options)) => options,
        (_, None) => RawIntegrationOptions {
            title: raw.title,
            sidebar: raw.sidebar,
            plugins: raw.plugins,
        },
    };

    let options_at = format!("{at}.options");
    Ok(Integration {
        name,
        options: IntegrationOptions {
            title: options.title,
            sidebar: sidebar::resolve_sidebar(
                options.sidebar.unwrap_or_default(),
                &format!("{options_at}.sidebar"),
            )?,
            plugins: plugin::resolve_plugins(
                options.plugins.unwrap_or_default(),
                &format!("{options_at}.plugins"),
            )?,
        },
    })
}

/// Resolve a parsed TOML document.
///
/// A document that doesn't fit the config shape (wrong types, unknown keys)
/// is a validation error, same as a missing key.
pub fn resolve_value(value: toml::Value) -> Result<SiteConfig, ConfigError> {
    let raw: RawSiteConfig = value
        .try_into()
        .map_err(|e: toml::de::Error| ConfigError::Validation(e.to_string()))?;
    resolve(raw)
}

/// Resolve a parsed JSON document. See [`resolve_value`].
pub fn resolve_json(value: serde_json::Value) -> Result<SiteConfig, ConfigError> {
    let raw: RawSiteConfig =
        serde_json::from_value(value).map_err(|e| ConfigError::Validation(e.to_string()))?;
    resolve(raw)
}

// =============================================================================
// Config loading and merging
// =============================================================================

/// A config file parsed into a generic document, before resolution.
#[derive(Debug, Clone)]
pub enum RawDocument {
    Toml(toml::Value),
    Json(serde_json::Value),
}

/// Recursively merge `overlay` on top of `base`.
///
/// - Tables are merged key-by-key (overlay keys override base keys).
/// - Non-table values in overlay replace base values entirely, arrays included.
/// - Keys in base that are not in overlay are preserved.
pub fn merge_toml(base: toml::Value, overlay: toml::Value) -> toml::Value {
    match (base, overlay) {
        (toml::Value::Table(mut base_table), toml::Value::Table(overlay_table)) => {
            for (key, overlay_val) in overlay_table {
                let merged = match base_table.remove(&key) {
                    Some(base_val) => merge_toml(base_val, overlay_val),
                    None => overlay_val,
                };
                base_table.insert(key, merged);
            }
            toml::Value::Table(base_table)
        }
        (_, overlay) => overlay,
    }
}

/// Alternate spellings of `base_path` accepted at the top level.
const BASE_PATH_ALIASES: [&str; 2] = ["basePath", "base"];

/// Rename top-level alias keys to `base_path` so documents written with
/// different spellings merge onto the same key.
///
/// A document that spells the key twice is left alone and fails resolution
/// with a duplicate-field error.
pub fn normalize_aliases(value: toml::Value) -> toml::Value {
    match value {
        toml::Value::Table(mut table) => {
            for alias in BASE_PATH_ALIASES {
                if table.contains_key("base_path") {
                    break;
                }
                if let Some(v) = table.remove(alias) {
                    table.insert("base_path".to_string(), v);
                }
            }
            toml::Value::Table(table)
        }
        other => other,
    }
}

/// Read and parse a config file, picking the format from its extension.
pub fn load_raw_config(path: &Path) -> Result<RawDocument, ConfigError> {
    let format = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase());
    if !path.is_file() {
        return Err(ConfigError::NotFound(path.to_path_buf()));
    }
    match format.as_deref() {
        Some("toml") => {
            let content = fs::read_to_string(path)?;
            Ok(RawDocument::Toml(toml::from_str(&content)?))
        }
        Some("json") => {
            let content = fs::read_to_string(path)?;
            Ok(RawDocument::Json(serde_json::from_str(&content)?))
        }
        _ => Err(ConfigError::UnsupportedFormat(path.to_path_buf())),
    }
}

/// Find the config file in `dir`, trying [`CONFIG_FILENAMES`] in order.
pub fn find_config(dir: &Path) -> Result<PathBuf, ConfigError> {
    CONFIG_FILENAMES
        .iter()
        .map(|name| dir.join(name))
        .find(|path| path.is_file())
        .ok_or_else(|| ConfigError::NotFound(dir.to_path_buf()))
}

/// Load a config file, merge TOML overlays on top in order, and resolve.
///
/// Overlays only apply to TOML configs.
pub fn load_config(path: &Path, overlays: &[PathBuf]) -> Result<SiteConfig, ConfigError> {
    match load_raw_config(path)? {
        RawDocument::Json(value) => {
            if let Some(overlay) = overlays.first() {
                return Err(ConfigError::Validation(format!(
                    "overlay {} requires a TOML base config, got {}",
                    overlay.display(),
                    path.display()
                )));
            }
            resolve_json(value)
        }
        RawDocument::Toml(base) => {
            let mut merged = normalize_aliases(base);
            for overlay in overlays {
                match load_raw_config(overlay)? {
                    RawDocument::Toml(value) => {
                        merged = merge_toml(merged, normalize_aliases(value));
                    }
                    RawDocument::Json(_) => {
                        return Err(ConfigError::UnsupportedFormat(overlay.clone()));
                    }
                }
            }
            resolve_value(merged)
        }
    }
}

/// Returns a fully-commented `docsite.toml` describing every key.
///
/// Used by the `gen-config` CLI command.
pub fn stock_config_toml() -> &'static str {
    r##"# Documentation Site Configuration
# =================================
# Validated by `docsite check` before the site build runs.
# Unknown keys will cause an error.

# URL path the site is served under. Leading and trailing slashes are added
# when missing, so "docs" and "/docs/" are equivalent.
base_path = "/docs/"

# ---------------------------------------------------------------------------
# Integrations
# ---------------------------------------------------------------------------
# At least one integration is required. Order matters: it is the order the
# build pipeline applies them in.
[[integrations]]
# Integration name. Defaults to "starlight".
name = "starlight"

# Site title shown in the header and browser tab.
title = "LXMFy Bot Framework"

# Theme plugins, applied in order. Either bare names or tables:
#   plugins = [{ name = "ion", options = { accent = "violet" } }]
plugins = ["ion"]

# ---------------------------------------------------------------------------
# Sidebar
# ---------------------------------------------------------------------------
# Each entry needs a label unique among its siblings and exactly one of:
#   autogenerate = { directory = "..." }   entries derived from a docs directory
#   items = [ ... ]                        explicit nested entries
#   link = "/path/"                        a single link
# Set `collapsed = true` to collapse a group by default.
[[integrations.sidebar]]
label = "lxmfy"
autogenerate = { directory = "lxmfy" }
"##
}
