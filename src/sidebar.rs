//! Sidebar navigation tree.
//!
//! Each sidebar entry has a label and exactly one source of content:
//!
//! ```toml
//! # Derived at build time from the files under `lxmfy/`
//! [[integrations.sidebar]]
//! label = "lxmfy"
//! autogenerate = { directory = "lxmfy" }
//!
//! # Explicit group of nested entries
//! [[integrations.sidebar]]
//! label = "Guides"
//! items = [
//!     { label = "Install", link = "/guides/install/" },
//! ]
//! ```
//!
//! Autogenerate directives are carried through as-is. Listing the pages a
//! directory contains is the build pipeline's job (see [`crate::autogen`] for
//! the diagnostic preview).
//!
//! ## Validation
//!
//! - every entry needs a non-empty `label`
//! - labels are unique among siblings (the same label may appear in
//!   different groups)
//! - exactly one of `autogenerate`, `items`, `link`
//! - `autogenerate.directory` is required and non-empty
//! - `items` must not be empty and `link` must not be blank

use crate::config::ConfigError;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// A sidebar entry as written in a config file.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RawSidebarEntry {
    pub label: Option<String>,
    pub autogenerate: Option<RawAutogenerate>,
    pub items: Option<Vec<RawSidebarEntry>>,
    pub link: Option<String>,
    pub collapsed: Option<bool>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RawAutogenerate {
    pub directory: Option<String>,
    pub collapsed: Option<bool>,
}

/// A validated sidebar entry.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SidebarEntry {
    pub label: String,
    #[serde(flatten)]
    pub source: SidebarSource,
    /// Render the group collapsed by default.
    #[serde(skip_serializing_if = "is_false")]
    pub collapsed: bool,
}

/// Where a sidebar entry gets its content from.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SidebarSource {
    Autogenerate(AutogenerateDirective),
    Items(Vec<SidebarEntry>),
    Link(String),
}

/// Derive sidebar entries from a docs directory at build time.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AutogenerateDirective {
    /// Directory relative to the docs content root, kept exactly as written.
    pub directory: String,
    /// Collapse the generated subgroups by default.
    #[serde(skip_serializing_if = "is_false")]
    pub collapsed: bool,
}

fn is_false(b: &bool) -> bool {
    !*b
}

impl SidebarEntry {
    /// Number of entries in this subtree, including this one.
    pub fn count(&self) -> usize {
        match &self.source {
            SidebarSource::Items(children) => 1 + children.iter().map(Self::count).sum::<usize>(),
            _ => 1,
        }
    }
}

/// Validate a sidebar list, preserving order.
///
/// `at` is the config path of the list, used in error messages.
pub fn resolve_sidebar(
    raw: Vec<RawSidebarEntry>,
    at: &str,
) -> Result<Vec<SidebarEntry>, ConfigError> {
    let mut seen = HashSet::new();
    let mut entries = Vec::with_capacity(raw.len());
    for (i, raw_entry) in raw.into_iter().enumerate() {
        let entry_at = format!("{at}[{i}]");
        let entry = resolve_entry(raw_entry, &entry_at)?;
        if !seen.insert(entry.label.clone()) {
            return Err(ConfigError::invalid(
                &entry_at,
                format!("has duplicate label {:?} in {at}", entry.label),
            ));
        }
        entries.push(entry);
    }
    Ok(entries)
}

fn resolve_entry(raw: RawSidebarEntry, at: &str) -> Result<SidebarEntry, ConfigError> {
    let label = raw
        .label
        .ok_or_else(|| ConfigError::invalid(&format!("{at}.label"), "is required"))?;
    if label.trim().is_empty() {
        return Err(ConfigError::invalid(
            &format!("{at}.label"),
            "must not be empty",
        ));
    }

    let source = match (raw.autogenerate, raw.items, raw.link) {
        (Some(auto), None, None) => {
            SidebarSource::Autogenerate(resolve_autogenerate(auto, &format!("{at}.autogenerate"))?)
        }
        (None, Some(items), None) => {
            if items.is_empty() {
                return Err(ConfigError::invalid(
                    &format!("{at}.items"),
                    "must not be empty",
                ));
            }
            SidebarSource::Items(resolve_sidebar(items, &format!("{at}.items"))?)
        }
        (None, None, Some(link)) => {
            if link.trim().is_empty() {
                return Err(ConfigError::invalid(
                    &format!("{at}.link"),
                    "must not be empty",
                ));
            }
            SidebarSource::Link(link)
        }
        (None, None, None) => {
            return Err(ConfigError::invalid(
                at,
                "needs one of `autogenerate`, `items`, or `link`",
            ));
        }
        _ => {
            return Err(ConfigError::invalid(
                at,
                "must have only one of `autogenerate`, `items`, or `link`",
            ));
        }
    };

    Ok(SidebarEntry {
        label,
        source,
        collapsed: raw.collapsed.unwrap_or(false),
    })
}

fn resolve_autogenerate(
    raw: RawAutogenerate,
    at: &str,
) -> Result<AutogenerateDirective, ConfigError> {
    let directory = raw
        .directory
        .ok_or_else(|| ConfigError::invalid(&format!("{at}.directory"), "is required"))?;
    if directory.trim().is_empty() {
        return Err(ConfigError::invalid(
            &format!("{at}.directory"),
            "must not be empty",
        ));
    }
    Ok(AutogenerateDirective {
        directory,
        collapsed: raw.collapsed.unwrap_or(false),
    })
}

/// All autogenerate directives in the tree, depth-first in sidebar order.
pub fn autogenerate_directives(entries: &[SidebarEntry]) -> Vec<&AutogenerateDirective> {
    let mut found = Vec::new();
    collect_directives(entries, &mut found);
    found
}

fn collect_directives<'a>(entries: &'a [SidebarEntry], found: &mut Vec<&'a AutogenerateDirective>) {
    for entry in entries {
        match &entry.source {
            SidebarSource::Autogenerate(directive) => found.push(directive),
            SidebarSource::Items(children) => collect_directives(children, found),
            SidebarSource::Link(_) => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn resolve(value: serde_json::Value) -> Result<Vec<SidebarEntry>, ConfigError> {
        let raw: Vec<RawSidebarEntry> = serde_json::from_value(value).unwrap();
        resolve_sidebar(raw, "sidebar")
    }

    fn error_message(value: serde_json::Value) -> String {
        let err = resolve(value).unwrap_err();
        assert!(matches!(err, ConfigError::Validation(_)));
        err.to_string()
    }

    #[test]
    fn autogenerate_entry() {
        let sidebar = resolve(json!([
            { "label": "lxmfy", "autogenerate": { "directory": "lxmfy" } }
        ]))
        .unwrap();
        assert_eq!(sidebar.len(), 1);
        assert_eq!(sidebar[0].label, "lxmfy");
        assert_eq!(
            sidebar[0].source,
            SidebarSource::Autogenerate(AutogenerateDirective {
                directory: "lxmfy".into(),
                collapsed: false,
            })
        );
    }

    #[test]
    fn directory_kept_verbatim() {
        let sidebar = resolve(json!([
            { "label": "API", "autogenerate": { "directory": "reference/api/" } }
        ]))
        .unwrap();
        let directives = autogenerate_directives(&sidebar);
        assert_eq!(directives[0].directory, "reference/api/");
    }

    #[test]
    fn nested_items() {
        let sidebar = resolve(json!([
            { "label": "Guides", "items": [
                { "label": "Install", "link": "/guides/install/" },
                { "label": "Commands", "autogenerate": { "directory": "guides/commands" } }
            ]}
        ]))
        .unwrap();
        let SidebarSource::Items(children) = &sidebar[0].source else {
            panic!("expected items, got {:?}", sidebar[0].source);
        };
        assert_eq!(children.len(), 2);
        assert_eq!(children[0].source, SidebarSource::Link("/guides/install/".into()));
        assert_eq!(sidebar[0].count(), 3);
    }

    #[test]
    fn missing_directory_rejected() {
        let msg = error_message(json!([{ "label": "lxmfy", "autogenerate": {} }]));
        assert!(msg.contains("sidebar[0].autogenerate.directory is required"), "{msg}");
    }

    #[test]
    fn empty_directory_rejected() {
        let msg = error_message(json!([{ "label": "x", "autogenerate": { "directory": " " } }]));
        assert!(msg.contains("must not be empty"));
    }

    #[test]
    fn missing_label_rejected() {
        let msg = error_message(json!([{ "link": "/a/" }]));
        assert!(msg.contains("sidebar[0].label is required"), "{msg}");
    }

    #[test]
    fn duplicate_sibling_labels_rejected() {
        let msg = error_message(json!([
            { "label": "Guides", "link": "/a/" },
            { "label": "Guides", "link": "/b/" }
        ]));
        assert!(msg.contains("duplicate label"), "{msg}");
        assert!(msg.contains("sidebar[1]"), "{msg}");
    }

    #[test]
    fn same_label_in_different_groups_ok() {
        let sidebar = resolve(json!([
            { "label": "Overview", "link": "/overview/" },
            { "label": "Guides", "items": [{ "label": "Overview", "link": "/guides/" }] }
        ]));
        assert!(sidebar.is_ok());
    }

    #[test]
    fn duplicate_nested_labels_rejected() {
        let msg = error_message(json!([
            { "label": "Guides", "items": [
                { "label": "A", "link": "/a/" },
                { "label": "A", "link": "/b/" }
            ]}
        ]));
        assert!(msg.contains("sidebar[0].items[1]"), "{msg}");
    }

    #[test]
    fn no_source_rejected() {
        let msg = error_message(json!([{ "label": "Lonely" }]));
        assert!(msg.contains("needs one of"));
    }

    #[test]
    fn multiple_sources_rejected() {
        let msg = error_message(json!([
            { "label": "Both", "link": "/a/", "autogenerate": { "directory": "a" } }
        ]));
        assert!(msg.contains("only one of"));
    }

    #[test]
    fn empty_items_rejected() {
        let msg = error_message(json!([{ "label": "Empty", "items": [] }]));
        assert!(msg.contains("sidebar[0].items must not be empty"), "{msg}");
    }

    #[test]
    fn unknown_key_fails_to_parse() {
        let result: Result<Vec<RawSidebarEntry>, _> =
            serde_json::from_value(json!([{ "label": "x", "autogen": { "directory": "x" } }]));
        assert!(result.is_err());
    }

    #[test]
    fn collapsed_flags() {
        let sidebar = resolve(json!([
            { "label": "Ref", "collapsed": true,
              "autogenerate": { "directory": "ref", "collapsed": true } }
        ]))
        .unwrap();
        assert!(sidebar[0].collapsed);
        let directives = autogenerate_directives(&sidebar);
        assert!(directives[0].collapsed);
    }

    #[test]
    fn serializes_in_config_shape() {
        let sidebar = resolve(json!([
            { "label": "lxmfy", "autogenerate": { "directory": "lxmfy" } },
            { "label": "Home", "link": "/" }
        ]))
        .unwrap();
        assert_eq!(
            serde_json::to_value(&sidebar).unwrap(),
            json!([
                { "label": "lxmfy", "autogenerate": { "directory": "lxmfy" } },
                { "label": "Home", "link": "/" }
            ])
        );
    }

    #[test]
    fn directives_in_sidebar_order() {
        let sidebar = resolve(json!([
            { "label": "A", "autogenerate": { "directory": "a" } },
            { "label": "G", "items": [
                { "label": "B", "autogenerate": { "directory": "b" } }
            ]},
            { "label": "C", "autogenerate": { "directory": "c" } }
        ]))
        .unwrap();
        let dirs: Vec<&str> = autogenerate_directives(&sidebar)
            .iter()
            .map(|d| d.directory.as_str())
            .collect();
        assert_eq!(dirs, ["a", "b", "c"]);
    }
}
