//! Shared test utilities.
//!
//! Fixture setup plus lookup helpers over resolved configs that panic with
//! the available names on a miss.
//!
//! # Usage
//!
//! ```rust
//! use crate::test_helpers::*;
//!
//! let tmp = setup_fixtures();
//! let config = load_fixture_config(&tmp);
//!
//! let starlight = find_integration(&config, "starlight");
//! let entry = find_entry(&starlight.options.sidebar, "lxmfy");
//! assert_sidebar_shape(&starlight.options.sidebar, &[("lxmfy", &[])]);
//! ```

use std::path::Path;
use tempfile::TempDir;

use crate::config::{self, Integration, SiteConfig};
use crate::sidebar::{SidebarEntry, SidebarSource};

// =========================================================================
// Fixture setup
// =========================================================================

/// Copy `fixtures/site/` to a temp directory and return it.
///
/// Tests get an isolated copy they can mutate without affecting other tests
/// or the source fixtures.
pub fn setup_fixtures() -> TempDir {
    let tmp = TempDir::new().unwrap();
    let fixtures = Path::new(env!("CARGO_MANIFEST_DIR")).join("fixtures/site");
    copy_dir_recursive(&fixtures, tmp.path()).unwrap();
    tmp
}

fn copy_dir_recursive(src: &Path, dst: &Path) -> std::io::Result<()> {
    for entry in std::fs::read_dir(src)? {
        let entry = entry?;
        let src_path = entry.path();
        let dst_path = dst.join(entry.file_name());

        if src_path.is_dir() {
            std::fs::create_dir_all(&dst_path)?;
            copy_dir_recursive(&src_path, &dst_path)?;
        } else {
            std::fs::copy(&src_path, &dst_path)?;
        }
    }
    Ok(())
}

/// Load `docsite.toml` from a fixture copy. Panics on any error.
pub fn load_fixture_config(tmp: &TempDir) -> SiteConfig {
    let path = tmp.path().join("docsite.toml");
    config::load_config(&path, &[])
        .unwrap_or_else(|e| panic!("fixture config failed to load: {e}"))
}

// =========================================================================
// Lookups (panic with a clear message on miss)
// =========================================================================

/// Find an integration by name. Panics if not found.
pub fn find_integration<'a>(config: &'a SiteConfig, name: &str) -> &'a Integration {
    config.integration(name).unwrap_or_else(|| {
        let names: Vec<&str> = config.integrations.iter().map(|i| i.name.as_str()).collect();
        panic!("integration '{name}' not found. Available: {names:?}")
    })
}

/// Find a sidebar entry by label among siblings. Panics if not found.
pub fn find_entry<'a>(entries: &'a [SidebarEntry], label: &str) -> &'a SidebarEntry {
    entries.iter().find(|e| e.label == label).unwrap_or_else(|| {
        let labels = sidebar_labels(entries);
        panic!("sidebar entry '{label}' not found. Available: {labels:?}")
    })
}

/// Sibling labels in order.
pub fn sidebar_labels(entries: &[SidebarEntry]) -> Vec<&str> {
    entries.iter().map(|e| e.label.as_str()).collect()
}

/// Child labels of a group entry; empty for non-group entries.
pub fn child_labels(entry: &SidebarEntry) -> Vec<&str> {
    match &entry.source {
        SidebarSource::Items(children) => sidebar_labels(children),
        _ => Vec::new(),
    }
}

/// Assert a sidebar matches an expected two-level shape.
///
/// Each entry is `(label, child_labels)`. Use `&[]` for leaves.
pub fn assert_sidebar_shape(entries: &[SidebarEntry], expected: &[(&str, &[&str])]) {
    let expected_labels: Vec<&str> = expected.iter().map(|(l, _)| *l).collect();
    assert_eq!(
        sidebar_labels(entries),
        expected_labels,
        "sidebar top-level labels mismatch"
    );

    for (label, children) in expected {
        let entry = find_entry(entries, label);
        assert_eq!(
            child_labels(entry),
            children.to_vec(),
            "sidebar children of '{label}' mismatch"
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sidebar::autogenerate_directives;

    #[test]
    fn fixture_config_loads() {
        let tmp = setup_fixtures();
        let config = load_fixture_config(&tmp);
        let starlight = find_integration(&config, "starlight");
        assert_eq!(starlight.options.title.as_deref(), Some("LXMFy Bot Framework"));
    }

    #[test]
    fn fixture_sidebar_shape() {
        let tmp = setup_fixtures();
        let config = load_fixture_config(&tmp);
        let sidebar = &find_integration(&config, "starlight").options.sidebar;
        assert_sidebar_shape(
            sidebar,
            &[("lxmfy", &[]), ("Guides", &["Getting Started", "Commands"])],
        );
    }

    #[test]
    fn fixture_directives() {
        let tmp = setup_fixtures();
        let config = load_fixture_config(&tmp);
        let sidebar = &find_integration(&config, "starlight").options.sidebar;
        let dirs: Vec<&str> = autogenerate_directives(sidebar)
            .iter()
            .map(|d| d.directory.as_str())
            .collect();
        assert_eq!(dirs, ["lxmfy", "guides/commands"]);
    }
}
