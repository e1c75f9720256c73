//! CLI output formatting.
//!
//! # Information-First Display
//!
//! Output leads with what the config *means*: each integration, sidebar entry,
//! and plugin is shown by positional index and name, with where it comes from
//! (autogenerate directory, link target, resolved URL) as secondary context.
//!
//! # Output Format
//!
//! ## Check
//!
//! ```text
//! Site
//!     Base path: /docs/
//!     Source: docsite.toml
//!
//! Integrations
//! 001 starlight: LXMFy Bot Framework
//!     Sidebar
//!     001 lxmfy
//!         Autogenerate: lxmfy → /docs/lxmfy/
//!     Plugins
//!     001 ion
//!
//! Autogenerate
//!     lxmfy (2 pages)
//!         lxmfy
//!         lxmfy/commands
//! ```
//!
//! # Architecture
//!
//! Each command has a `format_*` function (returns `Vec<String>`) for
//! testability and a `print_*` wrapper that writes to stdout. Format functions
//! are pure: no I/O, no side effects.

use crate::autogen::AutogenPreview;
use crate::base_path::BasePath;
use crate::config::SiteConfig;
use crate::sidebar::{SidebarEntry, SidebarSource};
use std::path::Path;

// ============================================================================
// Shared display helpers
// ============================================================================

/// Format a 1-based positional index as 3-digit zero-padded.
fn format_index(pos: usize) -> String {
    format!("{:0>3}", pos)
}

/// Return indentation string: 4 spaces per depth level.
fn indent(depth: usize) -> String {
    "    ".repeat(depth)
}

/// Pluralize a page count.
fn pages_label(n: usize) -> String {
    match n {
        1 => "1 page".to_string(),
        n => format!("{n} pages"),
    }
}

// ============================================================================
// Sidebar tree
// ============================================================================

fn format_sidebar(entries: &[SidebarEntry], base: &BasePath, depth: usize, lines: &mut Vec<String>) {
    for (i, entry) in entries.iter().enumerate() {
        let collapsed = if entry.collapsed { " (collapsed)" } else { "" };
        lines.push(format!(
            "{}{} {}{}",
            indent(depth),
            format_index(i + 1),
            entry.label,
            collapsed
        ));
        match &entry.source {
            SidebarSource::Autogenerate(directive) => lines.push(format!(
                "{}Autogenerate: {} → {}",
                indent(depth + 1),
                directive.directory,
                base.join(&directive.directory)
            )),
            SidebarSource::Link(link) => {
                lines.push(format!("{}Link: {}", indent(depth + 1), link))
            }
            SidebarSource::Items(children) => format_sidebar(children, base, depth + 1, lines),
        }
    }
}

// ============================================================================
// Check
// ============================================================================

/// Format the resolved config as an inventory, followed by autogenerate
/// previews when any were computed.
pub fn format_check_output(
    config: &SiteConfig,
    source: &Path,
    previews: &[AutogenPreview],
) -> Vec<String> {
    let mut lines = vec![
        "Site".to_string(),
        format!("    Base path: {}", config.base_path),
        format!("    Source: {}", source.display()),
        String::new(),
        "Integrations".to_string(),
    ];

    for (i, integration) in config.integrations.iter().enumerate() {
        let header = match &integration.options.title {
            Some(title) => format!("{} {}: {}", format_index(i + 1), integration.name, title),
            None => format!("{} {}", format_index(i + 1), integration.name),
        };
        lines.push(header);

        let options = &integration.options;
        if !options.sidebar.is_empty() {
            lines.push("    Sidebar".to_string());
            format_sidebar(&options.sidebar, &config.base_path, 1, &mut lines);
        }
        if !options.plugins.is_empty() {
            lines.push("    Plugins".to_string());
            for (j, plugin) in options.plugins.iter().enumerate() {
                let marker = if plugin.options.is_null() {
                    ""
                } else {
                    " (with options)"
                };
                lines.push(format!("    {} {}{}", format_index(j + 1), plugin.name, marker));
            }
        }
    }

    if !previews.is_empty() {
        lines.push(String::new());
        lines.push("Autogenerate".to_string());
        for preview in previews {
            if !preview.exists {
                lines.push(format!(
                    "    {} (missing: {})",
                    preview.directory,
                    preview.path.display()
                ));
                continue;
            }
            lines.push(format!(
                "    {} ({})",
                preview.directory,
                pages_label(preview.pages.len())
            ));
            for page in &preview.pages {
                lines.push(format!("        {}", page));
            }
        }
    }

    lines
}

/// Print check output to stdout.
pub fn print_check_output(config: &SiteConfig, source: &Path, previews: &[AutogenPreview]) {
    for line in format_check_output(config, source, previews) {
        println!("{}", line);
    }
}

/// Count line for the end of a check run, e.g. `1 integration, 3 sidebar entries, 1 plugin`.
pub fn format_summary(config: &SiteConfig) -> String {
    let integrations = config.integrations.len();
    let entries: usize = config
        .integrations
        .iter()
        .flat_map(|i| i.options.sidebar.iter())
        .map(SidebarEntry::count)
        .sum();
    let plugins: usize = config
        .integrations
        .iter()
        .map(|i| i.options.plugins.len())
        .sum();
    format!(
        "{} integration{}, {} sidebar entr{}, {} plugin{}",
        integrations,
        if integrations == 1 { "" } else { "s" },
        entries,
        if entries == 1 { "y" } else { "ies" },
        plugins,
        if plugins == 1 { "" } else { "s" },
    )
}
