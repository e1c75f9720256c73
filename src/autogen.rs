//! Preview of what sidebar autogenerate directives will pick up.
//!
//! Resolution never touches the filesystem: an autogenerate directive is
//! passed to the build pipeline as written. This module exists for
//! `docsite check --docs-dir`, which lists the pages each directive would
//! expand to so a typo'd directory shows up before the build does.
//!
//! Pages are `.md` and `.mdx` files. Slugs are paths relative to the docs
//! root with the extension dropped, and `index` pages collapse onto their
//! directory:
//!
//! ```text
//! src/content/docs/
//! └── lxmfy/
//!     ├── index.md          → lxmfy
//!     ├── commands.md       → lxmfy/commands
//!     └── events/
//!         └── index.mdx     → lxmfy/events
//! ```

use crate::sidebar::AutogenerateDirective;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

const PAGE_EXTENSIONS: &[&str] = &["md", "mdx"];

/// Pages found under one autogenerate directory.
#[derive(Debug, Clone, PartialEq)]
pub struct AutogenPreview {
    pub directory: String,
    /// Directory that was walked (`docs_root` joined with `directory`).
    pub path: PathBuf,
    /// Whether the directory exists. A missing directory produces no pages.
    pub exists: bool,
    /// Page slugs, sorted.
    pub pages: Vec<String>,
}

/// List the pages `directive` would expand to under `docs_root`.
///
/// Unreadable entries are skipped; this is a diagnostic and never fails.
pub fn preview(docs_root: &Path, directive: &AutogenerateDirective) -> AutogenPreview {
    let path = docs_root.join(directive.directory.trim_matches('/'));
    if !path.is_dir() {
        return AutogenPreview {
            directory: directive.directory.clone(),
            path,
            exists: false,
            pages: Vec::new(),
        };
    }

    let mut pages: Vec<String> = WalkDir::new(&path)
        .follow_links(true)
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|e| e.file_type().is_file() && is_page(e.path()))
        .filter_map(|e| page_slug(docs_root, e.path()))
        .collect();
    pages.sort();
    pages.dedup();

    AutogenPreview {
        directory: directive.directory.clone(),
        path,
        exists: true,
        pages,
    }
}

fn is_page(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| PAGE_EXTENSIONS.iter().any(|ext| e.eq_ignore_ascii_case(ext)))
        .unwrap_or(false)
}

/// Slug for a page file: relative path, `/`-separated, extension dropped,
/// trailing `index` removed.
fn page_slug(docs_root: &Path, file: &Path) -> Option<String> {
    let relative = file.strip_prefix(docs_root).ok()?.with_extension("");
    let mut parts: Vec<String> = relative
        .components()
        .map(|c| c.as_os_str().to_string_lossy().into_owned())
        .collect();
    if parts.last().is_some_and(|last| last == "index") {
        parts.pop();
    }
    Some(parts.join("/"))
}
