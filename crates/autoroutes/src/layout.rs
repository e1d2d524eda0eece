// File: src/layout.rs
// Purpose: Decide which layout wraps each page

use crate::classify::PathClassifier;
use crate::path::{normalize_key, relative_slash, to_slash, DirHierarchy};
use crate::table::FileEntry;
use std::collections::HashMap;
use std::path::{Path, PathBuf};

/// Reserved id of the global layout (non-routable token)
pub const DEFAULT_GLOBAL_LAYOUT_ID: &str = "@@global-layout";

/// Directory → governing layout id, plus the optional global layout
///
/// Built once per scan and discarded after the table is built.
///
/// # Precedence
///
/// A local (directory-specific) layout always wins over the global layout.
/// Among local layouts the nearest enclosing directory wins.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LayoutMap {
    global: Option<String>,
    local: HashMap<PathBuf, String>,
}

impl LayoutMap {
    pub fn global(&self) -> Option<&str> {
        self.global.as_deref()
    }

    /// Layout governing exactly `dir` (absolute, any separator style)
    pub fn local(&self, dir: &Path) -> Option<&str> {
        self.local.get(&normalize_key(dir)).map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.global.is_none() && self.local.is_empty()
    }

    /// Parent layout for a page: nearest local layout, else the global one
    pub fn parent_for(&self, entry: &FileEntry) -> Option<&str> {
        let relative_dir = relative_dir_of(entry);

        DirHierarchy::new(&relative_dir)
            .find_map(|dir| self.local(&join_relative(&entry.base_dir, dir)))
            .or_else(|| self.global())
    }
}

/// Builds the [`LayoutMap`] for a set of discovered files
#[derive(Debug, Clone)]
pub struct LayoutResolver<'a> {
    classifier: &'a PathClassifier,
    global_layout_id: &'a str,
}

impl<'a> LayoutResolver<'a> {
    pub fn new(classifier: &'a PathClassifier, global_layout_id: &'a str) -> Self {
        Self {
            classifier,
            global_layout_id,
        }
    }

    /// Scans every entry; each layout file registers the directory it governs
    pub fn resolve(&self, entries: &[FileEntry]) -> LayoutMap {
        let mut map = LayoutMap::default();

        for entry in entries.iter().filter(|e| self.is_layout(e)) {
            if entry.is_global {
                map.global = Some(self.global_layout_id.to_string());
                continue;
            }

            let governed = self.governed_dir(entry);
            let id = local_layout_id(&entry.base_dir, &governed);
            tracing::debug!("Layout {:?} governs '{}' as {}", entry.path, governed, id);
            map.local.insert(normalize_key(&join_relative(&entry.base_dir, &governed)), id);
        }

        map
    }

    /// Id a layout file is recorded under
    pub fn layout_id(&self, entry: &FileEntry) -> String {
        if entry.is_global {
            self.global_layout_id.to_string()
        } else {
            local_layout_id(&entry.base_dir, &self.governed_dir(entry))
        }
    }

    /// Relative directory (under the entry's base dir) a layout governs
    ///
    /// `admin/layout.tsx` and `admin/layouts/index.tsx` both govern `admin`.
    pub fn governed_dir(&self, entry: &FileEntry) -> String {
        let relative = relative_slash(&entry.path, &entry.base_dir).unwrap_or_default();
        let mut parts: Vec<&str> = relative.split('/').filter(|s| !s.is_empty()).collect();
        let file = parts.pop().unwrap_or_default();

        // `<dir>/layouts/index.tsx`: the layouts folder itself is not the subtree
        if file.to_lowercase().starts_with("index.") {
            if let Some(folder) = parts.last() {
                if self.classifier.is_layout_path(&format!("{}/{}", folder, file)) {
                    parts.pop();
                }
            }
        }

        parts.join("/")
    }

    fn is_layout(&self, entry: &FileEntry) -> bool {
        let class = self.classifier.classify(&entry.path, &entry.base_dir);
        class.is_page && class.is_layout
    }
}

/// `@@<dir-segments>-layout`, or `@@<base-dir-name>-layout` at the base root
pub fn local_layout_id(base_dir: &Path, governed: &str) -> String {
    let name = if governed.is_empty() {
        base_dir
            .file_name()
            .map(|n| n.to_string_lossy().to_lowercase())
            .unwrap_or_default()
    } else {
        governed
            .split('/')
            .filter(|s| !s.is_empty())
            .collect::<Vec<_>>()
            .join("-")
            .to_lowercase()
    };

    format!("@@{}-layout", name)
}

fn relative_dir_of(entry: &FileEntry) -> String {
    let relative = relative_slash(&entry.path, &entry.base_dir).unwrap_or_default();
    match relative.rfind('/') {
        Some(pos) => relative[..pos].to_string(),
        None => String::new(),
    }
}

fn join_relative(base: &Path, relative: &str) -> PathBuf {
    if relative.is_empty() {
        base.to_path_buf()
    } else {
        PathBuf::from(format!("{}/{}", to_slash(base).trim_end_matches('/'), relative))
    }
}
