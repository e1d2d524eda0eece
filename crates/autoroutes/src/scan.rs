// File: src/scan.rs
// Purpose: Discover page files under the configured directories

use crate::classify::PathClassifier;
use crate::config::ResolvedDir;
use crate::path::{normalize_key, relative_slash};
use crate::table::FileEntry;
use std::path::PathBuf;
use walkdir::{DirEntry, WalkDir};

/// Files discovered under one configured directory, in discovery order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileGroup {
    pub dir: PathBuf,
    pub entries: Vec<FileEntry>,
}

/// Walks `dir`, keeping page candidates that match its pattern
///
/// Entries are sorted by file name so discovery order is stable across
/// platforms. `node_modules` and hidden entries are skipped. A missing
/// directory yields an empty group.
pub fn scan_dir(dir: &ResolvedDir, classifier: &PathClassifier) -> FileGroup {
    let base_dir = normalize_key(&dir.dir);
    let mut entries = Vec::new();

    if !base_dir.is_dir() {
        tracing::debug!("Scan directory {:?} does not exist, treating as empty", base_dir);
        return FileGroup { dir: base_dir, entries };
    }

    for entry in WalkDir::new(&base_dir)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|e| e.depth() == 0 || !is_skipped(e))
        .filter_map(|e| e.ok())
    {
        if !entry.file_type().is_file() {
            continue;
        }

        let path = normalize_key(entry.path());
        if !classifier.is_page_candidate(&path, &base_dir) {
            continue;
        }

        if let Some(pattern) = &dir.pattern {
            let relative = relative_slash(&path, &base_dir).unwrap_or_default();
            if !pattern.is_match(&relative) {
                continue;
            }
        }

        entries.push(FileEntry {
            path,
            base_dir: base_dir.clone(),
            base_path: dir.base_path.clone(),
            is_global: dir.is_global,
        });
    }

    tracing::debug!("Scanned {:?}: {} page files", base_dir, entries.len());

    FileGroup { dir: base_dir, entries }
}

/// Scans every directory in parallel, returning groups in configured order
pub fn scan_all(dirs: &[ResolvedDir], classifier: &PathClassifier) -> Vec<FileGroup> {
    if dirs.len() <= 1 {
        return dirs.iter().map(|d| scan_dir(d, classifier)).collect();
    }

    std::thread::scope(|scope| {
        let handles: Vec<_> = dirs
            .iter()
            .map(|d| (d, scope.spawn(move || scan_dir(d, classifier))))
            .collect();

        handles
            .into_iter()
            .map(|(d, handle)| {
                handle.join().unwrap_or_else(|_| {
                    tracing::warn!("Scan of {:?} panicked, treating as empty", d.dir);
                    FileGroup {
                        dir: normalize_key(&d.dir),
                        entries: Vec::new(),
                    }
                })
            })
            .collect()
    })
}

fn is_skipped(entry: &DirEntry) -> bool {
    let name = entry.file_name().to_string_lossy();
    name.starts_with('.') || name == "node_modules"
}

/// Memoized file list, owned by one generator
#[derive(Debug, Default)]
pub struct FileListCache {
    groups: Option<Vec<FileGroup>>,
}

impl FileListCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Cached groups, rescanning on a miss or when `refresh` is set
    pub fn get_or_scan(&mut self, dirs: &[ResolvedDir], classifier: &PathClassifier, refresh: bool) -> &[FileGroup] {
        if refresh || self.groups.is_none() {
            tracing::debug!("Rescanning {} directories", dirs.len());
            self.groups = Some(scan_all(dirs, classifier));
        }

        self.groups.as_deref().unwrap_or_default()
    }

    /// Flattened entries in discovery order
    pub fn entries(&self) -> Vec<FileEntry> {
        self.groups
            .iter()
            .flatten()
            .flat_map(|g| g.entries.iter().cloned())
            .collect()
    }

    pub fn is_cached(&self) -> bool {
        self.groups.is_some()
    }

    pub fn clear(&mut self) {
        self.groups = None;
    }
}
