// File: src/change.rs
// Purpose: Decide what a filesystem event means for the routing table

use crate::path::normalize_key;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};

/// Kind of a raw filesystem event
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FsEventKind {
    Add,
    Unlink,
    Change,
}

impl fmt::Display for FsEventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            FsEventKind::Add => "add",
            FsEventKind::Unlink => "unlink",
            FsEventKind::Change => "change",
        };
        f.write_str(s)
    }
}

/// A filesystem event with its path normalized at ingestion
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FsEvent {
    pub kind: FsEventKind,
    pub path: PathBuf,
}

impl FsEvent {
    pub fn new(kind: FsEventKind, path: impl AsRef<Path>) -> Self {
        Self {
            kind,
            path: normalize_key(path.as_ref()),
        }
    }

    pub fn add(path: impl AsRef<Path>) -> Self {
        Self::new(FsEventKind::Add, path)
    }

    pub fn unlink(path: impl AsRef<Path>) -> Self {
        Self::new(FsEventKind::Unlink, path)
    }

    pub fn change(path: impl AsRef<Path>) -> Self {
        Self::new(FsEventKind::Change, path)
    }
}

/// What the next build must refresh
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum UpdateKind {
    /// Metadata changed; rebuild from the cached file list
    FileMetaChange,
    /// Files appeared or vanished; rescan before building
    FileListChange,
}

impl UpdateKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            UpdateKind::FileListChange => "fileListChange",
            UpdateKind::FileMetaChange => "fileMetaChange",
        }
    }

    /// Stronger of two signals; a rescan also covers a metadata reload
    pub fn merge(self, other: UpdateKind) -> UpdateKind {
        self.max(other)
    }
}

impl fmt::Display for UpdateKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Outcome of classifying one event
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Classification {
    /// The file list is stale
    FileList,
    /// One metadata entry is stale
    FileMeta(PathBuf),
}

impl Classification {
    pub fn update_kind(&self) -> UpdateKind {
        match self {
            Classification::FileList => UpdateKind::FileListChange,
            Classification::FileMeta(_) => UpdateKind::FileMetaChange,
        }
    }
}

/// Predicates deciding which paths are worth reacting to
pub trait WatchFilter {
    /// Source file inside one of the scanned directories
    fn is_watch_file(&self, path: &Path) -> bool;

    /// Metadata sidecar inside one of the scanned directories
    fn is_meta_file(&self, path: &Path) -> bool;

    /// Directory inside (or equal to) one of the scanned directories
    ///
    /// Watchers report a moved or deleted directory once, by its own path,
    /// without events for the files it held.
    fn is_watch_dir(&self, _path: &Path) -> bool {
        false
    }
}

/// Signal produced for a whole debounced burst
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BurstOutcome {
    pub update: Option<UpdateKind>,
    /// Metadata entries to drop from the cache before the next build
    pub stale_meta: Vec<PathBuf>,
}

impl BurstOutcome {
    pub fn is_noop(&self) -> bool {
        self.update.is_none()
    }
}

/// Maps filesystem events to update signals
///
/// | event            | source file        | meta file          |
/// |------------------|--------------------|--------------------|
/// | `add`            | `fileListChange`   | no-op              |
/// | `unlink`         | `fileListChange`   | `fileMetaChange`   |
/// | `change`         | no-op              | `fileMetaChange`   |
///
/// `add` or `unlink` of a watched directory is a `fileListChange`.
/// Paths matching none of the predicates are ignored.
#[derive(Debug, Clone, Copy, Default)]
pub struct ChangeClassifier;

impl ChangeClassifier {
    pub fn new() -> Self {
        Self
    }

    pub fn classify<F: WatchFilter + ?Sized>(&self, filter: &F, event: &FsEvent) -> Option<Classification> {
        if filter.is_meta_file(&event.path) {
            return match event.kind {
                FsEventKind::Change | FsEventKind::Unlink => Some(Classification::FileMeta(event.path.clone())),
                FsEventKind::Add => None,
            };
        }

        if filter.is_watch_file(&event.path) {
            return match event.kind {
                FsEventKind::Add | FsEventKind::Unlink => Some(Classification::FileList),
                FsEventKind::Change => None,
            };
        }

        if event.kind != FsEventKind::Change && filter.is_watch_dir(&event.path) {
            return Some(Classification::FileList);
        }

        None
    }

    /// Classifies events one at a time, in order, and folds them into one signal
    pub fn classify_burst<'e, F, I>(&self, filter: &F, events: I) -> BurstOutcome
    where
        F: WatchFilter + ?Sized,
        I: IntoIterator<Item = &'e FsEvent>,
    {
        let mut outcome = BurstOutcome::default();

        for event in events {
            let Some(class) = self.classify(filter, event) else {
                tracing::trace!("Ignoring {} {:?}", event.kind, event.path);
                continue;
            };

            let kind = class.update_kind();
            outcome.update = Some(outcome.update.map_or(kind, |current| current.merge(kind)));

            if let Classification::FileMeta(path) = class {
                if !outcome.stale_meta.contains(&path) {
                    outcome.stale_meta.push(path);
                }
            }
        }

        outcome
    }
}
