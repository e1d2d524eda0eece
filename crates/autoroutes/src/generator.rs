// File: src/generator.rs
// Purpose: Own the caches and drive scan → build → render → write

use crate::change::{ChangeClassifier, FsEvent, UpdateKind, WatchFilter};
use crate::classify;
use crate::config::{Config, ResolvedConfig, ResolvedDir};
use crate::emit::{render_router_component, render_routes_module};
use crate::error::Result;
use crate::meta::{Invalidate, MetaLoader};
use crate::path::{normalize_key, relative_slash};
use crate::route::RouteOutput;
use crate::scan::FileListCache;
use crate::table::{FileEntry, RouteTableBuilder};
use crate::writer::{write_if_changed, WriteOutcome};
use std::path::{Path, PathBuf};

/// What one `generate` call wrote
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerateReport {
    pub routes_module: PathBuf,
    pub routes_outcome: WriteOutcome,
    /// `None` when the router component is disabled or user-owned
    pub router_outcome: Option<WriteOutcome>,
    pub route_count: usize,
}

/// Route generation for one project
///
/// Holds the file-list and metadata caches for the lifetime of the
/// process; nothing is shared between generators.
#[derive(Debug)]
pub struct RouteGenerator {
    config: ResolvedConfig,
    meta: MetaLoader,
    files: FileListCache,
    changes: ChangeClassifier,
}

impl RouteGenerator {
    pub fn new(config: ResolvedConfig) -> Self {
        Self {
            config,
            meta: MetaLoader::new(),
            files: FileListCache::new(),
            changes: ChangeClassifier::new(),
        }
    }

    /// Resolves `config` against `context` and builds a generator
    pub fn from_config(config: &Config, context: Option<&Path>) -> Result<Self> {
        Ok(Self::new(config.resolve(context)?))
    }

    pub fn config(&self) -> &ResolvedConfig {
        &self.config
    }

    /// Builds the route and component tables
    ///
    /// `FileListChange` forces a rescan; any other signal reuses the
    /// cached file list when there is one.
    pub fn build(&mut self, update: Option<UpdateKind>) -> Result<RouteOutput> {
        let refresh = update == Some(UpdateKind::FileListChange);
        let entries: Vec<FileEntry> = self
            .files
            .get_or_scan(&self.config.dirs, &self.config.classifier, refresh)
            .iter()
            .flat_map(|g| g.entries.iter().cloned())
            .collect();

        RouteTableBuilder::new(&self.config.classifier, &self.config.build).build(&entries, &mut self.meta)
    }

    /// Builds and renders the routes module
    pub fn render(&mut self, update: Option<UpdateKind>) -> Result<String> {
        let output = self.build(update)?;
        render_routes_module(&output)
    }

    /// Builds, renders and writes the routes module and router component
    pub fn generate(&mut self, update: Option<UpdateKind>) -> Result<GenerateReport> {
        let output = self.build(update)?;
        let module = render_routes_module(&output)?;

        let routes_module = self.config.routes_module_path();
        let routes_outcome = write_if_changed(&routes_module, &module)?;

        let router_outcome = if self.config.only_routes {
            None
        } else if let Some(existing) = self.config.existing_router_component() {
            tracing::debug!("Router component {:?} exists, leaving it alone", existing);
            None
        } else {
            let content = render_router_component(self.config.mode, &self.config.index_path, self.config.typescript);
            Some(write_if_changed(&self.config.router_component_path(), &content)?)
        };

        Ok(GenerateReport {
            routes_module,
            routes_outcome,
            router_outcome,
            route_count: output.pages().count(),
        })
    }

    /// Classifies a debounced burst and invalidates stale metadata
    ///
    /// Returns the signal for the next build, or `None` when the burst
    /// does not affect the routing table.
    pub fn handle_burst(&mut self, events: &[FsEvent]) -> Option<UpdateKind> {
        let outcome = self.changes.classify_burst(&*self, events);

        if !outcome.stale_meta.is_empty() {
            tracing::debug!("Invalidating {} metadata entries", outcome.stale_meta.len());
            self.meta.invalidate(outcome.stale_meta.as_slice());
        }

        if let Some(update) = outcome.update {
            tracing::debug!("Burst of {} events classified as {}", events.len(), update);
        }

        outcome.update
    }

    /// Drops one, several or all cached metadata entries
    pub fn clear_meta_cache<'a>(&mut self, target: impl Into<Invalidate<'a>>) {
        self.meta.invalidate(target);
    }

    /// Forgets the cached file list
    pub fn clear_file_cache(&mut self) {
        self.files.clear();
    }

    /// Directories the generator reads from; what a watcher should watch
    pub fn watch_dirs(&self) -> impl Iterator<Item = &Path> {
        self.config.dirs.iter().map(|d| d.dir.as_path())
    }

    fn dir_of(&self, path: &Path) -> Option<&ResolvedDir> {
        self.config.dirs.iter().find(|d| path.starts_with(&d.dir))
    }
}

impl WatchFilter for RouteGenerator {
    fn is_watch_file(&self, path: &Path) -> bool {
        let path = normalize_key(path);
        let Some(dir) = self.dir_of(&path) else {
            return false;
        };

        if !self.config.classifier.is_page_candidate(&path, &dir.dir) {
            return false;
        }

        match &dir.pattern {
            Some(pattern) => relative_slash(&path, &dir.dir).map_or(false, |rel| pattern.is_match(&rel)),
            None => true,
        }
    }

    fn is_meta_file(&self, path: &Path) -> bool {
        let path = normalize_key(path);
        self.dir_of(&path).is_some() && classify::is_meta_file(&path.to_string_lossy())
    }

    /// Existing directory, or an extension-less path that is gone
    fn is_watch_dir(&self, path: &Path) -> bool {
        let path = normalize_key(path);
        let Some(dir) = self.dir_of(&path) else {
            return false;
        };

        let looks_like_dir = if path.exists() {
            path.is_dir()
        } else {
            path.extension().is_none()
        };
        if !looks_like_dir {
            return false;
        }

        let Some(relative) = relative_slash(&path, &dir.dir) else {
            return false;
        };
        let hidden = relative.split('/').any(|s| s.starts_with('.'));

        !hidden && !self.config.classifier.is_ignored(&format!("{}/", relative))
    }
}
