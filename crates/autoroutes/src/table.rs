// File: src/table.rs
// Purpose: Compose classification, identity, layouts and metadata into the routing table

use crate::classify::PathClassifier;
use crate::error::{Result, RouteError};
use crate::layout::LayoutResolver;
use crate::meta::{meta_path_for, MetaLoader, PageMeta};
use crate::path::{relative_import, relative_slash};
use crate::route::{
    route_path_from_relative, route_path_from_segments, to_route_id, IdentityOptions, RouteOutput, RouteRecord,
};
use std::collections::HashMap;
use std::path::{Path, PathBuf};

/// A discovered file and the base directory it was found under
///
/// Immutable once discovered; lives for one scan.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileEntry {
    /// Absolute, slash-normalized file path
    pub path: PathBuf,
    /// Directory the file was discovered under
    pub base_dir: PathBuf,
    /// Route path prefix for this base directory
    pub base_path: String,
    /// Whether the base directory is the global layout root
    pub is_global: bool,
}

/// Settings shared by every build of one project
#[derive(Debug, Clone)]
pub struct BuildOptions {
    pub identity: IdentityOptions,
    pub global_layout_id: String,
    /// Directory of the generated module; component imports are relative to it
    pub import_dir: PathBuf,
}

/// Builds the routing table and the component table in one pass
///
/// Output order equals input order, so the same file list always yields
/// byte-identical tables.
pub struct RouteTableBuilder<'a> {
    classifier: &'a PathClassifier,
    options: &'a BuildOptions,
}

impl<'a> RouteTableBuilder<'a> {
    pub fn new(classifier: &'a PathClassifier, options: &'a BuildOptions) -> Self {
        Self { classifier, options }
    }

    /// Builds tables for `entries`, reading metadata through `meta`
    ///
    /// # Errors
    ///
    /// - [`RouteError::IdCollision`] when two files map to the same id
    /// - [`RouteError::UnknownParent`] when metadata names a `parentId`
    ///   that is not a layout record
    pub fn build(&self, entries: &[FileEntry], meta: &mut MetaLoader) -> Result<RouteOutput> {
        let resolver = LayoutResolver::new(self.classifier, &self.options.global_layout_id);
        let layouts = resolver.resolve(entries);

        let mut output = RouteOutput::default();
        let mut sources: HashMap<String, &Path> = HashMap::new();

        for entry in entries {
            let class = self.classifier.classify(&entry.path, &entry.base_dir);
            if !class.is_page {
                tracing::trace!("Skipping non-route file {:?}", entry.path);
                continue;
            }

            let Some(relative) = relative_slash(&entry.path, &entry.base_dir) else {
                tracing::warn!("{:?} is not under {:?}, skipping", entry.path, entry.base_dir);
                continue;
            };

            let page_meta = PageMeta::from_raw(meta.load(&meta_path_for(&entry.path)));

            let record = if class.is_layout {
                let governed = resolver.governed_dir(entry);
                let segments: Vec<&str> = entry.base_path.split('/').chain(governed.split('/')).collect();
                let path = route_path_from_segments(&segments, &self.options.identity);

                RouteRecord::layout(resolver.layout_id(entry), path).with_extra(page_meta.extra)
            } else {
                let path = route_path_from_relative(&relative, &entry.base_path, &self.options.identity);
                let id = to_route_id(&path);

                let parent_id = page_meta.parent_id.or_else(|| {
                    page_meta
                        .require_layout
                        .then(|| layouts.parent_for(entry).map(str::to_string))
                        .flatten()
                });

                RouteRecord::page(id, path)
                    .with_parent(parent_id)
                    .with_extra(page_meta.extra)
            };

            if let Some(first) = sources.get(&record.id) {
                return Err(RouteError::IdCollision {
                    id: record.id,
                    first: first.to_path_buf(),
                    second: entry.path.clone(),
                });
            }
            sources.insert(record.id.clone(), &entry.path);

            let component = relative_import(&self.options.import_dir, &entry.path);
            output.route_components.insert(record.id.clone(), component);
            output.routes.insert(record.id.clone(), record);
        }

        validate_parents(&output)?;

        tracing::debug!(
            "Built {} routes ({} layouts) from {} files",
            output.routes.len(),
            output.layouts().count(),
            entries.len()
        );

        Ok(output)
    }
}

/// Every `parentId` must name a layout record
fn validate_parents(output: &RouteOutput) -> Result<()> {
    for record in output.routes.values() {
        let Some(parent_id) = &record.parent_id else {
            continue;
        };

        let is_layout = output.routes.get(parent_id).map_or(false, |p| p.is_layout);
        if !is_layout {
            return Err(RouteError::UnknownParent {
                id: record.id.clone(),
                parent_id: parent_id.clone(),
            });
        }
    }

    Ok(())
}
