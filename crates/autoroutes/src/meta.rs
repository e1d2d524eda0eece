//! Route metadata sidecars (`<page>.meta.json`)
//!
//! [`MetaLoader`] memoizes parsed sidecars keyed by their normalized path.
//! Loading never fails outward: unreadable or malformed files degrade to an
//! empty object.

use crate::classify::PAGE_FILE_REGEX;
use crate::path::normalize_key;
use serde_json::{Map, Value};
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

/// Raw metadata: JSON object read from a sidecar
pub type RouteMeta = Map<String, Value>;

/// Opts a route out of automatic layout parenting when `false`
pub const REQUIRE_LAYOUT_KEY: &str = "requireLayout";
/// Explicit parent supplied by metadata, never overwritten
pub const PARENT_ID_KEY: &str = "parentId";
/// Structural keys that metadata cannot override
pub const RESERVED_KEYS: &[&str] = &["id", "path", "name", "isLayout"];

/// Sidecar path for a page file: `user/$id.tsx` → `user/$id.meta.json`
pub fn meta_path_for(page: &Path) -> PathBuf {
    let slashed = crate::path::to_slash(page);
    PathBuf::from(PAGE_FILE_REGEX.replace(&slashed, ".meta.json").into_owned())
}

/// Which cache entries to drop
#[derive(Debug, Clone, Copy)]
pub enum Invalidate<'a> {
    All,
    Key(&'a Path),
    Keys(&'a [PathBuf]),
}

impl<'a> From<&'a Path> for Invalidate<'a> {
    fn from(key: &'a Path) -> Self {
        Invalidate::Key(key)
    }
}

impl<'a> From<&'a PathBuf> for Invalidate<'a> {
    fn from(key: &'a PathBuf) -> Self {
        Invalidate::Key(key.as_path())
    }
}

impl<'a> From<&'a [PathBuf]> for Invalidate<'a> {
    fn from(keys: &'a [PathBuf]) -> Self {
        Invalidate::Keys(keys)
    }
}

impl<'a> From<Option<&'a Path>> for Invalidate<'a> {
    fn from(key: Option<&'a Path>) -> Self {
        key.map_or(Invalidate::All, Invalidate::Key)
    }
}

/// Get-or-compute cache of parsed metadata
///
/// Owned by the generator; one instance per project so tests and multiple
/// projects never share entries.
#[derive(Debug, Default)]
pub struct MetaLoader {
    cache: HashMap<PathBuf, RouteMeta>,
}

impl MetaLoader {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the cached value for `key`, computing it on a miss
    pub fn get_or_insert_with<F>(&mut self, key: &Path, compute: F) -> &RouteMeta
    where
        F: FnOnce() -> RouteMeta,
    {
        self.cache.entry(normalize_key(key)).or_insert_with(compute)
    }

    /// Loads the sidecar at `meta_path`
    ///
    /// Missing sidecars yield an empty object and are not cached, so a
    /// sidecar created later is seen by the next build.
    pub fn load(&mut self, meta_path: &Path) -> RouteMeta {
        let key = normalize_key(meta_path);
        if let Some(meta) = self.cache.get(&key) {
            return meta.clone();
        }

        if !meta_path.is_file() {
            return RouteMeta::new();
        }

        self.get_or_insert_with(&key, || read_meta(meta_path)).clone()
    }

    /// Drops one entry, several entries, or everything
    pub fn invalidate<'a>(&mut self, target: impl Into<Invalidate<'a>>) {
        match target.into() {
            Invalidate::All => self.cache.clear(),
            Invalidate::Key(key) => {
                self.cache.remove(&normalize_key(key));
            }
            Invalidate::Keys(keys) => {
                for key in keys {
                    self.cache.remove(&normalize_key(key));
                }
            }
        }
    }

    pub fn contains(&self, key: &Path) -> bool {
        self.cache.contains_key(&normalize_key(key))
    }

    pub fn len(&self) -> usize {
        self.cache.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cache.is_empty()
    }
}

fn read_meta(meta_path: &Path) -> RouteMeta {
    let content = match fs::read_to_string(meta_path) {
        Ok(content) => content,
        Err(e) => {
            tracing::warn!("Failed to read route meta {:?}: {}", meta_path, e);
            return RouteMeta::new();
        }
    };

    match serde_json::from_str::<Value>(&content) {
        Ok(Value::Object(map)) => map,
        Ok(other) => {
            tracing::warn!(
                "Route meta {:?} is not a JSON object (got {}), ignoring",
                meta_path,
                json_kind(&other)
            );
            RouteMeta::new()
        }
        Err(e) => {
            tracing::warn!("Malformed route meta {:?}: {}", meta_path, e);
            RouteMeta::new()
        }
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// Metadata split into the keys the builder consumes and the rest
///
/// - `requireLayout` (boolean, default `true`) is consumed and never emitted
/// - `parentId` (string) is lifted out; it wins over automatic parenting
/// - `id`, `path`, `name`, `isLayout` are structural and dropped
/// - everything else passes through in `extra`, in sidecar order
#[derive(Debug, Clone, PartialEq)]
pub struct PageMeta {
    pub require_layout: bool,
    pub parent_id: Option<String>,
    pub extra: RouteMeta,
}

impl Default for PageMeta {
    fn default() -> Self {
        Self {
            require_layout: true,
            parent_id: None,
            extra: RouteMeta::new(),
        }
    }
}

impl PageMeta {
    pub fn from_raw(mut raw: RouteMeta) -> Self {
        let require_layout = match raw.remove(REQUIRE_LAYOUT_KEY) {
            None => true,
            Some(Value::Bool(b)) => b,
            Some(other) => {
                tracing::warn!("requireLayout must be a boolean, got {}; treating as true", other);
                true
            }
        };

        let parent_id = match raw.remove(PARENT_ID_KEY) {
            None | Some(Value::Null) => None,
            Some(Value::String(s)) => Some(s),
            Some(other) => {
                tracing::warn!("parentId must be a string, got {}; ignoring", other);
                None
            }
        };

        for key in RESERVED_KEYS {
            if raw.remove(*key).is_some() {
                tracing::debug!("Ignoring reserved key '{}' in route meta", key);
            }
        }

        Self {
            require_layout,
            parent_id,
            extra: raw,
        }
    }
}
