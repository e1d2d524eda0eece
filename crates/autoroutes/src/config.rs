// File: src/config.rs
// Purpose: Configuration parsing from autoroutes.toml

use crate::classify::{PathClassifier, DEFAULT_IGNORED_FILES, DEFAULT_IGNORED_FOLDERS, DEFAULT_LAYOUT_MARKER};
use crate::debounce::DEFAULT_DEBOUNCE_MS;
use crate::error::ConfigError;
use crate::layout::DEFAULT_GLOBAL_LAYOUT_ID;
use crate::path::normalize_key;
use crate::route::{IdentityOptions, DEFAULT_DYNAMIC_MARKER};
use crate::table::BuildOptions;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Default config file name, looked up in the project root
pub const DEFAULT_CONFIG_FILE: &str = "autoroutes.toml";

/// Project configuration
///
/// ```toml
/// router_dir = "src/router"
/// mode = "hash"
/// index_path = "/home"
///
/// [[dirs]]
/// dir = "src/pages"
///
/// [[dirs]]
/// dir = "src/docs"
/// base_path = "/docs"
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Directory receiving the generated routes module and router component
    #[serde(default = "default_router_dir")]
    pub router_dir: String,

    /// Only write the routes module, never the router component
    #[serde(default = "default_false")]
    pub only_routes: bool,

    #[serde(default)]
    pub mode: RoutingMode,

    /// Redirect target for unmatched paths
    #[serde(default = "default_index_path")]
    pub index_path: String,

    /// Emit `.tsx`; detected from `tsconfig.json` when unset
    #[serde(default)]
    pub typescript: Option<bool>,

    #[serde(default = "default_ignored_folders")]
    pub ignored_folders: Vec<String>,

    #[serde(default = "default_ignored_files")]
    pub ignored_files: Vec<String>,

    #[serde(default = "default_layout_marker")]
    pub layout_marker: String,

    #[serde(default = "default_dynamic_marker")]
    pub dynamic_marker: String,

    #[serde(default = "default_global_layout_id")]
    pub global_layout_id: String,

    #[serde(default = "default_debounce_ms")]
    pub debounce_ms: u64,

    #[serde(default = "default_true")]
    pub kebab_case: bool,

    #[serde(default = "default_dirs")]
    pub dirs: Vec<DirConfig>,
}

/// One scanned directory
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DirConfig {
    /// Absolute, or relative to the project root
    pub dir: String,

    /// Route path prefix for files in this directory
    #[serde(default)]
    pub base_path: String,

    /// Regex a file's path (relative to `dir`) must match
    #[serde(default)]
    pub pattern: Option<String>,

    /// Layouts here are the global layout
    #[serde(default = "default_false")]
    pub is_global: bool,
}

/// History flavor of the generated router component
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RoutingMode {
    #[default]
    Browser,
    Hash,
}

impl RoutingMode {
    /// `react-router-dom` component name
    pub fn router_component(&self) -> &'static str {
        match self {
            RoutingMode::Browser => "BrowserRouter",
            RoutingMode::Hash => "HashRouter",
        }
    }
}

impl fmt::Display for RoutingMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RoutingMode::Browser => f.write_str("browser"),
            RoutingMode::Hash => f.write_str("hash"),
        }
    }
}

// Default values
fn default_router_dir() -> String {
    "src/router".to_string()
}

fn default_index_path() -> String {
    "/index".to_string()
}

fn default_ignored_folders() -> Vec<String> {
    DEFAULT_IGNORED_FOLDERS.iter().map(|s| s.to_string()).collect()
}

fn default_ignored_files() -> Vec<String> {
    DEFAULT_IGNORED_FILES.iter().map(|s| s.to_string()).collect()
}

fn default_layout_marker() -> String {
    DEFAULT_LAYOUT_MARKER.to_string()
}

fn default_dynamic_marker() -> String {
    DEFAULT_DYNAMIC_MARKER.to_string()
}

fn default_global_layout_id() -> String {
    DEFAULT_GLOBAL_LAYOUT_ID.to_string()
}

fn default_debounce_ms() -> u64 {
    DEFAULT_DEBOUNCE_MS
}

fn default_dirs() -> Vec<DirConfig> {
    vec![
        DirConfig {
            dir: "src/pages".to_string(),
            base_path: String::new(),
            pattern: None,
            is_global: false,
        },
        DirConfig {
            dir: "src/layouts".to_string(),
            base_path: String::new(),
            pattern: Some(r"^index\.(jsx?|tsx?)$".to_string()),
            is_global: true,
        },
    ]
}

fn default_true() -> bool {
    true
}

fn default_false() -> bool {
    false
}

impl Default for Config {
    fn default() -> Self {
        Self {
            router_dir: default_router_dir(),
            only_routes: false,
            mode: RoutingMode::default(),
            index_path: default_index_path(),
            typescript: None,
            ignored_folders: default_ignored_folders(),
            ignored_files: default_ignored_files(),
            layout_marker: default_layout_marker(),
            dynamic_marker: default_dynamic_marker(),
            global_layout_id: default_global_layout_id(),
            debounce_ms: default_debounce_ms(),
            kebab_case: true,
            dirs: default_dirs(),
        }
    }
}

impl Config {
    /// Load configuration from autoroutes.toml
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();

        // If file doesn't exist or is empty, return default config
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;

        if content.trim().is_empty() {
            return Ok(Self::default());
        }

        toml::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Validates the configuration and anchors relative paths at `context`
    ///
    /// Without a context every configured directory must be absolute.
    pub fn resolve(&self, context: Option<&Path>) -> Result<ResolvedConfig, ConfigError> {
        let root = context.map(normalize_key);
        let anchor = |raw: &str| -> Result<PathBuf, ConfigError> {
            let path = Path::new(raw);
            if path.is_absolute() {
                return Ok(normalize_key(path));
            }
            match &root {
                Some(root) => Ok(normalize_key(&root.join(path))),
                None => Err(ConfigError::RelativeEntryWithoutContext(path.to_path_buf())),
            }
        };

        let mut markers = self.dynamic_marker.chars();
        let dynamic_marker = match (markers.next(), markers.next()) {
            (Some(c), None) if c != '/' && c != '\\' && !c.is_whitespace() => c,
            _ => return Err(ConfigError::InvalidDynamicMarker(self.dynamic_marker.clone())),
        };

        let global_layout_id = self.global_layout_id.trim();
        if global_layout_id.is_empty() {
            return Err(ConfigError::EmptyGlobalLayoutId);
        }

        let classifier = PathClassifier::new(&self.ignored_folders, &self.ignored_files, &self.layout_marker)?;

        let dirs = self
            .dirs
            .iter()
            .map(|d| {
                let pattern = d
                    .pattern
                    .as_deref()
                    .map(|p| {
                        Regex::new(p).map_err(|source| ConfigError::InvalidPattern {
                            pattern: p.to_string(),
                            source,
                        })
                    })
                    .transpose()?;

                Ok(ResolvedDir {
                    dir: anchor(&d.dir)?,
                    base_path: d.base_path.clone(),
                    pattern,
                    is_global: d.is_global,
                })
            })
            .collect::<Result<Vec<_>, ConfigError>>()?;

        let router_dir = anchor(&self.router_dir)?;

        let typescript = match self.typescript {
            Some(explicit) => explicit,
            None => root.as_ref().map_or(false, |r| r.join("tsconfig.json").is_file()),
        };

        Ok(ResolvedConfig {
            root,
            dirs,
            only_routes: self.only_routes,
            mode: self.mode,
            index_path: self.index_path.clone(),
            typescript,
            classifier,
            build: BuildOptions {
                identity: IdentityOptions {
                    dynamic_marker,
                    kebab_case: self.kebab_case,
                },
                global_layout_id: global_layout_id.to_string(),
                import_dir: router_dir.clone(),
            },
            router_dir,
            debounce: Duration::from_millis(self.debounce_ms),
        })
    }
}

/// A scanned directory with its path made absolute
#[derive(Debug, Clone)]
pub struct ResolvedDir {
    pub dir: PathBuf,
    pub base_path: String,
    pub pattern: Option<Regex>,
    pub is_global: bool,
}

/// Validated configuration with absolute paths
#[derive(Debug, Clone)]
pub struct ResolvedConfig {
    pub root: Option<PathBuf>,
    pub dirs: Vec<ResolvedDir>,
    pub router_dir: PathBuf,
    pub only_routes: bool,
    pub mode: RoutingMode,
    pub index_path: String,
    pub typescript: bool,
    pub classifier: PathClassifier,
    pub build: BuildOptions,
    pub debounce: Duration,
}

impl ResolvedConfig {
    /// Extension of generated files
    pub fn extension(&self) -> &'static str {
        if self.typescript {
            "tsx"
        } else {
            "jsx"
        }
    }

    /// Path of the generated routes module
    pub fn routes_module_path(&self) -> PathBuf {
        self.router_dir.join(format!("routes.{}", self.extension()))
    }

    /// Path the router component is generated at
    pub fn router_component_path(&self) -> PathBuf {
        self.router_dir.join(format!("index.{}", self.extension()))
    }

    /// An existing router entry in any flavor; user-owned, never overwritten
    pub fn existing_router_component(&self) -> Option<PathBuf> {
        ["tsx", "jsx", "js", "ts"]
            .iter()
            .map(|ext| self.router_dir.join(format!("index.{}", ext)))
            .find(|p| p.is_file())
    }
}
