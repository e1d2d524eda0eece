// File: src/error.rs
// Purpose: Typed failures surfaced by route generation

use std::path::PathBuf;

/// Errors that abort a build.
///
/// Metadata parse failures and missing scan directories are absorbed where
/// they happen and never show up here.
#[derive(Debug, thiserror::Error)]
pub enum RouteError {
    /// Two files normalized to the same route id
    #[error("route id collision on '{id}': {} and {} map to the same route", .first.display(), .second.display())]
    IdCollision {
        id: String,
        first: PathBuf,
        second: PathBuf,
    },

    /// A `parentId` supplied through metadata names no layout record
    #[error("route '{id}' declares parentId '{parent_id}', which is not a layout route")]
    UnknownParent { id: String, parent_id: String },

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("failed to serialize route table: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("I/O error at {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Invalid configuration, fatal at startup
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("dir '{}' is relative and no context directory was given to resolve it", .0.display())]
    RelativeEntryWithoutContext(PathBuf),

    #[error("{0} must list at least one fragment")]
    EmptyIgnoreRules(&'static str),

    #[error("ignore fragments must not be empty (in {0})")]
    EmptyIgnoreFragment(&'static str),

    #[error("invalid pattern '{pattern}': {source}")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: regex::Error,
    },

    #[error("dynamic segment marker '{0}' must be a single character other than '/' or '\\'")]
    InvalidDynamicMarker(String),

    #[error("global layout id must not be empty")]
    EmptyGlobalLayoutId,

    #[error("layout marker must not be empty")]
    EmptyLayoutMarker,

    #[error("failed to read config file {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config file {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

pub type Result<T, E = RouteError> = std::result::Result<T, E>;
