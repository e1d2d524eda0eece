//! # autoroutes
//!
//! File-convention route generation for React Router projects.
//!
//! Page files under configured directories become an ordered routing
//! table plus a parallel table of lazily imported components:
//!
//! - Static routes: `pages/about.tsx` → `/about`
//! - Dynamic segments: `pages/user/$id.tsx` → `/user/:id`
//! - Index files: `pages/home/index.tsx` → `/home`, root `index.tsx` → `/` (id `index`)
//! - Layouts: `layout.tsx` or `layouts/index.tsx` wrap every page of their
//!   directory subtree; `src/layouts/index.tsx` is the global layout
//! - Metadata sidecars: `user/$id.meta.json` adds fields to a route and can
//!   opt out of layouts with `"requireLayout": false`
//!
//! ## Pipeline
//!
//! ```text
//! scan ─► PathClassifier ─► RouteIdentity / LayoutResolver (+ MetaLoader) ─► RouteTableBuilder ─► emit ─► writer
//!                                                   ▲
//!                 filesystem events ─► Debouncer ─► ChangeClassifier
//! ```
//!
//! ## Example
//!
//! ```no_run
//! use autoroutes::{Config, RouteGenerator};
//! use std::path::Path;
//!
//! let config = Config::load("autoroutes.toml")?;
//! let mut generator = RouteGenerator::from_config(&config, Some(Path::new(".")))?;
//!
//! let report = generator.generate(None)?;
//! println!("{} routes written to {:?}", report.route_count, report.routes_module);
//! # Ok::<(), autoroutes::RouteError>(())
//! ```

pub mod change;
pub mod classify;
pub mod config;
pub mod debounce;
pub mod emit;
pub mod error;
pub mod generator;
pub mod layout;
pub mod meta;
pub mod path;
pub mod route;
pub mod scan;
pub mod table;
pub mod writer;

pub use change::{BurstOutcome, ChangeClassifier, Classification, FsEvent, FsEventKind, UpdateKind, WatchFilter};
pub use classify::{FileClass, PathClassifier};
pub use config::{Config, DirConfig, ResolvedConfig, ResolvedDir, RoutingMode, DEFAULT_CONFIG_FILE};
pub use debounce::Debouncer;
pub use error::{ConfigError, Result, RouteError};
pub use generator::{GenerateReport, RouteGenerator};
pub use layout::{LayoutMap, LayoutResolver, DEFAULT_GLOBAL_LAYOUT_ID};
pub use meta::{Invalidate, MetaLoader, PageMeta, RouteMeta};
pub use route::{ComponentTable, IdentityOptions, RouteOutput, RouteRecord, RouteTable, ROOT_ROUTE_ID};
pub use scan::{FileGroup, FileListCache};
pub use table::{BuildOptions, FileEntry, RouteTableBuilder};
pub use writer::{write_if_changed, WriteOutcome};
