//! Path utilities for separator normalization and route path canonical form
//!
//! All functions are pure. Filesystem paths are normalized to forward slashes
//! exactly once, when they enter the crate (scan results, watcher events,
//! cache keys); everything downstream compares slash-separated strings.

use std::borrow::Cow;
use std::path::{Path, PathBuf};

pub mod hierarchy;
pub use hierarchy::DirHierarchy;

/// Converts a filesystem path to its forward-slash form
///
/// Returns `Cow::Borrowed` when the path already uses `/` only.
///
/// # Examples
///
/// ```
/// use autoroutes::path::to_slash;
/// use std::path::Path;
///
/// assert_eq!(to_slash(Path::new("src/pages/home.tsx")), "src/pages/home.tsx");
/// assert_eq!(to_slash(Path::new("src\\pages\\home.tsx")), "src/pages/home.tsx");
/// ```
pub fn to_slash(path: &Path) -> Cow<'_, str> {
    match path.to_string_lossy() {
        Cow::Borrowed(s) if !s.contains('\\') => Cow::Borrowed(s),
        other => Cow::Owned(other.replace('\\', "/")),
    }
}

/// Normalizes a path for use as a key (cache keys, layout map keys)
///
/// Separators become `/`; repeated separators collapse; a trailing `/`
/// is dropped.
pub fn normalize_key(path: &Path) -> PathBuf {
    let slashed = to_slash(path);
    let leading = if slashed.starts_with('/') { "/" } else { "" };
    let body = slashed
        .split('/')
        .filter(|s| !s.is_empty())
        .collect::<Vec<_>>()
        .join("/");
    PathBuf::from(format!("{}{}", leading, body))
}

/// Validates if a route path is in canonical form
///
/// # Rules
///
/// - Must start with `/`
/// - Must not contain `//` or `\`
/// - Must not end with `/` (except root `/`)
///
/// # Examples
///
/// ```
/// use autoroutes::path::is_canonical_route_path;
///
/// assert!(is_canonical_route_path("/"));
/// assert!(is_canonical_route_path("/user/:id"));
///
/// assert!(!is_canonical_route_path(""));
/// assert!(!is_canonical_route_path("user"));
/// assert!(!is_canonical_route_path("/user/"));
/// assert!(!is_canonical_route_path("/user//id"));
/// ```
pub fn is_canonical_route_path(path: &str) -> bool {
    if path.is_empty() || !path.starts_with('/') {
        return false;
    }

    if path.contains("//") || path.contains('\\') {
        return false;
    }

    path == "/" || !path.ends_with('/')
}

/// Normalizes a route path to canonical form
///
/// Zero-copy when the input is already canonical.
///
/// # Examples
///
/// ```
/// use autoroutes::path::normalize_route_path;
///
/// assert_eq!(normalize_route_path("/home"), "/home");
/// assert_eq!(normalize_route_path("//docs///intro/"), "/docs/intro");
/// assert_eq!(normalize_route_path("\\user\\:id"), "/user/:id");
/// assert_eq!(normalize_route_path(""), "/");
/// ```
pub fn normalize_route_path(path: &str) -> Cow<'_, str> {
    if is_canonical_route_path(path) {
        return Cow::Borrowed(path);
    }

    let normalized = path
        .replace('\\', "/")
        .split('/')
        .filter(|s| !s.is_empty())
        .collect::<Vec<_>>()
        .join("/");

    if normalized.is_empty() {
        Cow::Borrowed("/")
    } else {
        Cow::Owned(format!("/{}", normalized))
    }
}

/// Returns `path` relative to `base` as a slash-separated string
///
/// `None` when `path` does not live under `base`.
pub fn relative_slash(path: &Path, base: &Path) -> Option<String> {
    let rel = path.strip_prefix(base).ok()?;
    Some(to_slash(rel).trim_start_matches('/').to_string())
}

/// Builds an import specifier from a directory to a file
///
/// The result always starts with `./` or `../` and uses `/` separators.
///
/// # Examples
///
/// ```
/// use autoroutes::path::relative_import;
/// use std::path::Path;
///
/// let spec = relative_import(Path::new("/app/src/router"), Path::new("/app/src/pages/home/index.tsx"));
/// assert_eq!(spec, "../pages/home/index.tsx");
///
/// let spec = relative_import(Path::new("/app/src"), Path::new("/app/src/pages/about.tsx"));
/// assert_eq!(spec, "./pages/about.tsx");
/// ```
pub fn relative_import(from_dir: &Path, to_file: &Path) -> String {
    let from = normalize_key(from_dir);
    let to = normalize_key(to_file);
    let from = to_slash(&from);
    let to = to_slash(&to);

    let from_parts: Vec<&str> = from.split('/').filter(|s| !s.is_empty()).collect();
    let to_parts: Vec<&str> = to.split('/').filter(|s| !s.is_empty()).collect();

    let common = from_parts
        .iter()
        .zip(to_parts.iter())
        .take_while(|(a, b)| a == b)
        .count();

    let up = from_parts.len() - common;
    let down = to_parts[common..].join("/");

    if up == 0 {
        format!("./{}", down)
    } else {
        format!("{}{}", "../".repeat(up), down)
    }
}
