//! Route path and route id derivation
//!
//! Pure functions mapping a file location to its canonical route path and
//! identifier.
//!
//! | file (under base dir)   | route path    | route id        |
//! |-------------------------|---------------|-----------------|
//! | `index.tsx`             | `/`           | `index`         |
//! | `home/index.tsx`        | `/home`       | `home`          |
//! | `user/$id.tsx`          | `/user/:id`   | `user-:id`      |
//! | `userProfile/edit.jsx`  | `/user-profile/edit` | `user-profile-edit` |

use crate::classify::PAGE_FILE_REGEX;
use once_cell::sync::Lazy;
use regex::Regex;
use std::path::Path;

/// Id of the root route. Empty ids are never produced.
pub const ROOT_ROUTE_ID: &str = "index";

/// Default dynamic segment marker (`$id` → `:id`)
pub const DEFAULT_DYNAMIC_MARKER: char = '$';

static CAMEL_BOUNDARY: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"([a-z])([A-Z])").expect("static regex"));

/// Knobs for route path derivation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IdentityOptions {
    /// Leading character marking a dynamic segment
    pub dynamic_marker: char,
    /// Convert camelCase static segments to kebab-case
    pub kebab_case: bool,
}

impl Default for IdentityOptions {
    fn default() -> Self {
        Self {
            dynamic_marker: DEFAULT_DYNAMIC_MARKER,
            kebab_case: true,
        }
    }
}

/// Derives the route path of `file`, discovered under `base_dir`
///
/// Returns `None` when `file` does not live under `base_dir`.
///
/// # Examples
///
/// ```
/// use autoroutes::route::{to_route_path, IdentityOptions};
/// use std::path::Path;
///
/// let opts = IdentityOptions::default();
/// let base = Path::new("/app/src/pages");
///
/// let path = to_route_path(Path::new("/app/src/pages/user/$id.tsx"), base, "", &opts);
/// assert_eq!(path.as_deref(), Some("/user/:id"));
///
/// let path = to_route_path(Path::new("/app/src/pages/index.tsx"), base, "docs", &opts);
/// assert_eq!(path.as_deref(), Some("/docs"));
/// ```
pub fn to_route_path(file: &Path, base_dir: &Path, prefix: &str, opts: &IdentityOptions) -> Option<String> {
    let relative = crate::path::relative_slash(file, base_dir)?;
    Some(route_path_from_relative(&relative, prefix, opts))
}

/// Derives a route path from a slash-separated path relative to its base dir
///
/// Strips the extension and a trailing `index` segment, rewrites dynamic
/// segments, lowercases, collapses repeated slashes and prepends `prefix`.
pub fn route_path_from_relative(relative: &str, prefix: &str, opts: &IdentityOptions) -> String {
    let without_ext = PAGE_FILE_REGEX.replace(relative, "");

    let mut segments: Vec<&str> = prefix
        .split(['/', '\\'])
        .chain(without_ext.split(['/', '\\']))
        .filter(|s| !s.is_empty())
        .collect();

    if segments.last() == Some(&"index") {
        segments.pop();
    }

    route_path_from_segments(&segments, opts)
}

/// Joins already-split segments into a canonical route path
pub fn route_path_from_segments<S: AsRef<str>>(segments: &[S], opts: &IdentityOptions) -> String {
    let normalized: Vec<String> = segments
        .iter()
        .map(|s| s.as_ref())
        .filter(|s| !s.is_empty())
        .map(|s| normalize_segment(s, opts))
        .collect();

    if normalized.is_empty() {
        "/".to_string()
    } else {
        format!("/{}", normalized.join("/"))
    }
}

/// Normalizes one segment
///
/// A segment starting with the dynamic marker becomes a `:param`; only
/// that first marker is rewritten. Static segments are kebab-cased (when
/// enabled) and lowercased; parameter names are only lowercased.
pub fn normalize_segment(segment: &str, opts: &IdentityOptions) -> String {
    match segment.strip_prefix(opts.dynamic_marker) {
        Some(param) => format!(":{}", param.to_lowercase()),
        None if opts.kebab_case => CAMEL_BOUNDARY.replace_all(segment, "$1-$2").to_lowercase(),
        None => segment.to_lowercase(),
    }
}

/// Derives the route id from a route path
///
/// Separators become `-`, the leading separator is dropped, and the root
/// path maps to [`ROOT_ROUTE_ID`].
///
/// # Examples
///
/// ```
/// use autoroutes::route::to_route_id;
///
/// assert_eq!(to_route_id("/home"), "home");
/// assert_eq!(to_route_id("/user/:id"), "user-:id");
/// assert_eq!(to_route_id("/"), "index");
/// ```
pub fn to_route_id(route_path: &str) -> String {
    let id = route_path
        .split('/')
        .filter(|s| !s.is_empty())
        .collect::<Vec<_>>()
        .join("-");

    if id.is_empty() {
        ROOT_ROUTE_ID.to_string()
    } else {
        id
    }
}

/// True when the route path contains a dynamic parameter
pub fn is_dynamic(route_path: &str) -> bool {
    route_path.split('/').any(|s| s.starts_with(':'))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn path(rel: &str) -> String {
        route_path_from_relative(rel, "", &IdentityOptions::default())
    }

    #[rstest]
    #[case("index.tsx", "/")]
    #[case("home/index.tsx", "/home")]
    #[case("about.jsx", "/about")]
    #[case("user/$id.tsx", "/user/:id")]
    #[case("Blog/Posts.ts", "/blog/posts")]
    #[case("userProfile/editName.js", "/user-profile/edit-name")]
    #[case("shop/$productId/index.tsx", "/shop/:productid")]
    #[case("a//b///c.tsx", "/a/b/c")]
    fn test_route_path_from_relative(#[case] rel: &str, #[case] expected: &str) {
        assert_eq!(path(rel), expected);
    }

    #[test]
    fn test_prefix_is_prepended() {
        let opts = IdentityOptions::default();
        assert_eq!(route_path_from_relative("home.tsx", "/docs/", &opts), "/docs/home");
        assert_eq!(route_path_from_relative("index.tsx", "docs", &opts), "/docs");
        assert_eq!(route_path_from_relative("home.tsx", "//", &opts), "/home");
    }

    #[test]
    fn test_only_first_marker_is_rewritten() {
        assert_eq!(path("$$id.tsx"), "/:$id");
        assert_eq!(path("price$.tsx"), "/price$");
    }

    #[test]
    fn test_kebab_case_can_be_disabled() {
        let opts = IdentityOptions {
            kebab_case: false,
            ..IdentityOptions::default()
        };
        assert_eq!(route_path_from_relative("userProfile.tsx", "", &opts), "/userprofile");
    }

    #[test]
    fn test_custom_dynamic_marker() {
        let opts = IdentityOptions {
            dynamic_marker: '_',
            ..IdentityOptions::default()
        };
        assert_eq!(route_path_from_relative("user/_id.tsx", "", &opts), "/user/:id");
        assert_eq!(route_path_from_relative("user/$id.tsx", "", &opts), "/user/$id");
    }

    #[test]
    fn test_route_paths_are_canonical() {
        for rel in ["index.tsx", "A/B/index.tsx", "x//y/", "$a/$b.tsx", "Deep/NestedPath/Page.tsx"] {
            let p = path(rel);
            assert!(crate::path::is_canonical_route_path(&p), "{} -> {}", rel, p);
            assert_eq!(p, p.to_lowercase());
        }
    }

    #[test]
    fn test_route_id() {
        assert_eq!(to_route_id("/"), ROOT_ROUTE_ID);
        assert_eq!(to_route_id(""), ROOT_ROUTE_ID);
        assert_eq!(to_route_id("/docs/intro"), "docs-intro");
        assert_eq!(to_route_id("/user/:id"), "user-:id");
    }

    #[test]
    fn test_is_dynamic() {
        assert!(is_dynamic("/user/:id"));
        assert!(!is_dynamic("/user/id"));
    }
}
