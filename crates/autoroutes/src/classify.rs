// File: src/classify.rs
// Purpose: Pure predicates deciding what a discovered file is

use crate::error::ConfigError;
use once_cell::sync::Lazy;
use regex::Regex;
use std::path::Path;

/// Accepted source extensions: js, jsx, ts, tsx
pub static PAGE_FILE_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\.(jsx?|tsx?)$").expect("static regex"));

/// Type declaration files are never pages
pub static TYPE_FILE_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"\.d\.ts$").expect("static regex"));

/// Route metadata sidecars
pub static META_FILE_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\.meta\.json$").expect("static regex"));

/// Default folder fragments that never hold routes
pub const DEFAULT_IGNORED_FOLDERS: &[&str] = &[
    "components",
    "service",
    "util",
    "assets",
    "styles",
    "types",
    "hooks",
    "interfaces",
    "api",
    "constants",
    "models",
];

/// Default file-stem suffixes that never hold routes
pub const DEFAULT_IGNORED_FILES: &[&str] = &[
    "const",
    "service",
    "services",
    "utils",
    "assets",
    "styles",
    "types",
    "hooks",
    "interfaces",
    "api",
    "constants",
    "models",
];

/// Default layout marker (`layout.tsx`, `layouts/index.tsx`)
pub const DEFAULT_LAYOUT_MARKER: &str = "layout";

/// Classification of a single path
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FileClass {
    /// Source file with an accepted extension that is not ignored
    pub is_page: bool,
    /// Page file following the layout convention
    pub is_layout: bool,
    /// `*.meta.json` sidecar
    pub is_meta: bool,
    /// Matched an ignored folder or file fragment
    pub is_ignored: bool,
}

/// Classifies paths as page, layout, meta or ignored
///
/// Ignore rules apply to the path relative to the scanned base directory,
/// so a project living under e.g. `/home/me/components-lab/` is not
/// swallowed by the `components` fragment.
///
/// # Examples
///
/// ```
/// use autoroutes::classify::PathClassifier;
/// use std::path::Path;
///
/// let classifier = PathClassifier::default();
/// let base = Path::new("/app/src/pages");
///
/// let class = classifier.classify(Path::new("/app/src/pages/user/$id.tsx"), base);
/// assert!(class.is_page && !class.is_layout);
///
/// let class = classifier.classify(Path::new("/app/src/pages/components/Button.tsx"), base);
/// assert!(class.is_ignored && !class.is_page);
/// ```
#[derive(Debug, Clone)]
pub struct PathClassifier {
    ignored_folders: Regex,
    ignored_files: Regex,
    layout_file: Regex,
}

impl Default for PathClassifier {
    fn default() -> Self {
        // Defaults are non-empty plain words, so building cannot fail
        Self::new(DEFAULT_IGNORED_FOLDERS, DEFAULT_IGNORED_FILES, DEFAULT_LAYOUT_MARKER)
            .expect("default classifier rules are valid")
    }
}

impl PathClassifier {
    /// Builds a classifier from configured fragments
    ///
    /// Fragments are matched literally: regex metacharacters are escaped.
    /// Both rule sets must be non-empty, and an empty fragment would match
    /// every path; either is rejected.
    pub fn new<F, G>(ignored_folders: &[F], ignored_files: &[G], layout_marker: &str) -> Result<Self, ConfigError>
    where
        F: AsRef<str>,
        G: AsRef<str>,
    {
        let folders = alternation(ignored_folders, "ignored_folders")?;
        let files = alternation(ignored_files, "ignored_files")?;

        let marker = layout_marker.trim();
        if marker.is_empty() {
            return Err(ConfigError::EmptyLayoutMarker);
        }

        // Folder fragments match inside any directory segment
        let ignored_folders = compile(&format!(r"(?:^|/)[^/]*(?:{})[^/]*/", folders))?;

        // File fragments match the end of the file stem
        let ignored_files = compile(&format!(r"(?:{})\.[^./]+$", files))?;

        let layout_file = compile(&format!(
            r"(?i)(?:^|/){m}s?(?:\.(?:jsx?|tsx?)|/+index\.(?:jsx?|tsx?))$",
            m = regex::escape(marker)
        ))?;

        Ok(Self {
            ignored_folders,
            ignored_files,
            layout_file,
        })
    }

    /// Classifies `path`, discovered under `base_dir`
    pub fn classify(&self, path: &Path, base_dir: &Path) -> FileClass {
        let full = crate::path::to_slash(path);
        let relative = crate::path::relative_slash(path, base_dir).unwrap_or_else(|| full.to_string());

        let is_meta = is_meta_file(&full);
        let is_ignored = self.is_ignored(&relative);
        let is_page = !is_meta && !is_ignored && is_source_file(&full);
        let is_layout = is_page && self.layout_file.is_match(&full);

        FileClass {
            is_page,
            is_layout,
            is_meta,
            is_ignored,
        }
    }

    /// True when a relative path hits an ignored folder or file fragment
    pub fn is_ignored(&self, relative: &str) -> bool {
        let relative = relative.trim_start_matches('/');
        self.ignored_folders.is_match(relative) || self.ignored_files.is_match(relative)
    }

    /// True when `path` follows the layout naming convention
    pub fn is_layout_path(&self, path: &str) -> bool {
        self.layout_file.is_match(path)
    }

    /// Page candidate: accepted source file that is not ignored
    pub fn is_page_candidate(&self, path: &Path, base_dir: &Path) -> bool {
        self.classify(path, base_dir).is_page
    }
}

/// Accepted source extension and not a `.d.ts` declaration
pub fn is_source_file(path: &str) -> bool {
    PAGE_FILE_REGEX.is_match(path) && !TYPE_FILE_REGEX.is_match(path)
}

pub fn is_meta_file(path: &str) -> bool {
    META_FILE_REGEX.is_match(path)
}

fn alternation<S: AsRef<str>>(fragments: &[S], field: &'static str) -> Result<String, ConfigError> {
    if fragments.is_empty() {
        return Err(ConfigError::EmptyIgnoreRules(field));
    }

    let escaped = fragments
        .iter()
        .map(|f| {
            let f = f.as_ref().trim();
            if f.is_empty() {
                Err(ConfigError::EmptyIgnoreFragment(field))
            } else {
                Ok(regex::escape(f))
            }
        })
        .collect::<Result<Vec<_>, _>>()?;

    Ok(escaped.join("|"))
}

fn compile(pattern: &str) -> Result<Regex, ConfigError> {
    Regex::new(pattern).map_err(|source| ConfigError::InvalidPattern {
        pattern: pattern.to_string(),
        source,
    })
}
