/// Lazy iterator over a relative directory and its ancestors
///
/// For `admin/users/list`, yields: `admin/users/list` → `admin/users` → `admin` → `""`
///
/// The empty string stands for the base directory itself. Used by layout
/// lookup to find the nearest enclosing layout.
///
/// # Examples
///
/// ```
/// use autoroutes::path::DirHierarchy;
///
/// let dirs: Vec<&str> = DirHierarchy::new("shop/admin").collect();
/// assert_eq!(dirs, vec!["shop/admin", "shop", ""]);
///
/// let dirs: Vec<&str> = DirHierarchy::new("").collect();
/// assert_eq!(dirs, vec![""]);
/// ```
#[derive(Clone)]
pub struct DirHierarchy<'a> {
    current: Option<&'a str>,
}

impl<'a> DirHierarchy<'a> {
    pub fn new(dir: &'a str) -> Self {
        Self {
            current: Some(dir.trim_matches('/')),
        }
    }
}

impl<'a> Iterator for DirHierarchy<'a> {
    type Item = &'a str;

    fn next(&mut self) -> Option<Self::Item> {
        let current = self.current?;

        self.current = if current.is_empty() {
            None
        } else if let Some(slash_pos) = current.rfind('/') {
            Some(&current[..slash_pos])
        } else {
            Some("")
        };

        Some(current)
    }
}
