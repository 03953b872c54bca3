//! Common utility functions shared across the codebase.

use std::path::Path;

/// Normalizes directory separators to forward slashes.
///
/// # Examples
///
/// ```
/// use fstransfer::utils::normalize_separators;
///
/// assert_eq!(normalize_separators("com\\fr\\images\\a.png"), "com/fr/images/a.png");
/// assert_eq!(normalize_separators("com/fr/a.png"), "com/fr/a.png");
/// ```
pub fn normalize_separators(path: &str) -> String {
    path.replace('\\', "/")
}

/// Strips a single leading slash from a relative path.
///
/// # Examples
///
/// ```
/// use fstransfer::utils::trim_leading_slash;
///
/// assert_eq!(trim_leading_slash("/web/a.png"), "web/a.png");
/// assert_eq!(trim_leading_slash("web/a.png"), "web/a.png");
/// ```
pub fn trim_leading_slash(path: &str) -> &str {
    path.strip_prefix('/').unwrap_or(path)
}

/// Relative path of `path` under `base`, with forward slashes.
///
/// Returns `None` when `path` is not under `base`.
pub fn relative_identifier(path: &Path, base: &Path) -> Option<String> {
    let rel = path.strip_prefix(base).ok()?;
    Some(normalize_separators(&rel.to_string_lossy()))
}

/// Checks whether any component of `path` is one of the given directory names.
pub fn has_component(path: &Path, names: &[String]) -> bool {
    path.components().any(|c| {
        let c = c.as_os_str().to_string_lossy();
        names.iter().any(|name| c == name.as_str())
    })
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use crate::utils::*;

    #[test]
    fn test_relative_identifier() {
        let base = PathBuf::from("/p/m1/src");
        let path = base.join("com").join("fr").join("a.png");
        assert_eq!(
            relative_identifier(&path, &base),
            Some("com/fr/a.png".to_string())
        );
        assert_eq!(relative_identifier(Path::new("/other/a.png"), &base), None);
    }

    #[test]
    fn test_has_component() {
        let names = vec![".svn".to_string(), ".git".to_string()];
        assert!(has_component(Path::new("/p/m1/.svn/text-base/a.java"), &names));
        assert!(has_component(Path::new("m1/src/.git"), &names));
        assert!(!has_component(Path::new("/p/m1/src/svn/a.java"), &names));
        // Component match, not substring match
        assert!(!has_component(Path::new("/p/m1/src/x.svnignore/a.java"), &names));
    }
}
