//! Mapping between reference identifiers and storage locations.

use crate::utils::{normalize_separators, trim_leading_slash};

/// The storage-relative suffix of `identifier`.
///
/// Markers are tried in order; the first one contained in the identifier
/// wins, and the suffix is everything after its first occurrence. Returns
/// `None` when no marker is contained or the suffix would be empty.
///
/// # Examples
///
/// ```
/// use fstransfer::core::paths::storage_suffix;
///
/// let markers = vec!["images".to_string(), "web/core".to_string()];
/// assert_eq!(storage_suffix("com/fr/base/images/icon.png", &markers), Some("icon.png"));
/// assert_eq!(storage_suffix("com/fr/web/core/css/a.gif", &markers), Some("css/a.gif"));
/// assert_eq!(storage_suffix("com/fr/static/a.gif", &markers), None);
/// ```
pub fn storage_suffix<'a>(identifier: &'a str, markers: &[String]) -> Option<&'a str> {
    let marker = markers.iter().find(|m| identifier.contains(m.as_str()))?;
    let (_, rest) = identifier.split_once(marker.as_str())?;
    let rest = trim_leading_slash(rest);
    if rest.is_empty() { None } else { Some(rest) }
}

/// The reference a file at `path` is called by: its path from the first
/// occurrence of `base` on, with forward slashes.
///
/// # Examples
///
/// ```
/// use fstransfer::core::paths::call_path;
///
/// assert_eq!(
///     call_path("/p/fservice/src/com/fr/fs/resources/images/icon.png", "com/fr"),
///     Some("com/fr/fs/resources/images/icon.png".to_string())
/// );
/// assert_eq!(call_path("/p/out/icon.png", "com/fr"), None);
/// ```
pub fn call_path(path: &str, base: &str) -> Option<String> {
    let path = normalize_separators(path);
    let (_, rest) = path.split_once(base)?;
    let rest = trim_leading_slash(rest);
    if rest.is_empty() {
        Some(base.to_string())
    } else {
        Some(format!("{}/{}", base.trim_end_matches('/'), rest))
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn markers() -> Vec<String> {
        vec!["images".to_string(), "web/core".to_string()]
    }

    #[test]
    fn test_first_marker_wins() {
        // Both markers are contained; "images" has priority.
        assert_eq!(
            storage_suffix("com/fr/web/core/images/a.png", &markers()),
            Some("a.png")
        );
    }

    #[test]
    fn test_suffix_after_first_occurrence() {
        assert_eq!(
            storage_suffix("com/fr/images/mobile/images/a.png", &markers()),
            Some("mobile/images/a.png")
        );
    }

    #[test]
    fn test_marker_at_end_is_unresolved() {
        assert_eq!(storage_suffix("com/fr/images", &markers()), None);
        assert_eq!(storage_suffix("com/fr/images/", &markers()), None);
    }

    #[test]
    fn test_empty_marker_list() {
        assert_eq!(storage_suffix("com/fr/images/a.png", &[]), None);
    }

    #[test]
    fn test_call_path_windows_separators() {
        assert_eq!(
            call_path(r"E:\project\fservice\src\com\fr\fs\images\a.png", "com/fr"),
            Some("com/fr/fs/images/a.png".to_string())
        );
    }

    #[test]
    fn test_call_path_of_directory() {
        assert_eq!(
            call_path("/p/fservice/src/com/fr/fs/resources/images/", "com/fr"),
            Some("com/fr/fs/resources/images/".to_string())
        );
    }
}
