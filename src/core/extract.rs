//! Reference extraction from source text.
//!
//! Extraction is lexical and line-oriented: any substring matching the
//! grammar is a reference, whether it sits in a string literal, a comment or
//! a log message.

use std::{borrow::Cow, fs, path::Path, sync::LazyLock};

use anyhow::{Context, Result};
use regex::Regex;

use super::encoding::decode_lossy;

/// Older lookup call: `Inter.getLocText("key")`.
static LEGACY_LOOKUP_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"Inter\.getLocText\("(.+?)"\)"#).unwrap());

/// Newer lookup call: `FR.i18nText("key")`.
static LOOKUP_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"FR\.i18nText\("(.+?)"\)"#).unwrap());

/// Characters that end a path-looking run.
const PATH_STOP_CHARS: &str = r#"\s"'`()\[\]{}<>,;=|"#;

/// Extracts resource references with a fixed grammar.
///
/// Every pattern captures the reference in group 1.
#[derive(Debug, Clone)]
pub struct ReferenceExtractor {
    patterns: Vec<Regex>,
}

impl ReferenceExtractor {
    /// Image path literals: `base` followed by the longest path-looking run
    /// that ends in one of `extensions`.
    pub fn assets(base: &str, extensions: &[String]) -> Result<Self> {
        let extensions = extensions
            .iter()
            .map(|e| regex::escape(e))
            .collect::<Vec<_>>()
            .join("|");
        let pattern = format!(
            r"({}[^{}]*\.(?:{}))",
            regex::escape(base),
            PATH_STOP_CHARS,
            extensions
        );
        let regex = Regex::new(&pattern)
            .with_context(|| format!("Failed to build image reference pattern: {}", pattern))?;
        Ok(Self {
            patterns: vec![regex],
        })
    }

    /// Locale lookup calls in both the legacy and the current syntax.
    pub fn locales() -> Self {
        Self {
            patterns: vec![LEGACY_LOOKUP_REGEX.clone(), LOOKUP_REGEX.clone()],
        }
    }

    /// All references in `text`, in order of appearance, duplicates included.
    pub fn extract(&self, text: &str) -> Vec<String> {
        let text = normalize_newlines(text);
        let mut references = Vec::new();

        for line in text.lines() {
            let mut found: Vec<(usize, &str)> = self
                .patterns
                .iter()
                .flat_map(|re| re.captures_iter(line))
                .filter_map(|caps| caps.get(1))
                .map(|m| (m.start(), m.as_str()))
                .collect();
            // Patterns are tried one after another; restore line order.
            found.sort_by_key(|(start, _)| *start);
            references.extend(found.into_iter().map(|(_, r)| r.to_string()));
        }

        references
    }

    /// Read a source file and extract its references.
    ///
    /// A missing or unreadable file is returned as an error.
    pub fn extract_file(&self, path: &Path) -> Result<Vec<String>> {
        let bytes =
            fs::read(path).with_context(|| format!("Failed to read source file: {:?}", path))?;
        Ok(self.extract(&decode_lossy(&bytes)))
    }
}

/// Treat `\r\n` and lone `\r` line endings as `\n`.
pub fn normalize_newlines(text: &str) -> Cow<'_, str> {
    if text.contains('\r') {
        Cow::Owned(text.replace("\r\n", "\n").replace('\r', "\n"))
    } else {
        Cow::Borrowed(text)
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use tempfile::tempdir;

    use super::*;

    fn image_extractor() -> ReferenceExtractor {
        let exts = ["png", "jpg", "gif"].map(String::from);
        ReferenceExtractor::assets("com/fr", &exts).unwrap()
    }

    #[test]
    fn test_extract_image_literal() {
        let refs = image_extractor()
            .extract(r#"Icon icon = load("com/fr/base/images/icon.png");"#);
        assert_eq!(refs, vec!["com/fr/base/images/icon.png"]);
    }

    #[test]
    fn test_extract_multiple_per_line() {
        let refs = image_extractor().extract(
            r#"a("com/fr/web/images/a.png"); b('com/fr/web/images/b.gif');"#,
        );
        assert_eq!(
            refs,
            vec!["com/fr/web/images/a.png", "com/fr/web/images/b.gif"]
        );
    }

    #[test]
    fn test_extract_keeps_duplicates_in_order() {
        let text = "x = \"com/fr/a/images/b.jpg\";\ny = \"com/fr/a/images/a.png\";\nz = \"com/fr/a/images/b.jpg\";";
        let refs = image_extractor().extract(text);
        assert_eq!(
            refs,
            vec![
                "com/fr/a/images/b.jpg",
                "com/fr/a/images/a.png",
                "com/fr/a/images/b.jpg"
            ]
        );
    }

    #[test]
    fn test_extract_longest_run_ending_in_extension() {
        let refs = image_extractor().extract("url(com/fr/images/a.png.gif)");
        assert_eq!(refs, vec!["com/fr/images/a.png.gif"]);
    }

    #[test]
    fn test_extract_ignores_other_extensions() {
        let refs = image_extractor().extract(r#"load("com/fr/images/a.svg");"#);
        assert!(refs.is_empty());
    }

    #[test]
    fn test_extract_from_comments() {
        let refs = image_extractor().extract("// old icon: com/fr/images/old.gif");
        assert_eq!(refs, vec!["com/fr/images/old.gif"]);
    }

    #[test]
    fn test_extract_with_lone_carriage_returns() {
        let text = "a(\"com/fr/images/a.png\");\rb(\"com/fr/images/b.png\");\r";
        let refs = image_extractor().extract(text);
        assert_eq!(refs, vec!["com/fr/images/a.png", "com/fr/images/b.png"]);
    }

    #[test]
    fn test_extract_locale_keys_both_syntaxes() {
        let text = r#"
String a = Inter.getLocText("FS-Schedule_Title");
var b = FR.i18nText("FS-Mobile_Name") + Inter.getLocText("FS-Common_OK");
"#;
        let refs = ReferenceExtractor::locales().extract(text);
        assert_eq!(
            refs,
            vec!["FS-Schedule_Title", "FS-Mobile_Name", "FS-Common_OK"]
        );
    }

    #[test]
    fn test_extract_locale_key_is_non_greedy() {
        let refs = ReferenceExtractor::locales()
            .extract(r#"f(Inter.getLocText("A"), Inter.getLocText("B"));"#);
        assert_eq!(refs, vec!["A", "B"]);
    }

    #[test]
    fn test_extract_missing_file_is_error() {
        let dir = tempdir().unwrap();
        let result = image_extractor().extract_file(&dir.path().join("Missing.java"));
        assert!(result.is_err());
    }

    #[test]
    fn test_normalize_newlines() {
        assert_eq!(normalize_newlines("a\r\nb\rc\n"), "a\nb\nc\n");
        assert!(matches!(normalize_newlines("a\nb"), Cow::Borrowed(_)));
    }
}
