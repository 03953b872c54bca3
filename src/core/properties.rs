//! Property-style locale files.
//!
//! A locale family is one default file (`<base><suffix>`, tagged `main`) plus
//! one `<base>_<locale><suffix>` file per supported locale.

use std::{
    collections::BTreeMap,
    fs, io,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};

use super::encoding::{DecodeResult, decode};
use crate::issues::{EncodingMismatchIssue, Issue, ResourceNotFoundIssue};

/// Tag of the default locale file.
pub const MAIN_LOCALE_TAG: &str = "main";

/// Split a property line on its first `=`.
///
/// Returns `None` for lines without `=`.
pub fn split_entry(line: &str) -> Option<(&str, &str)> {
    line.split_once('=')
}

/// Parse `key=value` lines; lines without `=` are skipped and the value keeps
/// everything after the first `=` except the line ending.
pub fn parse_properties(content: &str) -> BTreeMap<String, String> {
    content
        .lines()
        .filter_map(split_entry)
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

pub fn locale_file_name(base: &str, locale: Option<&str>, suffix: &str) -> String {
    match locale {
        Some(locale) => format!("{}_{}{}", base, locale, suffix),
        None => format!("{}{}", base, suffix),
    }
}

/// The files of one locale family, `main` first, then locales in configured order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocaleFileSet {
    files: Vec<(String, PathBuf)>,
}

impl LocaleFileSet {
    pub fn new(dir: &Path, base: &str, locales: &[String], suffix: &str) -> Self {
        let mut files = vec![(
            MAIN_LOCALE_TAG.to_string(),
            dir.join(locale_file_name(base, None, suffix)),
        )];
        for locale in locales {
            files.push((
                locale.clone(),
                dir.join(locale_file_name(base, Some(locale), suffix)),
            ));
        }
        Self { files }
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Path)> {
        self.files.iter().map(|(t, p)| (t.as_str(), p.as_path()))
    }

    pub fn get(&self, tag: &str) -> Option<&Path> {
        self.files
            .iter()
            .find(|(t, _)| t == tag)
            .map(|(_, p)| p.as_path())
    }
}

/// All loaded translations: key → { locale tag → value }.
#[derive(Debug, Clone, Default)]
pub struct LocaleStore {
    locales: Vec<String>,
    entries: BTreeMap<String, BTreeMap<String, String>>,
}

impl LocaleStore {
    pub fn new(locales: &[String]) -> Self {
        Self {
            locales: locales.to_vec(),
            entries: BTreeMap::new(),
        }
    }

    /// Load every file of a family. A missing or undecodable file is
    /// reported and skipped.
    pub fn load(files: &LocaleFileSet, locales: &[String]) -> Result<(Self, Vec<Issue>)> {
        let mut store = Self::new(locales);
        let mut issues = Vec::new();

        for (tag, path) in files.iter() {
            let bytes = match fs::read(path) {
                Ok(bytes) => bytes,
                Err(err) if err.kind() == io::ErrorKind::NotFound => {
                    tracing::warn!("Locale file \"{}\" not found", path.display());
                    issues.push(Issue::from(ResourceNotFoundIssue {
                        identifier: path.display().to_string(),
                        step: "locale loading",
                    }));
                    continue;
                }
                Err(err) => {
                    return Err(err)
                        .with_context(|| format!("Failed to read locale file: {:?}", path));
                }
            };
            let DecodeResult::Decoded { text, .. } = decode(&bytes) else {
                tracing::error!("Cannot decode {}, entries skipped", path.display());
                issues.push(Issue::from(EncodingMismatchIssue {
                    file_path: path.display().to_string(),
                }));
                continue;
            };
            for (key, value) in parse_properties(&text) {
                store.insert(tag, key, value);
            }
        }

        Ok((store, issues))
    }

    pub fn insert(&mut self, tag: &str, key: String, value: String) {
        self.entries
            .entry(key)
            .or_default()
            .insert(tag.to_string(), value);
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    pub fn value(&self, key: &str, tag: &str) -> Option<&str> {
        self.entries.get(key)?.get(tag).map(String::as_str)
    }

    /// Number of values a complete key carries: the default plus one per locale.
    pub fn required_count(&self) -> usize {
        self.locales.len() + 1
    }

    /// A key is complete when it has a non-empty value in the default file
    /// and in every configured locale.
    pub fn is_complete(&self, key: &str) -> bool {
        let Some(values) = self.entries.get(key) else {
            return false;
        };
        values.len() >= self.required_count()
            && values.values().all(|v| !v.is_empty())
            && self.missing_tags(key).is_empty()
    }

    /// Tags (`main` first, then locales) without a non-empty value for `key`.
    pub fn missing_tags(&self, key: &str) -> Vec<String> {
        let values = self.entries.get(key);
        std::iter::once(MAIN_LOCALE_TAG)
            .chain(self.locales.iter().map(String::as_str))
            .filter(|tag| {
                values
                    .and_then(|v| v.get(*tag))
                    .is_none_or(|v| v.is_empty())
            })
            .map(String::from)
            .collect()
    }
}
