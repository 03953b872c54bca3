//! Report files written into the work directory after each run.
//!
//! Every report is a plain list, one identifier per line, overwritten on
//! each run.

use std::{
    collections::BTreeSet,
    fs,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};

use crate::{
    core::{AssetClassification, LocaleClassification},
    issues::Issue,
};

pub const SHARED_REPORT: &str = "shared.txt";
pub const NOT_FOUND_REPORT: &str = "not_found.txt";
pub const FRAGMENTED_REPORT: &str = "fragmented.txt";

/// Write `items` to `<dir>/<name>`, creating `dir` if needed.
pub fn write_list<I, S>(dir: &Path, name: &str, items: I) -> Result<PathBuf>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    fs::create_dir_all(dir).with_context(|| format!("Failed to create work directory: {:?}", dir))?;

    let mut content = String::new();
    for item in items {
        content.push_str(item.as_ref());
        content.push('\n');
    }

    let path = dir.join(name);
    fs::write(&path, content).with_context(|| format!("Failed to write report: {:?}", path))?;
    Ok(path)
}

/// Shared images and images that could not be found or placed.
pub fn write_image_reports(
    dir: &Path,
    classification: &AssetClassification,
    issues: &[Issue],
) -> Result<Vec<PathBuf>> {
    let not_found: BTreeSet<&str> = issues
        .iter()
        .filter_map(Issue::not_found_identifier)
        .collect();

    Ok(vec![
        write_list(dir, SHARED_REPORT, &classification.shared)?,
        write_list(dir, NOT_FOUND_REPORT, not_found)?,
    ])
}

/// Shared keys and keys to be moved that lack translations.
pub fn write_locale_reports(
    dir: &Path,
    classification: &LocaleClassification,
) -> Result<Vec<PathBuf>> {
    Ok(vec![
        write_list(dir, SHARED_REPORT, &classification.shared)?,
        write_list(
            dir,
            FRAGMENTED_REPORT,
            classification.fragmented.iter().map(|f| f.key.as_str()),
        )?,
    ])
}
