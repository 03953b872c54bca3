//! Locale migration: strip moved keys from the original files and append
//! them to the target files.

use std::{collections::BTreeSet, fs, io, path::Path};

use anyhow::{Context, Result};

use super::{operation::Operation, traits::MigrationPlan};
use crate::{
    core::{
        LocaleContext, TextEncoding,
        encoding::{DecodeResult, decode},
        properties::{parse_properties, split_entry},
    },
    issues::{EncodingMismatchIssue, Issue},
};

/// Remove lines whose key is in `keys`.
///
/// Every other line, including those without `=`, is kept byte for byte.
/// Returns the new text and the number of lines removed.
pub fn strip_keys(text: &str, keys: &BTreeSet<&str>) -> (String, usize) {
    let mut out = String::with_capacity(text.len());
    let mut removed = 0;
    for line in text.split_inclusive('\n') {
        let content = line.trim_end_matches(['\n', '\r']);
        match split_entry(content) {
            Some((key, _)) if keys.contains(key) => removed += 1,
            _ => out.push_str(line),
        }
    }
    (out, removed)
}

pub fn migrate_locales(ctx: &LocaleContext) -> Result<MigrationPlan> {
    let mut plan = MigrationPlan::default();
    let keys: BTreeSet<&str> = ctx
        .classification
        .move_keys
        .iter()
        .map(String::as_str)
        .collect();
    if keys.is_empty() {
        return Ok(plan);
    }

    for (_, path) in ctx.original_files.iter() {
        let Some((text, encoding)) = read_locale_file(path, &mut plan)? else {
            continue;
        };
        let (stripped, removed) = strip_keys(&text, &keys);
        if removed == 0 {
            continue;
        }
        tracing::info!("Removing {} keys from {}", removed, path.display());
        plan.stats.lines_removed += removed;
        plan.push(Operation::WriteFile {
            path: path.to_path_buf(),
            content: encoding.encode(&stripped),
        });
    }

    for (tag, path) in ctx.target_files.iter() {
        let (text, encoding) = if path.exists() {
            match read_locale_file(path, &mut plan)? {
                Some(read) => read,
                None => continue,
            }
        } else {
            (String::new(), TextEncoding::Utf8)
        };
        let present = parse_properties(&text);

        let mut appended = String::new();
        let mut count = 0;
        for key in &ctx.classification.move_keys {
            if present.contains_key(key) {
                continue;
            }
            let Some(value) = ctx.store.value(key, tag) else {
                tracing::debug!("No {} value for \"{}\"", tag, key);
                continue;
            };
            appended.push_str(&format!("{}={}\n", key, value));
            count += 1;
        }
        if count == 0 {
            continue;
        }

        let mut content = text;
        if !content.is_empty() && !content.ends_with('\n') {
            content.push('\n');
        }
        content.push_str(&appended);

        tracing::info!("Appending {} keys to {}", count, path.display());
        plan.stats.lines_appended += count;
        plan.push(Operation::WriteFile {
            path: path.to_path_buf(),
            content: encoding.encode(&content),
        });
    }

    Ok(plan)
}

/// Read and decode a locale file. Missing files were already reported when
/// the store was loaded and are skipped here.
fn read_locale_file(
    path: &Path,
    plan: &mut MigrationPlan,
) -> Result<Option<(String, TextEncoding)>> {
    let bytes = match fs::read(path) {
        Ok(bytes) => bytes,
        Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(None),
        Err(err) => {
            return Err(err).with_context(|| format!("Failed to read locale file: {:?}", path));
        }
    };
    match decode(&bytes) {
        DecodeResult::Decoded { text, encoding } => Ok(Some((text, encoding))),
        DecodeResult::Undecodable => {
            tracing::error!("Cannot decode {}, left unchanged", path.display());
            plan.issues.push(Issue::from(EncodingMismatchIssue {
                file_path: path.display().to_string(),
            }));
            Ok(None)
        }
    }
}
