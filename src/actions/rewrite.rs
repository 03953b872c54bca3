//! Rewriting of image references in target source files.

use std::{borrow::Cow, fs, path::Path};

use anyhow::{Context, Result};

use super::{assets::TransferRecord, operation::Operation, traits::MigrationPlan};
use crate::{
    core::{
        SourceFileRecord,
        encoding::{DecodeResult, decode},
    },
    issues::{EncodingMismatchIssue, Issue},
};

/// Replace every occurrence of `from` with `to`, except occurrences that are
/// already part of an occurrence of `to`.
///
/// Running it twice gives the same text as running it once, even when `to`
/// contains `from`.
///
/// # Examples
///
/// ```
/// use fstransfer::actions::replace_outside;
///
/// let once = replace_outside("a.png b/a.png", "a.png", "b/a.png");
/// assert_eq!(once, "b/a.png b/a.png");
/// assert_eq!(replace_outside(&once, "a.png", "b/a.png"), once);
/// ```
pub fn replace_outside<'a>(text: &'a str, from: &str, to: &str) -> Cow<'a, str> {
    if from.is_empty() || from == to || !text.contains(from) {
        return Cow::Borrowed(text);
    }

    let protected: Vec<(usize, usize)> = if to.contains(from) {
        text.match_indices(to)
            .map(|(start, m)| (start, start + m.len()))
            .collect()
    } else {
        Vec::new()
    };

    let mut out = String::with_capacity(text.len());
    let mut last = 0;
    for (start, m) in text.match_indices(from) {
        let end = start + m.len();
        if protected.iter().any(|&(s, e)| start >= s && end <= e) {
            continue;
        }
        out.push_str(&text[last..start]);
        out.push_str(to);
        last = end;
    }

    if last == 0 {
        return Cow::Borrowed(text);
    }
    out.push_str(&text[last..]);
    Cow::Owned(out)
}

/// Plan one write per target source file that references a transferred image.
///
/// Files are re-encoded with the encoding they were read with. A file that
/// decodes under neither encoding is reported and left alone.
pub fn plan_rewrites(
    root: &Path,
    records: &[SourceFileRecord],
    transfers: &[TransferRecord],
) -> Result<MigrationPlan> {
    let mut plan = MigrationPlan::default();

    for record in records {
        let relevant: Vec<&TransferRecord> = transfers
            .iter()
            .filter(|t| record.references_to(&t.from))
            .collect();
        if relevant.is_empty() {
            continue;
        }

        let path = root.join(&record.path);
        let bytes =
            fs::read(&path).with_context(|| format!("Failed to read source file: {:?}", path))?;
        let (text, encoding) = match decode(&bytes) {
            DecodeResult::Decoded { text, encoding } => (text, encoding),
            DecodeResult::Undecodable => {
                tracing::error!("Cannot decode {}, references left unchanged", record.path);
                plan.issues.push(Issue::from(EncodingMismatchIssue {
                    file_path: record.path.clone(),
                }));
                continue;
            }
        };

        let mut rewritten = text.clone();
        for transfer in &relevant {
            if let Cow::Owned(next) = replace_outside(&rewritten, &transfer.from, &transfer.to) {
                tracing::info!(
                    "Replaced \"{}\" with \"{}\" in {}",
                    transfer.from,
                    transfer.to,
                    record.path
                );
                rewritten = next;
            }
        }

        if rewritten != text {
            plan.stats.rewritten += 1;
            plan.push(Operation::WriteFile {
                path,
                content: encoding.encode(&rewritten),
            });
        }
    }

    Ok(plan)
}
