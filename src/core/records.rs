use std::{collections::BTreeSet, path::Path};

use anyhow::Result;

use super::extract::ReferenceExtractor;
use crate::utils::{normalize_separators, relative_identifier};

/// Unique reference identifiers seen in one partition.
pub type ReferenceSet = BTreeSet<String>;

/// A source file and the references found in it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceFileRecord {
    /// Project-relative path with `/` separators.
    pub path: String,
    /// References in order of appearance, duplicates included.
    pub references: Vec<String>,
}

impl SourceFileRecord {
    pub fn references_to(&self, identifier: &str) -> bool {
        self.references.iter().any(|r| r == identifier)
    }
}

/// Extract references from every file, keeping only files that have any.
pub fn collect_records<P: AsRef<Path>>(
    root: &Path,
    files: &[P],
    extractor: &ReferenceExtractor,
) -> Result<Vec<SourceFileRecord>> {
    let mut records = Vec::new();
    for file in files {
        let file = file.as_ref();
        let references = extractor.extract_file(file)?;
        if references.is_empty() {
            continue;
        }
        let path = relative_identifier(file, root)
            .unwrap_or_else(|| normalize_separators(&file.to_string_lossy()));
        records.push(SourceFileRecord { path, references });
    }
    Ok(records)
}

/// Flatten and deduplicate the references of a partition.
pub fn reference_set(records: &[SourceFileRecord]) -> ReferenceSet {
    records
        .iter()
        .flat_map(|r| r.references.iter().cloned())
        .collect()
}
