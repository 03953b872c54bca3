use std::{
    collections::BTreeSet,
    path::{Path, PathBuf},
};

use anyhow::Result;
use glob::Pattern;
use walkdir::WalkDir;

use super::context::ProjectLayout;
use crate::utils::has_component;

/// Result of scanning one module.
pub struct ScanResult {
    pub files: BTreeSet<PathBuf>,
    pub skipped_count: usize,
}

/// The project's source files split into target and other modules.
///
/// Both lists are sorted and disjoint.
#[derive(Debug, Default)]
pub struct ModulePartition {
    pub target: Vec<PathBuf>,
    pub other: Vec<PathBuf>,
    /// Paths that could not be read while walking.
    pub skipped_count: usize,
}

impl ModulePartition {
    pub fn len(&self) -> usize {
        self.target.len() + self.other.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Walk the project's modules and partition their source files.
///
/// Modules listed in the layout's exclude list are not scanned at all.
/// Target modules that do not exist on disk are logged and skipped.
pub fn partition_sources(layout: &ProjectLayout, patterns: &[Pattern]) -> Result<ModulePartition> {
    let mut partition = ModulePartition::default();

    for module in &layout.target_modules {
        if !layout.module_dir(module).is_dir() {
            tracing::warn!("Target module \"{}\" not found under project root", module);
        }
    }

    let mut target = BTreeSet::new();
    let mut other = BTreeSet::new();

    for module in layout.module_names()? {
        let result = scan_files(&layout.module_dir(&module), patterns, &layout.vcs_dirs);
        partition.skipped_count += result.skipped_count;
        if layout.is_target(&module) {
            target.extend(result.files);
        } else {
            other.extend(result.files);
        }
    }

    partition.target = target.into_iter().collect();
    partition.other = other.into_iter().collect();
    Ok(partition)
}

/// Recursively collect files under `dir` whose names match any of `patterns`,
/// skipping everything below a VCS marker directory.
pub fn scan_files(dir: &Path, patterns: &[Pattern], vcs_dirs: &[String]) -> ScanResult {
    let mut files = BTreeSet::new();
    let mut skipped_count = 0;

    let walker = WalkDir::new(dir)
        .into_iter()
        .filter_entry(|e| {
            let rel = e.path().strip_prefix(dir).unwrap_or(e.path());
            !has_component(rel, vcs_dirs)
        });

    for entry in walker {
        let entry = match entry {
            Ok(e) => e,
            Err(e) => {
                skipped_count += 1;
                tracing::warn!("Cannot access path: {}", e);
                continue;
            }
        };

        if entry.file_type().is_file() && matches_any(entry.path(), patterns) {
            files.insert(entry.into_path());
        }
    }

    ScanResult {
        files,
        skipped_count,
    }
}

fn matches_any(path: &Path, patterns: &[Pattern]) -> bool {
    let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
        return false;
    };
    patterns.iter().any(|p| p.matches(name))
}
