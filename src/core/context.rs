//! Per-run analysis state.
//!
//! A context is built from disk once per run and owns everything the
//! executor and the reporters need. Nothing here modifies the project.

use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::{Context as _, Result};

use super::{
    extract::ReferenceExtractor,
    inventory::AssetInventory,
    properties::{LocaleFileSet, LocaleStore},
    reconcile::{AssetClassification, LocaleClassification, classify_assets, classify_locales},
    records::{SourceFileRecord, collect_records, reference_set},
    scanner::{ModulePartition, partition_sources},
};
use crate::{
    config::{Config, ImageConfig, LocaleConfig, compile_patterns},
    issues::{DuplicateResourceUsageIssue, Issue},
};

/// How the project is split into modules.
#[derive(Debug, Clone)]
pub struct ProjectLayout {
    pub root: PathBuf,
    pub target_modules: Vec<String>,
    /// Top-level directories that are never treated as modules.
    pub exclude_dirs: Vec<String>,
    pub vcs_dirs: Vec<String>,
    /// Source directory inside each module, e.g. `src`.
    pub source_dir: String,
}

impl ProjectLayout {
    pub fn from_config(root: &Path, config: &Config) -> Self {
        Self {
            root: root.to_path_buf(),
            target_modules: config.target_modules.clone(),
            exclude_dirs: config.exclude_dirs.clone(),
            vcs_dirs: config.vcs_dirs.clone(),
            source_dir: config.source_dir.clone(),
        }
    }

    /// Direct sub-directories of the root, sorted, minus excluded ones.
    pub fn module_names(&self) -> Result<Vec<String>> {
        let entries = fs::read_dir(&self.root)
            .with_context(|| format!("Failed to read project root: {:?}", self.root))?;

        let mut names = Vec::new();
        for entry in entries {
            let entry = entry
                .with_context(|| format!("Failed to read project root: {:?}", self.root))?;
            if !entry.path().is_dir() {
                continue;
            }
            let name = entry.file_name().to_string_lossy().to_string();
            if self.exclude_dirs.iter().any(|d| *d == name) {
                continue;
            }
            names.push(name);
        }
        names.sort();
        Ok(names)
    }

    pub fn module_dir(&self, module: &str) -> PathBuf {
        self.root.join(module)
    }

    pub fn source_root(&self, module: &str) -> PathBuf {
        self.module_dir(module).join(&self.source_dir)
    }

    pub fn is_target(&self, module: &str) -> bool {
        self.target_modules.iter().any(|m| m == module)
    }

    /// First module (in sorted order) whose source root holds `identifier`.
    pub fn find_resource(&self, identifier: &str) -> Result<Option<PathBuf>> {
        for module in self.module_names()? {
            let candidate = self.source_root(&module).join(identifier);
            if candidate.is_file() {
                return Ok(Some(candidate));
            }
        }
        Ok(None)
    }

    /// Every target module location of `identifier` that exists on disk.
    pub fn target_locations(&self, identifier: &str) -> Vec<PathBuf> {
        self.target_modules
            .iter()
            .map(|m| self.source_root(m).join(identifier))
            .filter(|p| p.is_file())
            .collect()
    }
}

/// Everything one image migration run works from.
pub struct ImageContext {
    pub layout: ProjectLayout,
    pub config: ImageConfig,
    /// Resolved directory images are copied into.
    pub target_dir: PathBuf,
    pub partition: ModulePartition,
    pub target_records: Vec<SourceFileRecord>,
    pub inventory: AssetInventory,
    pub classification: AssetClassification,
    /// Issues found while analysing (collisions and shared images).
    pub issues: Vec<Issue>,
}

impl ImageContext {
    pub fn build(layout: ProjectLayout, config: ImageConfig, target_dir: PathBuf) -> Result<Self> {
        let patterns = compile_patterns(&config.source_patterns)?;
        let partition = partition_sources(&layout, &patterns)?;
        tracing::info!(
            "Scanned {} target and {} other source files",
            partition.target.len(),
            partition.other.len()
        );

        let extractor = ReferenceExtractor::assets(&config.base_path, &config.extensions)?;
        let target_records = collect_records(&layout.root, &partition.target, &extractor)?;
        let other_records = collect_records(&layout.root, &partition.other, &extractor)?;
        let target_refs = reference_set(&target_records);
        let other_refs = reference_set(&other_records);

        let inventory = AssetInventory::build(
            &layout,
            &config.target_base,
            &config.image_patterns()?,
            &config.target_excludes,
        );
        tracing::info!("Target modules carry {} images", inventory.len());

        let classification = classify_assets(
            &target_refs,
            &other_refs,
            &inventory,
            &config.target_excludes,
            config.shared_detection,
        );

        let mut issues: Vec<Issue> = inventory
            .collisions()
            .iter()
            .cloned()
            .map(Issue::from)
            .collect();
        for identifier in &classification.shared {
            tracing::warn!("Image \"{}\" is shared with other modules", identifier);
            issues.push(Issue::from(DuplicateResourceUsageIssue {
                identifier: identifier.clone(),
            }));
        }

        Ok(Self {
            layout,
            config,
            target_dir,
            partition,
            target_records,
            inventory,
            classification,
            issues,
        })
    }

    pub fn source_files_checked(&self) -> usize {
        self.partition.len()
    }
}

/// Everything one locale migration run works from.
pub struct LocaleContext {
    pub layout: ProjectLayout,
    pub config: LocaleConfig,
    pub partition: ModulePartition,
    pub original_files: LocaleFileSet,
    pub target_files: LocaleFileSet,
    pub store: LocaleStore,
    pub classification: LocaleClassification,
    pub issues: Vec<Issue>,
}

impl LocaleContext {
    pub fn build(
        layout: ProjectLayout,
        config: LocaleConfig,
        original_dir: &Path,
        target_dir: &Path,
    ) -> Result<Self> {
        let patterns = compile_patterns(&config.source_patterns)?;
        let partition = partition_sources(&layout, &patterns)?;
        tracing::info!(
            "Scanned {} target and {} other source files",
            partition.target.len(),
            partition.other.len()
        );

        let extractor = ReferenceExtractor::locales();
        let target_keys = reference_set(&collect_records(
            &layout.root,
            &partition.target,
            &extractor,
        )?);
        let other_keys = reference_set(&collect_records(
            &layout.root,
            &partition.other,
            &extractor,
        )?);

        let original_files = LocaleFileSet::new(
            original_dir,
            &config.original_name,
            &config.locales,
            &config.suffix,
        );
        let target_files =
            LocaleFileSet::new(target_dir, &config.target_name, &config.locales, &config.suffix);

        let (store, mut issues) = LocaleStore::load(&original_files, &config.locales)?;
        let classification = classify_locales(&target_keys, &other_keys, &store);

        for key in &classification.shared {
            tracing::warn!("Locale key \"{}\" is shared with other modules", key);
            issues.push(Issue::from(DuplicateResourceUsageIssue {
                identifier: key.clone(),
            }));
        }
        for fragmented in &classification.fragmented {
            tracing::warn!(
                "Locale key \"{}\" is missing in: {}",
                fragmented.key,
                fragmented.missing_in.join(", ")
            );
            issues.push(Issue::from(fragmented.clone()));
        }

        Ok(Self {
            layout,
            config,
            partition,
            original_files,
            target_files,
            store,
            classification,
            issues,
        })
    }

    pub fn source_files_checked(&self) -> usize {
        self.partition.len()
    }
}
