//! Physical inventory of the images stored in the target modules.

use std::{
    collections::{BTreeMap, BTreeSet},
    path::{Path, PathBuf},
};

use glob::Pattern;

use super::{context::ProjectLayout, scanner::scan_files};
use crate::{issues::InventoryCollisionIssue, utils::relative_identifier};

/// Canonical identifier → on-disk location, for every image the target
/// modules carry under their base path.
#[derive(Debug, Default)]
pub struct AssetInventory {
    entries: BTreeMap<String, PathBuf>,
    collisions: Vec<InventoryCollisionIssue>,
}

impl AssetInventory {
    /// Walk `<module>/<source_dir>/<target_base>` of every target module.
    ///
    /// Identifiers are relative to the module's source root. Identifiers
    /// starting with one of `excludes` are dropped. When two modules carry
    /// the same identifier, the later module (in target order) wins and the
    /// collision is recorded.
    pub fn build(
        layout: &ProjectLayout,
        target_base: &str,
        image_patterns: &[Pattern],
        excludes: &[String],
    ) -> Self {
        let mut inventory = Self::default();

        for module in &layout.target_modules {
            let source_root = layout.source_root(module);
            let image_root = source_root.join(target_base);
            if !image_root.is_dir() {
                tracing::debug!("No image directory at {}", image_root.display());
                continue;
            }

            let result = scan_files(&image_root, image_patterns, &layout.vcs_dirs);
            for path in result.files {
                let Some(identifier) = relative_identifier(&path, &source_root) else {
                    continue;
                };
                if is_excluded(&identifier, excludes) {
                    continue;
                }
                inventory.insert(identifier, path);
            }
        }

        inventory
    }

    /// Insert an entry, replacing and recording any previous one.
    pub fn insert(&mut self, identifier: String, path: PathBuf) {
        if let Some(previous) = self.entries.insert(identifier.clone(), path.clone()) {
            tracing::warn!(
                "Image \"{}\" exists in more than one target module; using {}",
                identifier,
                path.display()
            );
            self.collisions.push(InventoryCollisionIssue {
                identifier,
                kept: path.display().to_string(),
                replaced: previous.display().to_string(),
            });
        }
    }

    pub fn get(&self, identifier: &str) -> Option<&Path> {
        self.entries.get(identifier).map(PathBuf::as_path)
    }

    pub fn contains(&self, identifier: &str) -> bool {
        self.entries.contains_key(identifier)
    }

    pub fn identifiers(&self) -> BTreeSet<String> {
        self.entries.keys().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn collisions(&self) -> &[InventoryCollisionIssue] {
        &self.collisions
    }
}

/// Literal prefix match against the exclusion list.
pub fn is_excluded(identifier: &str, excludes: &[String]) -> bool {
    excludes.iter().any(|ex| identifier.starts_with(ex.as_str()))
}

impl FromIterator<(String, PathBuf)> for AssetInventory {
    fn from_iter<T: IntoIterator<Item = (String, PathBuf)>>(iter: T) -> Self {
        let mut inventory = Self::default();
        for (identifier, path) in iter {
            inventory.insert(identifier, path);
        }
        inventory
    }
}
