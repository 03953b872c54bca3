//! Classification of resources against target and other references.
//!
//! Asset mode sorts every identifier in `inventory ∪ target references` into
//! exactly one of `in_use`, `unused` or `dependent`, and separately flags the
//! identifiers the rest of the project also references as `shared`.
//!
//! Locale mode picks the keys only the target references, checks their
//! translations are complete, and lists the keys both sides share.

use super::{
    inventory::{AssetInventory, is_excluded},
    properties::LocaleStore,
    records::ReferenceSet,
};
use crate::{config::SharedDetection, issues::FragmentedLocaleIssue};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AssetClassification {
    /// Target references after the exclusion filter.
    pub target_refs: ReferenceSet,
    /// Stored in the target and referenced by it.
    pub in_use: ReferenceSet,
    /// Stored in the target, never referenced by it.
    pub unused: ReferenceSet,
    /// Referenced by the target, stored elsewhere.
    pub dependent: ReferenceSet,
    /// Referenced by both target and other modules. Never moved or deleted.
    pub shared: ReferenceSet,
}

impl AssetClassification {
    pub fn is_shared(&self, identifier: &str) -> bool {
        self.shared.contains(identifier)
    }
}

pub fn classify_assets(
    target_refs: &ReferenceSet,
    other_refs: &ReferenceSet,
    inventory: &AssetInventory,
    excludes: &[String],
    shared_detection: SharedDetection,
) -> AssetClassification {
    let filtered: ReferenceSet = target_refs
        .iter()
        .filter(|r| !is_excluded(r, excludes))
        .cloned()
        .collect();
    let stored = inventory.identifiers();

    let in_use = stored.intersection(&filtered).cloned().collect();
    let unused = stored.difference(&filtered).cloned().collect();
    let dependent = filtered.difference(&stored).cloned().collect();

    let shared_source = match shared_detection {
        SharedDetection::Raw => target_refs,
        SharedDetection::Filtered => &filtered,
    };
    let shared = shared_source.intersection(other_refs).cloned().collect();

    AssetClassification {
        target_refs: filtered,
        in_use,
        unused,
        dependent,
        shared,
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LocaleClassification {
    /// Keys only the target references that exist in the store, sorted.
    pub move_keys: Vec<String>,
    /// Keys referenced by both sides, sorted.
    pub shared: Vec<String>,
    /// Move keys with missing translations, sorted by key.
    pub fragmented: Vec<FragmentedLocaleIssue>,
}

pub fn classify_locales(
    target_keys: &ReferenceSet,
    other_keys: &ReferenceSet,
    store: &LocaleStore,
) -> LocaleClassification {
    // BTreeSet iteration keeps both lists sorted.
    let move_keys: Vec<String> = target_keys
        .difference(other_keys)
        .filter(|k| store.contains_key(k))
        .cloned()
        .collect();
    let shared: Vec<String> = target_keys.intersection(other_keys).cloned().collect();

    let fragmented = move_keys
        .iter()
        .filter(|k| !store.is_complete(k))
        .map(|k| FragmentedLocaleIssue {
            key: k.clone(),
            missing_in: store.missing_tags(k),
        })
        .collect();

    LocaleClassification {
        move_keys,
        shared,
        fragmented,
    }
}
