//! Image migration: copy-in, delete, relocate, rewrite.

use std::{
    collections::{BTreeMap, btree_map::Entry},
    path::{Path, PathBuf},
};

use anyhow::Result;

use super::{operation::Operation, rewrite::plan_rewrites, traits::MigrationPlan};
use crate::{
    core::{
        ImageContext,
        paths::{call_path, storage_suffix},
    },
    issues::{
        DestinationConflictIssue, Issue, ResourceNotFoundIssue, UnresolvedReferencePathIssue,
    },
};

/// A reference that now points somewhere else.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransferRecord {
    pub from: String,
    pub to: String,
}

/// Where a migrated image ends up.
struct Destination {
    path: PathBuf,
    reference: String,
}

/// Plan the full image migration for a classified context.
///
/// Shared images are neither copied, relocated nor deleted. Every
/// destination is claimed before any operation is planned: a destination
/// claimed twice raises a conflict for the later image, and an unused image
/// sitting on a claimed destination is not deleted. Transfer records are
/// only produced for images whose source was found; the rewrite step is
/// planned from them.
pub fn migrate_assets(ctx: &ImageContext) -> Result<(MigrationPlan, Vec<TransferRecord>)> {
    let mut plan = MigrationPlan::default();
    let mut transfers = Vec::new();
    let classification = &ctx.classification;

    let target_call = call_path(&ctx.target_dir.to_string_lossy(), &ctx.config.base_path)
        .map(|c| c.trim_end_matches('/').to_string());
    if target_call.is_none() {
        tracing::error!(
            "Target directory {} is not under \"{}\"",
            ctx.target_dir.display(),
            ctx.config.base_path
        );
    }

    // Images already in place keep their paths
    let mut claims: BTreeMap<String, String> = BTreeMap::new();
    if let Some(call) = target_call.as_deref() {
        for identifier in classification.in_use.iter().filter(|id| is_under(id, call)) {
            claims.insert(identifier.clone(), identifier.clone());
        }
    }

    let mut copies = Vec::new();
    for identifier in &classification.dependent {
        if classification.is_shared(identifier) {
            continue;
        }
        let Some(dest) = destination(ctx, target_call.as_deref(), identifier, &mut plan) else {
            continue;
        };
        let Some(source) = ctx.layout.find_resource(identifier)? else {
            not_found(&mut plan, identifier, "copy");
            continue;
        };
        if source == dest.path || !claim(&mut claims, &dest, identifier, &mut plan) {
            continue;
        }
        copies.push((identifier, source, dest));
    }

    let mut moves = Vec::new();
    for identifier in &classification.in_use {
        if classification.is_shared(identifier) {
            continue;
        }
        if target_call
            .as_deref()
            .is_some_and(|call| is_under(identifier, call))
        {
            continue;
        }
        let Some(dest) = destination(ctx, target_call.as_deref(), identifier, &mut plan) else {
            continue;
        };
        let Some(source) = ctx.inventory.get(identifier) else {
            not_found(&mut plan, identifier, "relocate");
            continue;
        };
        if source == dest.path || !claim(&mut claims, &dest, identifier, &mut plan) {
            continue;
        }
        moves.push((identifier, source.to_path_buf(), dest));
    }

    // Copy-in
    for (identifier, source, dest) in copies {
        tracing::info!("Transferring \"{}\" to \"{}\"", identifier, dest.reference);
        plan.stats.copied += 1;
        plan.push(Operation::CopyFile {
            from: source,
            to: dest.path,
        });
        record_transfer(&mut transfers, identifier, dest.reference);
    }

    // Delete
    for identifier in &classification.unused {
        if classification.is_shared(identifier) {
            continue;
        }
        if let Some(owner) = claims.get(identifier) {
            tracing::info!("Keeping \"{}\" as the destination of \"{}\"", identifier, owner);
            continue;
        }
        let locations = ctx.layout.target_locations(identifier);
        if locations.is_empty() {
            not_found(&mut plan, identifier, "delete");
            continue;
        }
        tracing::info!("Removing unused \"{}\"", identifier);
        for path in locations {
            plan.stats.deleted += 1;
            plan.push(Operation::DeleteFile { path });
        }
    }

    // Relocate
    for (identifier, source, dest) in moves {
        tracing::info!("Relocating \"{}\" to \"{}\"", identifier, dest.reference);
        plan.stats.moved += 1;
        plan.push(Operation::MoveFile {
            from: source,
            to: dest.path,
        });
        record_transfer(&mut transfers, identifier, dest.reference);
    }

    plan += plan_rewrites(&ctx.layout.root, &ctx.target_records, &transfers)?;

    Ok((plan, transfers))
}

/// Claim `dest` for `identifier`. Returns false after reporting a conflict
/// when another image holds it already.
fn claim(
    claims: &mut BTreeMap<String, String>,
    dest: &Destination,
    identifier: &str,
    plan: &mut MigrationPlan,
) -> bool {
    match claims.entry(dest.reference.clone()) {
        Entry::Vacant(entry) => {
            entry.insert(identifier.to_string());
            true
        }
        Entry::Occupied(entry) => {
            tracing::error!(
                "\"{}\" would overwrite \"{}\" at \"{}\"",
                identifier,
                entry.get(),
                dest.reference
            );
            plan.issues.push(Issue::from(DestinationConflictIssue {
                identifier: identifier.to_string(),
                destination: dest.reference.clone(),
                claimed_by: entry.get().clone(),
            }));
            false
        }
    }
}

/// Destination of `identifier` inside the target directory, or `None` after
/// reporting why it cannot be placed.
fn destination(
    ctx: &ImageContext,
    target_call: Option<&str>,
    identifier: &str,
    plan: &mut MigrationPlan,
) -> Option<Destination> {
    let (Some(target_call), Some(suffix)) =
        (target_call, storage_suffix(identifier, &ctx.config.markers))
    else {
        tracing::error!("Cannot resolve a storage path for \"{}\"", identifier);
        plan.issues.push(Issue::from(UnresolvedReferencePathIssue {
            identifier: identifier.to_string(),
        }));
        return None;
    };

    Some(Destination {
        path: join_suffix(&ctx.target_dir, suffix),
        reference: format!("{}/{}", target_call, suffix),
    })
}

fn join_suffix(dir: &Path, suffix: &str) -> PathBuf {
    suffix
        .split('/')
        .filter(|s| !s.is_empty())
        .fold(dir.to_path_buf(), |path, segment| path.join(segment))
}

fn is_under(identifier: &str, call: &str) -> bool {
    identifier
        .strip_prefix(call)
        .is_some_and(|rest| rest.starts_with('/'))
}

fn not_found(plan: &mut MigrationPlan, identifier: &str, step: &'static str) {
    tracing::warn!("Image \"{}\" not found during {}", identifier, step);
    plan.issues.push(Issue::from(ResourceNotFoundIssue {
        identifier: identifier.to_string(),
        step,
    }));
}

fn record_transfer(transfers: &mut Vec<TransferRecord>, from: &str, to: String) {
    if from != to {
        transfers.push(TransferRecord {
            from: from.to_string(),
            to,
        });
    }
}
