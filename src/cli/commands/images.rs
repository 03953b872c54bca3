use anyhow::Result;

use super::{
    CommandResult, CommandSummary, ImagesSummary,
    helper::{finish, load_settings, resolve_path},
};
use crate::{
    actions::migrate_assets,
    cli::{args::ImagesArgs, logging::init_logging},
    core::{ImageContext, ProjectLayout},
    report::write_image_reports,
};

pub fn images(args: ImagesArgs) -> Result<CommandResult> {
    let settings = load_settings(&args.common)?;
    let log_file = init_logging(&settings.work_dir, args.common.log_level)?;

    let mut config = settings.config.images.clone();
    if let Some(target_base) = args.target_base {
        config.target_base = target_base;
    }
    if !args.target_excludes.is_empty() {
        config.target_excludes = args.target_excludes;
    }
    if let Some(shared_detection) = args.shared_detection {
        config.shared_detection = shared_detection;
    }
    let target_dir = resolve_path(
        args.target_dir.as_deref(),
        &settings.root,
        &config.target_dir,
    );

    tracing::info!(
        "Image transfer for {} into {} ({})",
        settings.config.target_modules.join(", "),
        target_dir.display(),
        if settings.apply { "apply" } else { "dry-run" }
    );

    let layout = ProjectLayout::from_config(&settings.root, &settings.config);
    let ctx = ImageContext::build(layout, config, target_dir)?;
    let (plan, transfers) = migrate_assets(&ctx)?;
    plan.run(settings.apply)?;

    let mut issues = ctx.issues.clone();
    issues.extend(plan.issues.iter().cloned());
    let reports = write_image_reports(&settings.work_dir, &ctx.classification, &issues)?;
    tracing::info!("Image transfer finished: {:?}", plan.stats);

    let c = &ctx.classification;
    let summary = CommandSummary::Images(ImagesSummary {
        in_use_count: c.in_use.len(),
        unused_count: c.unused.len(),
        dependent_count: c.dependent.len(),
        shared_count: c.shared.len(),
        transfer_count: transfers.len(),
        stats: plan.stats.clone(),
        is_apply: settings.apply,
        reports,
    });

    Ok(finish(
        summary,
        issues,
        ctx.source_files_checked(),
        Some(log_file),
    ))
}
