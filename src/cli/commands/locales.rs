use anyhow::{Result, bail};

use super::{
    CommandResult, CommandSummary, LocalesSummary,
    helper::{finish, load_settings, resolve_path},
};
use crate::{
    actions::migrate_locales,
    cli::{args::LocalesArgs, logging::init_logging},
    config::resolve_against,
    core::{LocaleContext, ProjectLayout},
    report::write_locale_reports,
};

pub fn locales(args: LocalesArgs) -> Result<CommandResult> {
    let settings = load_settings(&args.common)?;

    let mut config = settings.config.locales.clone();
    if let Some(target_name) = args.target_name {
        config.target_name = target_name;
    }
    if config.target_name.is_empty() {
        bail!("No target file name given (use --target-name or 'locales.targetName')");
    }
    if args.target_path.is_none() && config.target_path.is_empty() {
        bail!("No target locale directory given (use --target-path or 'locales.targetPath')");
    }
    let target_dir = resolve_path(
        args.target_path.as_deref(),
        &settings.root,
        &config.target_path,
    );
    let original_dir = resolve_against(&settings.root, &config.original_path);

    let log_file = init_logging(&settings.work_dir, args.common.log_level)?;
    tracing::info!(
        "Locale transfer for {} from {} into {} ({})",
        settings.config.target_modules.join(", "),
        original_dir.display(),
        target_dir.display(),
        if settings.apply { "apply" } else { "dry-run" }
    );

    let layout = ProjectLayout::from_config(&settings.root, &settings.config);
    let ctx = LocaleContext::build(layout, config, &original_dir, &target_dir)?;
    let plan = migrate_locales(&ctx)?;
    plan.run(settings.apply)?;

    let mut issues = ctx.issues.clone();
    issues.extend(plan.issues.iter().cloned());
    let reports = write_locale_reports(&settings.work_dir, &ctx.classification)?;
    tracing::info!("Locale transfer finished: {:?}", plan.stats);

    let c = &ctx.classification;
    let summary = CommandSummary::Locales(LocalesSummary {
        move_count: c.move_keys.len(),
        shared_count: c.shared.len(),
        fragmented_count: c.fragmented.len(),
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
