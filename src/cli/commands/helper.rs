use std::{
    env, fs,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result, bail};

use super::{CommandResult, CommandSummary};
use crate::{
    cli::args::CommonArgs,
    config::{CONFIG_FILE_NAME, Config, load_config, resolve_against},
    issues::{Issue, Severity, sort_issues},
};

/// Settings shared by the migration commands after merging CLI arguments
/// (highest priority), config file and defaults.
#[derive(Debug)]
pub struct RunSettings {
    pub root: PathBuf,
    pub config: Config,
    pub work_dir: PathBuf,
    pub apply: bool,
}

pub fn load_settings(common: &CommonArgs) -> Result<RunSettings> {
    let root = common.root.clone().unwrap_or_else(|| PathBuf::from("."));
    let root = fs::canonicalize(&root)
        .with_context(|| format!("Project root not found: {:?}", root))?;

    let mut config = load_config(&root)?.config;
    if !common.modules.is_empty() {
        config.target_modules = common.modules.clone();
    }
    if !common.exclude_dirs.is_empty() {
        config.exclude_dirs = common.exclude_dirs.clone();
    }
    if config.target_modules.is_empty() {
        bail!(
            "No target modules given (use --modules or 'targetModules' in {})",
            CONFIG_FILE_NAME
        );
    }

    let work_dir = match &common.work_dir {
        Some(dir) => dir.clone(),
        None => {
            let cwd = env::current_dir().context("Failed to read current directory")?;
            resolve_against(&cwd, &config.work_dir)
        }
    };

    Ok(RunSettings {
        root,
        config,
        work_dir,
        apply: common.apply,
    })
}

/// A CLI path is taken as given; a config path is relative to the project root.
pub fn resolve_path(cli: Option<&Path>, root: &Path, configured: &str) -> PathBuf {
    match cli {
        Some(path) => path.to_path_buf(),
        None => resolve_against(root, configured),
    }
}

pub fn finish(
    summary: CommandSummary,
    mut issues: Vec<Issue>,
    source_files_checked: usize,
    log_file: Option<PathBuf>,
) -> CommandResult {
    sort_issues(&mut issues);
    // The same file may be reported while loading and while migrating
    issues.dedup();

    let error_count = issues
        .iter()
        .filter(|i| i.severity() == Severity::Error)
        .count();
    let warning_count = issues.len() - error_count;

    CommandResult {
        summary,
        error_count,
        warning_count,
        issues,
        source_files_checked,
        log_file,
    }
}
