use std::path::PathBuf;

use crate::{actions::ActionStats, issues::Issue};

#[derive(Debug)]
pub enum CommandSummary {
    Images(ImagesSummary),
    Locales(LocalesSummary),
    Init(InitSummary),
}

#[derive(Debug)]
pub struct ImagesSummary {
    pub in_use_count: usize,
    pub unused_count: usize,
    pub dependent_count: usize,
    pub shared_count: usize,
    pub transfer_count: usize,
    pub stats: ActionStats,
    pub is_apply: bool,
    pub reports: Vec<PathBuf>,
}

#[derive(Debug)]
pub struct LocalesSummary {
    pub move_count: usize,
    pub shared_count: usize,
    pub fragmented_count: usize,
    pub stats: ActionStats,
    pub is_apply: bool,
    pub reports: Vec<PathBuf>,
}

#[derive(Debug)]
pub struct InitSummary {
    pub path: PathBuf,
}

/// Result of running fstransfer commands
pub struct CommandResult {
    pub summary: CommandSummary,
    pub error_count: usize,
    pub warning_count: usize,
    /// All non-fatal issues of the run, sorted.
    pub issues: Vec<Issue>,
    /// Number of source files scanned across all modules.
    pub source_files_checked: usize,
    /// Run log the events were appended to; `None` for `init`.
    pub log_file: Option<PathBuf>,
}

