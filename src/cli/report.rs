//! Terminal output for command results.
//!
//! Issues are printed cargo-style, followed by the command summary. Colors
//! come from `colored`, which honours `NO_COLOR`.

use std::io::{self, Write};

use colored::Colorize;

use super::commands::{CommandResult, CommandSummary, ImagesSummary, InitSummary, LocalesSummary};
use crate::issues::{Issue, Report, Severity};

/// Success mark for consistent output formatting.
pub const SUCCESS_MARK: &str = "\u{2713}"; // ✓

/// Failure mark for consistent output formatting.
pub const FAILURE_MARK: &str = "\u{2718}"; // ✘

/// Issues listed before the rest are summarised, unless verbose.
const MAX_ISSUES_DISPLAY: usize = 20;

pub fn print(result: &CommandResult, verbose: bool) {
    print_to(result, verbose, &mut io::stdout().lock());
}

pub fn print_to<W: Write>(result: &CommandResult, verbose: bool, writer: &mut W) {
    match &result.summary {
        CommandSummary::Init(summary) => {
            print_init(summary, writer);
            return;
        }
        CommandSummary::Images(summary) => {
            print_issues(&result.issues, verbose, writer);
            print_images(summary, writer);
        }
        CommandSummary::Locales(summary) => {
            print_issues(&result.issues, verbose, writer);
            print_locales(summary, writer);
        }
    }

    print_totals(result, writer);
    if let Some(log_file) = &result.log_file {
        let _ = writeln!(writer, "Log: {}", log_file.display());
    }
}

fn print_issues<W: Write>(issues: &[Issue], verbose: bool, writer: &mut W) {
    let shown = if verbose {
        issues.len()
    } else {
        issues.len().min(MAX_ISSUES_DISPLAY)
    };

    for issue in &issues[..shown] {
        print_issue(issue, writer);
    }

    if shown < issues.len() {
        let _ = writeln!(
            writer,
            "... and {} more (use {} to list all)\n",
            issues.len() - shown,
            "-v".cyan()
        );
    }
}

fn print_issue<W: Write>(issue: &Issue, writer: &mut W) {
    let severity_str = match issue.report_severity() {
        Severity::Error => "error".bold().red(),
        Severity::Warning => "warning".bold().yellow(),
    };

    let _ = writeln!(
        writer,
        "{}: \"{}\"  {}",
        severity_str,
        issue.message(),
        issue.report_rule().to_string().dimmed().cyan()
    );

    if let Some(details) = issue.details() {
        let _ = writeln!(writer, "  {} {} {}", "=".blue(), "note:".bold(), details);
    }

    let _ = writeln!(writer);
}

fn print_images<W: Write>(summary: &ImagesSummary, writer: &mut W) {
    let _ = writeln!(
        writer,
        "Images: {} in use, {} unused, {} dependent, {} shared",
        summary.in_use_count, summary.unused_count, summary.dependent_count, summary.shared_count
    );

    let stats = &summary.stats;
    let (verb, rewrite_verb) = if summary.is_apply {
        ("Transferred".green().bold(), "rewrote")
    } else {
        ("Would transfer".yellow().bold(), "would rewrite")
    };
    let _ = writeln!(
        writer,
        "{} {} image(s): {} copied, {} moved, {} deleted; {} {} reference(s) in {} source file(s)",
        verb,
        stats.copied + stats.moved + stats.deleted,
        stats.copied,
        stats.moved,
        stats.deleted,
        rewrite_verb,
        summary.transfer_count,
        stats.rewritten
    );
    if !summary.is_apply {
        let _ = writeln!(writer, "Run with {} to migrate these images.", "--apply".cyan());
    }
    print_reports(&summary.reports, writer);
}

fn print_locales<W: Write>(summary: &LocalesSummary, writer: &mut W) {
    let _ = writeln!(
        writer,
        "Locale keys: {} to move, {} shared, {} fragmented",
        summary.move_count, summary.shared_count, summary.fragmented_count
    );

    let stats = &summary.stats;
    let verb = if summary.is_apply {
        "Moved".green().bold()
    } else {
        "Would move".yellow().bold()
    };
    let _ = writeln!(
        writer,
        "{} {} key(s): {} line(s) removed, {} line(s) appended",
        verb, summary.move_count, stats.lines_removed, stats.lines_appended
    );
    if !summary.is_apply {
        let _ = writeln!(writer, "Run with {} to migrate these keys.", "--apply".cyan());
    }
    print_reports(&summary.reports, writer);
}

fn print_reports<W: Write>(reports: &[std::path::PathBuf], writer: &mut W) {
    for report in reports {
        let _ = writeln!(writer, "Report: {}", report.display());
    }
}

fn print_init<W: Write>(summary: &InitSummary, writer: &mut W) {
    let _ = writeln!(
        writer,
        "{} {}",
        SUCCESS_MARK.green(),
        format!("Created {}", summary.path.display()).green()
    );
}

fn print_totals<W: Write>(result: &CommandResult, writer: &mut W) {
    let total = result.error_count + result.warning_count;
    if total == 0 {
        let _ = writeln!(
            writer,
            "{} {}",
            SUCCESS_MARK.green(),
            format!(
                "Scanned {} source {} - no issues found",
                result.source_files_checked,
                if result.source_files_checked == 1 { "file" } else { "files" }
            )
            .green()
        );
        return;
    }

    let _ = writeln!(
        writer,
        "{} {} problems ({} {}, {} {})",
        FAILURE_MARK.red(),
        total,
        result.error_count,
        if result.error_count == 1 { "error" } else { "errors" }.red(),
        result.warning_count,
        if result.warning_count == 1 {
            "warning"
        } else {
            "warnings"
        }
        .yellow()
    );
}
