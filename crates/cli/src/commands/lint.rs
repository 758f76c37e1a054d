use crate::analysis::{FileReport, LintTargets};
use crate::commands::common::CommandContext;
use crate::commands::fix::{collect_fixes, display_dry_run, write_fixes};
use crate::exit_code::ExitCode;
use crate::{OutputFormat, OutputOptions};
use anyhow::Result;
use colored::Colorize;
use doclint_linter::{Analyzer, DiagnosticSeverity, LintDiagnostic};
use std::path::PathBuf;

/// Options of the `lint` command
#[derive(Debug, Clone)]
#[allow(clippy::struct_excessive_bools)]
pub struct LintArgs {
    pub config_path: Option<PathBuf>,
    pub manifest: Option<PathBuf>,
    pub format: OutputFormat,
    pub fix: bool,
    pub fix_dry_run: bool,
    pub show_hidden: bool,
}

/// Totals over every reported diagnostic
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct LintTotals {
    pub files: usize,
    pub errors: usize,
    pub warnings: usize,
}

#[tracing::instrument(skip_all, fields(manifest = ?args.manifest))]
pub fn run(args: LintArgs, output: OutputOptions) -> Result<()> {
    let start_time = std::time::Instant::now();
    let human = matches!(args.format, OutputFormat::Human);

    let ctx = CommandContext::load(args.config_path.clone())?;
    if let Some(config_path) = &ctx.config_path {
        tracing::info!(config = %config_path.display(), "Using config");
    }
    let analyzer = Analyzer::with_config(ctx.settings(), ctx.lint_config()?);

    let spinner = crate::progress::spinner(
        "Loading sources and declarations...",
        human && output.show_progress,
    );
    let load_start = std::time::Instant::now();
    let mut targets = LintTargets::load(&ctx, args.manifest.as_deref())?;
    spinner.finish_and_clear();
    let load_duration = load_start.elapsed();

    if human && output.show_info {
        println!(
            "{}",
            format!("✓ Loaded {} file(s)", targets.files.len()).green()
        );
    }

    // Handle fix modes
    let mut fixes_applied = 0;
    if args.fix || args.fix_dry_run {
        let spinner =
            crate::progress::spinner("Collecting fixable issues...", human && output.show_progress);
        let fixes = collect_fixes(&targets, &analyzer)?;
        spinner.finish_and_clear();
        fixes_applied = fixes.iter().map(|f| f.outcome.applied).sum();

        if fixes_applied > 0 {
            if args.fix_dry_run {
                display_dry_run(&fixes, args.format);
            } else {
                write_fixes(&fixes, args.format)?;
                // Reload to pick up fixed files
                targets = LintTargets::load(&ctx, args.manifest.as_deref())?;
            }
        }
    }

    let spinner = crate::progress::spinner("Running lint rules...", human && output.show_progress);
    let lint_start = std::time::Instant::now();
    let reports = targets.analyze(&analyzer);
    spinner.finish_and_clear();
    let lint_duration = lint_start.elapsed();

    let reports = visible_reports(reports, args.show_hidden);
    let totals = totals(&reports);

    match args.format {
        OutputFormat::Human => print_human(&reports),
        OutputFormat::Json => println!("{}", json_output(&reports, totals)),
        OutputFormat::Github => print_github(&reports),
    }

    if human && output.show_info {
        println!();

        if fixes_applied > 0 && args.fix {
            println!(
                "{}",
                format!("✓ Fixed {fixes_applied} issue(s)").green().bold()
            );
        } else if fixes_applied > 0 && args.fix_dry_run {
            println!(
                "{}",
                format!("ℹ Would fix {fixes_applied} issue(s)").cyan().bold()
            );
        }

        let LintTotals {
            errors, warnings, ..
        } = totals;
        if errors == 0 && warnings == 0 {
            println!("{}", "✓ No documentation issues found!".green().bold());
        } else if errors == 0 {
            println!(
                "{}",
                format!("✓ Linting passed with {warnings} warning(s)")
                    .yellow()
                    .bold()
            );
        } else if warnings == 0 {
            println!("{}", format!("✗ Found {errors} error(s)").red());
        } else {
            println!(
                "{}",
                format!("✗ Found {errors} error(s) and {warnings} warning(s)").red()
            );
        }
        println!(
            "  {} load: {:.2}s, linting: {:.2}s, total: {:.2}s",
            "⏱".dimmed(),
            load_duration.as_secs_f64(),
            lint_duration.as_secs_f64(),
            start_time.elapsed().as_secs_f64()
        );
    }

    if totals.errors > 0 {
        ExitCode::LintError.exit();
    }

    Ok(())
}

/// Drop hidden diagnostics unless asked for, and files left without any
fn visible_reports(reports: Vec<FileReport>, show_hidden: bool) -> Vec<FileReport> {
    reports
        .into_iter()
        .map(|mut report| {
            if !show_hidden {
                report
                    .diagnostics
                    .retain(|d| d.severity != DiagnosticSeverity::Hidden);
            }
            report
        })
        .filter(|report| !report.diagnostics.is_empty())
        .collect()
}

fn totals(reports: &[FileReport]) -> LintTotals {
    let all = || reports.iter().flat_map(|report| &report.diagnostics);
    LintTotals {
        files: reports.len(),
        errors: all()
            .filter(|d| d.severity == DiagnosticSeverity::Error)
            .count(),
        warnings: all()
            .filter(|d| d.severity != DiagnosticSeverity::Error)
            .count(),
    }
}

fn print_human(reports: &[FileReport]) {
    for report in reports {
        for diag in &report.diagnostics {
            let (label, message) = match diag.severity {
                DiagnosticSeverity::Error => ("error:".red().bold(), diag.message.red()),
                DiagnosticSeverity::Warning => ("warning:".yellow().bold(), diag.message.yellow()),
                DiagnosticSeverity::Hidden => ("hidden:".dimmed(), diag.message.normal()),
            };
            println!(
                "\n{}:{}:{}: {} {}",
                report.display, diag.location.line, diag.location.column, label, message
            );
            println!("  {}: {}", "rule".dimmed(), diag.rule.dimmed());
            for related in &diag.related {
                println!(
                    "  {}: {}:{}:{}",
                    "related".dimmed(),
                    report.display,
                    related.line,
                    related.column
                );
            }
        }
    }
}

fn diag_to_json(diag: &LintDiagnostic) -> serde_json::Value {
    serde_json::json!({
        "message": diag.message,
        "severity": diag.severity.to_string(),
        "rule": diag.rule,
        "fixable": diag.has_fix(),
        "location": { "line": diag.location.line, "column": diag.location.column },
        "related": diag
            .related
            .iter()
            .map(|r| serde_json::json!({ "line": r.line, "column": r.column }))
            .collect::<Vec<_>>(),
    })
}

fn json_output(reports: &[FileReport], totals: LintTotals) -> serde_json::Value {
    let files: Vec<serde_json::Value> = reports
        .iter()
        .map(|report| {
            let (errors, warnings): (Vec<&LintDiagnostic>, Vec<&LintDiagnostic>) = report
                .diagnostics
                .iter()
                .partition(|d| d.severity == DiagnosticSeverity::Error);
            serde_json::json!({
                "file": report.display,
                "errors": errors.into_iter().map(diag_to_json).collect::<Vec<_>>(),
                "warnings": warnings.into_iter().map(diag_to_json).collect::<Vec<_>>(),
            })
        })
        .collect();

    serde_json::json!({
        "success": totals.errors == 0,
        "files": files,
        "stats": {
            "total_files": totals.files,
            "total_errors": totals.errors,
            "total_warnings": totals.warnings
        }
    })
}

fn print_github(reports: &[FileReport]) {
    for report in reports {
        for diag in &report.diagnostics {
            let command = match diag.severity {
                DiagnosticSeverity::Error => "error",
                DiagnosticSeverity::Warning => "warning",
                DiagnosticSeverity::Hidden => "notice",
            };
            println!(
                "::{command} file={},line={},col={}::{} [{}]",
                report.display, diag.location.line, diag.location.column, diag.message, diag.rule
            );
        }
    }
}
