mod analysis;
mod commands;
mod exit_code;
mod manifest;
mod progress;

use clap::{Parser, Subcommand};
use colored::Colorize;
use exit_code::ExitCode;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "doclint")]
#[command(about = "Lint and fix XML documentation comments", long_about = None)]
#[command(version)]
#[allow(clippy::struct_excessive_bools)]
struct Cli {
    /// Path to the doclint config file
    #[arg(short, long, value_name = "FILE", global = true)]
    config: Option<PathBuf>,

    /// Force colored output even when not a TTY
    #[arg(long, global = true, conflicts_with = "no_color")]
    color: bool,

    /// Disable colored output
    #[arg(long, global = true, conflicts_with = "color")]
    no_color: bool,

    /// Suppress all output except errors
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Suppress progress indicators (spinners)
    #[arg(long, global = true)]
    no_progress: bool,

    #[command(subcommand)]
    command: Commands,
}

/// Output verbosity options
#[derive(Debug, Clone, Copy)]
pub struct OutputOptions {
    /// Whether to show progress indicators (spinners)
    pub show_progress: bool,
    /// Whether to show informational output (success messages, summaries)
    pub show_info: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Check documentation comments of the files in the manifest and the
    /// headers of the files matched by the config
    Lint {
        /// Output format
        #[arg(short, long, value_enum, default_value = "human")]
        format: OutputFormat,

        /// Declaration manifest (overrides the config's `manifest`)
        #[arg(short, long, value_name = "FILE")]
        manifest: Option<PathBuf>,

        /// Automatically fix issues that have safe fixes
        #[arg(long, conflicts_with = "fix_dry_run")]
        fix: bool,

        /// Show what would be fixed without modifying files
        #[arg(long, conflicts_with = "fix")]
        fix_dry_run: bool,

        /// Also report diagnostics that are hidden by default
        #[arg(long)]
        show_hidden: bool,
    },

    /// List the available rules and their default severities
    Rules {
        /// Output format
        #[arg(short, long, value_enum, default_value = "human")]
        format: OutputFormat,
    },
}

#[derive(Debug, Clone, Copy, clap::ValueEnum)]
pub enum OutputFormat {
    /// Human-readable output with colors
    Human,
    /// JSON output for tooling
    Json,
    /// GitHub Actions workflow commands for PR annotations
    Github,
}

fn main() {
    let cli = Cli::parse();

    init_tracing();
    configure_colors(cli.color, cli.no_color);

    let output_opts = OutputOptions {
        show_progress: !cli.quiet && !cli.no_progress,
        show_info: !cli.quiet,
    };

    let result = match cli.command {
        Commands::Lint {
            format,
            manifest,
            fix,
            fix_dry_run,
            show_hidden,
        } => commands::lint::run(
            commands::lint::LintArgs {
                config_path: cli.config,
                manifest,
                format,
                fix,
                fix_dry_run,
                show_hidden,
            },
            output_opts,
        ),
        Commands::Rules { format } => commands::rules::run(format),
    };

    match result {
        Ok(()) => ExitCode::Success.exit(),
        Err(error) => {
            eprintln!("{} {}", "error:".red().bold(), format!("{error:#}").red());
            ExitCode::for_error(&error).exit();
        }
    }
}

/// Initialize tracing, silent unless `RUST_LOG` is set
fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("off")),
        )
        .with_writer(std::io::stderr)
        .init();
}

/// Configure colored output based on flags and environment variables.
///
/// Priority order (highest to lowest):
/// 1. `--color` flag (force colors on)
/// 2. `--no-color` flag (force colors off)
/// 3. `NO_COLOR` environment variable (if set to any value, disable colors)
/// 4. `CLICOLOR_FORCE` environment variable (if set to non-zero, force colors)
/// 5. `CLICOLOR` environment variable (if set to "0", disable colors)
/// 6. Default: colors enabled if stdout is a TTY (handled by `colored` crate)
///
/// See: <https://no-color.org/> and <https://bixense.com/clicolors/>
fn configure_colors(force_color: bool, no_color: bool) {
    use colored::control;

    if force_color {
        control::set_override(true);
    } else if no_color {
        control::set_override(false);
    } else if std::env::var_os("NO_COLOR").is_some() {
        // NO_COLOR: if present (regardless of value), disable colors
        control::set_override(false);
    } else if let Ok(val) = std::env::var("CLICOLOR_FORCE") {
        // CLICOLOR_FORCE: if set to non-empty, non-zero value, force colors
        if !val.is_empty() && val != "0" {
            control::set_override(true);
        }
    } else if let Ok(val) = std::env::var("CLICOLOR") {
        // CLICOLOR: if set to "0", disable colors
        if val == "0" {
            control::set_override(false);
        }
    }
    // Default: let the colored crate decide based on TTY detection
}
