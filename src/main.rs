//! Import Sorter - moves imported photos and videos into a dated tree
//!
//! Thin command-line wrapper around [`import_sorter::Organizer`]: parses
//! arguments, loads configuration, runs the organizer and renders the
//! summary.

use anyhow::{Context, Result};
use clap::Parser;
use import_sorter::logging::{self, LogOptions};
use import_sorter::{Cli, Config, OperationResult, Organizer};
use std::path::{Path, PathBuf};
use tracing::{error, info};

// CLI Output Module
mod cli_output {
    //! Console styling for the run summary

    use crossterm::{
        ExecutableCommand,
        style::{Color, Print, Stylize, style},
    };
    use std::io::stdout;

    /// CLI theme colors
    pub struct CliTheme;

    impl CliTheme {
        pub const SUCCESS: Color = Color::Green;
        pub const WARNING: Color = Color::Yellow;
        pub const ERROR: Color = Color::Red;
        pub const HINT: Color = Color::DarkGrey;
        pub const ACCENT: Color = Color::Cyan;
    }

    pub fn print_separator() {
        let _ = stdout().execute(Print(format!("{}\n", "─".repeat(60))));
    }

    pub fn print_title(title: &str) {
        let _ = stdout().execute(Print(format!("{}\n", title.bold())));
    }

    pub fn print_warning(msg: &str) {
        let _ = stdout().execute(Print(style("⚠ ").with(CliTheme::WARNING).bold()));
        let _ = stdout().execute(Print(format!("{}\n", msg)));
    }

    /// Print a counter line
    pub fn print_stat(key: &str, value: usize, color: Color) {
        let _ = stdout().execute(Print("  - "));
        let _ = stdout().execute(Print(style(key).with(CliTheme::HINT)));
        let _ = stdout().execute(Print(": "));
        let _ = stdout().execute(Print(style(value.to_string()).with(color).bold()));
        let _ = stdout().execute(Print("\n"));
    }

    /// Print one indented detail line
    pub fn print_item(icon: &str, color: Color, text: &str) {
        let _ = stdout().execute(Print("     "));
        let _ = stdout().execute(Print(style(icon).with(color).bold()));
        let _ = stdout().execute(Print(format!(" {}\n", text)));
    }

    pub fn print_log_path(path: Option<&str>) {
        let _ = stdout().execute(Print(style("  Log saved to: ").with(CliTheme::HINT)));
        match path {
            Some(path) => {
                let _ = stdout().execute(Print(format!("{}\n", path)));
            }
            None => {
                let _ = stdout().execute(Print(style("not written\n").with(CliTheme::ERROR)));
            }
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let _guard = logging::init(LogOptions {
        verbose: cli.verbose,
        json: cli.json_log,
        file: cli.log_file.as_deref(),
    })
    .context("failed to set up logging")?;

    info!(version = env!("CARGO_PKG_VERSION"), "Import Sorter starting");

    let config = load_config(&cli)?;
    if cli.verbose {
        info!(?config, "Configuration loaded");
    }
    config.validate()?;

    let sidecar_label = config.sidecar_label();
    let preview = config.non_media_preview;

    match Organizer::new(config).organize(&cli.source) {
        Ok(result) => {
            if cli.json {
                println!("{}", serde_json::to_string_pretty(&result)?);
            } else {
                print_summary(&result, &sidecar_label, preview);
            }
            Ok(())
        }
        Err(e) => {
            error!(error = %e, "Organizing failed");
            eprintln!("ERROR: {}", e);
            std::process::exit(1);
        }
    }
}

/// Resolve config path - `name` also finds `name.toml`
fn resolve_config_path(config_path: &Path) -> PathBuf {
    if config_path.exists() || config_path.extension().is_some() {
        return config_path.to_path_buf();
    }
    let with_extension = config_path.with_extension("toml");
    if with_extension.exists() {
        with_extension
    } else {
        config_path.to_path_buf()
    }
}

/// Load configuration from file or CLI arguments
fn load_config(cli: &Cli) -> Result<Config> {
    let config = match cli.config {
        Some(ref config_path) => {
            let resolved = resolve_config_path(config_path);
            info!(config_file = %resolved.display(), "Loading configuration from file");
            cli.merge_with_config(Config::load_from_file(&resolved)?)
        }
        None => cli.to_config(),
    };
    Ok(config)
}

fn print_summary(result: &OperationResult, sidecar_label: &str, preview: usize) {
    use cli_output::*;

    print_separator();
    print_title("Summary:");
    print_stat("Scanned files", result.scanned, CliTheme::ACCENT);
    print_stat("Moved files", result.moved, CliTheme::SUCCESS);
    if result.dry_run {
        print_stat("Would move", result.planned, CliTheme::ACCENT);
    }
    print_stat(
        &format!("Skipped {} files", sidecar_label),
        result.skipped_sidecar,
        CliTheme::WARNING,
    );
    print_stat("Skipped non-media files", result.skipped_non_media, CliTheme::WARNING);
    for path in result.skipped_non_media_files.iter().take(preview) {
        print_item("⊘", CliTheme::HINT, &path.display().to_string());
    }
    print_stat("Conflicts", result.conflicts.len(), CliTheme::WARNING);
    for c in &result.conflicts {
        print_item(
            "≡",
            CliTheme::WARNING,
            &format!("{}  ->  {}", c.source.display(), c.destination.display()),
        );
    }
    print_stat("Errors", result.errors.len(), CliTheme::ERROR);
    for e in &result.errors {
        print_item("✗", CliTheme::ERROR, &format!("{}: {}", e.source.display(), e.message));
    }

    print_separator();
    let log_path = result.log_path.as_ref().map(|p| p.display().to_string());
    print_log_path(log_path.as_deref());

    if result.dry_run {
        print_warning("No files were changed (dry run mode).");
    }
}
