//! CLI argument parsing with clap

use crate::config::{Config, MonthNames};
use clap::Parser;
use std::path::PathBuf;

/// Import Sorter - moves imported photos and videos into a dated tree
///
/// Files are placed under <BASE>/<YYYY>/<NN_month>/ using the EXIF capture
/// time when present and the file modification time otherwise. Existing
/// files are never overwritten.
#[derive(Parser, Debug)]
#[command(name = "import-sorter")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Source directory to scan
    pub source: PathBuf,

    /// Path to configuration file (TOML format)
    ///
    /// Settings from the file are used as defaults; CLI arguments override them.
    #[arg(short = 'C', long)]
    pub config: Option<PathBuf>,

    /// Base target directory
    #[arg(short, long, env = "IMPORT_SORTER_BASE")]
    pub base: Option<PathBuf>,

    /// Month folder names
    #[arg(short, long, value_enum)]
    pub months: Option<MonthNames>,

    /// Dry run mode - show what would be moved without moving anything
    #[arg(short = 'n', long)]
    pub dry_run: bool,

    /// Show per-file decisions
    #[arg(short, long)]
    pub verbose: bool,

    /// Print the run summary as JSON
    #[arg(long)]
    pub json: bool,

    /// Output log format as JSON
    #[arg(long)]
    pub json_log: bool,

    /// Also write the diagnostic log to this file
    #[arg(long)]
    pub log_file: Option<PathBuf>,
}

impl Cli {
    /// Merge CLI arguments with config from file
    /// CLI arguments take precedence over config file settings
    pub fn merge_with_config(&self, mut config: Config) -> Config {
        if let Some(ref base) = self.base {
            config.base_dir = base.clone();
        }
        if let Some(months) = self.months {
            config.month_names = months;
        }
        if self.dry_run {
            config.dry_run = true;
        }
        if self.verbose {
            config.verbose = true;
        }

        config
    }

    /// Convert CLI arguments to Config (when no config file is used)
    pub fn to_config(&self) -> Config {
        self.merge_with_config(Config::default())
    }
}

/// Purge Sidecars - deletes capture sidecar files below a directory
#[derive(Parser, Debug)]
#[command(name = "purge-sidecars")]
#[command(author, version, about, long_about = None)]
pub struct PurgeCli {
    /// Directory to clean recursively
    pub root: PathBuf,

    /// Sidecar extension to delete, without the dot (repeatable)
    #[arg(short, long = "ext", default_value = "aae")]
    pub extensions: Vec<String>,

    /// List what would be deleted without deleting
    #[arg(short = 'n', long)]
    pub dry_run: bool,

    /// Verbose output
    #[arg(short, long)]
    pub verbose: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definitions() {
        Cli::command().debug_assert();
        PurgeCli::command().debug_assert();
    }

    #[test]
    fn test_cli_overrides_config() {
        let cli = Cli::try_parse_from([
            "import-sorter",
            "/import",
            "--base",
            "/sorted",
            "--months",
            "english",
            "--dry-run",
        ])
        .unwrap();

        let mut file_config = Config::with_base_dir("/from-file");
        file_config.verbose = true;
        let config = cli.merge_with_config(file_config);

        assert_eq!(cli.source, PathBuf::from("/import"));
        assert_eq!(config.base_dir, PathBuf::from("/sorted"));
        assert_eq!(config.month_names, MonthNames::English);
        assert!(config.dry_run);
        assert!(config.verbose);
    }

    #[test]
    fn test_cli_keeps_config_when_unset() {
        let cli = Cli::try_parse_from(["import-sorter", "/import"]).unwrap();
        let config = cli.merge_with_config(Config::with_base_dir("/from-file"));
        assert_eq!(config.base_dir, PathBuf::from("/from-file"));
        assert!(!config.dry_run);
        assert_eq!(config.month_names, MonthNames::Dutch);
    }

    #[test]
    fn test_purge_cli_defaults() {
        let cli = PurgeCli::try_parse_from(["purge-sidecars", "/import"]).unwrap();
        assert_eq!(cli.extensions, vec!["aae".to_string()]);
        assert!(!cli.dry_run);

        let cli =
            PurgeCli::try_parse_from(["purge-sidecars", "/import", "--ext", "aae", "--ext", "xmp"])
                .unwrap();
        assert_eq!(cli.extensions, vec!["aae".to_string(), "xmp".to_string()]);
    }
}
