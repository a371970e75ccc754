//! Purge Sidecars - deletes capture sidecar files below a directory

use anyhow::{Context, Result};
use clap::Parser;
use import_sorter::logging::{self, LogOptions};
use import_sorter::{PurgeCli, purge_sidecars};
use tracing::error;

fn main() -> Result<()> {
    let cli = PurgeCli::parse();

    let _guard = logging::init(LogOptions {
        verbose: cli.verbose,
        ..LogOptions::default()
    })
    .context("failed to set up logging")?;

    let result = match purge_sidecars(&cli.root, &cli.extensions, cli.dry_run) {
        Ok(result) => result,
        Err(e) => {
            error!(error = %e, "Purge failed");
            eprintln!("ERROR: {}", e);
            std::process::exit(1);
        }
    };

    let verb = if cli.dry_run { "Would delete" } else { "Deleted" };
    for path in &result.deleted {
        println!("{}: {}", verb, path.display());
    }
    for failure in &result.failed {
        println!("Failed to delete {}: {}", failure.source.display(), failure.message);
    }

    let label = cli.extensions.join("/").to_uppercase();
    if cli.dry_run {
        println!("\nTotal .{} files that would be deleted: {}", label, result.deleted.len());
    } else {
        println!("\nTotal .{} files deleted: {}", label, result.deleted.len());
    }

    Ok(())
}
