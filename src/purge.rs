//! Recursive deletion of capture sidecar files

use crate::error::{Error, Result};
use crate::report::FileError;
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{info, warn};
use walkdir::WalkDir;

/// Outcome of a sidecar purge
#[derive(Debug, Clone, Default, Serialize)]
pub struct PurgeResult {
    pub dry_run: bool,
    /// Deleted files, or the files a dry run would delete
    pub deleted: Vec<PathBuf>,
    pub failed: Vec<FileError>,
}

/// Delete every file under `root` whose extension is one of `extensions`.
///
/// Matching is case-insensitive. A failed deletion is recorded and the
/// walk continues.
pub fn purge_sidecars(root: &Path, extensions: &[String], dry_run: bool) -> Result<PurgeResult> {
    if !root.is_dir() {
        return Err(Error::SourceNotFound {
            path: root.to_path_buf(),
        });
    }

    let mut result = PurgeResult {
        dry_run,
        ..PurgeResult::default()
    };

    for entry in WalkDir::new(root).sort_by_file_name() {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                warn!(error = %e, "Skipping unreadable entry");
                continue;
            }
        };
        if !entry.file_type().is_file() || !is_sidecar(entry.path(), extensions) {
            continue;
        }

        let path = entry.into_path();
        if dry_run {
            info!(?path, "Would delete sidecar");
            result.deleted.push(path);
            continue;
        }

        match fs::remove_file(&path) {
            Ok(()) => {
                info!(?path, "Deleted sidecar");
                result.deleted.push(path);
            }
            Err(e) => {
                warn!(?path, error = %e, "Failed to delete sidecar");
                result.failed.push(FileError {
                    source: path,
                    message: e.to_string(),
                });
            }
        }
    }

    Ok(result)
}

fn is_sidecar(path: &Path, extensions: &[String]) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|ext| extensions.iter().any(|s| s.eq_ignore_ascii_case(ext)))
}
