//! Run summary and the persisted move log

use crate::error::{Error, Result};
use serde::Serialize;
use std::fs::{self, OpenOptions};
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

/// Format of the timestamp in log names and headers
pub const LOG_TIMESTAMP_FORMAT: &str = "%Y%m%d_%H%M%S";

/// Media file left in place because its destination is occupied
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Conflict {
    pub source: PathBuf,
    pub destination: PathBuf,
}

/// Media file that failed during placement
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FileError {
    pub source: PathBuf,
    pub message: String,
}

/// Outcome of one organizer run
///
/// Every discovered file lands in exactly one bucket:
/// `scanned = moved + planned + skipped_sidecar + skipped_non_media + conflicts + errors`.
/// `planned` counts the files a dry run would have moved and stays zero on
/// real runs.
#[derive(Debug, Clone, Default, Serialize)]
pub struct OperationResult {
    pub dry_run: bool,
    pub scanned: usize,
    pub moved: usize,
    pub planned: usize,
    pub skipped_sidecar: usize,
    pub skipped_non_media: usize,
    /// First skipped non-media paths, bounded by the configured preview size
    pub skipped_non_media_files: Vec<PathBuf>,
    pub conflicts: Vec<Conflict>,
    pub errors: Vec<FileError>,
    /// Written log file; `None` when writing it failed
    pub log_path: Option<PathBuf>,
}

impl OperationResult {
    pub fn new(dry_run: bool) -> Self {
        Self {
            dry_run,
            ..Self::default()
        }
    }

    /// Sum of all outcome buckets
    pub fn accounted(&self) -> usize {
        self.moved
            + self.planned
            + self.skipped_sidecar
            + self.skipped_non_media
            + self.conflicts.len()
            + self.errors.len()
    }

    /// Whether every scanned file landed in a bucket
    pub fn is_balanced(&self) -> bool {
        self.accounted() == self.scanned
    }

    pub fn summary(&self) -> String {
        format!(
            "Scanned: {}, Moved: {}, Planned: {}, Sidecars: {}, Non-media: {}, Conflicts: {}, Errors: {}",
            self.scanned,
            self.moved,
            self.planned,
            self.skipped_sidecar,
            self.skipped_non_media,
            self.conflicts.len(),
            self.errors.len()
        )
    }
}

/// Parameters echoed in the log header
#[derive(Debug, Clone, Copy)]
pub struct LogHeader<'a> {
    /// Run timestamp formatted with [`LOG_TIMESTAMP_FORMAT`]
    pub stamp: &'a str,
    pub source: &'a Path,
    pub base: &'a Path,
    /// Counter label such as `.AAE`
    pub sidecar_label: &'a str,
}

/// Render the plain-text move log
pub fn render_log(header: &LogHeader<'_>, result: &OperationResult) -> String {
    let mut lines = vec![
        format!("Move operation timestamp: {}", header.stamp),
        format!("Source: {}", header.source.display()),
        format!("Base target: {}", header.base.display()),
        format!("Dry run: {}", result.dry_run),
        String::new(),
        format!("Moved files: {}", result.moved),
    ];
    if result.dry_run {
        lines.push(format!("Planned moves: {}", result.planned));
    }
    lines.extend([
        format!("Skipped {} files: {}", header.sidecar_label, result.skipped_sidecar),
        format!("Skipped non-media files: {}", result.skipped_non_media),
        format!("Conflicts: {}", result.conflicts.len()),
        format!("Errors: {}", result.errors.len()),
    ]);

    if !result.conflicts.is_empty() {
        lines.push(String::new());
        lines.push("Conflicts:".to_string());
        for c in &result.conflicts {
            lines.push(format!("{}  ->  {}", c.source.display(), c.destination.display()));
        }
    }

    if !result.errors.is_empty() {
        lines.push(String::new());
        lines.push("Errors:".to_string());
        for e in &result.errors {
            lines.push(format!("{}: {}", e.source.display(), e.message));
        }
    }

    let mut text = lines.join("\n");
    text.push('\n');
    text
}

/// Write `contents` to `<log_dir>/move_log_<stamp>.txt`.
///
/// An existing log with the same name is never overwritten; a numeric
/// suffix is appended instead.
pub fn write_log(log_dir: &Path, stamp: &str, contents: &str) -> Result<PathBuf> {
    fs::create_dir_all(log_dir).map_err(|e| Error::LogWrite {
        path: log_dir.to_path_buf(),
        source: e,
    })?;

    for i in 0..10000 {
        let name = if i == 0 {
            format!("move_log_{}.txt", stamp)
        } else {
            format!("move_log_{}_{}.txt", stamp, i)
        };
        let path = log_dir.join(name);

        let mut file = match OpenOptions::new().write(true).create_new(true).open(&path) {
            Ok(file) => file,
            Err(e) if e.kind() == ErrorKind::AlreadyExists => continue,
            Err(e) => return Err(Error::LogWrite { path, source: e }),
        };

        file.write_all(contents.as_bytes())
            .and_then(|_| file.flush())
            .map_err(|e| Error::LogWrite {
                path: path.clone(),
                source: e,
            })?;
        return Ok(path);
    }

    Err(Error::LogWrite {
        path: log_dir.join(format!("move_log_{}.txt", stamp)),
        source: std::io::Error::new(ErrorKind::AlreadyExists, "no free log file name"),
    })
}
