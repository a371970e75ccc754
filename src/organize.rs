//! Moves media files from an import directory into the dated tree
//!
//! Handles the core logic of:
//! - Scanning the source directory
//! - Classifying files by extension
//! - Resolving capture timestamps
//! - Moving files without ever overwriting
//! - Writing the move log

use crate::classify::{Classification, MediaFile};
use crate::config::Config;
use crate::error::{Error, Result};
use crate::layout::destination_dir;
use crate::report::{
    Conflict, FileError, LOG_TIMESTAMP_FORMAT, LogHeader, OperationResult, render_log, write_log,
};
use crate::time::{ResolvedTime, TimestampResolver};
use chrono::Local;
use std::collections::HashSet;
use std::fs::{self, File, OpenOptions};
use std::io::{self, BufReader, BufWriter, ErrorKind, Write};
use std::path::{Component, Path, PathBuf};
use tracing::{Level, debug, error, info, span, warn};
use walkdir::WalkDir;

/// What happened to one media file
#[derive(Debug, Clone, PartialEq, Eq)]
enum Placement {
    Moved(PathBuf),
    Planned(PathBuf),
    Conflict(PathBuf),
}

/// Organizes one import directory into the dated tree under `base_dir`
pub struct Organizer {
    config: Config,
    resolver: TimestampResolver,
}

impl Organizer {
    /// Create an organizer using the EXIF reader for metadata extensions
    pub fn new(config: Config) -> Self {
        let resolver = TimestampResolver::from_config(&config);
        Self { config, resolver }
    }

    /// Create an organizer with a custom timestamp resolver
    pub fn with_resolver(config: Config, resolver: TimestampResolver) -> Self {
        Self { config, resolver }
    }

    /// Organize every file under `source_dir`.
    ///
    /// Fails only on setup problems, before anything is touched. Per-file
    /// failures are recorded in the result and the run continues.
    pub fn organize(&self, source_dir: &Path) -> Result<OperationResult> {
        let _span = span!(Level::INFO, "organize", source = %source_dir.display()).entered();

        self.check_setup(source_dir)?;

        info!(
            base = %self.config.base_dir.display(),
            dry_run = self.config.dry_run,
            "Scanning source directory..."
        );
        let files = collect_files(source_dir);
        info!(count = files.len(), "Found files");

        let mut result = OperationResult::new(self.config.dry_run);
        // Destinations taken earlier in this run, so dry runs see the same conflicts
        let mut claimed = HashSet::new();

        for path in files {
            result.scanned += 1;
            let file = MediaFile::new(path);
            self.trace_decision(file.path(), "scan", None);

            match file.classify(&self.config) {
                Classification::Sidecar => {
                    result.skipped_sidecar += 1;
                    self.trace_decision(file.path(), "skip sidecar", None);
                }
                Classification::NonMedia => {
                    result.skipped_non_media += 1;
                    if result.skipped_non_media_files.len() < self.config.non_media_preview {
                        result.skipped_non_media_files.push(file.path.clone());
                    }
                    self.trace_decision(file.path(), "skip non-media", None);
                }
                Classification::Media => match self.place(&file, &mut claimed) {
                    Ok(Placement::Moved(dest)) => {
                        result.moved += 1;
                        self.trace_decision(file.path(), "moved", Some(dest.as_path()));
                    }
                    Ok(Placement::Planned(dest)) => {
                        result.planned += 1;
                        self.trace_decision(file.path(), "would move", Some(dest.as_path()));
                    }
                    Ok(Placement::Conflict(dest)) => {
                        warn!(
                            source = ?file.path(),
                            destination = ?dest,
                            "Destination exists, leaving file in place"
                        );
                        result.conflicts.push(Conflict {
                            source: file.path,
                            destination: dest,
                        });
                    }
                    Err(e) => {
                        error!(path = ?file.path(), error = %e, "Failed to place file");
                        result.errors.push(FileError {
                            source: file.path,
                            message: e.to_string(),
                        });
                    }
                },
            }
        }

        debug_assert!(result.is_balanced());
        info!("{}", result.summary());

        result.log_path = self.persist_log(source_dir, &result);
        Ok(result)
    }

    /// Validate the source and base directories before any side effect
    fn check_setup(&self, source_dir: &Path) -> Result<()> {
        if !source_dir.is_dir() {
            return Err(Error::SourceNotFound {
                path: source_dir.to_path_buf(),
            });
        }

        let source = resolve_path(source_dir)?;
        let base = resolve_path(&self.config.base_dir)?;
        if base.starts_with(&source) {
            return Err(Error::BaseInsideSource {
                base: self.config.base_dir.clone(),
                source_dir: source_dir.to_path_buf(),
            });
        }

        Ok(())
    }

    /// Decide and carry out the placement of one media file
    fn place(&self, file: &MediaFile, claimed: &mut HashSet<PathBuf>) -> Result<Placement> {
        let ResolvedTime { timestamp, source } =
            self.resolver.resolve(file.path(), &file.extension)?;
        debug!(path = ?file.path(), %timestamp, time_source = ?source, "Resolved timestamp");

        let file_name = file.path().file_name().ok_or_else(|| Error::InvalidFileName {
            path: file.path.clone(),
        })?;

        let dest_dir = destination_dir(&self.config.base_dir, &timestamp, self.config.month_names);
        if !self.config.dry_run {
            fs::create_dir_all(&dest_dir)?;
        }
        let dest_path = dest_dir.join(file_name);

        if claimed.contains(&dest_path) || dest_path.try_exists()? {
            return Ok(Placement::Conflict(dest_path));
        }

        if self.config.dry_run {
            claimed.insert(dest_path.clone());
            return Ok(Placement::Planned(dest_path));
        }

        move_file(file.path(), &dest_path)?;
        claimed.insert(dest_path.clone());
        Ok(Placement::Moved(dest_path))
    }

    /// Write the move log; failures are logged, never fatal
    fn persist_log(&self, source_dir: &Path, result: &OperationResult) -> Option<PathBuf> {
        let stamp = Local::now().format(LOG_TIMESTAMP_FORMAT).to_string();
        let sidecar_label = self.config.sidecar_label();
        let header = LogHeader {
            stamp: &stamp,
            source: source_dir,
            base: &self.config.base_dir,
            sidecar_label: &sidecar_label,
        };

        match write_log(&self.config.log_dir(), &stamp, &render_log(&header, result)) {
            Ok(path) => {
                info!(log_file = %path.display(), "Move log written");
                Some(path)
            }
            Err(e) => {
                error!(error = %e, "Failed to write move log");
                None
            }
        }
    }

    fn trace_decision(&self, path: &Path, action: &str, dest: Option<&Path>) {
        if self.config.verbose {
            info!(?path, ?dest, action, "File decision");
        } else {
            debug!(?path, ?dest, action, "File decision");
        }
    }
}

/// Organize `source_dir` into `base_dir` with default settings otherwise
pub fn organize(
    source_dir: &Path,
    base_dir: &Path,
    dry_run: bool,
    verbose: bool,
) -> Result<OperationResult> {
    let config = Config {
        dry_run,
        verbose,
        ..Config::with_base_dir(base_dir)
    };
    Organizer::new(config).organize(source_dir)
}

/// Absolute form of `path` with symlinks, `.` and `..` resolved.
///
/// The longest existing prefix is canonicalized; the missing remainder is
/// normalized lexically on top of it.
fn resolve_path(path: &Path) -> io::Result<PathBuf> {
    let absolute = std::path::absolute(path)?;
    let components: Vec<Component> = absolute.components().collect();

    let mut existing = components.len();
    let mut resolved = loop {
        if existing == 0 {
            break PathBuf::new();
        }
        let prefix: PathBuf = components[..existing].iter().collect();
        match prefix.canonicalize() {
            Ok(canonical) => break canonical,
            Err(_) => existing -= 1,
        }
    };

    for component in &components[existing..] {
        match component {
            Component::ParentDir => {
                resolved.pop();
            }
            Component::CurDir => {}
            other => resolved.push(other.as_os_str()),
        }
    }

    Ok(resolved)
}

/// Collect every file below `root`, sorted by path.
///
/// Files are collected before anything moves so the walk never sees the
/// results of its own moves. Unreadable entries are logged and skipped.
fn collect_files(root: &Path) -> Vec<PathBuf> {
    let mut files = Vec::new();

    for entry in WalkDir::new(root).sort_by_file_name() {
        match entry {
            Ok(entry) if entry.path().is_file() => files.push(entry.into_path()),
            Ok(_) => {}
            Err(e) => warn!(error = %e, "Skipping unreadable entry"),
        }
    }

    files
}

/// Move a file, falling back to copy + delete across volumes
fn move_file(source: &Path, dest: &Path) -> Result<()> {
    match fs::rename(source, dest) {
        Ok(()) => return Ok(()),
        Err(e) => debug!(?source, error = %e, "Rename failed, copying instead"),
    }

    copy_and_remove(source, dest)
}

/// Copy to a fresh `dest`, keep the mtime, then delete `source`
fn copy_and_remove(source: &Path, dest: &Path) -> Result<()> {
    copy_new_file(source, dest)?;

    // Preserve modification time
    if let Ok(metadata) = fs::metadata(source)
        && let Ok(mtime) = metadata.modified()
    {
        let _ = filetime::set_file_mtime(dest, filetime::FileTime::from_system_time(mtime));
    }

    if let Err(e) = fs::remove_file(source) {
        // Leave exactly one copy behind
        let _ = fs::remove_file(dest);
        return Err(e.into());
    }

    Ok(())
}

/// Copy file with buffered I/O, refusing to replace an existing destination
fn copy_new_file(source: &Path, dest: &Path) -> Result<()> {
    let src_file = File::open(source)?;
    let dest_file = match OpenOptions::new().write(true).create_new(true).open(dest) {
        Ok(f) => f,
        Err(e) if e.kind() == ErrorKind::AlreadyExists => {
            return Err(Error::DestinationExists {
                path: dest.to_path_buf(),
            });
        }
        Err(e) => return Err(e.into()),
    };

    let mut reader = BufReader::with_capacity(256 * 1024, src_file);
    let mut writer = BufWriter::with_capacity(256 * 1024, dest_file);

    let copied = io::copy(&mut reader, &mut writer).and_then(|_| writer.flush());
    if let Err(e) = copied {
        drop(writer);
        let _ = fs::remove_file(dest);
        return Err(e.into());
    }

    Ok(())
}
