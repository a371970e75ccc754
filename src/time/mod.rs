//! Timestamp resolution
//!
//! The date that decides where a file goes comes from, in order:
//! - embedded capture metadata, for extensions that can carry it
//! - the file system modification time
//!
//! Metadata readers never fail the resolution. They report an explicit
//! [`MetadataOutcome`] and an unavailable outcome falls through to the
//! modification time.

pub mod exif;

use crate::config::Config;
use crate::error::Result;
use chrono::{DateTime, Local, NaiveDateTime};
use std::fs;
use std::path::Path;
use tracing::{debug, trace};

pub use self::exif::ExifReader;

/// Source of the resolved timestamp
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimeSource {
    /// Read from embedded capture metadata
    CaptureMetadata,
    /// From file system modification time
    FileSystem,
}

/// Timestamp that governs a file's destination
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedTime {
    pub timestamp: NaiveDateTime,
    pub source: TimeSource,
}

/// Outcome of asking a reader for the capture time of one file
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MetadataOutcome {
    /// A capture time was read from the named metadata field
    Found {
        timestamp: NaiveDateTime,
        field: &'static str,
    },
    /// No usable capture time; `reason` is kept for tracing
    Unavailable { reason: String },
}

/// Reads capture time from one family of container formats
pub trait MetadataReader {
    /// Short name used in traces
    fn name(&self) -> &'static str;

    /// Whether this reader understands files with the given lowercase extension
    fn handles(&self, ext: &str) -> bool;

    /// Read the capture time. Must not panic on malformed input.
    fn read_capture_time(&self, path: &Path) -> MetadataOutcome;
}

/// Resolves the placement timestamp of media files
pub struct TimestampResolver {
    readers: Vec<Box<dyn MetadataReader>>,
}

impl TimestampResolver {
    /// Resolver with no metadata readers: always uses the modification time
    pub fn filesystem_only() -> Self {
        Self { readers: Vec::new() }
    }

    /// Resolver with the EXIF reader for the configured metadata extensions
    pub fn from_config(config: &Config) -> Self {
        Self::filesystem_only().with_reader(ExifReader::new(config.metadata_extensions.clone()))
    }

    /// Register another reader; earlier readers are asked first
    pub fn with_reader(mut self, reader: impl MetadataReader + 'static) -> Self {
        self.readers.push(Box::new(reader));
        self
    }

    /// Resolve the timestamp for `path`, whose lowercase extension is `ext`.
    ///
    /// Only the modification time lookup can fail, e.g. when the file
    /// disappeared after it was discovered.
    pub fn resolve(&self, path: &Path, ext: &str) -> Result<ResolvedTime> {
        for reader in self.readers.iter().filter(|r| r.handles(ext)) {
            match reader.read_capture_time(path) {
                MetadataOutcome::Found { timestamp, field } => {
                    trace!(?path, reader = reader.name(), field, %timestamp, "Capture time found");
                    return Ok(ResolvedTime {
                        timestamp,
                        source: TimeSource::CaptureMetadata,
                    });
                }
                MetadataOutcome::Unavailable { reason } => {
                    debug!(?path, reader = reader.name(), %reason, "No capture time in metadata");
                }
            }
        }

        Ok(ResolvedTime {
            timestamp: modified_time(path)?,
            source: TimeSource::FileSystem,
        })
    }
}

/// File system modification time in local time
pub fn modified_time(path: &Path) -> Result<NaiveDateTime> {
    let modified = fs::metadata(path)?.modified()?;
    let local: DateTime<Local> = modified.into();
    Ok(local.naive_local())
}
