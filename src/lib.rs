//! Import Sorter - moves imported photos and videos into a dated folder tree
//!
//! This library provides functionality for organizing an import directory
//! into `<base>/<YYYY>/<NN_month>/` with support for:
//! - EXIF capture time extraction for images
//! - File system modification time fallback
//! - Conflict detection that never overwrites or renames
//! - Dry runs that leave the file system untouched
//! - A plain-text move log per run
//! - Deleting capture sidecar files

pub mod classify;
pub mod cli;
pub mod config;
pub mod error;
pub mod layout;
pub mod logging;
pub mod organize;
pub mod purge;
pub mod report;
pub mod time;

pub use classify::{Classification, MediaFile};
pub use cli::{Cli, PurgeCli};
pub use config::{Config, ConfigError, MonthNames};
pub use error::{Error, Result};
pub use organize::{Organizer, organize};
pub use purge::{PurgeResult, purge_sidecars};
pub use report::{Conflict, FileError, OperationResult};
pub use time::{MetadataOutcome, MetadataReader, ResolvedTime, TimeSource, TimestampResolver};
