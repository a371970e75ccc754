//! Error types for the import sorter

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for import sorter operations
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for the import sorter
#[derive(Error, Debug)]
pub enum Error {
    #[error("Source directory not found: {}", path.display())]
    SourceNotFound { path: PathBuf },

    #[error("Base target {} lies inside source directory {}", base.display(), source_dir.display())]
    BaseInsideSource { base: PathBuf, source_dir: PathBuf },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to read EXIF data from {}: {message}", path.display())]
    ExifRead { path: PathBuf, message: String },

    #[error("File has no usable name: {}", path.display())]
    InvalidFileName { path: PathBuf },

    #[error("Destination already exists: {}", path.display())]
    DestinationExists { path: PathBuf },

    #[error("Failed to write move log {}: {source}", path.display())]
    LogWrite {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Configuration error: {0}")]
    Config(String),
}
