//! File classification by extension

use crate::config::Config;
use std::path::{Path, PathBuf};

/// What the organizer does with a discovered file
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Classification {
    /// Capture sidecar (edit instructions), never moved
    Sidecar,
    /// Extension outside the recognized media set, never moved
    NonMedia,
    /// Eligible for placement
    Media,
}

/// Classify a lowercase extension. Sidecars win over media.
pub fn classify_extension(ext: &str, config: &Config) -> Classification {
    if config.is_sidecar(ext) {
        Classification::Sidecar
    } else if config.is_media(ext) {
        Classification::Media
    } else {
        Classification::NonMedia
    }
}

/// A file found while walking the source tree
#[derive(Debug, Clone)]
pub struct MediaFile {
    pub path: PathBuf,
    /// Lowercase extension without the dot; empty when there is none
    pub extension: String,
}

impl MediaFile {
    pub fn new(path: PathBuf) -> Self {
        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_lowercase())
            .unwrap_or_default();
        Self { path, extension }
    }

    pub fn classify(&self, config: &Config) -> Classification {
        if self.extension.is_empty() {
            return Classification::NonMedia;
        }
        classify_extension(&self.extension, config)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}
