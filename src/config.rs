//! Configuration types for the import sorter

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Month name table used for the month folders
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum MonthNames {
    /// 01_januari .. 12_december
    #[default]
    Dutch,
    /// 01_january .. 12_december
    English,
}

/// Configuration for the import sorter
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Root of the dated folder tree
    pub base_dir: PathBuf,

    /// Dry run mode - classify and report without moving anything
    pub dry_run: bool,

    /// Log every per-file decision at info level
    pub verbose: bool,

    /// Month names used for the month folders
    pub month_names: MonthNames,

    /// Name of the log directory created under `base_dir`
    pub log_dir_name: String,

    /// How many skipped non-media paths are kept for reporting
    pub non_media_preview: usize,

    /// Extensions eligible for organizing (images and videos)
    pub media_extensions: Vec<String>,

    /// Media extensions that may carry embedded capture metadata
    pub metadata_extensions: Vec<String>,

    /// Capture sidecar extensions, never organized
    pub sidecar_extensions: Vec<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base_dir: default_base_dir(),
            dry_run: false,
            verbose: false,
            month_names: MonthNames::default(),
            log_dir_name: "_move_logs".into(),
            non_media_preview: 20,
            media_extensions: vec![
                "jpg".into(),
                "jpeg".into(),
                "tiff".into(),
                "tif".into(),
                "png".into(),
                "heic".into(),
                "heif".into(),
                "gif".into(),
                "bmp".into(),
                "webp".into(),
                "mp4".into(),
                "mov".into(),
                "avi".into(),
                "mkv".into(),
                "3gp".into(),
                "mts".into(),
                "m4v".into(),
            ],
            metadata_extensions: vec![
                "jpg".into(),
                "jpeg".into(),
                "tiff".into(),
                "tif".into(),
                "png".into(),
                "heic".into(),
                "heif".into(),
            ],
            sidecar_extensions: vec!["aae".into()],
        }
    }
}

/// Platform default for the base directory
pub fn default_base_dir() -> PathBuf {
    if cfg!(windows) {
        return PathBuf::from("D:/Foto");
    }
    std::env::var_os("HOME")
        .map(|home| PathBuf::from(home).join("Foto"))
        .unwrap_or_else(|| PathBuf::from("Foto"))
}

fn contains_ext(list: &[String], ext: &str) -> bool {
    list.iter().any(|e| e.eq_ignore_ascii_case(ext))
}

impl Config {
    /// Config with the given base directory and defaults elsewhere
    pub fn with_base_dir(base_dir: impl Into<PathBuf>) -> Self {
        Self {
            base_dir: base_dir.into(),
            ..Self::default()
        }
    }

    /// Check if an extension denotes a capture sidecar
    pub fn is_sidecar(&self, ext: &str) -> bool {
        contains_ext(&self.sidecar_extensions, ext)
    }

    /// Check if an extension is in the recognized media set
    pub fn is_media(&self, ext: &str) -> bool {
        contains_ext(&self.media_extensions, ext)
    }

    /// Label used for the sidecar counter, e.g. `.AAE`
    pub fn sidecar_label(&self) -> String {
        match self.sidecar_extensions.first() {
            Some(ext) => format!(".{}", ext.to_uppercase()),
            None => "sidecar".to_string(),
        }
    }

    /// Directory holding the move logs
    pub fn log_dir(&self) -> PathBuf {
        self.base_dir.join(&self.log_dir_name)
    }

    /// Reject settings the organizer cannot work with
    pub fn validate(&self) -> Result<()> {
        if self.media_extensions.is_empty() {
            return Err(Error::Config("media_extensions must not be empty".into()));
        }
        if self.log_dir_name.trim().is_empty() {
            return Err(Error::Config("log_dir_name must not be empty".into()));
        }
        let all = self
            .media_extensions
            .iter()
            .chain(&self.metadata_extensions)
            .chain(&self.sidecar_extensions);
        for ext in all {
            if ext.is_empty() || ext.starts_with('.') {
                return Err(Error::Config(format!(
                    "extension '{}' must be given without a leading dot",
                    ext
                )));
            }
        }
        if let Some(ext) = self.sidecar_extensions.iter().find(|e| self.is_media(e)) {
            return Err(Error::Config(format!(
                "extension '{}' is listed as both media and sidecar",
                ext
            )));
        }
        Ok(())
    }

    /// Load configuration from a TOML file
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> std::result::Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
            path: path.to_path_buf(),
            source: e,
        })?;

        toml::from_str(&content).map_err(|e| ConfigError::ParseError {
            path: path.to_path_buf(),
            source: e,
        })
    }

    /// Save configuration to a TOML file
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> std::result::Result<(), ConfigError> {
        let path = path.as_ref();

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| ConfigError::WriteError {
                path: path.to_path_buf(),
                source: e,
            })?;
        }

        let content = toml::to_string_pretty(self)
            .map_err(|e| ConfigError::SerializeError { source: e })?;

        fs::write(path, content).map_err(|e| ConfigError::WriteError {
            path: path.to_path_buf(),
            source: e,
        })
    }

    /// Generate a sample configuration file content
    pub fn sample_config() -> String {
        r#"# Import Sorter Configuration File
# This file uses TOML format (https://toml.io)
# Every key is optional; missing keys take the built-in default.

# Root of the dated folder tree: <base_dir>/<YYYY>/<NN_month>/
base_dir = "D:/Foto"

# Dry run mode - report what would be moved without touching any file
dry_run = false

# Log every per-file decision
verbose = false

# Month folder names: "dutch" (05_mei) or "english" (05_may)
month_names = "dutch"

# Folder under base_dir that receives the move logs
log_dir_name = "_move_logs"

# Number of skipped non-media paths kept for the summary
non_media_preview = 20

# Extensions without the leading dot, matched case-insensitively
media_extensions = ["jpg", "jpeg", "tiff", "tif", "png", "heic", "heif", "gif", "bmp", "webp", "mp4", "mov", "avi", "mkv", "3gp", "mts", "m4v"]
metadata_extensions = ["jpg", "jpeg", "tiff", "tif", "png", "heic", "heif"]
sidecar_extensions = ["aae"]
"#
        .to_string()
    }
}

/// Errors that can occur when loading or saving configuration
#[derive(Debug)]
pub enum ConfigError {
    /// Failed to read configuration file
    ReadError {
        path: PathBuf,
        source: std::io::Error,
    },
    /// Failed to parse configuration file
    ParseError {
        path: PathBuf,
        source: toml::de::Error,
    },
    /// Failed to write configuration file
    WriteError {
        path: PathBuf,
        source: std::io::Error,
    },
    /// Failed to serialize configuration
    SerializeError { source: toml::ser::Error },
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::ReadError { path, source } => {
                write!(f, "Failed to read config file '{}': {}", path.display(), source)
            }
            ConfigError::ParseError { path, source } => {
                write!(f, "Failed to parse config file '{}': {}", path.display(), source)
            }
            ConfigError::WriteError { path, source } => {
                write!(f, "Failed to write config file '{}': {}", path.display(), source)
            }
            ConfigError::SerializeError { source } => {
                write!(f, "Failed to serialize config: {}", source)
            }
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::ReadError { source, .. } => Some(source),
            ConfigError::ParseError { source, .. } => Some(source),
            ConfigError::WriteError { source, .. } => Some(source),
            ConfigError::SerializeError { source } => Some(source),
        }
    }
}
