//! EXIF capture time for image containers (JPEG, TIFF, PNG, WebP, HEIF)

use super::{MetadataOutcome, MetadataReader};
use crate::error::{Error, Result};
use chrono::NaiveDateTime;
use exif::{Field, In, Reader, Tag, Value};
use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use tracing::trace;

/// EXIF tags to try for the capture time, in priority order
const DATE_TAGS: &[(Tag, &str)] = &[
    (Tag::DateTimeOriginal, "DateTimeOriginal"), // When the original image was taken
    (Tag::DateTime, "DateTime"),                 // File modification date/time
];

/// Fixed EXIF datetime layout
const EXIF_DATETIME_FORMAT: &str = "%Y:%m:%d %H:%M:%S";

/// Reads capture time from EXIF blocks embedded in image containers
#[derive(Debug, Clone)]
pub struct ExifReader {
    extensions: Vec<String>,
}

impl ExifReader {
    /// Reader for files with one of the given extensions (without dot)
    pub fn new(extensions: Vec<String>) -> Self {
        Self { extensions }
    }

    fn extract(&self, path: &Path) -> Result<Option<(NaiveDateTime, &'static str)>> {
        let file = File::open(path)?;
        let mut reader = BufReader::new(file);

        let exif = Reader::new()
            .read_from_container(&mut reader)
            .map_err(|e| Error::ExifRead {
                path: path.to_path_buf(),
                message: e.to_string(),
            })?;

        // The first tag present decides; an unparsable value is not retried
        // with a lower-priority tag
        let Some((field, name)) = DATE_TAGS
            .iter()
            .find_map(|&(tag, name)| exif.get_field(tag, In::PRIMARY).map(|f| (f, name)))
        else {
            return Ok(None);
        };

        match field_datetime(field) {
            Some(datetime) => {
                trace!(?path, tag = name, "Found EXIF date");
                Ok(Some((datetime, name)))
            }
            None => Err(Error::ExifRead {
                path: path.to_path_buf(),
                message: format!("{} is not a valid date", name),
            }),
        }
    }
}

impl MetadataReader for ExifReader {
    fn name(&self) -> &'static str {
        "exif"
    }

    fn handles(&self, ext: &str) -> bool {
        self.extensions.iter().any(|e| e.eq_ignore_ascii_case(ext))
    }

    fn read_capture_time(&self, path: &Path) -> MetadataOutcome {
        match self.extract(path) {
            Ok(Some((timestamp, field))) => MetadataOutcome::Found { timestamp, field },
            Ok(None) => MetadataOutcome::Unavailable {
                reason: "no valid date tag in EXIF data".to_string(),
            },
            Err(e) => MetadataOutcome::Unavailable {
                reason: e.to_string(),
            },
        }
    }
}

fn field_datetime(field: &Field) -> Option<NaiveDateTime> {
    match field.value {
        Value::Ascii(ref parts) => parts
            .first()
            .and_then(|raw| std::str::from_utf8(raw).ok())
            .and_then(parse_exif_datetime),
        _ => None,
    }
}

/// Parse EXIF datetime string format: "YYYY:MM:DD HH:MM:SS"
fn parse_exif_datetime(s: &str) -> Option<NaiveDateTime> {
    let s = s.trim_matches(|c: char| c == '\0' || c.is_whitespace());
    NaiveDateTime::parse_from_str(s, EXIF_DATETIME_FORMAT).ok()
}
