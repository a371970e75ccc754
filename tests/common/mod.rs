#![allow(dead_code)]

use chrono::{Local, NaiveDate, TimeZone};
use std::fs;
use std::path::{Path, PathBuf};

/// Minimal JPEG whose EXIF block holds only `DateTimeOriginal`
pub fn jpeg_with_capture_time(datetime: &str) -> Vec<u8> {
    jpeg_with_exif_dates(Some(datetime), None)
}

/// Minimal JPEG with optional `DateTimeOriginal` and `DateTime` tags.
///
/// Layout: SOI, APP1("Exif\0\0" + little-endian TIFF), EOI. `DateTime` sits
/// in IFD0, `DateTimeOriginal` in the Exif IFD that IFD0 points to. Values
/// are stored as ASCII after the directories.
pub fn jpeg_with_exif_dates(original: Option<&str>, modified: Option<&str>) -> Vec<u8> {
    for value in original.iter().chain(modified.iter()) {
        assert!(value.len() >= 4, "short values would be stored inline");
    }
    let ascii_len = |v: &str| v.len() as u32 + 1;

    let ifd0_entries = modified.is_some() as u32 + original.is_some() as u32;
    let exif_ifd_at = 8 + 2 + 12 * ifd0_entries + 4;
    let exif_ifd_len = if original.is_some() { 2 + 12 + 4 } else { 0 };
    let modified_at = exif_ifd_at + exif_ifd_len;
    let original_at = modified_at + modified.map_or(0, ascii_len);

    let mut tiff = Vec::new();
    tiff.extend_from_slice(b"II*\0");
    tiff.extend_from_slice(&8u32.to_le_bytes());

    tiff.extend_from_slice(&(ifd0_entries as u16).to_le_bytes());
    if let Some(value) = modified {
        ifd_entry(&mut tiff, 0x0132, 2, ascii_len(value), modified_at);
    }
    if original.is_some() {
        ifd_entry(&mut tiff, 0x8769, 4, 1, exif_ifd_at);
    }
    tiff.extend_from_slice(&0u32.to_le_bytes());

    if let Some(value) = original {
        tiff.extend_from_slice(&1u16.to_le_bytes());
        ifd_entry(&mut tiff, 0x9003, 2, ascii_len(value), original_at);
        tiff.extend_from_slice(&0u32.to_le_bytes());
    }

    assert_eq!(tiff.len() as u32, modified_at);
    for value in modified.iter().chain(original.iter()) {
        tiff.extend_from_slice(value.as_bytes());
        tiff.push(0);
    }

    let mut app1 = b"Exif\0\0".to_vec();
    app1.extend_from_slice(&tiff);

    let mut jpeg = vec![0xFF, 0xD8, 0xFF, 0xE1];
    jpeg.extend_from_slice(&((app1.len() + 2) as u16).to_be_bytes());
    jpeg.extend_from_slice(&app1);
    jpeg.extend_from_slice(&[0xFF, 0xD9]);
    jpeg
}

fn ifd_entry(tiff: &mut Vec<u8>, tag: u16, kind: u16, count: u32, value: u32) {
    tiff.extend_from_slice(&tag.to_le_bytes());
    tiff.extend_from_slice(&kind.to_le_bytes());
    tiff.extend_from_slice(&count.to_le_bytes());
    tiff.extend_from_slice(&value.to_le_bytes());
}

/// Write `content` to `dir/name`, creating parent directories
pub fn create_file(dir: &Path, name: &str, content: &[u8]) -> PathBuf {
    let path = dir.join(name);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(&path, content).unwrap();
    path
}

/// Set the modification time to noon local time on the given day
pub fn set_modified(path: &Path, year: i32, month: u32, day: u32) {
    let noon = NaiveDate::from_ymd_opt(year, month, day)
        .unwrap()
        .and_hms_opt(12, 0, 0)
        .unwrap();
    let ts = Local.from_local_datetime(&noon).single().unwrap().timestamp();
    filetime::set_file_mtime(path, filetime::FileTime::from_unix_time(ts, 0)).unwrap();
}

/// Every file below `root` with its contents, sorted by path
pub fn snapshot(root: &Path) -> Vec<(PathBuf, Vec<u8>)> {
    let mut files: Vec<_> = walkdir::WalkDir::new(root)
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|e| e.file_type().is_file())
        .map(|e| (e.path().to_path_buf(), fs::read(e.path()).unwrap()))
        .collect();
    files.sort();
    files
}
