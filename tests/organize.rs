mod common;

use common::{create_file, jpeg_with_capture_time, jpeg_with_exif_dates, set_modified, snapshot};
use import_sorter::{Config, Error, MonthNames, Organizer, organize};
use std::fs;
use tempfile::TempDir;

#[test]
fn import_scenario_places_by_capture_and_modified_time() {
    let source = TempDir::new().unwrap();
    let base = TempDir::new().unwrap();

    let capture = jpeg_with_capture_time("2023:05:14 10:00:00");
    let photo = create_file(source.path(), "photo.jpg", &capture);
    set_modified(&photo, 2020, 1, 1);
    let clip = create_file(source.path(), "clip.mov", b"not really a movie");
    set_modified(&clip, 2022, 11, 2);
    create_file(source.path(), "note.aae", b"<plist/>");
    create_file(source.path(), "readme.txt", b"hello");

    let result = organize(source.path(), base.path(), false, false).unwrap();

    assert!(base.path().join("2023").join("05_mei").join("photo.jpg").is_file());
    assert!(base.path().join("2022").join("11_november").join("clip.mov").is_file());
    assert!(source.path().join("note.aae").is_file());
    assert!(source.path().join("readme.txt").is_file());
    assert!(!photo.exists());
    assert!(!clip.exists());

    assert_eq!(result.scanned, 4);
    assert_eq!(result.moved, 2);
    assert_eq!(result.planned, 0);
    assert_eq!(result.skipped_sidecar, 1);
    assert_eq!(result.skipped_non_media, 1);
    assert_eq!(result.skipped_non_media_files, vec![source.path().join("readme.txt")]);
    assert!(result.conflicts.is_empty());
    assert!(result.errors.is_empty());
    assert!(result.is_balanced());
}

#[test]
fn log_file_is_written_with_summary() {
    let source = TempDir::new().unwrap();
    let base = TempDir::new().unwrap();
    create_file(source.path(), "clip.mov", b"movie");
    create_file(source.path(), "IMG_0001.AAE", b"<plist/>");

    let result = organize(source.path(), base.path(), false, false).unwrap();

    let log_path = result.log_path.expect("log written");
    assert_eq!(log_path.parent().unwrap(), base.path().join("_move_logs"));
    let name = log_path.file_name().unwrap().to_str().unwrap();
    assert!(name.starts_with("move_log_") && name.ends_with(".txt"), "{}", name);

    let log = fs::read_to_string(&log_path).unwrap();
    assert!(log.starts_with("Move operation timestamp: "));
    assert!(log.contains(&format!("Source: {}\n", source.path().display())));
    assert!(log.contains(&format!("Base target: {}\n", base.path().display())));
    assert!(log.contains("Dry run: false\n"));
    assert!(log.contains("Moved files: 1\n"));
    assert!(log.contains("Skipped .AAE files: 1\n"));
    assert!(log.contains("Skipped non-media files: 0\n"));
    assert!(log.contains("Conflicts: 0\n"));
    assert!(log.contains("Errors: 0\n"));
    assert!(!log.contains("Conflicts:\n"));
}

#[test]
fn conflict_never_overwrites() {
    let source = TempDir::new().unwrap();
    let base = TempDir::new().unwrap();

    let existing = create_file(base.path(), "2023/05_mei/IMG_0001.jpg", b"already sorted");
    let incoming = create_file(
        source.path(),
        "IMG_0001.jpg",
        &jpeg_with_capture_time("2023:05:20 18:45:00"),
    );

    let result = organize(source.path(), base.path(), false, false).unwrap();

    assert_eq!(result.moved, 0);
    assert_eq!(result.conflicts.len(), 1);
    assert_eq!(result.conflicts[0].source, incoming);
    assert_eq!(result.conflicts[0].destination, existing);
    assert_eq!(fs::read(&existing).unwrap(), b"already sorted");
    assert!(incoming.is_file());

    let log = fs::read_to_string(result.log_path.unwrap()).unwrap();
    assert!(log.contains(&format!(
        "Conflicts:\n{}  ->  {}\n",
        incoming.display(),
        existing.display()
    )));
}

#[test]
fn dry_run_matches_real_run_without_mutating_source() {
    let build = |root: &std::path::Path| {
        let capture = jpeg_with_capture_time("2023:05:14 10:00:00");
        let photo = create_file(root, "a/photo.jpg", &capture);
        set_modified(&photo, 2020, 1, 1);
        let clip = create_file(root, "b/clip.mov", b"movie");
        set_modified(&clip, 2022, 11, 2);
        create_file(root, "b/clip.AAE", b"<plist/>");
        create_file(root, "notes.txt", b"hello");
    };

    let dry_source = TempDir::new().unwrap();
    let dry_base = TempDir::new().unwrap();
    build(dry_source.path());
    create_file(dry_base.path(), "2022/11_november/clip.mov", b"older clip");

    let before = snapshot(dry_source.path());
    let dry = organize(dry_source.path(), dry_base.path(), true, true).unwrap();
    assert_eq!(snapshot(dry_source.path()), before);
    assert!(!dry_base.path().join("2023").exists());

    let real_source = TempDir::new().unwrap();
    let real_base = TempDir::new().unwrap();
    build(real_source.path());
    create_file(real_base.path(), "2022/11_november/clip.mov", b"older clip");
    let real = organize(real_source.path(), real_base.path(), false, false).unwrap();

    assert_eq!(dry.moved, 0);
    assert_eq!(dry.planned, real.moved);
    assert_eq!(dry.skipped_sidecar, real.skipped_sidecar);
    assert_eq!(dry.skipped_non_media, real.skipped_non_media);
    assert_eq!(dry.conflicts.len(), real.conflicts.len());
    assert_eq!(dry.errors.len(), real.errors.len());
    assert!(dry.is_balanced());
    assert!(real.is_balanced());

    let log = fs::read_to_string(dry.log_path.unwrap()).unwrap();
    assert!(log.contains("Dry run: true\n"));
    assert!(log.contains("Moved files: 0\nPlanned moves: 1\n"));
    assert!(log.contains("Conflicts: 1\n"));
}

#[test]
fn dry_run_sees_name_clashes_within_the_run() {
    let build = |root: &std::path::Path| {
        for dir in ["a", "b"] {
            let clip = create_file(root, &format!("{}/IMG_0001.mov", dir), dir.as_bytes());
            set_modified(&clip, 2022, 11, 2);
        }
    };

    let dry_source = TempDir::new().unwrap();
    let dry_base = TempDir::new().unwrap();
    build(dry_source.path());
    let dry = organize(dry_source.path(), dry_base.path(), true, false).unwrap();

    let real_source = TempDir::new().unwrap();
    let real_base = TempDir::new().unwrap();
    build(real_source.path());
    let real = organize(real_source.path(), real_base.path(), false, false).unwrap();

    assert_eq!(real.moved, 1);
    assert_eq!(real.conflicts.len(), 1);
    assert_eq!(dry.planned, real.moved);
    assert_eq!(dry.conflicts.len(), real.conflicts.len());
    assert_eq!(
        dry.conflicts[0].source,
        dry_source.path().join("b").join("IMG_0001.mov")
    );
    assert_eq!(
        fs::read(real_base.path().join("2022/11_november/IMG_0001.mov")).unwrap(),
        b"a"
    );
}

#[test]
fn second_run_is_a_no_op() {
    let source = TempDir::new().unwrap();
    let base = TempDir::new().unwrap();
    create_file(source.path(), "photo.jpg", &jpeg_with_capture_time("2023:05:14 10:00:00"));
    create_file(source.path(), "deep/er/clip.mp4", b"movie");
    create_file(source.path(), "clip.aae", b"<plist/>");

    let first = organize(source.path(), base.path(), false, false).unwrap();
    assert_eq!(first.moved, 2);

    let second = organize(source.path(), base.path(), false, false).unwrap();
    assert_eq!(second.moved, 0);
    assert!(second.errors.is_empty());
    assert!(second.conflicts.is_empty());
    assert_eq!(second.scanned, 1);
    assert_eq!(second.skipped_sidecar, 1);

    // Both runs keep their own log even within the same second
    assert_ne!(first.log_path, second.log_path);
    assert!(first.log_path.unwrap().is_file());
    assert!(second.log_path.unwrap().is_file());
}

#[test]
fn corrupt_metadata_falls_back_to_modified_time() {
    let source = TempDir::new().unwrap();
    let base = TempDir::new().unwrap();
    let mut bytes = jpeg_with_capture_time("2023:05:14 10:00:00");
    bytes.truncate(30);
    let photo = create_file(source.path(), "IMG_0002.JPG", &bytes);
    set_modified(&photo, 2021, 3, 15);

    let result = organize(source.path(), base.path(), false, false).unwrap();

    assert_eq!(result.moved, 1);
    assert!(result.errors.is_empty());
    assert!(base.path().join("2021").join("03_maart").join("IMG_0002.JPG").is_file());
}

#[test]
fn unparsable_original_date_falls_back_to_modified_time() {
    let source = TempDir::new().unwrap();
    let base = TempDir::new().unwrap();
    let bytes = jpeg_with_exif_dates(Some("garbage-not-a-date!"), Some("2019:08:01 10:00:00"));
    let photo = create_file(source.path(), "IMG_0003.jpg", &bytes);
    set_modified(&photo, 2021, 3, 15);

    let result = organize(source.path(), base.path(), false, false).unwrap();

    assert_eq!(result.moved, 1);
    assert!(base.path().join("2021").join("03_maart").join("IMG_0003.jpg").is_file());
    assert!(!base.path().join("2019").exists());
}

#[test]
fn date_time_tag_is_used_without_original_date() {
    let source = TempDir::new().unwrap();
    let base = TempDir::new().unwrap();
    let bytes = jpeg_with_exif_dates(None, Some("2019:08:01 10:00:00"));
    let photo = create_file(source.path(), "IMG_0004.jpg", &bytes);
    set_modified(&photo, 2021, 3, 15);

    let result = organize(source.path(), base.path(), false, false).unwrap();

    assert_eq!(result.moved, 1);
    assert!(base.path().join("2019").join("08_augustus").join("IMG_0004.jpg").is_file());
}

#[test]
fn english_month_names() {
    let source = TempDir::new().unwrap();
    let base = TempDir::new().unwrap();
    create_file(source.path(), "photo.jpeg", &jpeg_with_capture_time("2023:05:14 10:00:00"));

    let mut config = Config::with_base_dir(base.path());
    config.month_names = MonthNames::English;
    let result = Organizer::new(config).organize(source.path()).unwrap();

    assert_eq!(result.moved, 1);
    assert!(base.path().join("2023").join("05_may").join("photo.jpeg").is_file());
}

#[test]
fn missing_source_fails_before_any_side_effect() {
    let dir = TempDir::new().unwrap();
    let base = dir.path().join("base");

    let err = organize(&dir.path().join("nope"), &base, false, false).unwrap_err();

    assert!(matches!(err, Error::SourceNotFound { .. }));
    assert!(err.to_string().contains("Source directory not found"));
    assert!(!base.exists());
}

#[test]
fn per_file_errors_do_not_abort_the_run() {
    let source = TempDir::new().unwrap();
    let base = TempDir::new().unwrap();
    let capture = jpeg_with_capture_time("2023:05:14 10:00:00");
    let photo = create_file(source.path(), "photo.jpg", &capture);
    let clip = create_file(source.path(), "clip.mov", b"movie");
    set_modified(&clip, 2022, 11, 2);

    // The 2023 year folder cannot be created
    create_file(base.path(), "2023", b"a file where a folder should be");

    let result = organize(source.path(), base.path(), false, false).unwrap();

    assert_eq!(result.errors.len(), 1);
    assert_eq!(result.errors[0].source, photo);
    assert!(!result.errors[0].message.is_empty());
    assert_eq!(result.moved, 1);
    assert!(photo.is_file());
    assert!(base.path().join("2022").join("11_november").join("clip.mov").is_file());
    assert!(result.is_balanced());

    let log = fs::read_to_string(result.log_path.unwrap()).unwrap();
    assert!(log.contains(&format!("\nErrors:\n{}: ", photo.display())));
}
