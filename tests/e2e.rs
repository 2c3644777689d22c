mod common;

use common::synthetic_image::{empty_jpeg, file_names, uniform_jpeg};
use image_checker::analysis::{NoProgress, Progress, ProgressSink};
use image_checker::storage::relocate::{BLACK_FOLDER, WHITE_FOLDER};
use image_checker::{
    run, Aggregator, CancellationToken, CheckerError, FixedConfig, ImageChecker, MoveChoice,
    ScanConfig, ScanLimits,
};
use std::fs;

/// a.jpg (0 bytes), b.jpg (white), c.jpg (mid gray)
fn three_file_dir() -> tempfile::TempDir {
    let dir = tempfile::tempdir().unwrap();
    empty_jpeg(dir.path(), "a.jpg");
    uniform_jpeg(dir.path(), "b.jpg", 100, 100, 255);
    uniform_jpeg(dir.path(), "c.jpg", 100, 100, 128);
    dir
}

#[test]
fn three_file_directory_is_classified() {
    let dir = three_file_dir();

    let summary = run(dir.path(), 5, 250).unwrap();

    assert_eq!(summary.total_found, 3);
    assert_eq!(summary.processed, 3);
    assert_eq!(summary.black, 1);
    assert_eq!(summary.white, 1);
    assert_eq!(summary.normal, 1);
    assert_eq!(summary.skipped, 0);
    assert_eq!(summary.errors, 0);
    assert_eq!(summary.black_files, vec!["a.jpg"]);
    assert_eq!(summary.white_files, vec!["b.jpg"]);
    assert!(!summary.interrupted);
    assert!(summary.is_consistent());
}

#[test]
fn every_bucket_is_counted() {
    let dir = tempfile::tempdir().unwrap();
    uniform_jpeg(dir.path(), "black.jpg", 40, 40, 0);
    uniform_jpeg(dir.path(), "white.jpeg", 40, 40, 255);
    uniform_jpeg(dir.path(), "gray.jpg", 40, 40, 128);
    uniform_jpeg(dir.path(), "huge.jpg", 300, 20, 128);
    fs::write(dir.path().join("broken.jpg"), b"plain text pretending to be a jpeg").unwrap();
    fs::write(dir.path().join("ignored.txt"), b"not a candidate").unwrap();

    let config = ScanConfig {
        limits: ScanLimits {
            max_dimension: 200,
            ..ScanLimits::default()
        },
        ..ScanConfig::default()
    };
    let summary = Aggregator::new(config)
        .with_progress(&NoProgress)
        .run(dir.path())
        .unwrap();

    assert_eq!(summary.total_found, 5);
    assert_eq!(summary.processed, 5);
    assert_eq!(summary.black, 1);
    assert_eq!(summary.white, 1);
    assert_eq!(summary.normal, 1);
    assert_eq!(summary.skipped, 1);
    assert_eq!(summary.errors, 1);
    assert!(summary.is_consistent());
}

#[test]
fn missing_directory_touches_nothing() {
    let parent = tempfile::tempdir().unwrap();
    let missing = parent.path().join("missing");
    let reports = tempfile::tempdir().unwrap();

    let err = run(&missing, 5, 250).unwrap_err();
    assert!(matches!(err, CheckerError::DirectoryNotFound(_)));

    let checker = ImageChecker::new(&missing, ScanConfig::default()).with_report_dir(reports.path());
    let mut provider = FixedConfig::new(ScanConfig::default(), MoveChoice::All);
    let result = checker.check(&mut provider, CancellationToken::new(), &NoProgress);

    assert!(matches!(result, Err(CheckerError::DirectoryNotFound(_))));
    assert!(!missing.exists());
    assert!(file_names(reports.path()).is_empty());
}

#[test]
fn flagged_files_are_moved_and_listed() {
    let dir = three_file_dir();
    let reports = tempfile::tempdir().unwrap();

    let config = ScanConfig::default();
    let checker = ImageChecker::new(dir.path(), config).with_report_dir(reports.path());
    let mut provider = FixedConfig::new(config, MoveChoice::All);

    let outcome = checker
        .check(&mut provider, CancellationToken::new(), &NoProgress)
        .unwrap();

    // Moved into category folders, originals gone
    assert!(dir.path().join(BLACK_FOLDER).join("a.jpg").exists());
    assert!(dir.path().join(WHITE_FOLDER).join("b.jpg").exists());
    assert_eq!(file_names(dir.path()), vec!["c.jpg"]);
    assert_eq!(outcome.relocation.black.unwrap().moved, vec!["a.jpg"]);
    assert_eq!(outcome.relocation.white.unwrap().moved, vec!["b.jpg"]);

    // One list file per flagged bucket
    let black_list = outcome.reports.black.unwrap();
    let white_list = outcome.reports.white.unwrap();
    assert_eq!(fs::read_to_string(&black_list).unwrap(), "a.jpg\n");
    assert_eq!(fs::read_to_string(&white_list).unwrap(), "b.jpg\n");

    let black_name = black_list.file_name().unwrap().to_string_lossy().to_string();
    assert!(black_name.starts_with("black_images_") && black_name.ends_with(".txt"));
    assert_eq!(file_names(reports.path()).len(), 2);
}

#[test]
fn auto_move_ignores_declined_choice() {
    let dir = three_file_dir();
    let reports = tempfile::tempdir().unwrap();

    let config = ScanConfig {
        auto_move: true,
        ..ScanConfig::default()
    };
    let checker = ImageChecker::new(dir.path(), config).with_report_dir(reports.path());
    let mut provider = FixedConfig::new(config, MoveChoice::None);

    checker
        .check(&mut provider, CancellationToken::new(), &NoProgress)
        .unwrap();

    assert!(dir.path().join(BLACK_FOLDER).join("a.jpg").exists());
    assert!(dir.path().join(WHITE_FOLDER).join("b.jpg").exists());
}

#[test]
fn declined_move_still_writes_lists() {
    let dir = three_file_dir();
    let reports = tempfile::tempdir().unwrap();

    let config = ScanConfig::default();
    let checker = ImageChecker::new(dir.path(), config).with_report_dir(reports.path());
    let mut provider = FixedConfig::new(config, MoveChoice::None);

    let outcome = checker
        .check(&mut provider, CancellationToken::new(), &NoProgress)
        .unwrap();

    assert_eq!(file_names(dir.path()), vec!["a.jpg", "b.jpg", "c.jpg"]);
    assert!(!dir.path().join(BLACK_FOLDER).exists());
    assert!(outcome.relocation.black.is_none());
    assert_eq!(file_names(reports.path()).len(), 2);
}

/// Requests cancellation once the first file has been classified
struct CancelAfterFirst {
    cancel: CancellationToken,
}

impl ProgressSink for CancelAfterFirst {
    fn on_progress(&self, progress: &Progress) {
        if progress.processed >= 1 {
            self.cancel.cancel();
        }
    }
}

#[test]
fn interrupted_check_keeps_partial_results() {
    let dir = three_file_dir();
    let reports = tempfile::tempdir().unwrap();

    let cancel = CancellationToken::new();
    let sink = CancelAfterFirst {
        cancel: cancel.clone(),
    };

    let config = ScanConfig {
        progress_interval: 1,
        ..ScanConfig::default()
    };
    let checker = ImageChecker::new(dir.path(), config).with_report_dir(reports.path());
    let mut provider = FixedConfig::new(config, MoveChoice::All);

    let outcome = checker.check(&mut provider, cancel, &sink).unwrap();

    // Only a.jpg was classified before the interrupt
    assert!(outcome.summary.interrupted);
    assert_eq!(outcome.summary.processed, 1);
    assert_eq!(outcome.summary.black_files, vec!["a.jpg"]);
    assert!(outcome.summary.white_files.is_empty());

    // ...and it is still moved and listed
    assert!(dir.path().join(BLACK_FOLDER).join("a.jpg").exists());
    assert!(!dir.path().join(WHITE_FOLDER).exists());
    assert_eq!(file_names(dir.path()), vec!["b.jpg", "c.jpg"]);

    let black_list = outcome.reports.black.unwrap();
    assert_eq!(fs::read_to_string(black_list).unwrap(), "a.jpg\n");
    assert!(outcome.reports.white.is_none());
    assert_eq!(file_names(reports.path()).len(), 1);
}

#[test]
fn rescan_after_relocation_finds_only_normal() {
    let dir = three_file_dir();
    let reports = tempfile::tempdir().unwrap();

    let config = ScanConfig::default();
    let checker = ImageChecker::new(dir.path(), config).with_report_dir(reports.path());
    let mut provider = FixedConfig::new(config, MoveChoice::All);
    checker
        .check(&mut provider, CancellationToken::new(), &NoProgress)
        .unwrap();

    // BLACK/WHITE folders are not scanned
    let summary = run(dir.path(), 5, 250).unwrap();
    assert_eq!(summary.processed, 1);
    assert_eq!(summary.normal, 1);
    assert!(!summary.has_flagged());
}
