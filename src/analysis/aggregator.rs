/// Run aggregator
///
/// Drives every scanned candidate through the classifier exactly once and
/// folds the outcomes into a `RunSummary`. Per-file failures never abort
/// the run; only a missing directory does.

use std::path::Path;
use std::time::Instant;

use super::cancel::CancellationToken;
use super::classifier::classify_candidate;
use super::scanner::scan_directory;
use crate::error::Result;
use crate::state::{RunSummary, ScanConfig};

/// Snapshot emitted at the progress cadence
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Progress {
    pub processed: usize,
    pub total: usize,
    /// Files per second since the run started
    pub rate: f64,
    pub black: usize,
    pub white: usize,
}

impl Progress {
    pub fn percent(&self) -> f64 {
        if self.total == 0 {
            return 100.0;
        }
        self.processed as f64 / self.total as f64 * 100.0
    }
}

/// Port for receiving progress snapshots.
pub trait ProgressSink {
    fn on_progress(&self, progress: &Progress);
}

/// Prints progress lines to stdout
#[derive(Debug, Default, Clone, Copy)]
pub struct ConsoleProgress;

impl ProgressSink for ConsoleProgress {
    fn on_progress(&self, p: &Progress) {
        println!(
            "⏳ Progress: {}/{} ({:.1}%) - {:.1} files/sec - Found: {} black, {} white",
            p.processed,
            p.total,
            p.percent(),
            p.rate,
            p.black,
            p.white
        );
    }
}

/// Drops progress snapshots
#[derive(Debug, Default, Clone, Copy)]
pub struct NoProgress;

impl ProgressSink for NoProgress {
    fn on_progress(&self, _progress: &Progress) {}
}

/// Scan `dir` with default limits, printing progress to the console
pub fn run(dir: &Path, black_tolerance: u8, white_tolerance: u8) -> Result<RunSummary> {
    let config = ScanConfig::with_tolerances(black_tolerance, white_tolerance);
    Aggregator::new(config).run(dir)
}

/// A configured scan over one directory
pub struct Aggregator<'a> {
    config: ScanConfig,
    cancel: CancellationToken,
    progress: &'a dyn ProgressSink,
}

impl<'a> Aggregator<'a> {
    pub fn new(config: ScanConfig) -> Self {
        Self {
            config,
            cancel: CancellationToken::new(),
            progress: &ConsoleProgress,
        }
    }

    /// Stop between files once this token is cancelled
    pub fn with_cancellation(mut self, cancel: CancellationToken) -> Self {
        self.cancel = cancel;
        self
    }

    pub fn with_progress(mut self, progress: &'a dyn ProgressSink) -> Self {
        self.progress = progress;
        self
    }

    fn should_report(&self, processed: usize, total: usize) -> bool {
        let interval = self.config.progress_interval;
        processed == total || (interval > 0 && processed % interval == 0)
    }

    /// Classify every JPEG in `dir`
    ///
    /// Returns a partial summary with `interrupted` set when the token is
    /// cancelled mid-run.
    pub fn run(&self, dir: &Path) -> Result<RunSummary> {
        let candidates = scan_directory(dir)?;
        let total = candidates.len();
        let mut summary = RunSummary::new(total);

        println!("🔍 Found {} JPG files to process...", total);
        if total == 0 {
            println!("No JPG files found in directory.");
            return Ok(summary);
        }

        let start = Instant::now();

        for candidate in &candidates {
            if self.cancel.is_cancelled() {
                println!("\n⚠️  Processing interrupted by user");
                tracing::info!(
                    "Run interrupted after {}/{} files",
                    summary.processed,
                    total
                );
                summary.interrupted = true;
                break;
            }

            let result = classify_candidate(
                candidate,
                self.config.black_tolerance,
                self.config.white_tolerance,
                &self.config.limits,
            );
            summary.record(&result);
            debug_assert!(summary.is_consistent());

            if self.should_report(summary.processed, total) {
                let elapsed = start.elapsed().as_secs_f64();
                let rate = if elapsed > 0.0 {
                    summary.processed as f64 / elapsed
                } else {
                    0.0
                };
                self.progress.on_progress(&Progress {
                    processed: summary.processed,
                    total,
                    rate,
                    black: summary.black,
                    white: summary.white,
                });
            }
        }

        summary.elapsed = start.elapsed();

        tracing::info!(
            "Scan of {} complete: {} processed, {} black, {} white, {} skipped, {} errors",
            dir.display(),
            summary.processed,
            summary.black,
            summary.white,
            summary.skipped,
            summary.errors
        );

        Ok(summary)
    }
}
