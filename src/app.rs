/// Top-level flow of one check: banner, scan, summary, relocation, reports

use std::path::PathBuf;

use crate::analysis::{Aggregator, CancellationToken, ProgressSink};
use crate::error::Result;
use crate::prompt::ConfigProvider;
use crate::state::{RunSummary, ScanConfig};
use crate::storage::{relocate, write_reports, MoveChoice, Relocation, ReportFiles};

/// Names shown per flagged list before collapsing into "... and N more"
const PREVIEW_LIMIT: usize = 10;

/// Everything a finished check produced
#[derive(Debug, Clone, Default)]
pub struct CheckOutcome {
    pub summary: RunSummary,
    pub relocation: Relocation,
    pub reports: ReportFiles,
}

/// One configured check of a directory
pub struct ImageChecker {
    directory: PathBuf,
    /// Where the black/white lists are written
    report_dir: PathBuf,
    config: ScanConfig,
}

impl ImageChecker {
    pub fn new(directory: impl Into<PathBuf>, config: ScanConfig) -> Self {
        Self {
            directory: directory.into(),
            report_dir: PathBuf::from("."),
            config,
        }
    }

    pub fn with_report_dir(mut self, report_dir: impl Into<PathBuf>) -> Self {
        self.report_dir = report_dir.into();
        self
    }

    fn print_banner(&self) {
        let limits = &self.config.limits;
        println!("🔍 Starting image analysis in: {}", self.directory.display());
        println!("Black Tolerance (Max Avg Intensity): {}", self.config.black_tolerance);
        println!("White Tolerance (Min Avg Intensity): {}", self.config.white_tolerance);
        println!("Max File Size to Process: {:.2} MB", limits.max_file_size_mb());
        println!("Max Dimension: {}px", limits.max_dimension);
        println!("Auto-move images: {}", if self.config.auto_move { "YES" } else { "NO" });
        println!("{}", "-".repeat(60));
    }

    /// Print the banner and classify every candidate
    pub fn scan(&self, cancel: CancellationToken, progress: &dyn ProgressSink) -> Result<RunSummary> {
        self.print_banner();

        Aggregator::new(self.config)
            .with_cancellation(cancel)
            .with_progress(progress)
            .run(&self.directory)
    }

    /// Summarize a scan, then move and record the flagged files
    ///
    /// An interrupted scan goes through the same flow with whatever was
    /// classified before the interrupt.
    pub fn finish(&self, summary: RunSummary, provider: &mut dyn ConfigProvider) -> Result<CheckOutcome> {
        let mut outcome = CheckOutcome {
            summary,
            ..CheckOutcome::default()
        };

        if outcome.summary.total_found == 0 {
            return Ok(outcome);
        }

        print_summary(&outcome.summary);

        if outcome.summary.interrupted {
            println!(
                "⚠️  Run interrupted: results cover {}/{} files",
                outcome.summary.processed, outcome.summary.total_found
            );
        }

        if !outcome.summary.has_flagged() {
            println!("🎉 No black or white images were found in the directory.");
            return Ok(outcome);
        }

        print_flagged_preview("⚫ Black", &outcome.summary.black_files);
        print_flagged_preview("⚪ White", &outcome.summary.white_files);

        let choice = if self.config.auto_move {
            MoveChoice::All
        } else {
            provider.move_choice(&outcome.summary)
        };
        tracing::debug!("Move choice: {:?}", choice);

        outcome.relocation = relocate(&outcome.summary, &self.directory, choice)?;
        outcome.reports = write_reports(&outcome.summary, &self.report_dir)?;

        Ok(outcome)
    }

    /// `scan` followed by `finish`
    pub fn check(
        &self,
        provider: &mut dyn ConfigProvider,
        cancel: CancellationToken,
        progress: &dyn ProgressSink,
    ) -> Result<CheckOutcome> {
        let summary = self.scan(cancel, progress)?;
        self.finish(summary, provider)
    }
}

/// End-of-run counters
pub fn print_summary(summary: &RunSummary) {
    println!("{}", "-".repeat(60));
    println!("--- Analysis Complete ---");
    println!("Total files processed: {}", summary.processed);
    println!(
        "Processing time: {:.1}s ({:.1} files/sec)",
        summary.elapsed.as_secs_f64(),
        summary.rate()
    );
    println!("Black images found: {}", summary.black);
    println!("White images found: {}", summary.white);
    println!("Normal images: {}", summary.normal);
    println!("Files skipped: {}", summary.skipped);
    println!("Errors encountered: {}", summary.errors);
}

/// Lines shown for a flagged list, capped at `PREVIEW_LIMIT` names
pub fn flagged_preview(files: &[String]) -> Vec<String> {
    let mut lines: Vec<String> = files
        .iter()
        .take(PREVIEW_LIMIT)
        .map(|f| format!("  - {}", f))
        .collect();
    if files.len() > PREVIEW_LIMIT {
        lines.push(format!("  ... and {} more", files.len() - PREVIEW_LIMIT));
    }
    lines
}

fn print_flagged_preview(title: &str, files: &[String]) {
    if files.is_empty() {
        return;
    }
    println!("\n{} images found ({}):", title, files.len());
    for line in flagged_preview(files) {
        println!("{}", line);
    }
}
