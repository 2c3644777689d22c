/// Per-run counters and flagged file lists
///
/// Owned by the aggregator and updated once per classified candidate.

use std::time::Duration;

use super::data::{Classification, ClassificationResult};

#[derive(Debug, Clone, Default, PartialEq)]
pub struct RunSummary {
    /// Candidates found by the scanner
    pub total_found: usize,
    pub processed: usize,
    pub black: usize,
    pub white: usize,
    pub normal: usize,
    pub skipped: usize,
    pub errors: usize,
    pub elapsed: Duration,
    /// BLACK filenames in encounter order
    pub black_files: Vec<String>,
    /// WHITE filenames in encounter order
    pub white_files: Vec<String>,
    /// The run stopped early on user request
    pub interrupted: bool,
}

impl RunSummary {
    pub fn new(total_found: usize) -> Self {
        Self {
            total_found,
            ..Self::default()
        }
    }

    /// Fold one classification into the counters
    pub fn record(&mut self, result: &ClassificationResult) {
        self.processed += 1;
        match result.kind {
            Classification::Black => {
                self.black += 1;
                self.black_files.push(result.filename.clone());
            }
            Classification::White => {
                self.white += 1;
                self.white_files.push(result.filename.clone());
            }
            Classification::Normal => self.normal += 1,
            Classification::Skip => self.skipped += 1,
            Classification::Error => self.errors += 1,
        }
    }

    /// `processed == black + white + normal + skipped + errors`
    pub fn is_consistent(&self) -> bool {
        self.processed == self.black + self.white + self.normal + self.skipped + self.errors
            && self.black == self.black_files.len()
            && self.white == self.white_files.len()
    }

    pub fn has_flagged(&self) -> bool {
        !self.black_files.is_empty() || !self.white_files.is_empty()
    }

    /// Files per second over the whole run
    pub fn rate(&self) -> f64 {
        // Floor the elapsed time so a near-instant run doesn't report absurd rates
        self.processed as f64 / self.elapsed.as_secs_f64().max(0.1)
    }
}
