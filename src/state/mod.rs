/// State module
///
/// This module holds the data that flows through a scan:
/// - Candidates and classification outcomes (data.rs)
/// - Thresholds and safety limits (config.rs)
/// - Per-run counters and flagged lists (summary.rs)

pub mod config;
pub mod data;
pub mod summary;

pub use config::{ScanConfig, ScanLimits};
pub use data::{Classification, ClassificationResult, ImageCandidate};
pub use summary::RunSummary;
