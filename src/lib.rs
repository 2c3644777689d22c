//! Extreme exposure image checker
//!
//! Finds JPEGs in a folder whose mean luminance is close to pure black or
//! pure white, and optionally moves them into `BLACK` / `WHITE` subfolders.
//!
//! Classification is a chain of cheap gates (size, readability, dimensions,
//! time budget) in front of a single grayscale mean. Outcomes are values of
//! [`Classification`], so a bad file is counted instead of aborting a run.

pub mod analysis;
pub mod app;
pub mod error;
pub mod prompt;
pub mod state;
pub mod storage;

pub use analysis::{classify, run, Aggregator, CancellationToken};
pub use app::{CheckOutcome, ImageChecker};
pub use error::{CheckerError, Result};
pub use prompt::{ConfigProvider, FixedConfig, InteractivePrompt};
pub use state::{Classification, ClassificationResult, ImageCandidate, RunSummary, ScanConfig, ScanLimits};
pub use storage::MoveChoice;
