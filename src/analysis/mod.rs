/// Image analysis module
///
/// This module handles:
/// - Finding JPEG candidates in a folder
/// - Gated per-file classification by mean luminance
/// - Driving a whole run and reporting progress

pub mod aggregator;
pub mod cancel;
pub mod classifier;
pub mod intensity;
pub mod scanner;

pub use aggregator::{run, Aggregator, ConsoleProgress, NoProgress, Progress, ProgressSink};
pub use cancel::CancellationToken;
pub use classifier::{classify, classify_candidate};
pub use scanner::scan_directory;
