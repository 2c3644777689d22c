/// Storage module
///
/// Everything that writes to disk after a scan:
/// - Moving flagged files into BLACK / WHITE folders (relocate.rs)
/// - Persisting the flagged filename lists (report.rs)

pub mod relocate;
pub mod report;

pub use relocate::{create_folder, move_images, relocate, MoveChoice, MoveReport, Relocation};
pub use report::{write_reports, write_reports_at, ReportFiles};
