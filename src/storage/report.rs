/// Flagged-list report files
///
/// Writes `black_images_<unix>.txt` and `white_images_<unix>.txt`, one
/// filename per line in encounter order. Empty lists produce no file.

use chrono::Utc;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use crate::error::Result;
use crate::state::RunSummary;

/// Paths of the report files that were actually written
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ReportFiles {
    pub black: Option<PathBuf>,
    pub white: Option<PathBuf>,
}

/// `black_images_1700000000.txt`
pub fn report_file_name(prefix: &str, timestamp: i64) -> String {
    format!("{}_images_{}.txt", prefix, timestamp)
}

/// Write one name per line
pub fn write_list(path: &Path, names: &[String]) -> Result<()> {
    let mut writer = BufWriter::new(File::create(path)?);
    for name in names {
        writeln!(writer, "{}", name)?;
    }
    writer.flush()?;
    Ok(())
}

fn write_if_any(out_dir: &Path, prefix: &str, timestamp: i64, names: &[String]) -> Result<Option<PathBuf>> {
    if names.is_empty() {
        return Ok(None);
    }
    let path = out_dir.join(report_file_name(prefix, timestamp));
    write_list(&path, names)?;
    println!("📝 {} list saved to: {}", capitalize(prefix), path.display());
    Ok(Some(path))
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Write the black / white lists of a run with an explicit timestamp
pub fn write_reports_at(summary: &RunSummary, out_dir: &Path, timestamp: i64) -> Result<ReportFiles> {
    Ok(ReportFiles {
        black: write_if_any(out_dir, "black", timestamp, &summary.black_files)?,
        white: write_if_any(out_dir, "white", timestamp, &summary.white_files)?,
    })
}

/// Write the black / white lists of a run, stamped with the current unix time
pub fn write_reports(summary: &RunSummary, out_dir: &Path) -> Result<ReportFiles> {
    write_reports_at(summary, out_dir, Utc::now().timestamp())
}
