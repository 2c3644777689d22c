/// Directory scanner
///
/// Lists the JPEG files sitting directly in a folder. Subfolders (including
/// the BLACK/WHITE folders created by a previous run) are never entered.

use std::path::Path;
use walkdir::WalkDir;

use crate::error::{CheckerError, Result};
use crate::state::ImageCandidate;

/// Extensions picked up by the scanner, compared case-insensitively
pub const JPEG_EXTENSIONS: [&str; 2] = ["jpg", "jpeg"];

/// Check if a file name looks like a JPEG by extension
pub fn is_jpeg_name(name: &str) -> bool {
    let lower = name.to_lowercase();
    JPEG_EXTENSIONS
        .iter()
        .any(|ext| lower.ends_with(&format!(".{}", ext)))
}

/// Collect the JPEG candidates in `dir`, sorted by file name
pub fn scan_directory(dir: &Path) -> Result<Vec<ImageCandidate>> {
    if !dir.is_dir() {
        return Err(CheckerError::directory_not_found(dir));
    }

    // Listing permission is checked up front so an unreadable folder fails
    // the run instead of silently scanning as empty
    std::fs::read_dir(dir).map_err(|e| {
        tracing::warn!("Cannot list {}: {}", dir.display(), e);
        CheckerError::directory_not_found(dir)
    })?;

    tracing::debug!("Scanning folder: {}", dir.display());

    let mut candidates = Vec::new();

    for entry in WalkDir::new(dir)
        .min_depth(1)
        .max_depth(1)
        .follow_links(true)
        .sort_by_file_name()
        .into_iter()
    {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                tracing::warn!("Skipping unreadable entry in {}: {}", dir.display(), e);
                continue;
            }
        };

        // Only process files (not directories)
        if !entry.file_type().is_file() {
            continue;
        }

        let name = entry.file_name().to_string_lossy();
        if !is_jpeg_name(&name) {
            continue;
        }

        candidates.push(ImageCandidate::new(entry.path()));
    }

    tracing::debug!("Found {} JPEG candidates in {}", candidates.len(), dir.display());

    Ok(candidates)
}
