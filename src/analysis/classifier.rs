/// Intensity classifier
///
/// Runs one file through a fixed sequence of gates, cheapest first, and
/// only decodes pixels when every earlier gate has passed:
///
/// 1. Empty file            -> BLACK
/// 2. Over the size limit   -> SKIP
/// 3. Header probe          -> ERROR if unreadable, BLACK if truncated
/// 4. Dimension check       -> SKIP if either side is over the limit
/// 5. Elapsed time checks   -> SKIP when over budget
/// 6. Grayscale mean        -> BLACK / WHITE / NORMAL
///
/// Every failure ends up as a `ClassificationResult`, never as an `Err` or a
/// panic, so a bad file cannot stop the batch.

use image::{ImageReader, ImageResult, Limits};
use std::fs::File;
use std::io::{self, BufReader, Read};
use std::panic::{self, AssertUnwindSafe};
use std::path::Path;
use std::time::Instant;

use super::intensity::{classify_mean, mean_luminance};
use crate::state::{Classification, ClassificationResult, ImageCandidate, ScanLimits};

/// Bytes read by the readability probe
const PROBE_BYTES: u64 = 100;

/// Files with fewer readable bytes than this cannot hold image data
const MIN_HEADER_BYTES: usize = 10;

/// Classify a file with the default safety limits
pub fn classify(path: &Path, black_tolerance: u8, white_tolerance: u8) -> ClassificationResult {
    classify_candidate(
        &ImageCandidate::new(path),
        black_tolerance,
        white_tolerance,
        &ScanLimits::default(),
    )
}

/// Classify a scanned candidate and print the outcome
pub fn classify_candidate(
    candidate: &ImageCandidate,
    black_tolerance: u8,
    white_tolerance: u8,
    limits: &ScanLimits,
) -> ClassificationResult {
    // Decoders can panic on hostile input; that is just another ERROR here
    let result = match panic::catch_unwind(AssertUnwindSafe(|| {
        run_gates(candidate, black_tolerance, white_tolerance, limits)
    })) {
        Ok(result) => result,
        Err(_panic) => {
            tracing::error!(
                "Classifier PANICKED for {} - likely malformed image data",
                candidate.path().display()
            );
            ClassificationResult::gated(
                Classification::Error,
                candidate.filename(),
                "Unexpected failure while decoding",
            )
        }
    };

    report(&result);
    result
}

fn run_gates(
    candidate: &ImageCandidate,
    black_tolerance: u8,
    white_tolerance: u8,
    limits: &ScanLimits,
) -> ClassificationResult {
    let path = candidate.path();
    let name = candidate.filename();

    // Gate 1 & 2: file size
    let size = match candidate.size() {
        Ok(size) => size,
        Err(e) => {
            return ClassificationResult::gated(
                Classification::Error,
                name,
                format!("Cannot stat file: {}", e),
            )
        }
    };

    if size == 0 {
        return ClassificationResult::gated(
            Classification::Black,
            name,
            "File is 0 bytes, classified as black",
        );
    }

    if size > limits.max_file_size_bytes {
        return ClassificationResult::gated(
            Classification::Skip,
            name,
            format!(
                "Size {:.2} MB exceeds max size ({:.2} MB)",
                size as f64 / 1024.0 / 1024.0,
                limits.max_file_size_mb()
            ),
        );
    }

    // Gate 3: quick read test
    match probe_header(path) {
        Ok(read) if read < MIN_HEADER_BYTES => {
            // Too short to be an image at all; counted as black like an empty file
            return ClassificationResult::gated(
                Classification::Black,
                name,
                format!("Only {} bytes readable, classified as black", read),
            );
        }
        Ok(_) => {}
        Err(e) => {
            return ClassificationResult::gated(
                Classification::Error,
                name,
                format!("Cannot read file: {}", e),
            );
        }
    }

    // Time budget covers opening, decoding and conversion
    let start = Instant::now();

    // Gate 4: header-only dimension check
    let (width, height) = match read_dimensions(path) {
        Ok(dims) => dims,
        Err(e) => {
            return ClassificationResult::gated(
                Classification::Error,
                name,
                format!("Cannot identify image: {}", e),
            );
        }
    };

    tracing::debug!("{}: {}x{}, {} bytes", name, width, height, size);

    if width > limits.max_dimension || height > limits.max_dimension {
        return ClassificationResult::gated(
            Classification::Skip,
            name,
            format!("{}x{} - Dimensions too large", width, height),
        );
    }

    // Gate 5a: budget spent before decoding
    if start.elapsed() > limits.timeout() {
        return ClassificationResult::gated(
            Classification::Skip,
            name,
            "Timeout - Taking too long to open",
        );
    }

    // Gate 6: decode and convert to luminance
    let gray = match decode(path, limits) {
        Ok(img) => img.into_luma8(),
        Err(e) => {
            return ClassificationResult::gated(
                Classification::Error,
                name,
                format!("Error processing image: {}", e),
            );
        }
    };

    // Gate 5b: budget spent converting
    if start.elapsed() > limits.timeout() {
        return ClassificationResult::gated(
            Classification::Skip,
            name,
            "Timeout - Taking too long to convert",
        );
    }

    match mean_luminance(&gray) {
        Some(mean) => {
            let kind = classify_mean(mean, black_tolerance, white_tolerance);
            ClassificationResult::measured(kind, name, mean)
        }
        None => ClassificationResult::gated(Classification::Error, name, "Image has no pixels"),
    }
}

/// Read at most `PROBE_BYTES` from the start of the file, returning the count
fn probe_header(path: &Path) -> io::Result<usize> {
    let mut header = Vec::with_capacity(PROBE_BYTES as usize);
    File::open(path)?.take(PROBE_BYTES).read_to_end(&mut header)?;
    Ok(header.len())
}

fn open_reader(path: &Path) -> ImageResult<ImageReader<BufReader<File>>> {
    // Guess from content so misnamed files still decode
    Ok(ImageReader::open(path)?.with_guessed_format()?)
}

/// Width and height from the image header, without decoding pixels
fn read_dimensions(path: &Path) -> ImageResult<(u32, u32)> {
    open_reader(path)?.into_dimensions()
}

/// Full decode, bounded by the decoder's own allocation and size limits
fn decode(path: &Path, scan_limits: &ScanLimits) -> ImageResult<image::DynamicImage> {
    let mut reader = open_reader(path)?;

    let mut limits = Limits::default();
    limits.max_image_width = Some(scan_limits.max_dimension);
    limits.max_image_height = Some(scan_limits.max_dimension);
    reader.limits(limits);

    reader.decode()
}

/// Print the per-file outcome line
fn report(result: &ClassificationResult) {
    match result.kind {
        Classification::Black | Classification::White | Classification::Normal => {
            println!("{}", result);
        }
        Classification::Skip => {
            println!("{}", result);
            tracing::info!(file = %result.filename, "skipped: {}", result.note.as_deref().unwrap_or(""));
        }
        Classification::Error => {
            eprintln!("{}", result);
            tracing::warn!(file = %result.filename, "failed: {}", result.note.as_deref().unwrap_or(""));
        }
    }
}
