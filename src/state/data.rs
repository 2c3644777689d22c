/// Shared data structures for a scan
///
/// These structs represent the data model that flows between
/// the scanner, the classifier and the run summary.

use std::cell::OnceCell;
use std::fmt;
use std::io;
use std::path::{Path, PathBuf};

/// A single file picked up by the directory scanner
#[derive(Debug, Clone)]
pub struct ImageCandidate {
    /// Full path to the JPEG file
    path: PathBuf,
    /// Filename only (e.g., "DSC_0001.JPG")
    filename: String,
    /// Byte size, filled in on first stat
    size: OnceCell<u64>,
}

impl ImageCandidate {
    /// Create a candidate for a path. The filename is derived from the last component.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let filename = path
            .file_name()
            .unwrap_or_default()
            .to_string_lossy()
            .to_string();

        Self {
            path,
            filename,
            size: OnceCell::new(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn filename(&self) -> &str {
        &self.filename
    }

    /// Byte size of the file. The first call stats the file, later calls reuse it.
    pub fn size(&self) -> io::Result<u64> {
        if let Some(size) = self.size.get() {
            return Ok(*size);
        }
        let size = std::fs::metadata(&self.path)?.len();
        Ok(*self.size.get_or_init(|| size))
    }
}

/// Closed set of per-file outcomes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Classification {
    Black,
    White,
    Normal,
    /// Excluded by policy (too large, too slow). Not a failure.
    Skip,
    Error,
}

impl Classification {
    /// Console label, e.g. `BLACK`
    pub fn label(&self) -> &'static str {
        match self {
            Classification::Black => "BLACK",
            Classification::White => "WHITE",
            Classification::Normal => "NORMAL",
            Classification::Skip => "SKIP",
            Classification::Error => "ERROR",
        }
    }

    /// Console icon shown in front of per-file lines
    pub fn icon(&self) -> &'static str {
        match self {
            Classification::Black => "⚫",
            Classification::White => "⚪",
            Classification::Normal => "✅",
            Classification::Skip => "⏭️ ",
            Classification::Error => "❌",
        }
    }

    /// Whether the file ends up in one of the relocation buckets
    pub fn is_flagged(&self) -> bool {
        matches!(self, Classification::Black | Classification::White)
    }
}

impl fmt::Display for Classification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Outcome of classifying one candidate
#[derive(Debug, Clone, PartialEq)]
pub struct ClassificationResult {
    pub kind: Classification,
    pub filename: String,
    /// Mean luminance (0.0-255.0), only when the pixels were actually measured
    pub mean: Option<f64>,
    /// Why a file was skipped, failed, or classified without measuring
    pub note: Option<String>,
}

impl ClassificationResult {
    /// A result backed by a measured mean intensity
    pub fn measured(kind: Classification, filename: impl Into<String>, mean: f64) -> Self {
        Self {
            kind,
            filename: filename.into(),
            mean: Some(mean),
            note: None,
        }
    }

    /// A result decided by a gate, before any measurement
    pub fn gated(kind: Classification, filename: impl Into<String>, note: impl Into<String>) -> Self {
        Self {
            kind,
            filename: filename.into(),
            mean: None,
            note: Some(note.into()),
        }
    }
}

impl fmt::Display for ClassificationResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} [{}] {}", self.kind.icon(), self.kind, self.filename)?;
        if let Some(mean) = self.mean {
            write!(f, " - Avg intensity: {:.2}", mean)?;
        }
        if let Some(note) = &self.note {
            write!(f, " - {}", note)?;
        }
        Ok(())
    }
}
