/// Scan configuration
///
/// This struct stores the thresholds and safety limits for a run.
/// It can be serialized to JSON so a run can be reproduced from a file,
/// and every field has a default so partial files are accepted.

use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::error::{CheckerError, Result};

/// Default maximum mean intensity still considered black
pub const DEFAULT_BLACK_TOLERANCE: u8 = 5;

/// Default minimum mean intensity considered white
pub const DEFAULT_WHITE_TOLERANCE: u8 = 250;

/// Safety limits applied by the classifier before and during decoding
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(default)]
pub struct ScanLimits {
    /// Files larger than this are skipped without decoding (default 30 MiB)
    pub max_file_size_bytes: u64,

    /// Images wider or taller than this are skipped (default 5000 px)
    pub max_dimension: u32,

    /// Per-file wall clock budget in milliseconds (default 15 s)
    /// - Checked between decode stages only, a stuck decoder is not interrupted
    pub timeout_ms: u64,
}

impl Default for ScanLimits {
    fn default() -> Self {
        Self {
            max_file_size_bytes: 30 * 1024 * 1024,
            max_dimension: 5000,
            timeout_ms: 15_000,
        }
    }
}

impl ScanLimits {
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }

    pub fn max_file_size_mb(&self) -> f64 {
        self.max_file_size_bytes as f64 / 1024.0 / 1024.0
    }
}

/// All parameters for one run
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(default)]
pub struct ScanConfig {
    // ========== Thresholds ==========

    /// Mean intensity at or below this is BLACK (0-255)
    pub black_tolerance: u8,

    /// Mean intensity at or above this is WHITE (0-255)
    pub white_tolerance: u8,

    // ========== Safety ==========

    pub limits: ScanLimits,

    // ========== Run behaviour ==========

    /// Print a progress line every N files (0 = only on the last file)
    pub progress_interval: usize,

    /// Move flagged files without asking
    pub auto_move: bool,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            black_tolerance: DEFAULT_BLACK_TOLERANCE,
            white_tolerance: DEFAULT_WHITE_TOLERANCE,
            limits: ScanLimits::default(),
            progress_interval: 50,
            auto_move: false,
        }
    }
}

impl ScanConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Default config with custom thresholds
    pub fn with_tolerances(black_tolerance: u8, white_tolerance: u8) -> Self {
        Self {
            black_tolerance,
            white_tolerance,
            ..Self::default()
        }
    }

    /// Convert to JSON string for saving next to a batch
    pub fn to_json(&self) -> std::result::Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Parse from JSON string
    pub fn from_json(json: &str) -> std::result::Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Load a config file from disk
    pub fn load(path: &std::path::Path) -> Result<Self> {
        let json = std::fs::read_to_string(path)?;
        let config = Self::from_json(&json)?;
        config.validate()?;
        Ok(config)
    }

    /// Reject configurations the classifier cannot use sensibly
    ///
    /// The classifier itself does not check threshold ordering, so this is
    /// run on anything the user supplies explicitly.
    pub fn validate(&self) -> Result<()> {
        if self.black_tolerance >= self.white_tolerance {
            return Err(CheckerError::invalid_config(format!(
                "black tolerance ({}) must be below white tolerance ({})",
                self.black_tolerance, self.white_tolerance
            )));
        }
        if self.limits.max_dimension == 0 {
            return Err(CheckerError::invalid_config("max dimension must be positive"));
        }
        Ok(())
    }
}
