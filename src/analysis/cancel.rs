//! Stop request shared between the Ctrl-C handler and the scan loop.
//!
//! The loop only looks at the flag between files, never in the middle of
//! a decode.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

#[derive(Debug, Clone, Default)]
pub struct CancellationToken {
    requested: Arc<AtomicBool>,
}

impl CancellationToken {
    pub fn new() -> Self {
        Self::default()
    }

    /// Ask the running scan to stop before its next file
    pub fn cancel(&self) {
        if !self.requested.swap(true, Ordering::AcqRel) {
            tracing::debug!("Scan stop requested");
        }
    }

    pub fn is_cancelled(&self) -> bool {
        self.requested.load(Ordering::Acquire)
    }
}
