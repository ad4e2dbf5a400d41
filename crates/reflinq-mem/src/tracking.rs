//! Peak usage tracking for arenas.
//!
//! The arena records its used bytes after every acquisition so tests and
//! callers can check the high-water mark of a query.

use std::sync::atomic::{AtomicUsize, Ordering};

#[derive(Debug, Default)]
pub struct PeakTracker {
    peak_bytes: AtomicUsize,
}

impl PeakTracker {
    pub fn new() -> Self {
        Self {
            peak_bytes: AtomicUsize::new(0),
        }
    }

    /// Record a new "used bytes" value; updates the peak if higher.
    /// Returns true when `used_bytes` is a new high-water mark.
    pub fn record_used(&self, used_bytes: usize) -> bool {
        let previous = self.peak_bytes.fetch_max(used_bytes, Ordering::AcqRel);
        if used_bytes <= previous {
            return false;
        }
        #[cfg(feature = "tracing")]
        tracing::trace!(used_bytes, previous, "arena peak");
        true
    }

    pub fn peak(&self) -> usize {
        self.peak_bytes.load(Ordering::Relaxed)
    }
}
