use std::sync::atomic::{AtomicU64, Ordering};

/// Thread-safe counters describing write activity against the quote store.
#[derive(Default)]
pub struct QuoteMetrics {
    quotes_created: AtomicU64,
    quotes_updated: AtomicU64,
    quotes_deleted: AtomicU64,
    rejected_writes: AtomicU64,
}

impl QuoteMetrics {
    /// Create an empty metrics accumulator.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a successfully stored quote.
    pub fn record_created(&self) {
        self.quotes_created.fetch_add(1, Ordering::Relaxed);
    }

    /// Record a successful in-place update.
    pub fn record_updated(&self) {
        self.quotes_updated.fetch_add(1, Ordering::Relaxed);
    }

    /// Record a successful delete.
    pub fn record_deleted(&self) {
        self.quotes_deleted.fetch_add(1, Ordering::Relaxed);
    }

    /// Record a create, update, or delete that failed.
    pub fn record_rejected(&self) {
        self.rejected_writes.fetch_add(1, Ordering::Relaxed);
    }

    /// Return a snapshot of the current counters alongside the live record count.
    pub fn snapshot(&self, quote_count: usize) -> MetricsSnapshot {
        MetricsSnapshot {
            quote_count: quote_count as u64,
            quotes_created: self.quotes_created.load(Ordering::Relaxed),
            quotes_updated: self.quotes_updated.load(Ordering::Relaxed),
            quotes_deleted: self.quotes_deleted.load(Ordering::Relaxed),
            rejected_writes: self.rejected_writes.load(Ordering::Relaxed),
        }
    }

    /// Zero every counter.
    pub(crate) fn reset(&self) {
        self.quotes_created.store(0, Ordering::Relaxed);
        self.quotes_updated.store(0, Ordering::Relaxed);
        self.quotes_deleted.store(0, Ordering::Relaxed);
        self.rejected_writes.store(0, Ordering::Relaxed);
    }
}

/// Immutable view of store counters used for reporting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
pub struct MetricsSnapshot {
    /// Number of quotes currently stored.
    pub quote_count: u64,
    /// Quotes created since startup.
    pub quotes_created: u64,
    /// Successful updates since startup.
    pub quotes_updated: u64,
    /// Successful deletes since startup.
    pub quotes_deleted: u64,
    /// Writes rejected with a validation, lookup, or uniqueness failure.
    pub rejected_writes: u64,
}
