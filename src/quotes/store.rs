//! In-memory quote store enforcing identity and name uniqueness.

use crate::{
    metrics::{MetricsSnapshot, QuoteMetrics},
    quotes::{
        types::{Quote, QuoteDraft, StoreError},
        validate::{normalize_query, require_name},
    },
};
use parking_lot::RwLock;
use std::collections::BTreeMap;
use time::OffsetDateTime;

/// Abstraction over the quote collection used by external surfaces (HTTP, tests).
///
/// Implementations must make each mutating call atomic as a whole: two concurrent writers may
/// never both observe a free name and both commit it.
pub trait QuoteStore: Send + Sync {
    /// Validate and persist a new quote, assigning its id and creation time.
    fn create(&self, draft: QuoteDraft) -> Result<Quote, StoreError>;

    /// Fetch a quote by identifier.
    fn get(&self, id: u64) -> Result<Quote, StoreError>;

    /// Return every quote in ascending id order.
    fn list(&self) -> Vec<Quote>;

    /// Replace the name, content, and completion flag of an existing quote.
    fn update(&self, id: u64, draft: QuoteDraft) -> Result<Quote, StoreError>;

    /// Remove a quote.
    fn delete(&self, id: u64) -> Result<(), StoreError>;

    /// Case-insensitive substring search over names, in ascending id order.
    ///
    /// `None` is rejected; an empty query matches every quote.
    fn search_by_name(&self, query: Option<&str>) -> Result<Vec<Quote>, StoreError>;

    /// Retrieve the current metrics snapshot for diagnostics.
    fn metrics_snapshot(&self) -> MetricsSnapshot;
}

/// Guarded state: records keyed by id plus the next id to hand out.
struct Records {
    by_id: BTreeMap<u64, Quote>,
    next_id: u64,
}

impl Records {
    fn new() -> Self {
        Self {
            by_id: BTreeMap::new(),
            next_id: 1,
        }
    }

    fn ensure_name_free(&self, name: &str, except: Option<u64>) -> Result<(), StoreError> {
        let taken = self
            .by_id
            .values()
            .any(|quote| Some(quote.id) != except && quote.name == name);
        if taken {
            Err(StoreError::DuplicateName(name.to_owned()))
        } else {
            Ok(())
        }
    }

    fn insert_new(&mut self, draft: QuoteDraft) -> Result<Quote, StoreError> {
        let name = require_name(draft.name.as_deref())?.to_owned();
        self.ensure_name_free(&name, None)?;

        // Only advance once nothing else can fail.
        let id = self.next_id;
        self.next_id += 1;

        let quote = Quote {
            id,
            name,
            content: draft.content,
            author: draft.author,
            source: draft.source,
            category: draft.category,
            created_at: OffsetDateTime::now_utc(),
            completed: draft.completed.unwrap_or(false),
        };
        self.by_id.insert(id, quote.clone());
        Ok(quote)
    }

    fn apply_update(&mut self, id: u64, draft: QuoteDraft) -> Result<Quote, StoreError> {
        if !self.by_id.contains_key(&id) {
            return Err(StoreError::NotFound(id));
        }
        let name = require_name(draft.name.as_deref())?.to_owned();
        self.ensure_name_free(&name, Some(id))?;

        let quote = self.by_id.get_mut(&id).ok_or(StoreError::NotFound(id))?;
        quote.name = name;
        quote.content = draft.content;
        quote.completed = draft.completed.unwrap_or(false);
        Ok(quote.clone())
    }
}

/// Process-scoped quote collection guarded by a single reader-writer lock.
///
/// Reads share the lock; create, update, and delete hold it exclusively across validation, the
/// uniqueness scan, and the write. Construct once at startup and share it through an `Arc`.
pub struct InMemoryQuoteStore {
    records: RwLock<Records>,
    metrics: QuoteMetrics,
}

impl InMemoryQuoteStore {
    /// Create an empty store whose first quote will receive id 1.
    pub fn new() -> Self {
        Self {
            records: RwLock::new(Records::new()),
            metrics: QuoteMetrics::new(),
        }
    }

    /// Number of quotes currently stored.
    pub fn len(&self) -> usize {
        self.records.read().by_id.len()
    }

    /// Whether the store holds no quotes.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Drop every quote, restart ids at 1, and zero the counters.
    ///
    /// Intended for test harnesses; the HTTP surface only sees [`QuoteStore`], which does not
    /// expose this.
    pub fn reset(&self) {
        let mut records = self.records.write();
        *records = Records::new();
        self.metrics.reset();
    }

    fn tally<T>(
        &self,
        result: Result<T, StoreError>,
        on_success: fn(&QuoteMetrics),
    ) -> Result<T, StoreError> {
        match &result {
            Ok(_) => on_success(&self.metrics),
            Err(_) => self.metrics.record_rejected(),
        }
        result
    }
}

impl Default for InMemoryQuoteStore {
    fn default() -> Self {
        Self::new()
    }
}

impl QuoteStore for InMemoryQuoteStore {
    fn create(&self, draft: QuoteDraft) -> Result<Quote, StoreError> {
        let result = self.records.write().insert_new(draft);
        self.tally(result, QuoteMetrics::record_created)
    }

    fn get(&self, id: u64) -> Result<Quote, StoreError> {
        self.records
            .read()
            .by_id
            .get(&id)
            .cloned()
            .ok_or(StoreError::NotFound(id))
    }

    fn list(&self) -> Vec<Quote> {
        self.records.read().by_id.values().cloned().collect()
    }

    fn update(&self, id: u64, draft: QuoteDraft) -> Result<Quote, StoreError> {
        let result = self.records.write().apply_update(id, draft);
        self.tally(result, QuoteMetrics::record_updated)
    }

    fn delete(&self, id: u64) -> Result<(), StoreError> {
        let result = self
            .records
            .write()
            .by_id
            .remove(&id)
            .map(|_| ())
            .ok_or(StoreError::NotFound(id));
        self.tally(result, QuoteMetrics::record_deleted)
    }

    fn search_by_name(&self, query: Option<&str>) -> Result<Vec<Quote>, StoreError> {
        let needle = normalize_query(query)?;
        let records = self.records.read();
        Ok(records
            .by_id
            .values()
            .filter(|quote| quote.name.to_lowercase().contains(&needle))
            .cloned()
            .collect())
    }

    fn metrics_snapshot(&self) -> MetricsSnapshot {
        self.metrics.snapshot(self.len())
    }
}
