//! Quote catalog core: record types, input checks, and the concurrency-safe store.

mod store;
pub mod types;
pub mod validate;

pub use store::{InMemoryQuoteStore, QuoteStore};
pub use types::{Quote, QuoteDraft, StoreError};
