//! Core data types and error definitions for the quote store.

use thiserror::Error;
use time::OffsetDateTime;

/// Errors returned by [`crate::quotes::QuoteStore`] operations.
///
/// Every variant is a deterministic outcome of the input and the current store contents, so
/// callers surface them as-is rather than retrying.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    /// A required field was missing or malformed.
    #[error("invalid input: {0}")]
    InvalidInput(String),
    /// No quote exists with the requested identifier.
    #[error("quote {0} not found")]
    NotFound(u64),
    /// Another quote already uses the requested name.
    #[error("a quote named '{0}' already exists")]
    DuplicateName(String),
}

/// A quote persisted in the store.
///
/// Values carrying an `id` and `created_at` are only ever produced by the store itself; callers
/// receive owned copies.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Quote {
    /// Server-assigned identifier, never reused while the process runs.
    pub id: u64,
    /// Unique display name.
    pub name: String,
    /// Quote body.
    pub content: Option<String>,
    /// Who said or wrote it.
    pub author: Option<String>,
    /// Where it was found.
    pub source: Option<String>,
    /// Free-form grouping label.
    pub category: Option<String>,
    /// Creation instant stamped by the store.
    pub created_at: OffsetDateTime,
    /// Whether the quote has been marked done.
    pub completed: bool,
}

/// Caller-supplied candidate for create and update.
///
/// Carries no `id` or timestamp; the store assigns both.
#[derive(Debug, Clone, Default)]
pub struct QuoteDraft {
    /// Requested name; must be present and non-blank.
    pub name: Option<String>,
    /// Quote body.
    pub content: Option<String>,
    /// Author payload, passed through untouched.
    pub author: Option<String>,
    /// Source payload, passed through untouched.
    pub source: Option<String>,
    /// Category payload, passed through untouched.
    pub category: Option<String>,
    /// Completion flag; `None` means `false`.
    pub completed: Option<bool>,
}

impl QuoteDraft {
    /// Start a draft with just a name.
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            ..Self::default()
        }
    }

    /// Attach a quote body.
    pub fn with_content(mut self, content: impl Into<String>) -> Self {
        self.content = Some(content.into());
        self
    }

    /// Set the completion flag.
    pub fn with_completed(mut self, completed: bool) -> Self {
        self.completed = Some(completed);
        self
    }
}
