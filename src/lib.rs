#![deny(missing_docs)]

//! Core library for the Quote Keeper HTTP service.

/// HTTP routing and REST handlers.
pub mod api;
/// Environment-driven configuration management.
pub mod config;
/// Structured logging and tracing setup.
pub mod logging;
/// Store activity counters.
pub mod metrics;
/// Quote records, validation, and the in-memory store.
pub mod quotes;
