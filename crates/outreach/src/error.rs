//! Error types for reminder orchestration.

use std::time::Duration;

use brain_core::BrainError;
use database::DatabaseError;
use thiserror::Error;

/// Errors that can occur while sweeping campaigns or creating schedules.
///
/// Most failures are absorbed per lead or per stage and only show up in
/// logs and report counters. The variants that reach a caller are store
/// failures on the outermost listings and configuration problems.
#[derive(Debug, Error)]
pub enum OutreachError {
    /// Persistent store failure.
    #[error("database error: {0}")]
    Database(#[from] DatabaseError),

    /// Content generation failed.
    #[error("brain error: {0}")]
    Brain(#[from] BrainError),

    /// The delivery queue refused an item.
    #[error("enqueue failed: {0}")]
    EnqueueFailed(String),

    /// An external call did not finish in time.
    #[error("{operation} timed out after {elapsed:?}")]
    Timeout {
        operation: &'static str,
        elapsed: Duration,
    },

    /// Invalid configuration.
    #[error("configuration error: {0}")]
    Configuration(String),
}
