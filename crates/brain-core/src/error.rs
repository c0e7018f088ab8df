//! Error types for brain operations.

use thiserror::Error;

/// Errors that can occur while generating content.
#[derive(Debug, Error)]
pub enum BrainError {
    /// The brain is misconfigured (missing key, bad URL, ...).
    #[error("configuration error: {0}")]
    Configuration(String),

    /// The request never reached the provider or the connection dropped.
    #[error("network error: {0}")]
    Network(String),

    /// The provider answered with an error.
    #[error("processing failed: {0}")]
    ProcessingFailed(String),

    /// The provider answered, but not in the shape requested.
    #[error("invalid response: {0}")]
    InvalidResponse(String),

    /// The brain is temporarily unavailable.
    #[error("brain unavailable: {0}")]
    Unavailable(String),

    /// The call did not finish in time.
    #[error("generation timed out")]
    Timeout,
}
