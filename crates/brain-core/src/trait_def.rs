//! The Brain trait definition.

use async_trait::async_trait;

use crate::error::BrainError;
use crate::prompt::GenerationPrompt;

/// A text generator that answers a structured prompt.
///
/// Any provider that honours the prompt's response contract is
/// substitutable. This trait is object-safe and can be used with
/// `Arc<dyn Brain>`.
#[async_trait]
pub trait Brain: Send + Sync {
    /// Generate raw model text for the prompt.
    ///
    /// Implementations return the text as produced; they do not repair or
    /// validate the requested JSON shape.
    async fn generate(&self, prompt: &GenerationPrompt) -> Result<String, BrainError>;

    /// Get a human-readable name for this brain implementation.
    fn name(&self) -> &str;

    /// Check if the brain is ready to generate.
    ///
    /// Default implementation always returns true.
    async fn is_ready(&self) -> bool {
        true
    }
}
