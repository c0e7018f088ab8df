//! Core trait and types for content-generation brains.
//!
//! A brain is an opaque text generator. The outreach engine hands it a
//! [`GenerationPrompt`] and expects back raw model text that should contain
//! a JSON object with the fields the prompt names. Parsing, validation and
//! fallbacks are the caller's job.
//!
//! - [`Brain`] - The trait that all brain implementations must implement
//! - [`GenerationPrompt`] - System/user prompt plus the response contract
//! - [`BrainError`] - Error types for brain operations
//!
//! # Example
//!
//! ```rust
//! use brain_core::{Brain, BrainError, GenerationPrompt};
//! use async_trait::async_trait;
//!
//! struct CannedBrain;
//!
//! #[async_trait]
//! impl Brain for CannedBrain {
//!     async fn generate(&self, _prompt: &GenerationPrompt) -> Result<String, BrainError> {
//!         Ok(r#"{"subject": "Hi", "body": "Hello!"}"#.to_string())
//!     }
//!
//!     fn name(&self) -> &str {
//!         "CannedBrain"
//!     }
//! }
//! ```

mod error;
mod prompt;
mod trait_def;

pub use error::BrainError;
pub use prompt::{hash_prompt, GenerationPrompt};
pub use trait_def::Brain;

// Re-export async_trait for convenience
pub use async_trait::async_trait;
