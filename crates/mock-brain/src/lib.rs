//! Mock brain implementations for reminder generation tests.
//!
//! This crate provides mock implementations of the `Brain` trait:
//! - `ScriptedBrain` - Replies with canned text and records every prompt
//! - `FailingBrain` - Always fails with a chosen error
//! - `DelayedBrain` - Wraps another brain with artificial delay
//!
//! For production generation, use the `chat-brain` crate instead.
//!
//! # Example
//!
//! ```rust
//! use mock_brain::{Brain, GenerationPrompt, ScriptedBrain};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), mock_brain::BrainError> {
//!     let brain = ScriptedBrain::json("Checking in", "Hi Sam,\nAny thoughts?");
//!
//!     let prompt = GenerationPrompt::new("You write sales email.", "Write a follow-up.");
//!     let text = brain.generate(&prompt).await?;
//!     assert!(text.contains("Checking in"));
//!     assert_eq!(brain.call_count(), 1);
//!     Ok(())
//! }
//! ```

mod delayed;
mod failing;
mod scripted;

// Re-export brain-core types for convenience
pub use brain_core::{async_trait, Brain, BrainError, GenerationPrompt};

pub use delayed::DelayedBrain;
pub use failing::{FailingBrain, FailureKind};
pub use scripted::ScriptedBrain;
