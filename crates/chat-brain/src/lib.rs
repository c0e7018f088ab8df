//! Chat-completions brain implementation.
//!
//! This crate provides a brain that talks to any OpenAI-compatible
//! `/v1/chat/completions` endpoint and asks for a JSON object answer when the
//! prompt carries a response contract.
//!
//! # Features
//!
//! - JSON-object response mode when the prompt names required fields
//! - Bounded HTTP timeout per request
//! - Configurable via environment variables or a builder
//!
//! # Usage
//!
//! ```rust,no_run
//! use chat_brain::{Brain, ChatBrain, GenerationPrompt};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let brain = ChatBrain::from_env()?;
//!     let prompt = GenerationPrompt::new("You write short sales follow-ups.", "Follow up with Ana.")
//!         .expect_json_fields(["subject", "body"]);
//!     let text = brain.generate(&prompt).await?;
//!     println!("{}", text);
//!     Ok(())
//! }
//! ```

mod api_types;
mod brain;
mod config;

pub use brain::ChatBrain;
pub use config::{ChatBrainConfig, ChatBrainConfigBuilder};

// Re-export brain-core types for convenience
pub use brain_core::{async_trait, Brain, BrainError, GenerationPrompt};
