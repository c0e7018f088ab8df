//! Failing brain implementation - every call errors.

use brain_core::{async_trait, Brain, BrainError, GenerationPrompt};

/// Which error a [`FailingBrain`] produces.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    Network,
    Timeout,
    Unavailable,
}

/// A brain that fails every call. Used to exercise fallback paths.
#[derive(Debug, Clone)]
pub struct FailingBrain {
    kind: FailureKind,
}

impl FailingBrain {
    /// Create a brain that fails with the given kind of error.
    pub fn new(kind: FailureKind) -> Self {
        Self { kind }
    }
}

impl Default for FailingBrain {
    fn default() -> Self {
        Self::new(FailureKind::Network)
    }
}

#[async_trait]
impl Brain for FailingBrain {
    async fn generate(&self, _prompt: &GenerationPrompt) -> Result<String, BrainError> {
        Err(match self.kind {
            FailureKind::Network => BrainError::Network("connection refused".to_string()),
            FailureKind::Timeout => BrainError::Timeout,
            FailureKind::Unavailable => BrainError::Unavailable("maintenance".to_string()),
        })
    }

    fn name(&self) -> &str {
        "FailingBrain"
    }

    async fn is_ready(&self) -> bool {
        false
    }
}
