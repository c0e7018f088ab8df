//! Scripted brain implementation - replies with canned text.

use std::collections::VecDeque;
use std::sync::Mutex;

use brain_core::{async_trait, Brain, BrainError, GenerationPrompt};

/// A brain that answers from a script and records the prompts it saw.
///
/// Replies are consumed in order; once the script runs out the last reply
/// repeats. Useful for driving the reminder pipeline without a model.
#[derive(Debug, Default)]
pub struct ScriptedBrain {
    replies: Mutex<VecDeque<String>>,
    last: Mutex<Option<String>>,
    prompts: Mutex<Vec<GenerationPrompt>>,
}

impl ScriptedBrain {
    /// Create a brain that always answers with `reply`.
    pub fn new(reply: impl Into<String>) -> Self {
        Self::with_replies([reply.into()])
    }

    /// Create a brain that answers with each reply in turn.
    pub fn with_replies<I, S>(replies: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            replies: Mutex::new(replies.into_iter().map(Into::into).collect()),
            last: Mutex::new(None),
            prompts: Mutex::new(Vec::new()),
        }
    }

    /// Create a brain that answers with a well-formed subject/body object.
    pub fn json(subject: &str, body: &str) -> Self {
        Self::new(format!(
            "{{\"subject\": {}, \"body\": {}}}",
            quote(subject),
            quote(body)
        ))
    }

    /// Number of generate calls so far.
    pub fn call_count(&self) -> usize {
        self.prompts.lock().map(|p| p.len()).unwrap_or(0)
    }

    /// Prompts received so far, oldest first.
    pub fn prompts(&self) -> Vec<GenerationPrompt> {
        self.prompts.lock().map(|p| p.clone()).unwrap_or_default()
    }
}

fn quote(value: &str) -> String {
    let mut out = String::with_capacity(value.len() + 2);
    out.push('"');
    for ch in value.chars() {
        match ch {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c => out.push(c),
        }
    }
    out.push('"');
    out
}

#[async_trait]
impl Brain for ScriptedBrain {
    async fn generate(&self, prompt: &GenerationPrompt) -> Result<String, BrainError> {
        if let Ok(mut prompts) = self.prompts.lock() {
            prompts.push(prompt.clone());
        }

        let next = self.replies.lock().ok().and_then(|mut r| r.pop_front());
        let mut last = self
            .last
            .lock()
            .map_err(|_| BrainError::Unavailable("script lock poisoned".to_string()))?;

        if let Some(reply) = next {
            *last = Some(reply);
        }

        last.clone()
            .ok_or_else(|| BrainError::Unavailable("script is empty".to_string()))
    }

    fn name(&self) -> &str {
        "ScriptedBrain"
    }
}
