//! Generation prompts and prompt fingerprints.

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

/// A prompt for one generation call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerationPrompt {
    /// Instructions that frame the task.
    pub system: String,
    /// The task itself, with all context inlined.
    pub user: String,
    /// String fields the answer must carry in a single JSON object.
    /// Empty means free text is acceptable.
    pub json_fields: Vec<String>,
}

impl GenerationPrompt {
    /// Create a prompt that expects free text.
    pub fn new(system: impl Into<String>, user: impl Into<String>) -> Self {
        Self {
            system: system.into(),
            user: user.into(),
            json_fields: Vec::new(),
        }
    }

    /// Require the answer to be a JSON object with these string fields.
    pub fn expect_json_fields<I, S>(mut self, fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.json_fields = fields.into_iter().map(Into::into).collect();
        self
    }

    /// Whether the prompt asks for a JSON object.
    pub fn expects_json(&self) -> bool {
        !self.json_fields.is_empty()
    }

    /// Stable fingerprint of the full prompt, for logs.
    pub fn fingerprint(&self) -> String {
        hash_prompt(&format!("{}\u{0}{}\u{0}{}", self.system, self.user, self.json_fields.join(",")))
    }
}

/// Compute a stable SHA-256 fingerprint for a prompt string.
pub fn hash_prompt(prompt: &str) -> String {
    let digest = Sha256::digest(prompt.as_bytes());
    digest.iter().map(|byte| format!("{:02x}", byte)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_prompt_stable() {
        let first = hash_prompt("test prompt");
        let second = hash_prompt("test prompt");
        let different = hash_prompt("another prompt");

        assert_eq!(first, second);
        assert_ne!(first, different);
        assert_eq!(first.len(), 64);
    }

    #[test]
    fn test_expect_json_fields() {
        let prompt = GenerationPrompt::new("sys", "user").expect_json_fields(["subject", "body"]);
        assert!(prompt.expects_json());
        assert_eq!(prompt.json_fields, vec!["subject", "body"]);

        assert!(!GenerationPrompt::new("sys", "user").expects_json());
    }

    #[test]
    fn test_fingerprint_covers_contract() {
        let free = GenerationPrompt::new("sys", "user");
        let json = free.clone().expect_json_fields(["subject"]);
        assert_ne!(free.fingerprint(), json.fingerprint());
    }
}
