//! Configuration for ChatBrain.

use brain_core::BrainError;
use std::env;
use std::path::Path;
use std::time::Duration;

/// Default prompt file with house-style instructions.
pub const DEFAULT_PROMPT_FILE: &str = "REMINDER_PROMPT.md";

const DEFAULT_API_URL: &str = "https://api.openai.com";
const DEFAULT_MODEL: &str = "gpt-4o-mini";
const DEFAULT_MAX_TOKENS: u32 = 800;
const DEFAULT_TEMPERATURE: f32 = 0.7;
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Configuration for ChatBrain.
#[derive(Debug, Clone)]
pub struct ChatBrainConfig {
    /// Base API URL (without `/v1/...`).
    pub api_url: String,

    /// API key for authentication.
    pub api_key: String,

    /// Model name to use.
    pub model: String,

    /// Optional house-style instructions placed before each prompt's own
    /// system text.
    pub system_prompt: Option<String>,

    /// Maximum tokens for response.
    pub max_tokens: Option<u32>,

    /// Temperature for generation (0.0 - 2.0).
    pub temperature: Option<f32>,

    /// HTTP timeout for one completion request.
    pub request_timeout: Duration,
}

impl Default for ChatBrainConfig {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            api_key: String::new(),
            model: DEFAULT_MODEL.to_string(),
            system_prompt: None,
            max_tokens: Some(DEFAULT_MAX_TOKENS),
            temperature: Some(DEFAULT_TEMPERATURE),
            request_timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }
}

impl ChatBrainConfig {
    /// Create configuration from environment variables.
    ///
    /// Required environment variables:
    /// - `CHAT_API_KEY` - API key for authentication
    ///
    /// Optional environment variables:
    /// - `CHAT_API_URL` - API URL (default: https://api.openai.com)
    /// - `CHAT_MODEL` - Model name (default: gpt-4o-mini)
    /// - `CHAT_SYSTEM_PROMPT` - House-style instructions (overrides prompt file)
    /// - `CHAT_PROMPT_FILE` - Path to instructions file (default: REMINDER_PROMPT.md)
    /// - `CHAT_MAX_TOKENS` - Max tokens (default: 800)
    /// - `CHAT_TEMPERATURE` - Temperature (default: 0.7)
    /// - `CHAT_TIMEOUT_SECS` - HTTP timeout in seconds (default: 30)
    pub fn from_env() -> Result<Self, BrainError> {
        let api_key = env::var("CHAT_API_KEY")
            .map_err(|_| BrainError::Configuration("CHAT_API_KEY not set".to_string()))?;

        let api_url = env::var("CHAT_API_URL").unwrap_or_else(|_| DEFAULT_API_URL.to_string());

        let model = env::var("CHAT_MODEL").unwrap_or_else(|_| DEFAULT_MODEL.to_string());

        // Env var takes precedence, then the prompt file
        let system_prompt = if let Ok(prompt) = env::var("CHAT_SYSTEM_PROMPT") {
            Some(prompt)
        } else {
            let prompt_file =
                env::var("CHAT_PROMPT_FILE").unwrap_or_else(|_| DEFAULT_PROMPT_FILE.to_string());
            load_prompt_file(&prompt_file)
        };

        let max_tokens = env::var("CHAT_MAX_TOKENS")
            .ok()
            .and_then(|v| v.parse().ok())
            .or(Some(DEFAULT_MAX_TOKENS));

        let temperature = env::var("CHAT_TEMPERATURE")
            .ok()
            .and_then(|v| v.parse().ok())
            .or(Some(DEFAULT_TEMPERATURE));

        let request_timeout = env::var("CHAT_TIMEOUT_SECS")
            .ok()
            .and_then(|v| v.parse::<u64>().ok())
            .filter(|secs| *secs > 0)
            .map(Duration::from_secs)
            .unwrap_or(Duration::from_secs(DEFAULT_TIMEOUT_SECS));

        Ok(Self {
            api_url,
            api_key,
            model,
            system_prompt,
            max_tokens,
            temperature,
            request_timeout,
        })
    }

    /// Create a new config builder.
    pub fn builder() -> ChatBrainConfigBuilder {
        ChatBrainConfigBuilder::default()
    }

    /// Full URL of the completions endpoint.
    pub fn completions_url(&self) -> String {
        format!("{}/v1/chat/completions", self.api_url.trim_end_matches('/'))
    }
}

/// Builder for ChatBrainConfig.
#[derive(Debug, Default)]
pub struct ChatBrainConfigBuilder {
    config: ChatBrainConfig,
}

impl ChatBrainConfigBuilder {
    /// Set the API key.
    pub fn api_key(mut self, key: impl Into<String>) -> Self {
        self.config.api_key = key.into();
        self
    }

    /// Set the API URL.
    pub fn api_url(mut self, url: impl Into<String>) -> Self {
        self.config.api_url = url.into();
        self
    }

    /// Set the model name.
    pub fn model(mut self, model: impl Into<String>) -> Self {
        self.config.model = model.into();
        self
    }

    /// Set the house-style instructions.
    pub fn system_prompt(mut self, prompt: impl Into<String>) -> Self {
        self.config.system_prompt = Some(prompt.into());
        self
    }

    /// Set the max tokens.
    pub fn max_tokens(mut self, tokens: u32) -> Self {
        self.config.max_tokens = Some(tokens);
        self
    }

    /// Set the temperature.
    pub fn temperature(mut self, temp: f32) -> Self {
        self.config.temperature = Some(temp);
        self
    }

    /// Set the HTTP timeout.
    pub fn request_timeout(mut self, timeout: Duration) -> Self {
        self.config.request_timeout = timeout;
        self
    }

    /// Build the configuration.
    pub fn build(self) -> ChatBrainConfig {
        self.config
    }
}

/// Load a prompt file, returning None if not found or empty.
fn load_prompt_file(path: impl AsRef<Path>) -> Option<String> {
    let content = std::fs::read_to_string(path.as_ref()).ok()?;
    let trimmed = content.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = ChatBrainConfig::default();

        assert_eq!(config.api_url, "https://api.openai.com");
        assert!(config.api_key.is_empty());
        assert_eq!(config.model, "gpt-4o-mini");
        assert!(config.system_prompt.is_none());
        assert_eq!(config.max_tokens, Some(800));
        assert_eq!(config.request_timeout, Duration::from_secs(30));
    }

    #[test]
    fn test_builder_all_options() {
        let config = ChatBrainConfig::builder()
            .api_key("my-key")
            .api_url("https://llm.internal/")
            .model("small")
            .system_prompt("Be brief")
            .max_tokens(256)
            .temperature(0.2)
            .request_timeout(Duration::from_secs(5))
            .build();

        assert_eq!(config.api_key, "my-key");
        assert_eq!(config.model, "small");
        assert_eq!(config.system_prompt, Some("Be brief".to_string()));
        assert_eq!(config.max_tokens, Some(256));
        assert_eq!(config.temperature, Some(0.2));
        assert_eq!(config.request_timeout, Duration::from_secs(5));
        assert_eq!(
            config.completions_url(),
            "https://llm.internal/v1/chat/completions"
        );
    }

    // Environment-based tests are combined into a single test to avoid
    // race conditions when tests run in parallel (env vars are process-global).
    #[test]
    fn test_from_env_scenarios() {
        use std::sync::Mutex;
        static ENV_LOCK: Mutex<()> = Mutex::new(());
        let _guard = ENV_LOCK.lock().unwrap();

        fn clear_all_chat_vars() {
            for key in [
                "CHAT_API_KEY",
                "CHAT_API_URL",
                "CHAT_MODEL",
                "CHAT_SYSTEM_PROMPT",
                "CHAT_PROMPT_FILE",
                "CHAT_MAX_TOKENS",
                "CHAT_TEMPERATURE",
                "CHAT_TIMEOUT_SECS",
            ] {
                std::env::remove_var(key);
            }
        }

        // Missing API key should error
        clear_all_chat_vars();
        match ChatBrainConfig::from_env() {
            Err(BrainError::Configuration(msg)) => assert!(msg.contains("CHAT_API_KEY")),
            other => panic!("Expected Configuration error, got {:?}", other),
        }

        // Only API key set, defaults used
        clear_all_chat_vars();
        std::env::set_var("CHAT_API_KEY", "test-env-key");
        std::env::set_var("CHAT_PROMPT_FILE", "/nonexistent/prompt.md");
        let config = ChatBrainConfig::from_env().unwrap();
        assert_eq!(config.api_key, "test-env-key");
        assert_eq!(config.model, "gpt-4o-mini");
        assert!(config.system_prompt.is_none());
        assert_eq!(config.temperature, Some(0.7));

        // Overrides, with a zero timeout ignored
        clear_all_chat_vars();
        std::env::set_var("CHAT_API_KEY", "k");
        std::env::set_var("CHAT_MODEL", "other-model");
        std::env::set_var("CHAT_SYSTEM_PROMPT", "House style");
        std::env::set_var("CHAT_MAX_TOKENS", "300");
        std::env::set_var("CHAT_TIMEOUT_SECS", "0");
        let config = ChatBrainConfig::from_env().unwrap();
        assert_eq!(config.model, "other-model");
        assert_eq!(config.system_prompt, Some("House style".to_string()));
        assert_eq!(config.max_tokens, Some(300));
        assert_eq!(config.request_timeout, Duration::from_secs(30));

        clear_all_chat_vars();
    }
}
