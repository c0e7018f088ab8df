//! ChatBrain implementation over an OpenAI-compatible API.

use brain_core::{async_trait, Brain, BrainError, GenerationPrompt};
use reqwest::Client;
use tracing::{debug, info};

use crate::api_types::{
    ApiError, ChatCompletionRequest, ChatCompletionResponse, ChatMessage, ResponseFormat,
};
use crate::config::ChatBrainConfig;

/// A brain that generates text through a chat-completions endpoint.
///
/// Stateless: every call sends exactly the prompt it is given.
pub struct ChatBrain {
    client: Client,
    config: ChatBrainConfig,
}

impl ChatBrain {
    /// Create a new ChatBrain with the given configuration.
    pub fn new(config: ChatBrainConfig) -> Result<Self, BrainError> {
        if config.api_key.trim().is_empty() {
            return Err(BrainError::Configuration("API key is empty".to_string()));
        }

        let client = Client::builder()
            .timeout(config.request_timeout)
            .build()
            .map_err(|e| BrainError::Configuration(format!("Failed to create HTTP client: {}", e)))?;

        info!(
            "ChatBrain initialized with model: {}, timeout: {:?}",
            config.model, config.request_timeout
        );

        Ok(Self { client, config })
    }

    /// Create a ChatBrain from environment variables.
    ///
    /// See [`ChatBrainConfig::from_env`] for required environment variables.
    pub fn from_env() -> Result<Self, BrainError> {
        Self::new(ChatBrainConfig::from_env()?)
    }

    /// Get the configuration.
    pub fn config(&self) -> &ChatBrainConfig {
        &self.config
    }

    /// Build the request body for a prompt.
    fn build_request(&self, prompt: &GenerationPrompt) -> ChatCompletionRequest {
        let system = match self.config.system_prompt {
            Some(ref house) => format!("{}\n\n{}", house, prompt.system),
            None => prompt.system.clone(),
        };

        let mut user = prompt.user.clone();
        if prompt.expects_json() {
            user.push_str(&format!(
                "\n\nRespond with only a JSON object with string fields: {}.",
                prompt.json_fields.join(", ")
            ));
        }

        ChatCompletionRequest {
            model: self.config.model.clone(),
            messages: vec![ChatMessage::system(system), ChatMessage::user(user)],
            max_tokens: self.config.max_tokens,
            temperature: self.config.temperature,
            response_format: prompt.expects_json().then(ResponseFormat::json_object),
        }
    }

    /// Make a chat completion request.
    async fn chat_completion(
        &self,
        request: &ChatCompletionRequest,
    ) -> Result<ChatCompletionResponse, BrainError> {
        let response = self
            .client
            .post(self.config.completions_url())
            .bearer_auth(&self.config.api_key)
            .json(request)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    BrainError::Timeout
                } else {
                    BrainError::Network(format!("Failed to send request: {}", e))
                }
            })?;

        let status = response.status();

        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();

            // Try to parse as API error
            if let Ok(api_error) = serde_json::from_str::<ApiError>(&error_text) {
                return Err(BrainError::ProcessingFailed(format!(
                    "API error ({}): {}",
                    status.as_u16(),
                    api_error.error.message
                )));
            }

            return Err(BrainError::ProcessingFailed(format!(
                "API error ({}): {}",
                status.as_u16(),
                error_text
            )));
        }

        response
            .json()
            .await
            .map_err(|e| BrainError::InvalidResponse(format!("Failed to parse response: {}", e)))
    }
}

#[async_trait]
impl Brain for ChatBrain {
    async fn generate(&self, prompt: &GenerationPrompt) -> Result<String, BrainError> {
        let request = self.build_request(prompt);
        debug!(fingerprint = %prompt.fingerprint(), model = %request.model, "Sending completion request");

        let completion = self.chat_completion(&request).await?;

        if let Some(ref usage) = completion.usage {
            debug!(
                prompt_tokens = usage.prompt_tokens,
                completion_tokens = usage.completion_tokens,
                total_tokens = usage.total_tokens,
                "Completion usage"
            );
        }

        let choice = completion
            .choices
            .into_iter()
            .next()
            .ok_or_else(|| BrainError::InvalidResponse("no choices returned".to_string()))?;

        match choice.message.content {
            Some(text) if !text.trim().is_empty() => Ok(text),
            _ => Err(BrainError::InvalidResponse(format!(
                "empty content (finish_reason: {})",
                choice.finish_reason.as_deref().unwrap_or("unknown")
            ))),
        }
    }

    fn name(&self) -> &str {
        "ChatBrain"
    }
}
