mod factory;
mod ollama;
mod open_ai;

pub use factory::ProviderFactory;
pub use ollama::OllamaProvider;
pub use open_ai::OpenAIProvider;

use crate::error::ProviderError;
use async_trait::async_trait;

/// One single-turn chat completion
#[derive(Debug, Clone)]
pub struct CompletionRequest {
    pub system: String,
    pub user: String,
    pub temperature: f32,
    pub max_tokens: u32,
    /// Ask the service to constrain its output to a JSON object
    pub json_response: bool,
}

/// Unified trait for all completion services
#[async_trait]
pub trait LlmProvider: Send + Sync {
    /// Get the provider name (e.g., "openai", "ollama")
    fn provider_name(&self) -> &str;

    /// Run one completion. `Ok(None)` means the service answered but
    /// produced no content.
    async fn complete(&self, request: &CompletionRequest) -> Result<Option<String>, ProviderError>;
}

/// Pull `choices[0].message.content` out of an OpenAI-style response body
pub(crate) fn chat_content(body: &serde_json::Value) -> Result<Option<String>, ProviderError> {
    if let Some(error) = body.get("error") {
        let message = error
            .as_str()
            .or_else(|| error["message"].as_str())
            .unwrap_or("Unknown error");
        return Err(ProviderError::Api(message.to_string()));
    }

    Ok(body["choices"][0]["message"]["content"]
        .as_str()
        .filter(|content| !content.trim().is_empty())
        .map(String::from))
}
