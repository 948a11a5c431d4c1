use crate::config::AiConfig;
use crate::error::ProviderError;
use crate::providers::{LlmProvider, OllamaProvider, OpenAIProvider};
use std::sync::Arc;

pub struct ProviderFactory;

impl ProviderFactory {
    /// Create the configured provider instance
    pub fn create(config: &AiConfig) -> Result<Arc<dyn LlmProvider>, ProviderError> {
        match config.provider.as_str() {
            "openai" => Ok(Arc::new(OpenAIProvider::new(config)?)),
            "ollama" => Ok(Arc::new(OllamaProvider::new(config)?)),
            other => Err(ProviderError::UnknownProvider(other.to_string())),
        }
    }

    /// List all available provider names
    pub fn available_providers() -> Vec<&'static str> {
        vec!["openai", "ollama"]
    }
}
