use crate::config::AiConfig;
use crate::error::ProviderError;
use crate::providers::{chat_content, CompletionRequest, LlmProvider};
use async_trait::async_trait;
use log::debug;
use reqwest::Client;
use serde_json::{json, Value};

const DEFAULT_BASE_URL: &str = "http://localhost:11434";

pub struct OllamaProvider {
    client: Client,
    base_url: String,
    model: String,
}

impl OllamaProvider {
    /// Create a new Ollama provider from configuration
    pub fn new(config: &AiConfig) -> Result<Self, ProviderError> {
        let base_url = config
            .base_url
            .clone()
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());

        Ok(OllamaProvider {
            client: Client::new(),
            base_url,
            model: config.model.clone(),
        })
    }

    #[doc(hidden)]
    pub fn with_base_url(base_url: String, model: String) -> Self {
        OllamaProvider {
            client: Client::new(),
            base_url,
            model,
        }
    }
}

#[async_trait]
impl LlmProvider for OllamaProvider {
    fn provider_name(&self) -> &str {
        "ollama"
    }

    async fn complete(&self, request: &CompletionRequest) -> Result<Option<String>, ProviderError> {
        // Ollama uses OpenAI-compatible API
        let mut payload = json!({
            "model": self.model,
            "messages": [
                {"role": "system", "content": request.system},
                {"role": "user", "content": request.user}
            ],
            "temperature": request.temperature,
            "max_tokens": request.max_tokens
        });
        if request.json_response {
            payload["response_format"] = json!({"type": "json_object"});
        }

        let response = self
            .client
            .post(format!("{}/v1/chat/completions", self.base_url))
            .json(&payload)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ProviderError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let response_body: Value = response.json().await?;
        debug!("Ollama response: {:?}", response_body);
        chat_content(&response_body)
    }
}
