mod images;
mod prompt;

pub use images::{image_for_category, DEFAULT_IMAGE_URL};
pub use prompt::{build_user_message, EXTRACTION_PROMPT};

use crate::config::AiConfig;
use crate::error::ExtractionError;
use crate::model::{RecipeDraft, Transcript};
use crate::providers::{CompletionRequest, LlmProvider};
use async_trait::async_trait;
use log::{debug, info};
use serde_json::{Map, Value};
use std::sync::Arc;

pub const DEFAULT_TITLE: &str = "Untitled Recipe";
pub const DEFAULT_CATEGORY: &str = "General";

/// Turns a transcript into a recipe draft
#[async_trait]
pub trait RecipeExtractor: Send + Sync {
    /// `source_url` is the normalized URL and always becomes the draft's
    /// `source_url`, whatever the model says.
    async fn extract(
        &self,
        transcript: &Transcript,
        source_url: &str,
    ) -> Result<RecipeDraft, ExtractionError>;
}

/// Extractor backed by a completion service
pub struct LlmRecipeExtractor {
    provider: Arc<dyn LlmProvider>,
    temperature: f32,
    max_tokens: u32,
}

impl LlmRecipeExtractor {
    pub fn new(provider: Arc<dyn LlmProvider>, temperature: f32, max_tokens: u32) -> Self {
        Self {
            provider,
            temperature,
            max_tokens,
        }
    }

    pub fn from_config(provider: Arc<dyn LlmProvider>, config: &AiConfig) -> Self {
        Self::new(provider, config.temperature, config.max_tokens)
    }
}

#[async_trait]
impl RecipeExtractor for LlmRecipeExtractor {
    async fn extract(
        &self,
        transcript: &Transcript,
        source_url: &str,
    ) -> Result<RecipeDraft, ExtractionError> {
        info!(
            "Extracting recipe for {} with {}",
            source_url,
            self.provider.provider_name()
        );

        let request = CompletionRequest {
            system: EXTRACTION_PROMPT.to_string(),
            user: build_user_message(&transcript.text),
            temperature: self.temperature,
            max_tokens: self.max_tokens,
            json_response: true,
        };

        let content = self
            .provider
            .complete(&request)
            .await?
            .ok_or(ExtractionError::EmptyResponse)?;
        debug!("Model output: {}", content);

        parse_draft(&content, source_url)
    }
}

/// Validate model output and map it onto a draft.
///
/// Absent or null fields take their defaults; fields of the wrong type are
/// rejected rather than coerced.
pub fn parse_draft(content: &str, source_url: &str) -> Result<RecipeDraft, ExtractionError> {
    let value: Value = serde_json::from_str(content)?;
    let object = value.as_object().ok_or_else(|| {
        ExtractionError::InvalidShape(format!("expected a JSON object, got {}", kind(&value)))
    })?;

    let title = optional_text(object, "title")?.unwrap_or_else(|| DEFAULT_TITLE.to_string());
    let category =
        optional_text(object, "category")?.unwrap_or_else(|| DEFAULT_CATEGORY.to_string());
    let image_url = image_for_category(&category).to_string();

    Ok(RecipeDraft {
        title,
        ingredients: text_list(object, "ingredients")?,
        steps: text_list(object, "steps")?,
        duration: optional_text(object, "duration")?,
        category: Some(category),
        image_url: Some(image_url),
        source_url: source_url.to_string(),
    })
}

// Blank strings count as missing
fn optional_text(object: &Map<String, Value>, key: &str) -> Result<Option<String>, ExtractionError> {
    match object.get(key) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(text)) => {
            let trimmed = text.trim();
            Ok((!trimmed.is_empty()).then(|| trimmed.to_string()))
        }
        Some(other) => Err(ExtractionError::InvalidShape(format!(
            "`{}` must be a string, got {}",
            key,
            kind(other)
        ))),
    }
}

fn text_list(object: &Map<String, Value>, key: &str) -> Result<Vec<String>, ExtractionError> {
    let items = match object.get(key) {
        None | Some(Value::Null) => return Ok(Vec::new()),
        Some(Value::Array(items)) => items,
        Some(other) => {
            return Err(ExtractionError::InvalidShape(format!(
                "`{}` must be a list of strings, got {}",
                key,
                kind(other)
            )))
        }
    };

    let mut lines = Vec::with_capacity(items.len());
    for item in items {
        let text = item.as_str().ok_or_else(|| {
            ExtractionError::InvalidShape(format!(
                "`{}` entries must be strings, got {}",
                key,
                kind(item)
            ))
        })?;
        let trimmed = text.trim();
        if !trimmed.is_empty() {
            lines.push(trimmed.to_string());
        }
    }
    Ok(lines)
}

fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "a list",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ProviderError;
    use std::sync::Mutex;

    const URL: &str = "https://www.tiktok.com/@chef/video/1";

    struct ScriptedProvider {
        reply: Option<String>,
        requests: Mutex<Vec<CompletionRequest>>,
    }

    impl ScriptedProvider {
        fn new(reply: Option<&str>) -> Arc<Self> {
            Arc::new(Self {
                reply: reply.map(String::from),
                requests: Mutex::new(Vec::new()),
            })
        }
    }

    #[async_trait]
    impl LlmProvider for ScriptedProvider {
        fn provider_name(&self) -> &str {
            "scripted"
        }

        async fn complete(
            &self,
            request: &CompletionRequest,
        ) -> Result<Option<String>, ProviderError> {
            self.requests.lock().unwrap().push(request.clone());
            Ok(self.reply.clone())
        }
    }

    #[test]
    fn test_parse_full_recipe() {
        let draft = parse_draft(
            r#"{
                "title": "Pasta Carbonara",
                "ingredients": ["400 g spaghetti", " 200 g pancetta ", ""],
                "steps": ["Boil water", "Fry pancetta"],
                "duration": "20 minutes",
                "category": "Italian"
            }"#,
            URL,
        )
        .unwrap();

        assert_eq!(draft.title, "Pasta Carbonara");
        assert_eq!(draft.ingredients, vec!["400 g spaghetti", "200 g pancetta"]);
        assert_eq!(draft.steps.len(), 2);
        assert_eq!(draft.duration.as_deref(), Some("20 minutes"));
        assert_eq!(draft.category.as_deref(), Some("Italian"));
        assert_eq!(
            draft.image_url.as_deref(),
            Some("https://images.unsplash.com/photo-1621996346565-e3dbc646d9a9")
        );
    }

    #[test]
    fn test_defaults_for_missing_fields() {
        let draft = parse_draft("{}", URL).unwrap();
        assert_eq!(draft.title, DEFAULT_TITLE);
        assert!(draft.ingredients.is_empty());
        assert!(draft.steps.is_empty());
        assert!(draft.duration.is_none());
        assert_eq!(draft.category.as_deref(), Some(DEFAULT_CATEGORY));
        assert_eq!(draft.image_url.as_deref(), Some(DEFAULT_IMAGE_URL));
    }

    #[test]
    fn test_null_and_blank_fields_default() {
        let draft = parse_draft(
            r#"{"title": "  ", "category": null, "duration": "", "ingredients": null}"#,
            URL,
        )
        .unwrap();
        assert_eq!(draft.title, DEFAULT_TITLE);
        assert_eq!(draft.category.as_deref(), Some(DEFAULT_CATEGORY));
        assert!(draft.duration.is_none());
        assert!(draft.ingredients.is_empty());
    }

    #[test]
    fn test_source_url_comes_from_caller() {
        let draft = parse_draft(
            r#"{"title": "x", "source_url": "https://evil.example", "sourceUrl": "https://evil.example"}"#,
            URL,
        )
        .unwrap();
        assert_eq!(draft.source_url, URL);
    }

    #[test]
    fn test_rejects_non_json() {
        let result = parse_draft("Sure! Here is your recipe: pasta", URL);
        assert!(matches!(result, Err(ExtractionError::InvalidJson(_))));
    }

    #[test]
    fn test_rejects_non_object() {
        let result = parse_draft(r#"["pasta"]"#, URL);
        assert!(matches!(result, Err(ExtractionError::InvalidShape(_))));
    }

    #[test]
    fn test_rejects_wrong_field_types() {
        for content in [
            r#"{"title": 42}"#,
            r#"{"ingredients": "pasta, eggs"}"#,
            r#"{"steps": [1, 2]}"#,
            r#"{"duration": 20}"#,
            r#"{"category": ["italian"]}"#,
        ] {
            let result = parse_draft(content, URL);
            assert!(
                matches!(result, Err(ExtractionError::InvalidShape(_))),
                "accepted {content}"
            );
        }
    }

    #[tokio::test]
    async fn test_extract_sends_prompt_and_transcript() {
        let provider = ScriptedProvider::new(Some(
            r#"{"title": "Soup", "ingredients": ["water"], "steps": ["heat"], "category": "soup"}"#,
        ));
        let extractor = LlmRecipeExtractor::new(provider.clone(), 0.7, 1000);

        let draft = extractor
            .extract(&Transcript::new("heat the water"), URL)
            .await
            .unwrap();
        assert_eq!(draft.title, "Soup");
        assert_eq!(draft.source_url, URL);

        let requests = provider.requests.lock().unwrap();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].system, EXTRACTION_PROMPT);
        assert!(requests[0].user.contains("heat the water"));
        assert!(requests[0].json_response);
        assert_eq!(requests[0].max_tokens, 1000);
    }

    #[tokio::test]
    async fn test_extract_empty_response() {
        let extractor = LlmRecipeExtractor::new(ScriptedProvider::new(None), 0.7, 1000);
        let result = extractor.extract(&Transcript::new("text"), URL).await;
        assert!(matches!(result, Err(ExtractionError::EmptyResponse)));
    }
}
