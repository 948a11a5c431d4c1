pub mod api;
pub mod config;
pub mod error;
pub mod extractor;
pub mod model;
pub mod normalize;
pub mod orchestrator;
pub mod providers;
pub mod store;
pub mod transcript;
pub mod validation;

// Re-export commonly used types
pub use api::{build_router, AppState};
pub use config::AppConfig;
pub use error::{
    ExtractionError, PipelineError, ProviderError, SettingsError, StorageError, TranscriptError,
};
pub use extractor::{LlmRecipeExtractor, RecipeExtractor};
pub use model::{ProcessRecipeRequest, ProcessRecipeResponse, Recipe, RecipeDraft, Transcript};
pub use normalize::normalize_url;
pub use orchestrator::RecipeOrchestrator;
pub use providers::{LlmProvider, ProviderFactory};
pub use store::{MemoryRecipeStore, RecipeStore, SupabaseRecipeStore};
pub use transcript::{StaticTranscriptProvider, TranscriptProvider};

use log::info;
use std::sync::Arc;

/// Wire the configured provider, store and transcript source into an
/// orchestrator. Expects `config` to have passed `AppConfig::validate`.
pub fn build_orchestrator(config: &AppConfig) -> Result<Arc<RecipeOrchestrator>, SettingsError> {
    let provider = ProviderFactory::create(&config.ai)?;
    info!(
        "Using {} with model {}",
        provider.provider_name(),
        config.ai.model
    );

    let extractor = LlmRecipeExtractor::from_config(provider, &config.ai);
    let store = store::from_config(&config.store)?;
    let transcripts = StaticTranscriptProvider::from_config(config.transcript.text.as_deref());

    Ok(Arc::new(RecipeOrchestrator::new(
        store,
        Arc::new(transcripts),
        Arc::new(extractor),
    )))
}

/// Router for `config`, ready to serve
pub fn build_app(config: &AppConfig) -> Result<axum::Router, SettingsError> {
    let orchestrator = build_orchestrator(config)?;
    let mut state = AppState::new(orchestrator, config.request_timeout());
    state.require_supported_platform = config.server.require_supported_platform;
    Ok(build_router(state))
}
