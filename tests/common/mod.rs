//! Counting fakes for the orchestrator's collaborators
#![allow(dead_code)]

use async_trait::async_trait;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;
use video_recipe_import::error::{ProviderError, StorageError, TranscriptError};
use video_recipe_import::providers::{CompletionRequest, LlmProvider};
use video_recipe_import::{
    LlmRecipeExtractor, MemoryRecipeStore, Recipe, RecipeDraft, RecipeOrchestrator, RecipeStore,
    Transcript, TranscriptProvider,
};

pub const CARBONARA_JSON: &str = r#"{
    "title": "Pasta Carbonara",
    "ingredients": ["400 g spaghetti", "200 g pancetta", "4 eggs", "100 g Pecorino Romano"],
    "steps": ["Cook the spaghetti", "Fry the pancetta", "Mix with eggs and cheese"],
    "duration": "20 minutes",
    "category": "Italian"
}"#;

/// Store wrapper that counts calls and can be told to fail
#[derive(Default)]
pub struct CountingStore {
    pub inner: MemoryRecipeStore,
    pub lookups: AtomicUsize,
    pub inserts: AtomicUsize,
    pub fail_lookups: bool,
    pub fail_inserts: bool,
}

impl CountingStore {
    pub fn with_recipes(recipes: Vec<Recipe>) -> Self {
        Self {
            inner: MemoryRecipeStore::with_recipes(recipes),
            ..Self::default()
        }
    }

    pub fn lookups(&self) -> usize {
        self.lookups.load(Ordering::SeqCst)
    }

    pub fn inserts(&self) -> usize {
        self.inserts.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl RecipeStore for CountingStore {
    async fn find_by_source_url(&self, source_url: &str) -> Result<Option<Recipe>, StorageError> {
        self.lookups.fetch_add(1, Ordering::SeqCst);
        if self.fail_lookups {
            return Err(StorageError::Decode("lookup failed".to_string()));
        }
        self.inner.find_by_source_url(source_url).await
    }

    async fn insert(&self, draft: RecipeDraft) -> Result<Recipe, StorageError> {
        self.inserts.fetch_add(1, Ordering::SeqCst);
        if self.fail_inserts {
            return Err(StorageError::Status {
                status: 503,
                body: "connection refused".to_string(),
            });
        }
        self.inner.insert(draft).await
    }

    async fn list(&self) -> Result<Vec<Recipe>, StorageError> {
        self.inner.list().await
    }
}

pub struct CountingTranscripts {
    pub calls: AtomicUsize,
    pub delay: Duration,
}

impl CountingTranscripts {
    pub fn new() -> Self {
        Self {
            calls: AtomicUsize::new(0),
            delay: Duration::ZERO,
        }
    }

    pub fn slow(delay: Duration) -> Self {
        Self {
            calls: AtomicUsize::new(0),
            delay,
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl TranscriptProvider for CountingTranscripts {
    async fn get_transcript(&self, _video_url: &str) -> Result<Transcript, TranscriptError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
        Ok(Transcript::new("cook the spaghetti, fry the pancetta"))
    }
}

/// Completion service that always gives the same reply
pub struct CannedProvider {
    pub reply: Option<String>,
    pub calls: AtomicUsize,
}

impl CannedProvider {
    pub fn new(reply: Option<&str>) -> Self {
        Self {
            reply: reply.map(String::from),
            calls: AtomicUsize::new(0),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl LlmProvider for CannedProvider {
    fn provider_name(&self) -> &str {
        "canned"
    }

    async fn complete(&self, _request: &CompletionRequest) -> Result<Option<String>, ProviderError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        // let concurrent requests interleave
        tokio::task::yield_now().await;
        Ok(self.reply.clone())
    }
}

pub struct Harness {
    pub store: Arc<CountingStore>,
    pub transcripts: Arc<CountingTranscripts>,
    pub provider: Arc<CannedProvider>,
    pub orchestrator: Arc<RecipeOrchestrator>,
}

impl Harness {
    pub fn new(store: CountingStore, reply: Option<&str>) -> Self {
        Self::with_transcripts(store, CountingTranscripts::new(), reply)
    }

    pub fn with_transcripts(
        store: CountingStore,
        transcripts: CountingTranscripts,
        reply: Option<&str>,
    ) -> Self {
        let store = Arc::new(store);
        let transcripts = Arc::new(transcripts);
        let provider = Arc::new(CannedProvider::new(reply));
        let extractor = LlmRecipeExtractor::new(provider.clone(), 0.7, 2000);
        let orchestrator = Arc::new(RecipeOrchestrator::new(
            store.clone(),
            transcripts.clone(),
            Arc::new(extractor),
        ));
        Self {
            store,
            transcripts,
            provider,
            orchestrator,
        }
    }
}
