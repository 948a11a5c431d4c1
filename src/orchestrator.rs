use crate::error::{ExtractionError, PipelineError};
use crate::extractor::RecipeExtractor;
use crate::model::{ProcessRecipeResponse, RecipeDraft};
use crate::normalize::normalize_url;
use crate::store::RecipeStore;
use crate::transcript::TranscriptProvider;
use log::{debug, error, info};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::sync::OwnedMutexGuard;

/// Coordinates lookup, extraction and persistence for one request
pub struct RecipeOrchestrator {
    store: Arc<dyn RecipeStore>,
    transcripts: Arc<dyn TranscriptProvider>,
    extractor: Arc<dyn RecipeExtractor>,
    locks: KeyedLocks,
}

impl RecipeOrchestrator {
    pub fn new(
        store: Arc<dyn RecipeStore>,
        transcripts: Arc<dyn TranscriptProvider>,
        extractor: Arc<dyn RecipeExtractor>,
    ) -> Self {
        Self {
            store,
            transcripts,
            extractor,
            locks: KeyedLocks::default(),
        }
    }

    pub fn store(&self) -> &Arc<dyn RecipeStore> {
        &self.store
    }

    /// Return the recipe for `raw_url`, extracting and storing it on a miss.
    ///
    /// A cache hit makes no transcript or extraction call. A failed
    /// extraction leaves the store untouched.
    pub async fn handle(&self, raw_url: &str) -> Result<ProcessRecipeResponse, PipelineError> {
        let raw_url = raw_url.trim();
        if raw_url.is_empty() {
            return Err(PipelineError::Validation("URL is required".to_string()));
        }

        let source_url = normalize_url(raw_url);

        // Held across lookup and insert so concurrent requests for one URL
        // cannot both miss
        let _guard = self.locks.lock(&source_url).await;

        if let Some(existing) = self.store.find_by_source_url(&source_url).await? {
            info!("Cache hit for {}", source_url);
            return Ok(ProcessRecipeResponse {
                recipe: existing,
                cached: true,
            });
        }
        info!("Cache miss for {}, running extraction", source_url);

        let transcript = self.transcripts.get_transcript(raw_url).await?;
        let draft = self.extractor.extract(&transcript, &source_url).await?;
        check_complete(&draft)?;

        let recipe = self
            .store
            .insert(RecipeDraft {
                source_url: source_url.clone(),
                ..draft
            })
            .await?;
        info!("Stored recipe {} for {}", recipe.id, source_url);

        Ok(ProcessRecipeResponse {
            recipe,
            cached: false,
        })
    }

    /// Run `handle` under an overall deadline.
    ///
    /// The pipeline runs on its own task, which is aborted when the
    /// deadline passes; a panic inside it surfaces as `Unknown`.
    pub async fn handle_within(
        self: &Arc<Self>,
        raw_url: &str,
        deadline: Duration,
    ) -> Result<ProcessRecipeResponse, PipelineError> {
        let orchestrator = Arc::clone(self);
        let url = raw_url.to_string();
        let task = tokio::spawn(async move { orchestrator.handle(&url).await });
        let abort = task.abort_handle();

        match tokio::time::timeout(deadline, task).await {
            Ok(Ok(result)) => result,
            Ok(Err(join_error)) => {
                error!("Extraction task failed: {}", join_error);
                Err(PipelineError::Unknown(join_error.to_string()))
            }
            Err(_) => {
                abort.abort();
                Err(PipelineError::Timeout(deadline))
            }
        }
    }
}

fn check_complete(draft: &RecipeDraft) -> Result<(), ExtractionError> {
    if draft.ingredients.is_empty() {
        return Err(ExtractionError::Incomplete("ingredients"));
    }
    if draft.steps.is_empty() {
        return Err(ExtractionError::Incomplete("steps"));
    }
    Ok(())
}

/// One async mutex per key, created on demand and dropped once unused
#[derive(Default)]
struct KeyedLocks {
    slots: Mutex<HashMap<String, Arc<tokio::sync::Mutex<()>>>>,
}

struct KeyGuard<'a> {
    locks: &'a KeyedLocks,
    key: String,
    slot: Arc<tokio::sync::Mutex<()>>,
    guard: Option<OwnedMutexGuard<()>>,
}

impl KeyedLocks {
    async fn lock(&self, key: &str) -> KeyGuard<'_> {
        let slot = {
            let mut slots = self.slots.lock().unwrap_or_else(|e| e.into_inner());
            Arc::clone(slots.entry(key.to_string()).or_default())
        };
        // Built before waiting so a cancelled waiter still releases its slot
        let mut key_guard = KeyGuard {
            locks: self,
            key: key.to_string(),
            slot: Arc::clone(&slot),
            guard: None,
        };
        key_guard.guard = Some(slot.lock_owned().await);
        key_guard
    }

    #[cfg(test)]
    fn len(&self) -> usize {
        self.slots.lock().unwrap_or_else(|e| e.into_inner()).len()
    }
}

impl Drop for KeyGuard<'_> {
    fn drop(&mut self) {
        self.guard.take();
        let mut slots = self.locks.slots.lock().unwrap_or_else(|e| e.into_inner());
        // map entry + ours; anything more is a waiter
        if Arc::strong_count(&self.slot) == 2 {
            slots.remove(&self.key);
            debug!("Released lock slot for {}", self.key);
        }
    }
}
