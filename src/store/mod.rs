mod memory;
mod supabase;

pub use memory::MemoryRecipeStore;
pub use supabase::SupabaseRecipeStore;

use crate::config::StoreConfig;
use crate::error::{SettingsError, StorageError};
use crate::model::{Recipe, RecipeDraft};
use async_trait::async_trait;
use std::sync::Arc;

/// Persisted recipe collection, keyed by normalized source URL
#[async_trait]
pub trait RecipeStore: Send + Sync {
    /// The record stored for exactly this normalized URL, if any.
    /// "Not found" is `Ok(None)`, never an error.
    async fn find_by_source_url(&self, source_url: &str) -> Result<Option<Recipe>, StorageError>;

    /// Persist a draft, assigning `id` and `created_at`.
    ///
    /// Idempotent on `source_url`: when a record already exists for the
    /// draft's URL it is returned and no second record is created.
    async fn insert(&self, draft: RecipeDraft) -> Result<Recipe, StorageError>;

    /// All recipes, newest first
    async fn list(&self) -> Result<Vec<Recipe>, StorageError>;
}

/// Build the store selected by configuration
pub fn from_config(config: &StoreConfig) -> Result<Arc<dyn RecipeStore>, SettingsError> {
    match config.backend.as_str() {
        "memory" => Ok(Arc::new(MemoryRecipeStore::new())),
        "supabase" => {
            let url = config.url.clone().ok_or(SettingsError::Missing("store.url"))?;
            let api_key = config
                .api_key
                .clone()
                .ok_or(SettingsError::Missing("store.api_key"))?;
            Ok(Arc::new(SupabaseRecipeStore::new(url, api_key, config.table.clone())))
        }
        other => Err(SettingsError::Invalid {
            field: "store.backend",
            reason: format!("unknown backend '{}'", other),
        }),
    }
}
