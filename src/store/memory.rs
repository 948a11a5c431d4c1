use crate::error::StorageError;
use crate::model::{Recipe, RecipeDraft};
use crate::store::RecipeStore;
use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;
use uuid::Uuid;

/// Process-local store, used by default and in tests
#[derive(Default)]
pub struct MemoryRecipeStore {
    recipes: RwLock<Vec<Recipe>>,
}

impl MemoryRecipeStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store pre-populated with existing records
    pub fn with_recipes(recipes: Vec<Recipe>) -> Self {
        Self {
            recipes: RwLock::new(recipes),
        }
    }

    pub async fn len(&self) -> usize {
        self.recipes.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.recipes.read().await.is_empty()
    }
}

#[async_trait]
impl RecipeStore for MemoryRecipeStore {
    async fn find_by_source_url(&self, source_url: &str) -> Result<Option<Recipe>, StorageError> {
        let recipes = self.recipes.read().await;
        Ok(recipes
            .iter()
            .find(|recipe| recipe.source_url.as_deref() == Some(source_url))
            .cloned())
    }

    async fn insert(&self, draft: RecipeDraft) -> Result<Recipe, StorageError> {
        // Check and push under one write lock
        let mut recipes = self.recipes.write().await;
        if let Some(existing) = recipes
            .iter()
            .find(|recipe| recipe.source_url.as_deref() == Some(draft.source_url.as_str()))
        {
            return Ok(existing.clone());
        }

        let recipe = Recipe::from_draft(draft, Uuid::new_v4(), Utc::now());
        recipes.push(recipe.clone());
        Ok(recipe)
    }

    async fn list(&self) -> Result<Vec<Recipe>, StorageError> {
        let mut recipes = self.recipes.read().await.clone();
        recipes.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(recipes)
    }
}
