use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A persisted recipe.
///
/// Serialized with camelCase keys, which is the shape clients receive.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Recipe {
    pub id: Uuid,
    pub created_at: DateTime<Utc>,
    pub title: String,
    pub image_url: Option<String>,
    pub duration: Option<String>,
    pub category: Option<String>,
    pub ingredients: Vec<String>,
    pub steps: Vec<String>,
    pub source_url: Option<String>,
    #[serde(default)]
    pub edited_by_user: bool,
}

impl Recipe {
    /// Materialize a draft with a store-assigned identity
    pub fn from_draft(draft: RecipeDraft, id: Uuid, created_at: DateTime<Utc>) -> Self {
        Recipe {
            id,
            created_at,
            title: draft.title,
            image_url: draft.image_url,
            duration: draft.duration,
            category: draft.category,
            ingredients: draft.ingredients,
            steps: draft.steps,
            source_url: Some(draft.source_url),
            edited_by_user: false,
        }
    }
}

/// An extraction result that has not been persisted yet
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct RecipeDraft {
    pub title: String,
    pub ingredients: Vec<String>,
    pub steps: Vec<String>,
    pub duration: Option<String>,
    pub category: Option<String>,
    pub image_url: Option<String>,
    pub source_url: String,
}

/// Text produced by a transcript provider for one video
#[derive(Debug, Clone, PartialEq)]
pub struct Transcript {
    pub text: String,
}

impl Transcript {
    pub fn new(text: impl Into<String>) -> Self {
        Transcript { text: text.into() }
    }
}

/// Body of an extraction request
#[derive(Debug, Clone, Deserialize)]
pub struct ProcessRecipeRequest {
    #[serde(default)]
    pub url: Option<String>,
}

/// Body of a successful extraction response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProcessRecipeResponse {
    pub recipe: Recipe,
    /// True when the recipe was already stored and no extraction ran
    pub cached: bool,
}
