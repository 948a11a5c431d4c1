use crate::error::StorageError;
use crate::model::{Recipe, RecipeDraft};
use crate::store::RecipeStore;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use log::{debug, warn};
use reqwest::{Client, RequestBuilder, Response};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Store backed by a Supabase table, spoken to through its PostgREST API.
///
/// Idempotent inserts rely on a unique constraint over `source_url` in the
/// table; without it PostgREST cannot resolve the conflict.
pub struct SupabaseRecipeStore {
    client: Client,
    base_url: String,
    api_key: String,
    table: String,
}

/// Row as stored, with the table's snake_case column names
#[derive(Debug, Deserialize)]
struct RecipeRow {
    id: Uuid,
    created_at: DateTime<Utc>,
    title: String,
    image_url: Option<String>,
    duration: Option<String>,
    category: Option<String>,
    #[serde(default)]
    ingredients: Option<Vec<String>>,
    #[serde(default)]
    steps: Option<Vec<String>>,
    source_url: Option<String>,
    #[serde(default)]
    edited_by_user: bool,
}

impl From<RecipeRow> for Recipe {
    fn from(row: RecipeRow) -> Self {
        Recipe {
            id: row.id,
            created_at: row.created_at,
            title: row.title,
            image_url: row.image_url,
            duration: row.duration,
            category: row.category,
            ingredients: row.ingredients.unwrap_or_default(),
            steps: row.steps.unwrap_or_default(),
            source_url: row.source_url,
            edited_by_user: row.edited_by_user,
        }
    }
}

#[derive(Debug, Serialize)]
struct NewRecipeRow<'a> {
    title: &'a str,
    image_url: Option<&'a str>,
    duration: Option<&'a str>,
    category: Option<&'a str>,
    ingredients: &'a [String],
    steps: &'a [String],
    source_url: &'a str,
    edited_by_user: bool,
}

impl<'a> From<&'a RecipeDraft> for NewRecipeRow<'a> {
    fn from(draft: &'a RecipeDraft) -> Self {
        NewRecipeRow {
            title: &draft.title,
            image_url: draft.image_url.as_deref(),
            duration: draft.duration.as_deref(),
            category: draft.category.as_deref(),
            ingredients: &draft.ingredients,
            steps: &draft.steps,
            source_url: &draft.source_url,
            edited_by_user: false,
        }
    }
}

impl SupabaseRecipeStore {
    pub fn new(base_url: String, api_key: String, table: String) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key,
            table,
        }
    }

    fn table_url(&self) -> String {
        format!("{}/rest/v1/{}", self.base_url, self.table)
    }

    fn authorized(&self, builder: RequestBuilder) -> RequestBuilder {
        builder
            .header("apikey", &self.api_key)
            .header("Authorization", format!("Bearer {}", self.api_key))
            .header("Accept", "application/json")
    }

    async fn read_rows(response: Response) -> Result<Vec<RecipeRow>, StorageError> {
        let status = response.status();
        let body = response.text().await?;
        if !status.is_success() {
            return Err(StorageError::Status {
                status: status.as_u16(),
                body,
            });
        }
        serde_json::from_str(&body).map_err(|e| StorageError::Decode(e.to_string()))
    }
}

#[async_trait]
impl RecipeStore for SupabaseRecipeStore {
    async fn find_by_source_url(&self, source_url: &str) -> Result<Option<Recipe>, StorageError> {
        let request = self.client.get(self.table_url()).query(&[
            ("source_url", format!("eq.{}", source_url)),
            ("select", "*".to_string()),
            ("limit", "1".to_string()),
        ]);
        let response = self.authorized(request).send().await?;
        let rows = Self::read_rows(response).await?;
        debug!("Lookup of {} returned {} row(s)", source_url, rows.len());

        Ok(rows.into_iter().next().map(Recipe::from))
    }

    async fn insert(&self, draft: RecipeDraft) -> Result<Recipe, StorageError> {
        let request = self
            .client
            .post(self.table_url())
            .query(&[("on_conflict", "source_url")])
            .header("Prefer", "return=representation,resolution=ignore-duplicates")
            .json(&NewRecipeRow::from(&draft));
        let response = self.authorized(request).send().await?;
        let rows = Self::read_rows(response).await?;

        if let Some(row) = rows.into_iter().next() {
            return Ok(row.into());
        }

        // Empty representation: the row already existed and was left alone
        warn!(
            "Insert for {} conflicted with an existing row, reading it back",
            draft.source_url
        );
        let existing = self.find_by_source_url(&draft.source_url).await?;
        existing.ok_or(StorageError::MissingAfterConflict(draft.source_url))
    }

    async fn list(&self) -> Result<Vec<Recipe>, StorageError> {
        let request = self
            .client
            .get(self.table_url())
            .query(&[("select", "*"), ("order", "created_at.desc")]);
        let response = self.authorized(request).send().await?;
        let rows = Self::read_rows(response).await?;
        Ok(rows.into_iter().map(Recipe::from).collect())
    }
}
