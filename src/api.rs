//! HTTP surface of the extraction service
//!
//! `POST /` and `POST /process-recipe` accept `{"url": "..."}` and answer
//! `{"recipe": ..., "cached": bool}` or `{"error": "..."}`. `GET /recipes`
//! lists stored recipes, newest first.

use crate::error::PipelineError;
use crate::model::{ProcessRecipeRequest, ProcessRecipeResponse, Recipe};
use crate::orchestrator::RecipeOrchestrator;
use crate::validation::validate_video_url;
use axum::{
    extract::{rejection::JsonRejection, State},
    http::{header, HeaderName, HeaderValue, Method, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use log::{error, warn};
use serde::Serialize;
use serde_json::json;
use std::sync::Arc;
use std::time::Duration;
use tower_http::cors::{Any, CorsLayer};

/// Seconds a client should wait before retrying a transient failure
const RETRY_AFTER_SECS: &str = "5";

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub orchestrator: Arc<RecipeOrchestrator>,
    /// Overall deadline for one extraction request
    pub request_timeout: Duration,
    pub require_supported_platform: bool,
}

impl AppState {
    pub fn new(orchestrator: Arc<RecipeOrchestrator>, request_timeout: Duration) -> Self {
        Self {
            orchestrator,
            request_timeout,
            require_supported_platform: false,
        }
    }
}

impl IntoResponse for PipelineError {
    fn into_response(self) -> Response {
        let status =
            StatusCode::from_u16(self.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        match &self {
            PipelineError::Validation(msg) => warn!("Rejected request: {}", msg),
            other => error!("Recipe processing failed: {}", other),
        }
        let body = Json(json!({ "error": self.public_message() }));
        let mut response = (status, body).into_response();
        if self.is_retryable() {
            response.headers_mut().insert(
                header::RETRY_AFTER,
                HeaderValue::from_static(RETRY_AFTER_SECS),
            );
        }
        response
    }
}

/// POST / and POST /process-recipe
pub async fn process_recipe(
    State(state): State<AppState>,
    payload: Result<Json<ProcessRecipeRequest>, JsonRejection>,
) -> Result<Json<ProcessRecipeResponse>, PipelineError> {
    let Json(request) = payload.map_err(|rejection| {
        PipelineError::Validation(format!("Invalid request body: {}", rejection.body_text()))
    })?;

    let url = request.url.unwrap_or_default();
    if url.trim().is_empty() {
        return Err(PipelineError::Validation("URL is required".to_string()));
    }
    if state.require_supported_platform {
        validate_video_url(&url).map_err(PipelineError::Validation)?;
    }

    let response = state
        .orchestrator
        .handle_within(&url, state.request_timeout)
        .await?;
    Ok(Json(response))
}

/// GET /recipes
pub async fn list_recipes(
    State(state): State<AppState>,
) -> Result<Json<Vec<Recipe>>, PipelineError> {
    let recipes = state.orchestrator.store().list().await?;
    Ok(Json(recipes))
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
}

/// GET /health
pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

/// Any origin, with the headers browser and mobile clients send
fn cors_layer() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([
            header::AUTHORIZATION,
            header::CONTENT_TYPE,
            HeaderName::from_static("x-client-info"),
            HeaderName::from_static("apikey"),
        ])
}

/// Build application router
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/", post(process_recipe))
        .route("/process-recipe", post(process_recipe))
        .route("/recipes", get(list_recipes))
        .route("/health", get(health_check))
        .with_state(state)
        .layer(cors_layer())
}
