use std::time::Duration;
use thiserror::Error;

/// Errors raised by a completion service call
#[derive(Error, Debug)]
pub enum ProviderError {
    /// Transport failure talking to the completion service
    #[error("Completion request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The service answered with a non-success status
    #[error("Completion service returned {status}: {body}")]
    Status { status: u16, body: String },

    /// The service answered 200 but with an error payload
    #[error("Completion service error: {0}")]
    Api(String),

    /// No provider with this name is known to the factory
    #[error("Unknown provider: {0}")]
    UnknownProvider(String),

    /// Provider is known but lacks required settings
    #[error("Provider '{provider}' is misconfigured: {reason}")]
    Misconfigured { provider: String, reason: String },
}

/// Errors raised while obtaining a transcript for a video
#[derive(Error, Debug)]
pub enum TranscriptError {
    #[error("Transcript is empty")]
    Empty,

    #[error("Transcript unavailable: {0}")]
    Unavailable(String),
}

/// Errors raised while turning a transcript into a recipe draft
#[derive(Error, Debug)]
pub enum ExtractionError {
    /// The completion service returned no content
    #[error("No response from completion service")]
    EmptyResponse,

    /// The content was not valid JSON
    #[error("Model returned invalid JSON: {0}")]
    InvalidJson(#[from] serde_json::Error),

    /// Valid JSON, but not the recipe shape
    #[error("Model returned an unexpected shape: {0}")]
    InvalidShape(String),

    /// A required list was empty after defaulting
    #[error("Extracted recipe has no {0}")]
    Incomplete(&'static str),

    #[error(transparent)]
    Provider(#[from] ProviderError),
}

/// Errors raised by the recipe store
#[derive(Error, Debug)]
pub enum StorageError {
    #[error("Store request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("Store returned {status}: {body}")]
    Status { status: u16, body: String },

    #[error("Failed to decode store response: {0}")]
    Decode(String),

    /// Insert hit an existing row which could not be read back
    #[error("Recipe for {0} conflicted on insert but could not be read back")]
    MissingAfterConflict(String),
}

/// Errors raised while loading or validating settings at startup
#[derive(Error, Debug)]
pub enum SettingsError {
    #[error("Configuration error: {0}")]
    Load(#[from] config::ConfigError),

    #[error("Missing required setting: {0}")]
    Missing(&'static str),

    #[error("Invalid setting {field}: {reason}")]
    Invalid { field: &'static str, reason: String },

    #[error("Provider setup failed: {0}")]
    Provider(#[from] ProviderError),
}

/// Failure of one extraction request, as seen by the caller
#[derive(Error, Debug)]
pub enum PipelineError {
    #[error("{0}")]
    Validation(String),

    #[error("Transcript failed: {0}")]
    Transcript(#[from] TranscriptError),

    #[error("Extraction failed: {0}")]
    Extraction(#[from] ExtractionError),

    #[error("Storage failed: {0}")]
    Storage(#[from] StorageError),

    #[error("Request timed out after {0:?}")]
    Timeout(Duration),

    #[error("Unknown error: {0}")]
    Unknown(String),
}

impl PipelineError {
    /// HTTP status the error is reported with
    pub fn status_code(&self) -> u16 {
        match self {
            PipelineError::Validation(_) => 400,
            PipelineError::Transcript(_)
            | PipelineError::Extraction(_)
            | PipelineError::Storage(_) => 502,
            PipelineError::Timeout(_) => 504,
            PipelineError::Unknown(_) => 500,
        }
    }

    /// Short message that is safe to show to a client.
    ///
    /// Only validation messages are passed through; everything else
    /// collapses to a generic string so internals never leave the service.
    pub fn public_message(&self) -> String {
        match self {
            PipelineError::Validation(msg) => msg.clone(),
            PipelineError::Transcript(_) => "Could not read the video".to_string(),
            PipelineError::Extraction(_) => "Failed to extract a recipe from this video".to_string(),
            PipelineError::Storage(_) => "Failed to save the recipe".to_string(),
            PipelineError::Timeout(_) => "Request timed out, please try again".to_string(),
            PipelineError::Unknown(_) => "Unknown error".to_string(),
        }
    }

    /// Whether the caller may reasonably retry the same request
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            PipelineError::Timeout(_) | PipelineError::Storage(_) | PipelineError::Transcript(_)
        )
    }
}
