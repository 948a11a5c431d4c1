use crate::error::SettingsError;
use crate::providers::ProviderFactory;
use config::{Config, Environment, File};
use serde::Deserialize;
use std::time::Duration;

/// Top-level service configuration
#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub ai: AiConfig,
    #[serde(default)]
    pub store: StoreConfig,
    #[serde(default)]
    pub transcript: TranscriptConfig,
    #[serde(default)]
    pub rate_limit: RateLimitConfig,
    /// Overall deadline for one extraction request, in seconds
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
}

/// HTTP listener configuration
#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    #[serde(default = "default_bind")]
    pub bind: String,
    /// Reject URLs that are not TikTok or Instagram videos
    #[serde(default)]
    pub require_supported_platform: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: default_bind(),
            require_supported_platform: false,
        }
    }
}

/// Completion service configuration
#[derive(Debug, Deserialize, Clone)]
pub struct AiConfig {
    /// Provider name, see `ProviderFactory::available_providers`
    #[serde(default = "default_provider")]
    pub provider: String,
    /// Model identifier (e.g., "gpt-4o-mini", "llama3.1")
    #[serde(default = "default_model")]
    pub model: String,
    /// Sampling temperature
    #[serde(default = "default_temperature")]
    pub temperature: f32,
    /// Maximum tokens to generate
    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,
    /// API key for authentication
    pub api_key: Option<String>,
    /// Base URL for API endpoint (for custom or proxy endpoints)
    pub base_url: Option<String>,
}

impl Default for AiConfig {
    fn default() -> Self {
        Self {
            provider: default_provider(),
            model: default_model(),
            temperature: default_temperature(),
            max_tokens: default_max_tokens(),
            api_key: None,
            base_url: None,
        }
    }
}

/// Recipe store configuration
#[derive(Debug, Deserialize, Clone)]
pub struct StoreConfig {
    /// "memory" or "supabase"
    #[serde(default = "default_backend")]
    pub backend: String,
    /// Project URL of the Supabase instance
    pub url: Option<String>,
    /// Key sent as `apikey` and bearer token
    pub api_key: Option<String>,
    #[serde(default = "default_table")]
    pub table: String,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            backend: default_backend(),
            url: None,
            api_key: None,
            table: default_table(),
        }
    }
}

#[derive(Debug, Deserialize, Clone, Default)]
pub struct TranscriptConfig {
    /// Fixed transcript returned for every video instead of the built-in sample
    pub text: Option<String>,
}

/// Per-day limits. Loaded for visibility only; nothing enforces them.
#[derive(Debug, Deserialize, Clone)]
pub struct RateLimitConfig {
    #[serde(default = "default_max_recipes_per_day")]
    pub max_recipes_per_day: u32,
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        Self {
            max_recipes_per_day: default_max_recipes_per_day(),
        }
    }
}

/// Conventional variable names, read as lowest-priority values
const CONVENTIONAL_VARS: &[(&str, &str)] = &[
    ("ai.api_key", "OPENAI_API_KEY"),
    ("store.url", "SUPABASE_URL"),
    ("store.api_key", "SUPABASE_ANON_KEY"),
];

// Default value functions
fn default_bind() -> String {
    "127.0.0.1:8080".to_string()
}

fn default_provider() -> String {
    "openai".to_string()
}

fn default_model() -> String {
    "gpt-4o-mini".to_string()
}

fn default_temperature() -> f32 {
    0.7
}

fn default_max_tokens() -> u32 {
    2000
}

fn default_backend() -> String {
    "memory".to_string()
}

fn default_table() -> String {
    "recipes".to_string()
}

fn default_max_recipes_per_day() -> u32 {
    10
}

fn default_request_timeout_secs() -> u64 {
    60
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            server: ServerConfig::default(),
            ai: AiConfig::default(),
            store: StoreConfig::default(),
            transcript: TranscriptConfig::default(),
            rate_limit: RateLimitConfig::default(),
            request_timeout_secs: default_request_timeout_secs(),
        }
    }
}

impl AppConfig {
    /// Load configuration from file and environment variables
    ///
    /// Configuration is loaded with the following priority (highest to lowest):
    /// 1. Environment variables with RECIPE_IMPORT__ prefix
    /// 2. config.toml file in current directory
    /// 3. `OPENAI_API_KEY`, `SUPABASE_URL` and `SUPABASE_ANON_KEY`
    /// 4. Default values
    ///
    /// Environment variable format: RECIPE_IMPORT__AI__API_KEY
    pub fn load() -> Result<Self, SettingsError> {
        let mut builder = Config::builder();
        for (key, var) in CONVENTIONAL_VARS {
            if let Ok(value) = std::env::var(var) {
                builder = builder.set_default(*key, value)?;
            }
        }

        let settings = builder
            // Optional config file (can be missing)
            .add_source(File::with_name("config").required(false))
            .add_source(
                Environment::with_prefix("RECIPE_IMPORT")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        Ok(settings.try_deserialize()?)
    }

    /// Check the settings once, before anything is constructed from them
    pub fn validate(&self) -> Result<(), SettingsError> {
        let has_value = |v: &Option<String>| v.as_deref().is_some_and(|s| !s.trim().is_empty());

        let providers = ProviderFactory::available_providers();
        if !providers.contains(&self.ai.provider.as_str()) {
            return Err(SettingsError::Invalid {
                field: "ai.provider",
                reason: format!(
                    "unknown provider '{}', expected one of: {}",
                    self.ai.provider,
                    providers.join(", ")
                ),
            });
        }
        if self.ai.provider == "openai" && !has_value(&self.ai.api_key) {
            return Err(SettingsError::Missing("ai.api_key"));
        }
        if self.ai.model.trim().is_empty() {
            return Err(SettingsError::Missing("ai.model"));
        }
        if !(0.0..=2.0).contains(&self.ai.temperature) {
            return Err(SettingsError::Invalid {
                field: "ai.temperature",
                reason: format!("{} is outside 0.0..=2.0", self.ai.temperature),
            });
        }

        match self.store.backend.as_str() {
            "memory" => {}
            "supabase" => {
                if !has_value(&self.store.url) {
                    return Err(SettingsError::Missing("store.url"));
                }
                if !has_value(&self.store.api_key) {
                    return Err(SettingsError::Missing("store.api_key"));
                }
            }
            other => {
                return Err(SettingsError::Invalid {
                    field: "store.backend",
                    reason: format!("unknown backend '{}'", other),
                })
            }
        }

        if self.request_timeout_secs == 0 {
            return Err(SettingsError::Invalid {
                field: "request_timeout_secs",
                reason: "must be greater than zero".to_string(),
            });
        }

        Ok(())
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}
