use serde::Deserialize;

use crate::error::{AppError, AppResult};

/// Application configuration loaded from environment variables
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    /// Google Gemini API key
    pub gemini_api_key: String,

    /// Gemini REST base URL
    #[serde(default = "default_gemini_api_url")]
    pub gemini_api_url: String,

    /// Gemini model used for suggestions
    #[serde(default = "default_gemini_model")]
    pub gemini_model: String,

    /// TMDB (v3) API key
    pub tmdb_api_key: String,

    /// TMDB API base URL
    #[serde(default = "default_tmdb_api_url")]
    pub tmdb_api_url: String,

    /// Upper bound on concurrent per-title lookups within one request
    #[serde(default = "default_max_concurrent_lookups")]
    pub max_concurrent_lookups: usize,

    /// Server host address
    #[serde(default = "default_host")]
    pub host: String,

    /// Server port
    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_gemini_api_url() -> String {
    "https://generativelanguage.googleapis.com/v1beta".to_string()
}

fn default_gemini_model() -> String {
    "gemini-pro".to_string()
}

fn default_tmdb_api_url() -> String {
    "https://api.themoviedb.org/3".to_string()
}

fn default_max_concurrent_lookups() -> usize {
    6
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    3000
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> AppResult<Self> {
        dotenvy::dotenv().ok();
        let config = envy::from_env::<Config>()
            .map_err(|e| AppError::Config(format!("Failed to load config: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    /// Rejects blank credentials, which envy happily accepts as present
    pub fn validate(&self) -> AppResult<()> {
        if self.gemini_api_key.trim().is_empty() {
            return Err(AppError::Config("GEMINI_API_KEY is empty".to_string()));
        }
        if self.tmdb_api_key.trim().is_empty() {
            return Err(AppError::Config("TMDB_API_KEY is empty".to_string()));
        }
        if self.max_concurrent_lookups == 0 {
            return Err(AppError::Config(
                "MAX_CONCURRENT_LOOKUPS must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}
