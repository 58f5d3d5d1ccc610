/// Generative-model abstraction
///
/// The pipeline only needs "prompt in, raw text out"; the concrete backend
/// owns generation parameters and safety settings.
use crate::error::AppResult;

pub mod gemini;

pub use gemini::GeminiGenerator;

/// Trait for text-generation backends
#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait SuggestionGenerator: Send + Sync {
    /// Sends the prompt and returns the model's raw text
    ///
    /// A reply withheld by content filtering comes back as an empty string.
    /// Transport and service failures are `AppError::Generation`.
    async fn generate(&self, prompt: &str) -> AppResult<String>;

    /// Backend name for logging and debugging
    fn name(&self) -> &'static str;
}
