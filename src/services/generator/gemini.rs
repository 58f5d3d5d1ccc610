/// Google Gemini backend
///
/// API Flow:
/// 1. POST /models/{model}:generateContent with prompt, generation config and
///    safety settings
/// 2. Concatenate the text parts of the first candidate
use crate::{
    error::{AppError, AppResult},
    models::{
        GeminiContent, GeminiGenerationConfig, GeminiPart, GeminiRequest, GeminiResponse,
        GeminiSafetySetting,
    },
    services::generator::SuggestionGenerator,
};
use reqwest::Client as HttpClient;

const TEMPERATURE: f64 = 0.8;
// top_k = 1 with top_p = 1 makes decoding near-greedy despite the temperature
const TOP_K: u32 = 1;
const TOP_P: f64 = 1.0;
const MAX_OUTPUT_TOKENS: u32 = 2048;

const BLOCK_THRESHOLD: &str = "BLOCK_MEDIUM_AND_ABOVE";
const SAFETY_CATEGORIES: [&str; 4] = [
    "HARM_CATEGORY_HARASSMENT",
    "HARM_CATEGORY_HATE_SPEECH",
    "HARM_CATEGORY_SEXUALLY_EXPLICIT",
    "HARM_CATEGORY_DANGEROUS_CONTENT",
];

#[derive(Clone)]
pub struct GeminiGenerator {
    http_client: HttpClient,
    api_key: String,
    api_url: String,
    model: String,
}

impl GeminiGenerator {
    pub fn new(api_key: String, api_url: String, model: String) -> Self {
        Self {
            http_client: HttpClient::new(),
            api_key,
            api_url,
            model,
        }
    }

    fn endpoint(&self) -> String {
        format!(
            "{}/models/{}:generateContent",
            self.api_url.trim_end_matches('/'),
            self.model
        )
    }

    fn build_request(prompt: &str) -> GeminiRequest {
        GeminiRequest {
            contents: vec![GeminiContent {
                parts: vec![GeminiPart {
                    text: prompt.to_string(),
                }],
            }],
            generation_config: GeminiGenerationConfig {
                temperature: TEMPERATURE,
                top_k: TOP_K,
                top_p: TOP_P,
                max_output_tokens: MAX_OUTPUT_TOKENS,
            },
            safety_settings: SAFETY_CATEGORIES
                .into_iter()
                .map(|category| GeminiSafetySetting {
                    category,
                    threshold: BLOCK_THRESHOLD,
                })
                .collect(),
        }
    }
}

#[async_trait::async_trait]
impl SuggestionGenerator for GeminiGenerator {
    async fn generate(&self, prompt: &str) -> AppResult<String> {
        let response = self
            .http_client
            .post(self.endpoint())
            .header("x-goog-api-key", &self.api_key)
            .json(&Self::build_request(prompt))
            .send()
            .await
            .map_err(|e| AppError::Generation(format!("Gemini request failed: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::Generation(format!(
                "Gemini API returned status {}: {}",
                status, body
            )));
        }

        let response_text = response
            .text()
            .await
            .map_err(|e| AppError::Generation(format!("Failed to read Gemini response: {}", e)))?;

        let parsed: GeminiResponse = serde_json::from_str(&response_text).map_err(|e| {
            tracing::error!(
                error = %e,
                response = %response_text,
                "Failed to deserialize Gemini response"
            );
            AppError::Generation(format!("Failed to parse Gemini response: {}", e))
        })?;

        let text = parsed.text();

        if text.trim().is_empty() {
            let block_reason = parsed
                .prompt_feedback
                .as_ref()
                .and_then(|f| f.block_reason.as_deref());
            let finish_reason = parsed
                .candidates
                .first()
                .and_then(|c| c.finish_reason.as_deref());
            tracing::warn!(
                block_reason = ?block_reason,
                finish_reason = ?finish_reason,
                provider = "gemini",
                "Model returned no text"
            );
        } else {
            tracing::debug!(raw = %text, provider = "gemini", "Raw model suggestions");
        }

        Ok(text)
    }

    fn name(&self) -> &'static str {
        "gemini"
    }
}
