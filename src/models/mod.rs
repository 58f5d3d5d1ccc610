use serde::{Deserialize, Serialize};
use std::fmt::Display;

const IMDB_TITLE_BASE: &str = "https://www.imdb.com/title";

/// Kind of catalog entry a search hit points at
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum MediaKind {
    Movie,
    #[serde(rename = "tv")]
    Show,
    Person,
    #[default]
    #[serde(other)]
    Unknown,
}

impl MediaKind {
    /// Only movies and shows carry an IMDB title reference
    pub fn is_title(self) -> bool {
        matches!(self, MediaKind::Movie | MediaKind::Show)
    }
}

impl Display for MediaKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MediaKind::Movie => write!(f, "movie"),
            MediaKind::Show => write!(f, "tv"),
            MediaKind::Person => write!(f, "person"),
            MediaKind::Unknown => write!(f, "unknown"),
        }
    }
}

/// Top-level result of a multi-type catalog search
#[derive(Debug, Clone, PartialEq)]
pub struct SearchHit {
    pub external_id: u64,
    pub media_kind: MediaKind,
    pub popularity: f64,
}

/// Detail payload reduced to the cross-reference the pipeline needs
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TitleDetails {
    pub imdb_id: Option<String>,
}

/// Result of a single external lookup
///
/// Per-title failures are data, not errors: the resolver branches on this
/// instead of propagating anything upward.
#[derive(Debug, Clone, PartialEq)]
pub enum LookupOutcome<T> {
    Found(T),
    NotFound,
    ServiceError(String),
}

impl<T> LookupOutcome<T> {
    pub fn map<U, F: FnOnce(T) -> U>(self, f: F) -> LookupOutcome<U> {
        match self {
            LookupOutcome::Found(value) => LookupOutcome::Found(f(value)),
            LookupOutcome::NotFound => LookupOutcome::NotFound,
            LookupOutcome::ServiceError(e) => LookupOutcome::ServiceError(e),
        }
    }
}

/// Resolved IMDB permalink for a suggested title
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct CanonicalReference(String);

impl CanonicalReference {
    /// Builds the permalink from an IMDB identifier such as `tt1375666`.
    ///
    /// Returns `None` for identifiers that would not produce a usable URL.
    pub fn from_imdb_id(imdb_id: &str) -> Option<Self> {
        let id = imdb_id.trim();
        if id.is_empty() || id.contains('/') || id.contains(char::is_whitespace) {
            return None;
        }
        Some(Self(format!("{}/{}/", IMDB_TITLE_BASE, id)))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

impl Display for CanonicalReference {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A suggested title paired with its verified permalink
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Recommendation {
    pub title: String,
    pub imdb_url: String,
}

impl Recommendation {
    pub fn new(title: String, reference: CanonicalReference) -> Self {
        Self {
            title,
            imdb_url: reference.into_inner(),
        }
    }
}

/// Request body for the recommendations endpoint
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecommendationRequest {
    pub liked_titles: Vec<String>,
}

#[derive(Debug, Serialize)]
pub struct RecommendationResponse {
    pub recommendations: Vec<Recommendation>,
}

// ============================================================================
// Gemini API Types
// ============================================================================

/// Body for POST /models/{model}:generateContent
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GeminiRequest {
    pub contents: Vec<GeminiContent>,
    pub generation_config: GeminiGenerationConfig,
    pub safety_settings: Vec<GeminiSafetySetting>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct GeminiContent {
    #[serde(default)]
    pub parts: Vec<GeminiPart>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeminiPart {
    #[serde(default)]
    pub text: String,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct GeminiGenerationConfig {
    pub temperature: f64,
    pub top_k: u32,
    pub top_p: f64,
    pub max_output_tokens: u32,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct GeminiSafetySetting {
    pub category: &'static str,
    pub threshold: &'static str,
}

/// Response from generateContent
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct GeminiResponse {
    #[serde(default)]
    pub candidates: Vec<GeminiCandidate>,
    #[serde(default)]
    pub prompt_feedback: Option<GeminiPromptFeedback>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeminiCandidate {
    #[serde(default)]
    pub content: Option<GeminiContent>,
    #[serde(default)]
    pub finish_reason: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeminiPromptFeedback {
    #[serde(default)]
    pub block_reason: Option<String>,
}

impl GeminiResponse {
    /// Text of the first candidate, or an empty string if the model declined
    pub fn text(&self) -> String {
        self.candidates
            .first()
            .and_then(|c| c.content.as_ref())
            .map(|content| {
                content
                    .parts
                    .iter()
                    .map(|p| p.text.as_str())
                    .collect::<String>()
            })
            .unwrap_or_default()
    }
}

// ============================================================================
// TMDB API Types
// ============================================================================

/// Response from GET /search/multi
#[derive(Debug, Clone, Deserialize)]
pub struct TmdbSearchResponse {
    #[serde(default)]
    pub results: Vec<TmdbSearchResult>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TmdbSearchResult {
    pub id: u64,
    #[serde(default)]
    pub media_type: MediaKind,
    #[serde(default)]
    pub popularity: Option<f64>,
}

impl From<TmdbSearchResult> for SearchHit {
    fn from(result: TmdbSearchResult) -> Self {
        SearchHit {
            external_id: result.id,
            media_kind: result.media_type,
            popularity: result.popularity.unwrap_or_default(),
        }
    }
}

/// Response from GET /movie/{id}
#[derive(Debug, Clone, Deserialize)]
pub struct TmdbMovieDetails {
    #[serde(default)]
    pub imdb_id: Option<String>,
}

/// Response from GET /tv/{id}?append_to_response=external_ids
#[derive(Debug, Clone, Deserialize)]
pub struct TmdbTvDetails {
    #[serde(default)]
    pub imdb_id: Option<String>,
    #[serde(default)]
    pub external_ids: Option<TmdbExternalIds>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TmdbExternalIds {
    #[serde(default)]
    pub imdb_id: Option<String>,
}

fn non_empty(id: Option<String>) -> Option<String> {
    id.filter(|s| !s.trim().is_empty())
}

impl From<TmdbMovieDetails> for TitleDetails {
    fn from(details: TmdbMovieDetails) -> Self {
        TitleDetails {
            imdb_id: non_empty(details.imdb_id),
        }
    }
}

impl From<TmdbTvDetails> for TitleDetails {
    fn from(details: TmdbTvDetails) -> Self {
        // Shows keep the IMDB id under external_ids; some payloads carry it at the root
        let imdb_id = non_empty(details.external_ids.and_then(|ids| ids.imdb_id))
            .or_else(|| non_empty(details.imdb_id));
        TitleDetails { imdb_id }
    }
}
