use std::sync::Arc;

use crate::{
    error::{AppError, AppResult},
    models::Recommendation,
    services::{
        extractor::extract_titles, generator::SuggestionGenerator, prompt::build_prompt,
        providers::MetadataProvider, resolver::resolve_all,
    },
};

/// Minimum number of distinct liked titles needed to build a prompt
pub const MIN_LIKED_TITLES: usize = 3;

/// Generates recommendations from a handful of liked titles
///
/// Flow: validate → prompt → generate → extract candidates → resolve each
/// candidate against the metadata provider → keep the ones that resolved.
///
/// A partial result (some candidates unresolved) is a success. Only an empty
/// extraction or a fully unresolved candidate list fails, and each is reported
/// with its own error.
pub struct RecommendationPipeline {
    generator: Arc<dyn SuggestionGenerator>,
    provider: Arc<dyn MetadataProvider>,
    max_concurrent_lookups: usize,
}

impl RecommendationPipeline {
    pub fn new(
        generator: Arc<dyn SuggestionGenerator>,
        provider: Arc<dyn MetadataProvider>,
        max_concurrent_lookups: usize,
    ) -> Self {
        Self {
            generator,
            provider,
            max_concurrent_lookups,
        }
    }

    pub async fn recommend(&self, liked_titles: &[String]) -> AppResult<Vec<Recommendation>> {
        let liked = validate_liked_titles(liked_titles)?;

        let prompt = build_prompt(&liked);
        let raw = self.generator.generate(&prompt).await?;
        let candidates = extract_titles(&raw);

        tracing::info!(
            liked_count = liked.len(),
            candidate_count = candidates.len(),
            generator = self.generator.name(),
            "Suggestions generated"
        );

        if candidates.is_empty() {
            return Err(AppError::EmptySuggestions);
        }

        let references = resolve_all(
            self.provider.clone(),
            &candidates,
            self.max_concurrent_lookups,
        )
        .await;

        let recommendations: Vec<Recommendation> = candidates
            .iter()
            .zip(references)
            .filter_map(|(title, reference)| {
                reference.map(|r| Recommendation::new(title.clone(), r))
            })
            .collect();

        if recommendations.is_empty() {
            tracing::warn!(
                candidates = ?candidates,
                provider = self.provider.name(),
                "No suggested titles could be resolved"
            );
            return Err(AppError::NoReferencesResolved { candidates });
        }

        if recommendations.len() < candidates.len() {
            tracing::info!(
                resolved = recommendations.len(),
                unresolved = candidates.len() - recommendations.len(),
                "Some suggested titles could not be resolved"
            );
        }

        Ok(recommendations)
    }
}

/// Trims liked titles, drops blanks and duplicates, and enforces the minimum
///
/// Keeps first-occurrence order. Runs before any external call.
pub fn validate_liked_titles(liked_titles: &[String]) -> AppResult<Vec<String>> {
    let mut distinct: Vec<String> = Vec::with_capacity(liked_titles.len());

    for title in liked_titles.iter().map(|t| t.trim()) {
        if !title.is_empty() && !distinct.iter().any(|seen| seen == title) {
            distinct.push(title.to_string());
        }
    }

    if distinct.len() < MIN_LIKED_TITLES {
        return Err(AppError::InvalidInput(format!(
            "At least {} distinct liked titles are required, got {}",
            MIN_LIKED_TITLES,
            distinct.len()
        )));
    }

    Ok(distinct)
}
