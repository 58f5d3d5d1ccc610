use std::sync::Arc;

use tokio::{sync::Semaphore, task::JoinSet};

use crate::{
    models::{CanonicalReference, LookupOutcome},
    services::providers::MetadataProvider,
};

/// Resolves one candidate title to its IMDB permalink
///
/// Only the top search hit is consulted. Any failure along the way (no hits,
/// a person match, a failed request, a missing id) yields `None` and is
/// logged; nothing is propagated.
pub async fn resolve_title(
    provider: &dyn MetadataProvider,
    title: &str,
) -> Option<CanonicalReference> {
    let hit = match provider.search_multi(title).await {
        LookupOutcome::Found(hits) => hits.into_iter().next(),
        LookupOutcome::NotFound => None,
        LookupOutcome::ServiceError(e) => {
            tracing::warn!(
                title = %title,
                error = %e,
                provider = provider.name(),
                "Title search failed"
            );
            return None;
        }
    };

    let Some(hit) = hit else {
        tracing::info!(title = %title, provider = provider.name(), "No search results");
        return None;
    };

    if !hit.media_kind.is_title() {
        tracing::info!(
            title = %title,
            media_kind = %hit.media_kind,
            "Top search result is not a movie or show"
        );
        return None;
    }

    let details = match provider.fetch_details(&hit).await {
        LookupOutcome::Found(details) => details,
        LookupOutcome::NotFound => {
            tracing::info!(
                title = %title,
                external_id = hit.external_id,
                "Details not found"
            );
            return None;
        }
        LookupOutcome::ServiceError(e) => {
            tracing::warn!(
                title = %title,
                external_id = hit.external_id,
                error = %e,
                provider = provider.name(),
                "Detail fetch failed"
            );
            return None;
        }
    };

    let reference = details
        .imdb_id
        .as_deref()
        .and_then(CanonicalReference::from_imdb_id);

    if reference.is_none() {
        tracing::info!(
            title = %title,
            external_id = hit.external_id,
            "No IMDB id on title details"
        );
    }

    reference
}

/// Resolves every title concurrently, at most `max_concurrent` at a time
///
/// The returned vector lines up with `titles`: entry `i` is the outcome for
/// `titles[i]`. Lookups live in a `JoinSet`, so dropping the returned future
/// aborts any lookup still in flight.
pub async fn resolve_all(
    provider: Arc<dyn MetadataProvider>,
    titles: &[String],
    max_concurrent: usize,
) -> Vec<Option<CanonicalReference>> {
    let permits = Arc::new(Semaphore::new(max_concurrent.max(1)));
    let mut tasks = JoinSet::new();

    for (index, title) in titles.iter().enumerate() {
        let provider = provider.clone();
        let permits = permits.clone();
        let title = title.clone();
        tasks.spawn(async move {
            // The semaphore is never closed, so acquire only fails after a close
            let Ok(_permit) = permits.acquire_owned().await else {
                return (index, None);
            };
            (index, resolve_title(provider.as_ref(), &title).await)
        });
    }

    let mut results = vec![None; titles.len()];
    while let Some(joined) = tasks.join_next().await {
        match joined {
            Ok((index, reference)) => results[index] = reference,
            // The slot of a panicked task stays unresolved
            Err(e) => tracing::error!(error = %e, "Resolution task join error"),
        }
    }

    results
}
