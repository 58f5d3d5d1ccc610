/// Media-metadata provider abstraction
///
/// A provider answers the two questions the resolver asks: "what does this
/// title text match?" and "what is the IMDB id of that match?". Failures come
/// back as `LookupOutcome` variants so a bad lookup stays local to its title.
use crate::models::{LookupOutcome, SearchHit, TitleDetails};

pub mod tmdb;

pub use tmdb::TmdbProvider;

/// Trait for catalog search/detail backends
#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait MetadataProvider: Send + Sync {
    /// Search movies, shows and people at once
    ///
    /// Hits are in the provider's relevance order.
    async fn search_multi(&self, query: &str) -> LookupOutcome<Vec<SearchHit>>;

    /// Fetch kind-specific details for a search hit
    async fn fetch_details(&self, hit: &SearchHit) -> LookupOutcome<TitleDetails>;

    /// Provider name for logging and debugging
    fn name(&self) -> &'static str;
}
