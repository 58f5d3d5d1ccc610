/// TMDB (The Movie Database) v3 provider
///
/// API Flow:
/// 1. Search: /search/multi → ranked movies, shows and people
/// 2. Movie details: /movie/{id} → root `imdb_id`
/// 3. Show details: /tv/{id}?append_to_response=external_ids → `external_ids.imdb_id`
use crate::{
    models::{
        LookupOutcome, MediaKind, SearchHit, TitleDetails, TmdbMovieDetails, TmdbSearchResponse,
        TmdbTvDetails,
    },
    services::providers::MetadataProvider,
};
use reqwest::{Client as HttpClient, StatusCode};
use serde::de::DeserializeOwned;

#[derive(Clone)]
pub struct TmdbProvider {
    http_client: HttpClient,
    api_key: String,
    api_url: String,
}

impl TmdbProvider {
    pub fn new(api_key: String, api_url: String) -> Self {
        Self {
            http_client: HttpClient::new(),
            api_key,
            api_url,
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.api_url.trim_end_matches('/'), path)
    }

    /// Performs a GET and maps the response onto a lookup outcome
    async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, &str)],
    ) -> LookupOutcome<T> {
        let url = self.url(path);

        let response = match self
            .http_client
            .get(&url)
            .query(&[("api_key", self.api_key.as_str())])
            .query(query)
            .send()
            .await
        {
            Ok(response) => response,
            Err(e) => {
                return LookupOutcome::ServiceError(format!("TMDB request failed: {}", e));
            }
        };

        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            return LookupOutcome::NotFound;
        }
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return LookupOutcome::ServiceError(format!(
                "TMDB API returned status {}: {}",
                status, body
            ));
        }

        match response.json::<T>().await {
            Ok(body) => LookupOutcome::Found(body),
            Err(e) => {
                LookupOutcome::ServiceError(format!("Failed to parse TMDB response: {}", e))
            }
        }
    }
}

#[async_trait::async_trait]
impl MetadataProvider for TmdbProvider {
    async fn search_multi(&self, query: &str) -> LookupOutcome<Vec<SearchHit>> {
        let outcome = self
            .get_json::<TmdbSearchResponse>(
                "search/multi",
                &[("query", query), ("include_adult", "false")],
            )
            .await;

        match outcome {
            LookupOutcome::Found(body) => {
                let hits: Vec<SearchHit> = body.results.into_iter().map(SearchHit::from).collect();

                tracing::debug!(
                    query = %query,
                    results = hits.len(),
                    provider = "tmdb",
                    "Multi search completed"
                );

                if hits.is_empty() {
                    LookupOutcome::NotFound
                } else {
                    LookupOutcome::Found(hits)
                }
            }
            LookupOutcome::NotFound => LookupOutcome::NotFound,
            LookupOutcome::ServiceError(e) => LookupOutcome::ServiceError(e),
        }
    }

    async fn fetch_details(&self, hit: &SearchHit) -> LookupOutcome<TitleDetails> {
        let outcome = match hit.media_kind {
            MediaKind::Movie => {
                let path = format!("movie/{}", hit.external_id);
                self.get_json::<TmdbMovieDetails>(&path, &[])
                    .await
                    .map(TitleDetails::from)
            }
            MediaKind::Show => {
                let path = format!("tv/{}", hit.external_id);
                self.get_json::<TmdbTvDetails>(&path, &[("append_to_response", "external_ids")])
                    .await
                    .map(TitleDetails::from)
            }
            MediaKind::Person | MediaKind::Unknown => return LookupOutcome::NotFound,
        };

        if let LookupOutcome::Found(details) = &outcome {
            tracing::debug!(
                tmdb_id = hit.external_id,
                media_kind = %hit.media_kind,
                imdb_id = ?details.imdb_id,
                provider = "tmdb",
                "Details fetched"
            );
        }

        outcome
    }

    fn name(&self) -> &'static str {
        "tmdb"
    }
}
