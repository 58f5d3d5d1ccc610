use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use axum::http::StatusCode;
use axum_test::TestServer;
use serde_json::{json, Value};

use cinemind_api::{
    error::{AppError, AppResult},
    models::{LookupOutcome, MediaKind, SearchHit, TitleDetails},
    routes::{create_router, AppState},
    services::{
        generator::SuggestionGenerator, providers::MetadataProvider, RecommendationPipeline,
    },
};

struct StubGenerator {
    reply: Result<&'static str, &'static str>,
}

#[async_trait::async_trait]
impl SuggestionGenerator for StubGenerator {
    async fn generate(&self, _prompt: &str) -> AppResult<String> {
        self.reply
            .map(str::to_string)
            .map_err(|e| AppError::Generation(e.to_string()))
    }

    fn name(&self) -> &'static str {
        "stub"
    }
}

/// Catalog keyed by title; titles missing from it come back as NotFound
struct StubProvider {
    catalog: HashMap<&'static str, (u64, &'static str)>,
    searches: Arc<AtomicUsize>,
}

#[async_trait::async_trait]
impl MetadataProvider for StubProvider {
    async fn search_multi(&self, query: &str) -> LookupOutcome<Vec<SearchHit>> {
        self.searches.fetch_add(1, Ordering::SeqCst);
        match self.catalog.get(query) {
            Some((id, _)) => LookupOutcome::Found(vec![SearchHit {
                external_id: *id,
                media_kind: MediaKind::Movie,
                popularity: 1.0,
            }]),
            None => LookupOutcome::NotFound,
        }
    }

    async fn fetch_details(&self, hit: &SearchHit) -> LookupOutcome<TitleDetails> {
        let imdb_id = self
            .catalog
            .values()
            .find(|(id, _)| *id == hit.external_id)
            .map(|(_, imdb_id)| imdb_id.to_string());
        LookupOutcome::Found(TitleDetails { imdb_id })
    }

    fn name(&self) -> &'static str {
        "stub"
    }
}

fn catalog() -> HashMap<&'static str, (u64, &'static str)> {
    HashMap::from([
        ("Tenet", (577922, "tt6723592")),
        ("Dune", (438631, "tt1160419")),
        ("Arrival", (329865, "tt2543164")),
    ])
}

fn create_test_server(reply: Result<&'static str, &'static str>) -> (TestServer, Arc<AtomicUsize>) {
    let searches = Arc::new(AtomicUsize::new(0));
    let provider = StubProvider {
        catalog: catalog(),
        searches: searches.clone(),
    };
    let pipeline = RecommendationPipeline::new(
        Arc::new(StubGenerator { reply }),
        Arc::new(provider),
        4,
    );
    let app = create_router(Arc::new(AppState::new(pipeline)));
    (TestServer::new(app).unwrap(), searches)
}

fn liked_body() -> Value {
    json!({ "likedTitles": ["The Matrix", "Inception", "Interstellar"] })
}

#[tokio::test]
async fn test_health_check() {
    let (server, _) = create_test_server(Ok(""));
    let response = server.get("/health").await;
    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["status"], "healthy");
}

#[tokio::test]
async fn test_recommendations_success() {
    let (server, _) = create_test_server(Ok("Tenet\nDune\nArrival\n"));

    let response = server
        .post("/api/v1/recommendations")
        .json(&liked_body())
        .await;

    response.assert_status_ok();
    let body: Value = response.json();
    let recs = body["recommendations"].as_array().unwrap();
    assert_eq!(recs.len(), 3);
    assert_eq!(recs[0]["title"], "Tenet");
    assert_eq!(recs[0]["imdbUrl"], "https://www.imdb.com/title/tt6723592/");
    assert_eq!(recs[2]["title"], "Arrival");
}

#[tokio::test]
async fn test_partial_resolution_drops_unknown_titles() {
    let (server, _) = create_test_server(Ok("Tenet\nSome Made Up Film\nDune"));

    let response = server
        .post("/api/v1/recommendations")
        .json(&liked_body())
        .await;

    response.assert_status_ok();
    let body: Value = response.json();
    let titles: Vec<&str> = body["recommendations"]
        .as_array()
        .unwrap()
        .iter()
        .map(|r| r["title"].as_str().unwrap())
        .collect();
    assert_eq!(titles, vec!["Tenet", "Dune"]);
}

#[tokio::test]
async fn test_too_few_liked_titles_is_bad_request() {
    let (server, searches) = create_test_server(Ok("Tenet"));

    let response = server
        .post("/api/v1/recommendations")
        .json(&json!({ "likedTitles": ["The Matrix", "Inception"] }))
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
    assert_eq!(searches.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn test_empty_suggestions_is_unprocessable() {
    let (server, searches) = create_test_server(Ok("  \n"));

    let response = server
        .post("/api/v1/recommendations")
        .json(&liked_body())
        .await;

    response.assert_status(StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(searches.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn test_unresolvable_suggestions_return_candidates() {
    let (server, searches) = create_test_server(Ok("Nope\nNada\nZilch"));

    let response = server
        .post("/api/v1/recommendations")
        .json(&liked_body())
        .await;

    response.assert_status(StatusCode::NOT_FOUND);
    let body: Value = response.json();
    assert_eq!(body["candidates"], json!(["Nope", "Nada", "Zilch"]));
    assert_eq!(searches.load(Ordering::SeqCst), 3);
}

#[tokio::test]
async fn test_generation_failure_is_bad_gateway() {
    let (server, _) = create_test_server(Err("connection refused"));

    let response = server
        .post("/api/v1/recommendations")
        .json(&liked_body())
        .await;

    response.assert_status(StatusCode::BAD_GATEWAY);
    let body: Value = response.json();
    assert!(body["error"].as_str().unwrap().contains("connection refused"));
}

#[tokio::test]
async fn test_request_id_is_echoed() {
    let (server, _) = create_test_server(Ok(""));
    let id = "5f0c6f4e-8d1a-4a7b-9a53-0c2f1e7d9b10";

    let response = server
        .get("/health")
        .add_header(
            axum::http::HeaderName::from_static("x-request-id"),
            axum::http::HeaderValue::from_static(id),
        )
        .await;

    assert_eq!(response.header("x-request-id"), id);
}
