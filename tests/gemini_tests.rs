//! HTTP-level tests for the Gemini suggestion generator

use cinemind_api::{
    error::AppError,
    services::generator::{GeminiGenerator, SuggestionGenerator},
};
use serde_json::json;
use wiremock::matchers::{body_partial_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const MODEL_PATH: &str = "/models/gemini-pro:generateContent";

fn generator(server: &MockServer) -> GeminiGenerator {
    GeminiGenerator::new(
        "test-key".to_string(),
        server.uri(),
        "gemini-pro".to_string(),
    )
}

#[tokio::test]
async fn test_generate_returns_candidate_text() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(MODEL_PATH))
        .and(header("x-goog-api-key", "test-key"))
        .and(body_partial_json(json!({
            "contents": [{ "parts": [{ "text": "recommend please" }] }],
            "generationConfig": { "topK": 1, "maxOutputTokens": 2048 }
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "candidates": [{
                "content": { "role": "model", "parts": [{ "text": "Tenet\nDune\nArrival" }] },
                "finishReason": "STOP"
            }]
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let text = generator(&mock_server)
        .generate("recommend please")
        .await
        .unwrap();

    assert_eq!(text, "Tenet\nDune\nArrival");
}

#[tokio::test]
async fn test_safety_block_yields_empty_text() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(MODEL_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "promptFeedback": { "blockReason": "SAFETY" }
        })))
        .mount(&mock_server)
        .await;

    let text = generator(&mock_server).generate("anything").await.unwrap();

    assert_eq!(text, "");
}

#[tokio::test]
async fn test_error_status_is_generation_failure() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(MODEL_PATH))
        .respond_with(ResponseTemplate::new(503).set_body_string("overloaded"))
        .mount(&mock_server)
        .await;

    let result = generator(&mock_server).generate("anything").await;

    match result {
        Err(AppError::Generation(message)) => {
            assert!(message.contains("503"));
            assert!(message.contains("overloaded"));
        }
        other => panic!("expected Generation error, got {:?}", other),
    }
}

#[tokio::test]
async fn test_malformed_body_is_generation_failure() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(MODEL_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
        .mount(&mock_server)
        .await;

    let result = generator(&mock_server).generate("anything").await;

    assert!(matches!(result, Err(AppError::Generation(_))));
}

#[tokio::test]
async fn test_unreachable_service_is_generation_failure() {
    let generator = GeminiGenerator::new(
        "test-key".to_string(),
        "http://127.0.0.1:1".to_string(),
        "gemini-pro".to_string(),
    );

    let result = generator.generate("anything").await;

    assert!(matches!(result, Err(AppError::Generation(_))));
}
