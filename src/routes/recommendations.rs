use axum::{extract::State, Extension, Json};
use std::sync::Arc;

use crate::{
    error::AppResult,
    middleware::RequestId,
    models::{RecommendationRequest, RecommendationResponse},
    routes::AppState,
};

/// Handler for recommendations endpoint
pub async fn recommend(
    State(state): State<Arc<AppState>>,
    Extension(request_id): Extension<RequestId>,
    Json(request): Json<RecommendationRequest>,
) -> AppResult<Json<RecommendationResponse>> {
    tracing::info!(
        request_id = %request_id,
        liked_count = request.liked_titles.len(),
        "Processing recommendation request"
    );

    let recommendations = state
        .pipeline
        .recommend(&request.liked_titles)
        .await
        .inspect_err(|e| {
            tracing::warn!(request_id = %request_id, error = %e, "Recommendation request failed");
        })?;

    tracing::info!(
        request_id = %request_id,
        recommendations = recommendations.len(),
        "Recommendations completed"
    );

    Ok(Json(RecommendationResponse { recommendations }))
}
