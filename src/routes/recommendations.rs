use axum::{
    extract::{Path, Query, State},
    Extension, Json,
};
use serde::Deserialize;
use std::sync::Arc;

use crate::{
    error::{AppError, AppResult},
    middleware::RequestId,
    models::RecommendationsResponse,
    routes::AppState,
};

#[derive(Debug, Deserialize)]
pub struct RecommendationQuery {
    pub limit: Option<usize>,
}

/// Handler for the recommendations endpoint
pub async fn recommend(
    State(state): State<Arc<AppState>>,
    Extension(request_id): Extension<RequestId>,
    Path(external_id): Path<String>,
    Query(params): Query<RecommendationQuery>,
) -> AppResult<Json<RecommendationsResponse>> {
    let limit = params.limit.unwrap_or(state.default_limit);
    if limit == 0 || limit > state.max_limit {
        return Err(AppError::InvalidInput(format!(
            "limit must be between 1 and {}",
            state.max_limit
        )));
    }

    let user_id = state.identity.resolve(&external_id)?;

    tracing::info!(
        request_id = %request_id,
        user_id = %user_id,
        limit,
        "Processing recommendation request"
    );

    let recommendations = state.recommender.recommend(user_id, limit).await?;

    Ok(Json(RecommendationsResponse { recommendations }))
}
