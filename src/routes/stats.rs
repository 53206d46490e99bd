use axum::{
    extract::{Path, State},
    Json,
};
use std::sync::Arc;

use crate::{
    error::AppResult,
    models::{TopArtistsResponse, TopGenresResponse, TrackSummary},
    routes::AppState,
};

pub async fn top_genres(
    State(state): State<Arc<AppState>>,
    Path(external_id): Path<String>,
) -> AppResult<Json<TopGenresResponse>> {
    let user_id = state.identity.resolve(&external_id)?;
    Ok(Json(state.stats.top_genres(user_id).await?))
}

pub async fn top_artists(
    State(state): State<Arc<AppState>>,
    Path(external_id): Path<String>,
) -> AppResult<Json<TopArtistsResponse>> {
    let user_id = state.identity.resolve(&external_id)?;
    Ok(Json(state.stats.top_artists(user_id).await?))
}

pub async fn track_summary(
    State(state): State<Arc<AppState>>,
    Path(external_id): Path<String>,
) -> AppResult<Json<TrackSummary>> {
    let user_id = state.identity.resolve(&external_id)?;
    Ok(Json(state.stats.track_summary(user_id).await?))
}
