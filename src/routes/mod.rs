use axum::{
    http::{Method, StatusCode},
    middleware,
    routing::get,
    Json, Router,
};
use serde_json::{json, Value};
use std::sync::Arc;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use crate::{
    config::Config,
    db::TrackStore,
    middleware::{make_span_with_request_id, request_id_middleware},
    services::{IdentityResolver, NamespacedIdentityResolver, Recommender, StatsService},
};

pub mod recommendations;
pub mod stats;

/// Shared state handed to every handler
pub struct AppState {
    pub recommender: Recommender,
    pub stats: StatsService,
    pub identity: Arc<dyn IdentityResolver>,
    /// Recommendation count used when the request has no `limit`
    pub default_limit: usize,
    pub max_limit: usize,
}

impl AppState {
    /// Wires the services around a single injected store
    pub fn new(store: Arc<dyn TrackStore>, config: &Config) -> Self {
        Self {
            recommender: Recommender::new(store.clone()),
            stats: StatsService::new(store),
            identity: Arc::new(NamespacedIdentityResolver),
            default_limit: config.recommendation_limit,
            max_limit: config.max_recommendation_limit,
        }
    }
}

/// Creates the application router with all routes
pub fn create_router(state: Arc<AppState>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::OPTIONS])
        .allow_headers(Any);

    Router::new()
        .route("/health", get(health_check))
        .nest("/api/v1", api_routes())
        .with_state(state)
        .layer(TraceLayer::new_for_http().make_span_with(make_span_with_request_id))
        .layer(middleware::from_fn(request_id_middleware))
        .layer(cors)
}

/// API routes under /api/v1
fn api_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route(
            "/users/:external_id/recommendations",
            get(recommendations::recommend),
        )
        .route("/users/:external_id/stats/top-genres", get(stats::top_genres))
        .route("/users/:external_id/stats/top-artists", get(stats::top_artists))
        .route(
            "/users/:external_id/stats/track-summary",
            get(stats::track_summary),
        )
}

/// Health check endpoint
async fn health_check() -> (StatusCode, Json<Value>) {
    (StatusCode::OK, Json(json!({ "status": "healthy" })))
}
