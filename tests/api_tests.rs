use std::sync::Arc;

use axum::http::StatusCode;
use axum_test::TestServer;
use serde_json::{json, Value};
use uuid::Uuid;

use tastevec::{
    config::Config,
    db::InMemoryTrackStore,
    models::TrackRecord,
    routes::{create_router, AppState},
    services::{IdentityResolver, NamespacedIdentityResolver},
};

fn user_id(account: &str) -> Uuid {
    NamespacedIdentityResolver.resolve(account).unwrap()
}

fn track(id: &str, artist: &str, popularity: i32, date: &str, genres: &[&str]) -> TrackRecord {
    TrackRecord::new(id)
        .with_artist(artist)
        .with_popularity(popularity)
        .with_release_date(date)
        .with_genres(genres)
}

fn seeded_store() -> InMemoryTrackStore {
    let alice = user_id("alice");
    let carol = user_id("carol");

    InMemoryTrackStore::new()
        .with_track(track("A", "Dua Lipa", 80, "2020-03-27", &["pop"]))
        .with_track(track("B", "Bill Evans", 20, "1961-11-01", &["jazz"]))
        .with_track(track("C", "Dua Lipa", 78, "2017-06-02", &["pop", "dance pop"]))
        .with_track(track("D", "Metallica", 70, "1986-03-03", &["metal"]))
        .with_liked(alice, "A")
        .with_top(alice, "C")
        .with_liked(carol, "A")
        .with_liked(carol, "B")
        .with_liked(carol, "C")
        .with_playlist(carol, &["D"])
}

fn create_test_server(store: InMemoryTrackStore) -> TestServer {
    let state = AppState::new(Arc::new(store), &Config::default());
    let app = create_router(Arc::new(state));
    TestServer::new(app).unwrap()
}

#[tokio::test]
async fn test_health_check() {
    let server = create_test_server(InMemoryTrackStore::new());
    let response = server.get("/health").await;
    response.assert_status_ok();
    assert_eq!(response.json::<Value>(), json!({ "status": "healthy" }));
}

#[tokio::test]
async fn test_response_carries_request_id() {
    let server = create_test_server(InMemoryTrackStore::new());
    let response = server.get("/health").await;

    let header = response.header("x-request-id");
    assert!(Uuid::parse_str(header.to_str().unwrap()).is_ok());
}

#[tokio::test]
async fn test_recommendations_exclude_known_tracks() {
    let server = create_test_server(seeded_store());

    let response = server.get("/api/v1/users/alice/recommendations").await;
    response.assert_status_ok();

    let body: Value = response.json();
    let recommendations: Vec<String> =
        serde_json::from_value(body["recommendations"].clone()).unwrap();

    assert_eq!(recommendations.len(), 2);
    assert!(!recommendations.contains(&"A".to_string()));
    assert!(!recommendations.contains(&"C".to_string()));
}

#[tokio::test]
async fn test_recommendations_respect_limit() {
    let server = create_test_server(seeded_store());

    let response = server
        .get("/api/v1/users/alice/recommendations")
        .add_query_param("limit", 1)
        .await;
    response.assert_status_ok();

    let body: Value = response.json();
    assert_eq!(body["recommendations"].as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn test_recommendations_two_track_scenario() {
    let bob = user_id("bob");
    let store = InMemoryTrackStore::new()
        .with_track(track("A", "x", 80, "2020", &["pop"]))
        .with_track(track("B", "y", 20, "2000", &["jazz"]))
        .with_history(bob, "A");
    let server = create_test_server(store);

    let response = server.get("/api/v1/users/bob/recommendations").await;
    response.assert_status_ok();
    assert_eq!(response.json::<Value>(), json!({ "recommendations": ["B"] }));
}

#[tokio::test]
async fn test_recommendations_unknown_user_is_not_found() {
    let server = create_test_server(seeded_store());

    let response = server.get("/api/v1/users/nobody/recommendations").await;
    response.assert_status(StatusCode::NOT_FOUND);

    let body: Value = response.json();
    assert!(body["error"].as_str().unwrap().contains("No track data"));
}

#[tokio::test]
async fn test_recommendations_everything_seen_is_empty() {
    let server = create_test_server(seeded_store());

    let response = server.get("/api/v1/users/carol/recommendations").await;
    response.assert_status_ok();
    assert_eq!(response.json::<Value>(), json!({ "recommendations": [] }));
}

#[tokio::test]
async fn test_recommendations_reject_out_of_range_limit() {
    let server = create_test_server(seeded_store());

    let response = server
        .get("/api/v1/users/alice/recommendations")
        .add_query_param("limit", 0)
        .await;
    response.assert_status(StatusCode::BAD_REQUEST);

    let response = server
        .get("/api/v1/users/alice/recommendations")
        .add_query_param("limit", 101)
        .await;
    response.assert_status(StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_stats_top_genres() {
    let server = create_test_server(seeded_store());

    let response = server.get("/api/v1/users/carol/stats/top-genres").await;
    response.assert_status_ok();

    // Playlist track D (metal) is not listening data
    assert_eq!(
        response.json::<Value>(),
        json!({ "top_genres": [["pop", 2], ["dance pop", 1], ["jazz", 1]] })
    );
}

#[tokio::test]
async fn test_stats_top_artists() {
    let server = create_test_server(seeded_store());

    let response = server.get("/api/v1/users/carol/stats/top-artists").await;
    response.assert_status_ok();
    assert_eq!(
        response.json::<Value>(),
        json!({ "top_artists": [["Dua Lipa", 2], ["Bill Evans", 1]] })
    );
}

#[tokio::test]
async fn test_stats_track_summary() {
    let server = create_test_server(seeded_store());

    let response = server.get("/api/v1/users/alice/stats/track-summary").await;
    response.assert_status_ok();

    let body: Value = response.json();
    assert_eq!(body["average_popularity"], json!(79.0));
    assert_eq!(body["total_unique_tracks"], json!(2));
    assert_eq!(body["genre_diversity"], json!(2));
    assert_eq!(
        body["release_year_distribution"],
        json!({"2020": 1, "2017": 1})
    );
}

#[tokio::test]
async fn test_stats_track_summary_without_data() {
    let server = create_test_server(seeded_store());

    let response = server.get("/api/v1/users/nobody/stats/track-summary").await;
    response.assert_status_ok();

    let body: Value = response.json();
    assert_eq!(body["average_popularity"], Value::Null);
    assert_eq!(body["total_unique_tracks"], json!(0));
    assert_eq!(body["release_year_distribution"], json!({}));
}
