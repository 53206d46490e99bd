use std::collections::HashSet;
use std::sync::Arc;
use std::time::Instant;

use uuid::Uuid;

use crate::{
    db::{RecommendationSnapshot, TrackStore},
    error::{AppError, AppResult},
    models::TrackRecord,
    services::{
        similarity::{aggregate_scores, rank_unseen},
        vectorizer::{vectorize_all, GenreVocabulary},
    },
};

/// Content-based track recommendations
///
/// Builds a taste profile from every track the user already knows, compares
/// it against the whole catalog by cosine similarity over
/// popularity/year/genre vectors, and returns the best unseen tracks.
/// Nothing is cached between calls; each request rebuilds the genre
/// vocabulary from the catalog it reads.
#[derive(Clone)]
pub struct Recommender {
    store: Arc<dyn TrackStore>,
}

impl Recommender {
    pub fn new(store: Arc<dyn TrackStore>) -> Self {
        Self { store }
    }

    /// Top `limit` unseen track IDs for the user, most relevant first
    ///
    /// Fails with [`AppError::NoProfile`] when the user has no liked, top,
    /// history or playlist tracks. An empty catalog, or a catalog the user
    /// already knows entirely, is an empty success. All reads come from one
    /// [`TrackStore::recommendation_snapshot`].
    pub async fn recommend(&self, user_id: Uuid, limit: usize) -> AppResult<Vec<String>> {
        let start = Instant::now();

        let RecommendationSnapshot {
            known_ids,
            user_tracks,
            catalog,
        } = self.store.recommendation_snapshot(user_id).await?;

        if known_ids.is_empty() {
            tracing::info!(user_id = %user_id, "No known tracks, cannot build taste profile");
            return Err(AppError::NoProfile(user_id.to_string()));
        }

        if user_tracks.is_empty() {
            tracing::warn!(
                user_id = %user_id,
                known = known_ids.len(),
                "Known track IDs have no track rows"
            );
            return Err(AppError::NoProfile(user_id.to_string()));
        }

        // At most one row per distinct known ID
        if user_tracks.len() > known_ids.len() {
            tracing::error!(
                user_id = %user_id,
                known = known_ids.len(),
                rows = user_tracks.len(),
                "Store returned more profile rows than known track IDs"
            );
            return Err(AppError::Internal(format!(
                "{} profile rows for {} known tracks",
                user_tracks.len(),
                known_ids.len()
            )));
        }

        let known: HashSet<String> = known_ids.into_iter().collect();
        let recommendations = rank_catalog(&user_tracks, &catalog, &known, limit);

        tracing::info!(
            user_id = %user_id,
            profile_tracks = user_tracks.len(),
            catalog_size = catalog.len(),
            returned = recommendations.len(),
            processing_time_ms = start.elapsed().as_millis(),
            "Recommendations computed"
        );

        Ok(recommendations)
    }
}

/// Scores `catalog` against the user's tracks and returns the best `limit`
/// IDs not in `known`
///
/// Pure: identical inputs always give identical output.
pub fn rank_catalog(
    user_tracks: &[TrackRecord],
    catalog: &[TrackRecord],
    known: &HashSet<String>,
    limit: usize,
) -> Vec<String> {
    if catalog.is_empty() || limit == 0 {
        return Vec::new();
    }

    let vocabulary = GenreVocabulary::build(catalog);
    let user_vectors = vectorize_all(user_tracks, &vocabulary);
    let catalog_vectors = vectorize_all(catalog, &vocabulary);

    tracing::debug!(
        genres = vocabulary.len(),
        dimensions = vocabulary.dimensions(),
        "Vectorized tracks"
    );

    let scores = aggregate_scores(&user_vectors, &catalog_vectors);
    let catalog_ids: Vec<String> = catalog.iter().map(|t| t.id.clone()).collect();

    rank_unseen(&catalog_ids, &scores, known, limit)
}
