use std::collections::{BTreeMap, HashMap, HashSet};
use std::sync::Arc;

use uuid::Uuid;

use crate::{
    db::TrackStore,
    error::AppResult,
    models::{TopArtistsResponse, TopGenresResponse, TrackRecord, TrackSummary},
};

/// Number of entries returned by the top-N statistics
pub const TOP_N: usize = 10;

/// Listening statistics over the user's liked, top and streamed tracks
#[derive(Clone)]
pub struct StatsService {
    store: Arc<dyn TrackStore>,
}

impl StatsService {
    pub fn new(store: Arc<dyn TrackStore>) -> Self {
        Self { store }
    }

    pub async fn top_genres(&self, user_id: Uuid) -> AppResult<TopGenresResponse> {
        let tracks = self.store.listening_tracks(user_id).await?;
        tracing::debug!(user_id = %user_id, tracks = tracks.len(), "Computing top genres");

        Ok(TopGenresResponse {
            top_genres: top_genres(&tracks, TOP_N),
        })
    }

    pub async fn top_artists(&self, user_id: Uuid) -> AppResult<TopArtistsResponse> {
        let tracks = self.store.listening_tracks(user_id).await?;
        tracing::debug!(user_id = %user_id, tracks = tracks.len(), "Computing top artists");

        Ok(TopArtistsResponse {
            top_artists: top_artists(&tracks, TOP_N),
        })
    }

    pub async fn track_summary(&self, user_id: Uuid) -> AppResult<TrackSummary> {
        let tracks = self.store.listening_tracks(user_id).await?;
        Ok(track_summary(&tracks))
    }
}

/// Most frequent genre tags, count descending then name ascending
pub fn top_genres(tracks: &[TrackRecord], n: usize) -> Vec<(String, usize)> {
    let mut counts: HashMap<String, usize> = HashMap::new();
    for genre in tracks.iter().flat_map(|t| t.genre_tags()) {
        *counts.entry(genre).or_insert(0) += 1;
    }
    top_counts(counts, n)
}

/// Most frequent artists; tracks without an artist are skipped
pub fn top_artists(tracks: &[TrackRecord], n: usize) -> Vec<(String, usize)> {
    let mut counts: HashMap<String, usize> = HashMap::new();
    for artist in tracks.iter().filter_map(|t| t.artist.as_deref()) {
        if artist.is_empty() {
            continue;
        }
        *counts.entry(artist.to_string()).or_insert(0) += 1;
    }
    top_counts(counts, n)
}

fn top_counts(counts: HashMap<String, usize>, n: usize) -> Vec<(String, usize)> {
    let mut entries: Vec<(String, usize)> = counts.into_iter().collect();
    entries.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
    entries.truncate(n);
    entries
}

/// Summary over tracks that have both popularity and a release date
pub fn track_summary(tracks: &[TrackRecord]) -> TrackSummary {
    let mut total_popularity: i64 = 0;
    let mut total_tracks = 0usize;
    let mut release_years: BTreeMap<String, usize> = BTreeMap::new();
    let mut genres: HashSet<String> = HashSet::new();

    for track in tracks {
        let (Some(popularity), Some(release_date)) =
            (track.popularity, track.release_date.as_deref())
        else {
            continue;
        };

        total_tracks += 1;
        total_popularity += i64::from(popularity);

        let year: String = release_date.chars().take(4).collect();
        *release_years.entry(year).or_insert(0) += 1;

        genres.extend(track.genre_tags());
    }

    if total_tracks == 0 {
        return TrackSummary::default();
    }

    let average = total_popularity as f64 / total_tracks as f64;

    TrackSummary {
        average_popularity: Some((average * 100.0).round() / 100.0),
        release_year_distribution: release_years.into_iter().rev().collect(),
        genre_diversity: genres.len(),
        total_unique_tracks: total_tracks,
    }
}
