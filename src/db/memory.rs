use std::collections::{BTreeSet, HashMap, HashSet};

use uuid::Uuid;

use crate::{db::TrackStore, error::AppResult, models::TrackRecord};

/// Per-user track associations, mirroring the link tables
#[derive(Debug, Clone, Default)]
struct UserLibrary {
    liked: Vec<String>,
    top: Vec<String>,
    history: Vec<String>,
    playlists: Vec<Vec<String>>,
}

/// In-memory [`TrackStore`]
///
/// Catalog order is insertion order, which makes tie-break behaviour easy to
/// pin down in tests. Built up front with the `with_*` methods and read-only
/// afterwards.
#[derive(Debug, Clone, Default)]
pub struct InMemoryTrackStore {
    tracks: Vec<TrackRecord>,
    users: HashMap<Uuid, UserLibrary>,
}

impl InMemoryTrackStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a catalog track, replacing any existing track with the same ID
    pub fn with_track(mut self, track: TrackRecord) -> Self {
        if let Some(existing) = self.tracks.iter_mut().find(|t| t.id == track.id) {
            *existing = track;
        } else {
            self.tracks.push(track);
        }
        self
    }

    pub fn with_liked(mut self, user_id: Uuid, track_id: &str) -> Self {
        self.library(user_id).liked.push(track_id.to_string());
        self
    }

    pub fn with_top(mut self, user_id: Uuid, track_id: &str) -> Self {
        self.library(user_id).top.push(track_id.to_string());
        self
    }

    pub fn with_history(mut self, user_id: Uuid, track_id: &str) -> Self {
        self.library(user_id).history.push(track_id.to_string());
        self
    }

    /// Adds a playlist owned by the user
    pub fn with_playlist(mut self, user_id: Uuid, track_ids: &[&str]) -> Self {
        let tracks = track_ids.iter().map(|id| id.to_string()).collect();
        self.library(user_id).playlists.push(tracks);
        self
    }

    fn library(&mut self, user_id: Uuid) -> &mut UserLibrary {
        self.users.entry(user_id).or_default()
    }

    fn records_for(&self, ids: &HashSet<&str>) -> Vec<TrackRecord> {
        self.tracks
            .iter()
            .filter(|t| ids.contains(t.id.as_str()))
            .cloned()
            .collect()
    }
}

#[async_trait::async_trait]
impl TrackStore for InMemoryTrackStore {
    async fn known_track_ids(&self, user_id: Uuid) -> AppResult<Vec<String>> {
        let Some(library) = self.users.get(&user_id) else {
            return Ok(Vec::new());
        };

        let ids: BTreeSet<String> = library
            .liked
            .iter()
            .chain(library.top.iter())
            .chain(library.history.iter())
            .chain(library.playlists.iter().flatten())
            .cloned()
            .collect();

        Ok(ids.into_iter().collect())
    }

    async fn tracks_by_ids(&self, ids: &[String]) -> AppResult<Vec<TrackRecord>> {
        let wanted: HashSet<&str> = ids.iter().map(String::as_str).collect();
        Ok(self.records_for(&wanted))
    }

    async fn catalog_tracks(&self) -> AppResult<Vec<TrackRecord>> {
        Ok(self.tracks.clone())
    }

    async fn listening_tracks(&self, user_id: Uuid) -> AppResult<Vec<TrackRecord>> {
        let Some(library) = self.users.get(&user_id) else {
            return Ok(Vec::new());
        };

        let wanted: HashSet<&str> = library
            .liked
            .iter()
            .chain(library.top.iter())
            .chain(library.history.iter())
            .map(String::as_str)
            .collect();

        Ok(self.records_for(&wanted))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::RecommendationSnapshot;

    fn store_with_user(user: Uuid) -> InMemoryTrackStore {
        InMemoryTrackStore::new()
            .with_track(TrackRecord::new("a"))
            .with_track(TrackRecord::new("b"))
            .with_track(TrackRecord::new("c"))
            .with_track(TrackRecord::new("d"))
            .with_liked(user, "c")
            .with_top(user, "a")
            .with_history(user, "c")
            .with_playlist(user, &["d"])
    }

    #[tokio::test]
    async fn test_known_track_ids_union_sorted_and_distinct() {
        let user = Uuid::new_v4();
        let store = store_with_user(user);

        let ids = store.known_track_ids(user).await.unwrap();
        assert_eq!(ids, vec!["a", "c", "d"]);
    }

    #[tokio::test]
    async fn test_listening_tracks_exclude_playlists() {
        let user = Uuid::new_v4();
        let store = store_with_user(user);

        let ids: Vec<String> = store
            .listening_tracks(user)
            .await
            .unwrap()
            .into_iter()
            .map(|t| t.id)
            .collect();
        assert_eq!(ids, vec!["a", "c"]);
    }

    #[tokio::test]
    async fn test_other_users_playlists_are_not_known() {
        let user = Uuid::new_v4();
        let other = Uuid::new_v4();
        let store = store_with_user(user).with_playlist(other, &["b"]);

        let ids = store.known_track_ids(user).await.unwrap();
        assert!(!ids.contains(&"b".to_string()));
    }

    #[tokio::test]
    async fn test_unknown_user_is_empty() {
        let store = store_with_user(Uuid::new_v4());
        assert!(store.known_track_ids(Uuid::new_v4()).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_snapshot_collects_profile_and_catalog() {
        let user = Uuid::new_v4();
        let store = store_with_user(user).with_liked(user, "missing");

        let snapshot = store.recommendation_snapshot(user).await.unwrap();

        assert_eq!(snapshot.known_ids, vec!["a", "c", "d", "missing"]);
        let profile: Vec<&str> = snapshot.user_tracks.iter().map(|t| t.id.as_str()).collect();
        assert_eq!(profile, vec!["a", "c", "d"]);
        assert_eq!(snapshot.catalog.len(), 4);
    }

    #[tokio::test]
    async fn test_snapshot_stops_when_user_knows_nothing() {
        let store = store_with_user(Uuid::new_v4());

        let snapshot = store.recommendation_snapshot(Uuid::new_v4()).await.unwrap();

        assert_eq!(snapshot, RecommendationSnapshot::default());
    }

    #[tokio::test]
    async fn test_with_track_replaces_existing() {
        let store = InMemoryTrackStore::new()
            .with_track(TrackRecord::new("a"))
            .with_track(TrackRecord::new("a").with_popularity(40));

        let catalog = store.catalog_tracks().await.unwrap();
        assert_eq!(catalog.len(), 1);
        assert_eq!(catalog[0].popularity, Some(40));
    }
}
