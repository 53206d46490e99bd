use uuid::Uuid;

use crate::{error::AppResult, models::TrackRecord};

/// Everything one recommendation request reads, taken from a single view of
/// the data
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RecommendationSnapshot {
    /// Sorted, distinct IDs from [`TrackStore::known_track_ids`]
    pub known_ids: Vec<String>,
    /// Rows for `known_ids`
    pub user_tracks: Vec<TrackRecord>,
    pub catalog: Vec<TrackRecord>,
}

/// Read access to imported listening data
///
/// The recommendation and statistics services only ever see typed
/// [`TrackRecord`]s through this trait; the import jobs that populate the
/// underlying tables live outside this crate.
#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait TrackStore: Send + Sync {
    /// Distinct track IDs the user has liked, has in their top tracks, has
    /// streamed, or has in one of their own playlists
    ///
    /// Returned sorted so downstream computations are reproducible.
    async fn known_track_ids(&self, user_id: Uuid) -> AppResult<Vec<String>>;

    /// Track records for the given IDs; IDs with no `tracks` row are skipped
    async fn tracks_by_ids(&self, ids: &[String]) -> AppResult<Vec<TrackRecord>>;

    /// Every track in the catalog, in a stable order
    async fn catalog_tracks(&self) -> AppResult<Vec<TrackRecord>>;

    /// Track records for liked, top and streamed tracks; playlist membership
    /// does not count as listening
    async fn listening_tracks(&self, user_id: Uuid) -> AppResult<Vec<TrackRecord>>;

    /// Known IDs, their rows and the catalog, read consistently
    ///
    /// Stops after the first read when the user knows no tracks. The default
    /// issues the three reads in sequence and suits stores that are not
    /// written concurrently; stores with concurrent writers override it to
    /// read from one snapshot.
    async fn recommendation_snapshot(&self, user_id: Uuid) -> AppResult<RecommendationSnapshot> {
        let known_ids = self.known_track_ids(user_id).await?;
        if known_ids.is_empty() {
            return Ok(RecommendationSnapshot::default());
        }

        let user_tracks = self.tracks_by_ids(&known_ids).await?;
        let catalog = self.catalog_tracks().await?;

        Ok(RecommendationSnapshot {
            known_ids,
            user_tracks,
            catalog,
        })
    }
}
