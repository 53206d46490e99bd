/// A catalog track as stored in the `tracks` table
///
/// Metadata columns are nullable: tracks are inserted by the import jobs with
/// identity fields only and filled in later by the enrichment job.
#[derive(Debug, Clone, PartialEq, sqlx::FromRow)]
pub struct TrackRecord {
    /// Streaming-service track ID
    pub id: String,
    pub artist: Option<String>,
    /// Popularity score, 0-100 when present
    pub popularity: Option<i32>,
    /// Release date as reported upstream ("2020", "2020-05" or "2020-05-17")
    pub release_date: Option<String>,
    /// Genre tags serialized as a JSON array of strings
    pub genres: Option<String>,
}

impl TrackRecord {
    /// Creates a track with no metadata
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            artist: None,
            popularity: None,
            release_date: None,
            genres: None,
        }
    }

    pub fn with_artist(mut self, artist: impl Into<String>) -> Self {
        self.artist = Some(artist.into());
        self
    }

    pub fn with_popularity(mut self, popularity: i32) -> Self {
        self.popularity = Some(popularity);
        self
    }

    pub fn with_release_date(mut self, release_date: impl Into<String>) -> Self {
        self.release_date = Some(release_date.into());
        self
    }

    /// Sets the genre tags, serializing them the way the enrichment job stores them
    pub fn with_genres(mut self, genres: &[&str]) -> Self {
        self.genres = serde_json::to_string(genres).ok();
        self
    }

    /// Release year taken from the first four characters of the release date
    pub fn release_year(&self) -> Option<i32> {
        let date = self.release_date.as_deref()?;
        let year: String = date.chars().take(4).collect();
        year.trim().parse().ok()
    }

    /// Decoded genre tags
    ///
    /// Missing or malformed genre text yields no tags; a single bad row never
    /// fails the caller.
    pub fn genre_tags(&self) -> Vec<String> {
        let raw = match self.genres.as_deref() {
            Some(raw) if !raw.trim().is_empty() => raw,
            _ => return Vec::new(),
        };

        match serde_json::from_str::<Vec<String>>(raw) {
            Ok(tags) => tags,
            Err(e) => {
                tracing::debug!(track_id = %self.id, error = %e, "Ignoring malformed genre data");
                Vec::new()
            }
        }
    }
}
