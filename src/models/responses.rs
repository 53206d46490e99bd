use serde::{Serialize, Serializer};

/// Response body for the recommendations endpoint
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct RecommendationsResponse {
    /// Track IDs, most relevant first
    pub recommendations: Vec<String>,
}

/// Most frequent genres across the user's listening tracks
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct TopGenresResponse {
    /// `(genre, track count)` pairs, most frequent first
    pub top_genres: Vec<(String, usize)>,
}

/// Most frequent artists across the user's listening tracks
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct TopArtistsResponse {
    pub top_artists: Vec<(String, usize)>,
}

/// Aggregate figures over the user's listening tracks that carry both
/// popularity and release date
#[derive(Debug, Clone, Serialize, PartialEq, Default)]
pub struct TrackSummary {
    /// Mean popularity rounded to two decimals; `None` when no track qualifies
    pub average_popularity: Option<f64>,
    /// `(year, track count)` pairs, newest year first; serialized as a JSON
    /// object keyed by year
    #[serde(serialize_with = "serialize_pairs_as_map")]
    pub release_year_distribution: Vec<(String, usize)>,
    /// Number of distinct genre tags
    pub genre_diversity: usize,
    pub total_unique_tracks: usize,
}

/// Writes `(key, value)` pairs as a JSON object, keeping their order
fn serialize_pairs_as_map<S>(pairs: &[(String, usize)], serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.collect_map(pairs.iter().map(|(key, value)| (key, value)))
}
