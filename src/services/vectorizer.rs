//! Track feature vectors
//!
//! A track becomes `[popularity, release_year, genre flags...]`, where the
//! genre flags are a one-hot encoding against a [`GenreVocabulary`] built from
//! the whole catalog. Vectors built against the same vocabulary always have
//! the same length and dimension meaning.

use std::collections::{BTreeSet, HashMap};

use crate::models::TrackRecord;

/// Number of leading numeric features before the genre flags
pub const NUMERIC_FEATURES: usize = 2;

/// Sorted, deduplicated genre tags seen across a catalog snapshot
#[derive(Debug, Clone, PartialEq, Default)]
pub struct GenreVocabulary {
    genres: Vec<String>,
    index: HashMap<String, usize>,
}

impl GenreVocabulary {
    /// Builds the vocabulary from every track's genre tags
    ///
    /// Output is sorted lexicographically, so a fixed catalog always yields
    /// the same indices regardless of row order.
    pub fn build(tracks: &[TrackRecord]) -> Self {
        let distinct: BTreeSet<String> = tracks.iter().flat_map(|t| t.genre_tags()).collect();
        Self::from_sorted(distinct.into_iter().collect())
    }

    fn from_sorted(genres: Vec<String>) -> Self {
        let index = genres
            .iter()
            .enumerate()
            .map(|(i, genre)| (genre.clone(), i))
            .collect();

        Self { genres, index }
    }

    pub fn len(&self) -> usize {
        self.genres.len()
    }

    pub fn is_empty(&self) -> bool {
        self.genres.is_empty()
    }

    pub fn genres(&self) -> &[String] {
        &self.genres
    }

    pub fn position(&self, genre: &str) -> Option<usize> {
        self.index.get(genre).copied()
    }

    /// Length of every feature vector built against this vocabulary
    pub fn dimensions(&self) -> usize {
        NUMERIC_FEATURES + self.genres.len()
    }
}

/// Encodes a track as a feature vector
///
/// Missing popularity and missing or unparseable release dates become 0.
/// Genre tags outside the vocabulary are ignored.
pub fn vectorize(track: &TrackRecord, vocabulary: &GenreVocabulary) -> Vec<f64> {
    let mut vector = vec![0.0; vocabulary.dimensions()];

    vector[0] = f64::from(track.popularity.unwrap_or(0));
    vector[1] = f64::from(track.release_year().unwrap_or(0));

    for genre in track.genre_tags() {
        if let Some(i) = vocabulary.position(&genre) {
            vector[NUMERIC_FEATURES + i] = 1.0;
        }
    }

    vector
}

/// Encodes every track against the same vocabulary
pub fn vectorize_all(tracks: &[TrackRecord], vocabulary: &GenreVocabulary) -> Vec<Vec<f64>> {
    tracks.iter().map(|t| vectorize(t, vocabulary)).collect()
}
