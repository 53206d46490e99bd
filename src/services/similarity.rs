use std::collections::HashSet;

/// Cosine similarity between two equal-length vectors
///
/// Defined as 0 when either vector has zero magnitude, so a track with no
/// usable metadata never produces NaN.
pub fn cosine_similarity(a: &[f64], b: &[f64]) -> f64 {
    let dot: f64 = a.iter().zip(b.iter()).map(|(x, y)| x * y).sum();
    let norm_a = a.iter().map(|x| x * x).sum::<f64>().sqrt();
    let norm_b = b.iter().map(|x| x * x).sum::<f64>().sqrt();

    if norm_a == 0.0 || norm_b == 0.0 {
        return 0.0;
    }

    (dot / (norm_a * norm_b)).clamp(-1.0, 1.0)
}

/// Mean similarity of each catalog vector across all user vectors
///
/// Returns one score per catalog row, in catalog order. With no user vectors
/// every score is 0.
pub fn aggregate_scores(user_vectors: &[Vec<f64>], catalog_vectors: &[Vec<f64>]) -> Vec<f64> {
    if user_vectors.is_empty() {
        return vec![0.0; catalog_vectors.len()];
    }

    let n = user_vectors.len() as f64;
    catalog_vectors
        .iter()
        .map(|candidate| {
            let total: f64 = user_vectors
                .iter()
                .map(|u| cosine_similarity(u, candidate))
                .sum();
            total / n
        })
        .collect()
}

/// Picks the `limit` best-scoring catalog IDs the user does not already know
///
/// `catalog_ids` and `scores` are parallel slices. Sorting is stable, so exact
/// ties keep catalog order.
pub fn rank_unseen(
    catalog_ids: &[String],
    scores: &[f64],
    known: &HashSet<String>,
    limit: usize,
) -> Vec<String> {
    let mut candidates: Vec<(&String, f64)> = catalog_ids
        .iter()
        .zip(scores.iter().copied())
        .filter(|(id, _)| !known.contains(*id))
        .collect();

    candidates.sort_by(|a, b| b.1.total_cmp(&a.1));

    candidates
        .into_iter()
        .take(limit)
        .map(|(id, _)| id.clone())
        .collect()
}
