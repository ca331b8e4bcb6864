use super::vectorizer::SparseVector;

/// Cosine similarity clamped to `[0, 1]`.
///
/// Zero-norm vectors (texts without any term) score 0. Non-finite
/// intermediate values also collapse to 0.
pub fn cosine_similarity(left: &SparseVector, right: &SparseVector) -> f64 {
    let denominator = left.norm() * right.norm();
    if denominator == 0.0 || !denominator.is_finite() {
        return 0.0;
    }
    clamp_score(left.dot(right) / denominator)
}

pub(crate) fn clamp_score(score: f64) -> f64 {
    if !score.is_finite() || score <= 0.0 {
        0.0
    } else if score >= 1.0 {
        1.0
    } else {
        score
    }
}
