//! Evaluation metrics for the training pipeline.

/// Thresholded binary accuracy over predicted probabilities.
///
/// Probabilities at or above `threshold` count as the positive class.
/// Returns `0.0` for empty input.
pub fn accuracy(probabilities: &[f64], targets: &[f64], threshold: f64) -> f64 {
    if probabilities.is_empty() {
        return 0.0;
    }
    let correct = probabilities
        .iter()
        .zip(targets)
        .filter(|(p, t)| (**p >= threshold) == (**t >= 0.5))
        .count();
    correct as f64 / probabilities.len() as f64
}
