//! Classifier seam
//!
//! The pipeline treats the model as a black box behind [`Classifier`]:
//! anything that can fit on a feature frame and emit positive-class
//! probabilities slots in. [`LogisticRegression`] is the shipped
//! implementation: batch gradient descent on the logistic loss with
//! deterministic zero initialization and an optional L2 penalty.

use crate::error::{Error, Result};
use crate::frame::FeatureFrame;

/// A binary classifier over feature frames
///
/// `predict_proba` returns the probability mass assigned to the positive
/// (churn) class, one value per input row.
pub trait Classifier {
    /// Fit the model on features `x` and binary targets `y` (0.0 or 1.0)
    fn fit(&mut self, x: &FeatureFrame, y: &[f64]) -> Result<()>;

    /// Positive-class probability per row of `x`
    fn predict_proba(&self, x: &FeatureFrame) -> Result<Vec<f64>>;
}

/// Binary logistic regression trained by batch gradient descent
#[derive(Debug, Clone)]
pub struct LogisticRegression {
    weights: Vec<f64>,
    bias: f64,
    learning_rate: f64,
    epochs: usize,
    l2: f64,
}

impl LogisticRegression {
    /// Create an unfitted model with the given training hyperparameters
    pub fn new(learning_rate: f64, epochs: usize) -> Self {
        Self { weights: Vec::new(), bias: 0.0, learning_rate, epochs, l2: 0.0 }
    }

    /// Add an L2 penalty on the weights
    pub fn with_l2(mut self, l2: f64) -> Self {
        self.l2 = l2;
        self
    }

    /// Reconstruct a fitted model from persisted parameters; used when
    /// loading a model artifact for inference
    pub fn from_parameters(weights: Vec<f64>, bias: f64) -> Self {
        Self { weights, bias, learning_rate: 0.0, epochs: 0, l2: 0.0 }
    }

    /// Fitted weights, one per feature column
    pub fn weights(&self) -> &[f64] {
        &self.weights
    }

    /// Fitted intercept
    pub fn bias(&self) -> f64 {
        self.bias
    }

    fn decision(&self, row: &[f64]) -> f64 {
        self.weights.iter().zip(row).map(|(w, x)| w * x).sum::<f64>() + self.bias
    }
}

fn sigmoid(z: f64) -> f64 {
    1.0 / (1.0 + (-z).exp())
}

impl Classifier for LogisticRegression {
    fn fit(&mut self, x: &FeatureFrame, y: &[f64]) -> Result<()> {
        if x.n_rows() != y.len() {
            return Err(Error::Model(format!(
                "feature rows ({}) and targets ({}) differ in length",
                x.n_rows(),
                y.len()
            )));
        }
        if x.n_rows() == 0 {
            return Err(Error::Model("cannot fit on an empty feature frame".to_string()));
        }

        self.weights = vec![0.0; x.n_cols()];
        self.bias = 0.0;
        let n = x.n_rows() as f64;

        for _ in 0..self.epochs {
            let mut weight_grad = vec![0.0; self.weights.len()];
            let mut bias_grad = 0.0;

            for (row, &target) in x.rows().iter().zip(y) {
                let residual = sigmoid(self.decision(row)) - target;
                for (g, &value) in weight_grad.iter_mut().zip(row) {
                    *g += residual * value;
                }
                bias_grad += residual;
            }

            for (w, g) in self.weights.iter_mut().zip(&weight_grad) {
                *w -= self.learning_rate * (g / n + self.l2 * *w);
            }
            self.bias -= self.learning_rate * bias_grad / n;
        }

        Ok(())
    }

    fn predict_proba(&self, x: &FeatureFrame) -> Result<Vec<f64>> {
        if x.n_cols() != self.weights.len() {
            return Err(Error::Model(format!(
                "model was fitted on {} features but received {}",
                self.weights.len(),
                x.n_cols()
            )));
        }
        Ok(x.rows().iter().map(|row| sigmoid(self.decision(row))).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn separable_frame() -> (FeatureFrame, Vec<f64>) {
        // One binary feature that equals the label exactly.
        let rows: Vec<Vec<f64>> = (0..40)
            .map(|i| vec![f64::from(i % 2)])
            .collect();
        let y: Vec<f64> = (0..40).map(|i| f64::from(i % 2)).collect();
        (FeatureFrame::new(vec!["flag".to_string()], rows), y)
    }

    #[test]
    fn test_fit_learns_a_separable_problem() {
        let (x, y) = separable_frame();
        let mut model = LogisticRegression::new(0.5, 500);
        model.fit(&x, &y).unwrap();

        let proba = model.predict_proba(&x).unwrap();
        for (p, target) in proba.iter().zip(&y) {
            if *target > 0.5 {
                assert!(*p > 0.7, "positive row scored {p}");
            } else {
                assert!(*p < 0.3, "negative row scored {p}");
            }
        }
    }

    #[test]
    fn test_fit_is_deterministic() {
        let (x, y) = separable_frame();
        let mut a = LogisticRegression::new(0.1, 50);
        let mut b = LogisticRegression::new(0.1, 50);
        a.fit(&x, &y).unwrap();
        b.fit(&x, &y).unwrap();
        assert_eq!(a.weights(), b.weights());
        assert_eq!(a.bias(), b.bias());
    }

    #[test]
    fn test_probabilities_are_bounded() {
        let (x, y) = separable_frame();
        let mut model = LogisticRegression::new(1.0, 1000).with_l2(0.01);
        model.fit(&x, &y).unwrap();
        for p in model.predict_proba(&x).unwrap() {
            assert!((0.0..=1.0).contains(&p));
        }
    }

    #[test]
    fn test_mismatched_lengths_fail() {
        let (x, _) = separable_frame();
        let mut model = LogisticRegression::new(0.1, 10);
        let err = model.fit(&x, &[1.0]).unwrap_err();
        assert!(matches!(err, Error::Model(_)));
    }

    #[test]
    fn test_empty_frame_fails() {
        let x = FeatureFrame::new(vec!["a".to_string()], vec![]);
        let mut model = LogisticRegression::new(0.1, 10);
        assert!(model.fit(&x, &[]).is_err());
    }

    #[test]
    fn test_predict_proba_checks_width() {
        let model = LogisticRegression::from_parameters(vec![0.5, -0.5], 0.0);
        let x = FeatureFrame::new(vec!["a".to_string()], vec![vec![1.0]]);
        let err = model.predict_proba(&x).unwrap_err();
        assert!(err.to_string().contains("2 features"));
    }

    #[test]
    fn test_from_parameters_round_trip() {
        let model = LogisticRegression::from_parameters(vec![1.5, -2.0], 0.25);
        assert_eq!(model.weights(), [1.5, -2.0]);
        assert_eq!(model.bias(), 0.25);

        let x = FeatureFrame::new(
            vec!["a".to_string(), "b".to_string()],
            vec![vec![0.0, 0.0]],
        );
        let proba = model.predict_proba(&x).unwrap();
        assert!((proba[0] - sigmoid(0.25)).abs() < 1e-12);
    }
}
